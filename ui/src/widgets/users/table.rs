//! Users table, in a Typora-like style with clean borders.
//!
//! Rendered with `egui::Grid` so every row's buttons are reachable through
//! accesskit in widget tests.

use accounts_business::{AccountType, FilteredUsersCompute, User, users};
use accounts_states::StateCtx;
use egui::{Frame, InnerResponse, Margin, RichText, ScrollArea, Stroke, Ui};

use crate::utils::colors::{COLOR_MUTED, HEADER_BG_COLOR, TABLE_BORDER_COLOR, role_colors};

const COLUMNS: [&str; 5] = ["Name", "Email", "Role", "Created At", "Actions"];

enum RowAction {
    Edit(User),
    Delete(User),
}

fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

/// Coloured pill with the role's label.
pub fn role_tag(ui: &mut Ui, account_type: AccountType) {
    let (fill, text) = role_colors(account_type);
    Frame::NONE
        .fill(fill)
        .corner_radius(8.0)
        .inner_margin(Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(account_type.label()).color(text).small());
        });
}

pub fn users_table(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let mut action = None;

    {
        let rows: &[User] = state_ctx
            .cached::<FilteredUsersCompute>()
            .map(|c| c.users.as_slice())
            .unwrap_or_default();

        if rows.is_empty() {
            ui.label(RichText::new("No users found").color(COLOR_MUTED));
            return;
        }

        Frame::NONE
            .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
            .inner_margin(Margin::ZERO)
            .show(ui, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    egui::Grid::new("users_table")
                        .num_columns(COLUMNS.len())
                        .striped(true)
                        .spacing([16.0, 0.0])
                        .min_col_width(60.0)
                        .show(ui, |ui| {
                            for title in COLUMNS {
                                header_cell(ui, |ui| ui.strong(title));
                            }
                            ui.end_row();

                            for user in rows {
                                if let Some(clicked) = user_row(ui, user) {
                                    action = Some(clicked);
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }

    match action {
        Some(RowAction::Edit(user)) => users::open_edit_dialog(state_ctx, &user),
        Some(RowAction::Delete(user)) => {
            users::request_delete(state_ctx, &user);
        }
        None => {}
    }
}

fn user_row(ui: &mut Ui, user: &User) -> Option<RowAction> {
    data_cell(ui, |ui| ui.label(RichText::new(user.full_name()).strong()));
    data_cell(ui, |ui| ui.label(&user.email));
    data_cell(ui, |ui| role_tag(ui, user.account_type));
    data_cell(ui, |ui| ui.label(user.created_label()));

    data_cell(ui, |ui| {
        ui.horizontal(|ui| {
            let mut action = None;
            if ui.button("Edit").on_hover_text("Edit user").clicked() {
                action = Some(RowAction::Edit(user.clone()));
            }
            let deletable = user.account_type.can_be_deleted();
            let delete = ui
                .add_enabled(deletable, egui::Button::new("Delete"))
                .on_hover_text("Delete user")
                .on_disabled_hover_text("SuperAdmin accounts cannot be deleted");
            if delete.clicked() {
                action = Some(RowAction::Delete(user.clone()));
            }
            action
        })
        .inner
    })
    .inner
}

use accounts_business::{
    AccountType, FetchUsersCompute, UserFilterState, UsersApiError, UsersState, users,
};
use accounts_states::StateCtx;
use egui::{ComboBox, RichText, TextEdit, Ui};

use super::{dialogs, table};
use crate::utils::colors::{COLOR_MUTED, COLOR_RED};

/// Displays the user management screen and whichever dialog is open.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) {
    ui.vertical(|ui| {
        header(state_ctx, ui);
        ui.add_space(12.0);
        toolbar(state_ctx, ui);
        ui.add_space(8.0);

        if let Some(err) = fetch_error(state_ctx) {
            ui.colored_label(COLOR_RED, format!("Failed to load users: {err}"));
        }

        if state_ctx.state::<UsersState>().is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading users...");
            });
        } else {
            table::users_table(state_ctx, ui);
        }
    });

    let egui_ctx = ui.ctx().clone();
    dialogs::create_user_dialog(state_ctx, &egui_ctx);
    dialogs::edit_user_dialog(state_ctx, &egui_ctx);
    dialogs::delete_user_dialog(state_ctx, &egui_ctx);
}

fn header(state_ctx: &mut StateCtx, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("User Management");
            ui.label(
                RichText::new("Manage and control user access across your organization")
                    .color(COLOR_MUTED),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add User").clicked() {
                users::open_create_dialog(state_ctx);
            }
        });
    });
}

fn toolbar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    // Edit copies so the filter compute only goes dirty on real changes.
    let current = state_ctx.state::<UserFilterState>().clone();
    let mut search = current.search.clone();
    let mut role = current.role;
    let mut refresh = false;

    ui.horizontal(|ui| {
        ui.add(
            TextEdit::singleline(&mut search)
                .hint_text("Search users by name or email...")
                .desired_width(280.0),
        );

        ComboBox::from_id_salt("role_filter")
            .selected_text(role.map_or("All Roles", AccountType::label))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut role, None, "All Roles");
                for account_type in AccountType::ALL {
                    ui.selectable_value(&mut role, Some(account_type), account_type.label());
                }
            });

        refresh = ui.button("Refresh").clicked();
    });

    if search != current.search || role != current.role {
        state_ctx.update::<UserFilterState>(|f| {
            f.search = search;
            f.role = role;
        });
    }
    if refresh {
        users::reload_users(state_ctx);
    }
}

fn fetch_error(state_ctx: &StateCtx) -> Option<UsersApiError> {
    state_ctx
        .cached::<FetchUsersCompute>()
        .and_then(|c| c.result.error().cloned())
        // Signed-out operators just see an empty table.
        .filter(|err| *err != UsersApiError::MissingCredential)
}

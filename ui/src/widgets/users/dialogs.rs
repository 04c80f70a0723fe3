//! Create, edit and delete dialogs.

use accounts_business::{
    AccountType, CreateUserCompute, DeleteUserCompute, EditUserDraft, UpdateUserCompute,
    UserDialogsState, users,
};
use accounts_states::StateCtx;
use egui::{Color32, ComboBox, Context, Grid, RichText, TextEdit, Ui, Window};

use crate::utils::colors::{COLOR_MUTED, COLOR_RED};

fn form_row(ui: &mut Ui, label: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.label(label);
    add_contents(ui);
    ui.end_row();
}

fn account_type_combo(ui: &mut Ui, id: &str, selected: &mut AccountType) {
    ComboBox::from_id_salt(id)
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            for account_type in AccountType::ASSIGNABLE {
                ui.selectable_value(selected, account_type, account_type.label());
            }
        });
}

fn error_line(ui: &mut Ui, message: Option<String>) {
    if let Some(message) = message {
        ui.add_space(4.0);
        ui.colored_label(COLOR_RED, message);
    }
}

fn edit_profile_form(ui: &mut Ui, draft: &mut EditUserDraft) {
    Grid::new("edit_user_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            form_row(ui, "First Name", |ui| {
                ui.text_edit_singleline(&mut draft.first_name);
            });
            form_row(ui, "Last Name", |ui| {
                ui.text_edit_singleline(&mut draft.last_name);
            });
            form_row(ui, "Email", |ui| {
                ui.vertical(|ui| {
                    let mut email = draft.email.clone();
                    ui.add_enabled(false, TextEdit::singleline(&mut email));
                    ui.label(
                        RichText::new("Email cannot be changed")
                            .small()
                            .color(COLOR_MUTED),
                    );
                });
            });
            form_row(ui, "Account Type", |ui| {
                ui.vertical(|ui| {
                    let locked = draft.role_locked();
                    let mut selected = draft.account_type();
                    if locked {
                        ui.add_enabled_ui(false, |ui| {
                            ui.label(selected.label());
                        });
                        ui.label(
                            RichText::new("SuperAdmin role cannot be changed")
                                .small()
                                .color(COLOR_MUTED),
                        );
                    } else {
                        account_type_combo(ui, "edit_account_type", &mut selected);
                        if selected != draft.account_type() {
                            draft.set_account_type(selected);
                        }
                    }
                });
            });
        });
}

pub fn create_user_dialog(state_ctx: &mut StateCtx, egui_ctx: &Context) {
    if !state_ctx.state::<UserDialogsState>().create_open {
        return;
    }
    let (pending, error) = state_ctx
        .cached::<CreateUserCompute>()
        .map(|c| (c.result.is_pending(), c.result.error().map(ToString::to_string)))
        .unwrap_or_default();

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;

    let dialogs = state_ctx.state_mut::<UserDialogsState>();
    Window::new("Create New User")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(egui_ctx, |ui| {
            let draft = &mut dialogs.create;
            Grid::new("create_user_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    form_row(ui, "First Name", |ui| {
                        ui.add(TextEdit::singleline(&mut draft.first_name).hint_text("First Name"));
                    });
                    form_row(ui, "Last Name", |ui| {
                        ui.add(TextEdit::singleline(&mut draft.last_name).hint_text("Last Name"));
                    });
                    form_row(ui, "Email", |ui| {
                        ui.add(TextEdit::singleline(&mut draft.email).hint_text("Email"));
                    });
                    form_row(ui, "Password", |ui| {
                        ui.add(
                            TextEdit::singleline(&mut draft.password)
                                .password(true)
                                .hint_text("Password"),
                        );
                    });
                    form_row(ui, "Account Type", |ui| {
                        account_type_combo(ui, "create_account_type", &mut draft.account_type);
                    });
                });

            error_line(ui, error);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                submit = ui
                    .add_enabled(!pending, egui::Button::new("Create Account"))
                    .clicked();
                cancel = ui.button("Cancel").clicked();
                if pending {
                    ui.spinner();
                }
            });
        });

    if submit {
        users::submit_create(state_ctx);
    } else if cancel || !open {
        users::cancel_create_dialog(state_ctx);
    }
}

pub fn edit_user_dialog(state_ctx: &mut StateCtx, egui_ctx: &Context) {
    if state_ctx.state::<UserDialogsState>().edit.is_none() {
        return;
    }
    let (pending, error) = state_ctx
        .cached::<UpdateUserCompute>()
        .map(|c| (c.result.is_pending(), c.result.error().map(ToString::to_string)))
        .unwrap_or_default();

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;

    let dialogs = state_ctx.state_mut::<UserDialogsState>();
    let profile_error = dialogs.profile_error;
    let password_error = dialogs.password_error;
    let Some(draft) = dialogs.edit.as_mut() else {
        return;
    };
    let mut new_password = draft.new_password.clone();
    let mut confirm_password = draft.confirm_password.clone();

    Window::new("Edit User")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(egui_ctx, |ui| {
            edit_profile_form(ui, draft);
            error_line(ui, profile_error.map(|e| e.to_string()));

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.strong("Change Password");
                ui.label(RichText::new("Optional").small().color(COLOR_MUTED));
            });
            Grid::new("edit_password_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    form_row(ui, "New Password", |ui| {
                        ui.add(TextEdit::singleline(&mut new_password).password(true));
                    });
                    form_row(ui, "Confirm Password", |ui| {
                        ui.add(TextEdit::singleline(&mut confirm_password).password(true));
                    });
                });

            error_line(ui, password_error.map(|e| e.to_string()));
            error_line(ui, error);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                submit = ui
                    .add_enabled(!pending, egui::Button::new("Save Changes"))
                    .clicked();
                cancel = ui.button("Cancel").clicked();
                if pending {
                    ui.spinner();
                }
            });
        });

    // Typing in a password field clears the previous password error.
    let dialogs = state_ctx.state_mut::<UserDialogsState>();
    if dialogs
        .edit
        .as_ref()
        .is_some_and(|d| d.new_password != new_password)
    {
        dialogs.set_new_password(new_password);
    }
    if dialogs
        .edit
        .as_ref()
        .is_some_and(|d| d.confirm_password != confirm_password)
    {
        dialogs.set_confirm_password(confirm_password);
    }

    if submit {
        users::submit_edit(state_ctx);
    } else if cancel || !open {
        users::cancel_edit_dialog(state_ctx);
    }
}

pub fn delete_user_dialog(state_ctx: &mut StateCtx, egui_ctx: &Context) {
    let Some(pending_delete) = state_ctx.state::<UserDialogsState>().pending_delete.clone() else {
        return;
    };
    let (in_flight, error) = state_ctx
        .cached::<DeleteUserCompute>()
        .map(|c| (c.result.is_pending(), c.result.error().map(ToString::to_string)))
        .unwrap_or_default();

    let mut open = true;
    let mut confirm = false;
    let mut cancel = false;

    Window::new("Delete User")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.label(users::DELETE_CONFIRMATION);
            ui.label(RichText::new(&pending_delete.name).strong());

            error_line(ui, error);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                confirm = ui
                    .add_enabled(
                        !in_flight,
                        egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                            .fill(COLOR_RED),
                    )
                    .clicked();
                cancel = ui.button("Cancel").clicked();
                if in_flight {
                    ui.spinner();
                }
            });
        });

    if confirm {
        users::confirm_delete(state_ctx);
    } else if cancel || !open {
        users::cancel_delete(state_ctx);
    }
}

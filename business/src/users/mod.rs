//! User management: model, API calls, screen state and the four flows.

pub mod api;
mod create;
mod delete;
mod draft;
mod edit;
mod fetch;
mod filter;
pub mod model;
mod outcome;
mod state;

pub use api::{UsersApi, UsersApiError};
pub use create::{
    CreateUserCommand, CreateUserCompute, CreateUserError, cancel_create_dialog,
    open_create_dialog, submit_create,
};
pub use delete::{
    DELETE_CONFIRMATION, DeleteUserCommand, DeleteUserCompute, cancel_delete, confirm_delete,
    request_delete,
};
pub use draft::{
    CreateUserDraft, DraftError, EditUserDraft, MIN_PASSWORD_LEN, PasswordError, apply_profile,
};
pub use edit::{
    UpdateUserCommand, UpdateUserCompute, UpdateUserError, cancel_edit_dialog, open_edit_dialog,
    submit_edit,
};
pub use fetch::{FetchUsersCommand, FetchUsersCompute, load_users_once, reload_users};
pub use filter::{FilteredUsersCompute, filter_users};
pub use model::{AccountType, User};
pub use outcome::OperationResult;
pub use state::{PendingDelete, UserDialogsState, UserFilterState, UsersState};

use accounts_states::StateCtx;

/// Registers every state, compute and command of the user screen.
///
/// `BusinessConfig` and `Session` are provided by the host.
pub fn register(ctx: &mut StateCtx) {
    ctx.add_state(UsersState::default());
    ctx.add_state(UserFilterState::default());
    ctx.add_state(UserDialogsState::default());

    ctx.record_compute(FilteredUsersCompute::default());
    ctx.record_compute(FetchUsersCompute::default());
    ctx.record_compute(CreateUserCompute::default());
    ctx.record_compute(UpdateUserCompute::default());
    ctx.record_compute(DeleteUserCompute::default());

    ctx.record_command(FetchUsersCommand);
    ctx.record_command(CreateUserCommand);
    ctx.record_command(UpdateUserCommand);
    ctx.record_command(DeleteUserCommand);
}

//! Business layer of the accounts admin panel.
//!
//! UI code reads the states and computes defined here and dispatches the
//! commands; all network IO happens inside commands.

mod config;
pub mod http;
mod session;
pub mod users;

#[cfg(test)]
mod test_utils;

pub use config::{BusinessConfig, ConfigError, DEFAULT_API_BASE_URL};
pub use session::Session;
pub use users::{
    AccountType, CreateUserCommand, CreateUserCompute, CreateUserDraft, CreateUserError,
    DeleteUserCommand, DeleteUserCompute, DraftError, EditUserDraft, FetchUsersCommand,
    FetchUsersCompute, FilteredUsersCompute, OperationResult, PasswordError, PendingDelete,
    UpdateUserCommand, UpdateUserCompute, UpdateUserError, User, UserDialogsState,
    UserFilterState, UsersApiError, UsersState,
};

use accounts_states::StateCtx;

/// Builds a context with every state, compute and command of the panel.
pub fn build_state_ctx(config: BusinessConfig, session: Session) -> StateCtx {
    let mut ctx = StateCtx::new();
    ctx.add_state(config);
    ctx.add_state(session);
    users::register(&mut ctx);
    ctx
}

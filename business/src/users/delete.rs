use std::any::Any;

use accounts_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, StateCtx,
    Updater,
};
use tokio_util::sync::CancellationToken;

use crate::{BusinessConfig, Session};

use super::api::{UsersApi, UsersApiError};
use super::model::User;
use super::outcome::OperationResult;
use super::state::{UserDialogsState, UsersState};

/// Prompt shown before a user is deleted.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";

/// Outcome of the last delete attempt.
#[derive(Debug, Clone, Default)]
pub struct DeleteUserCompute {
    pub result: OperationResult<UsersApiError>,
}

impl SnapshotClone for DeleteUserCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for DeleteUserCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Deletes the user in `UserDialogsState::pending_delete`.
///
/// SuperAdmin accounts are refused before any request is made.
#[derive(Debug, Default)]
pub struct DeleteUserCommand;

impl Command for DeleteUserCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _cancel: CancellationToken) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let session = snap.state::<Session>().clone();
        let pending = snap.state::<UserDialogsState>().pending_delete.clone();
        let target = pending
            .as_ref()
            .and_then(|p| snap.state::<UsersState>().find(&p.id))
            .map(|u| u.account_type);

        Box::pin(async move {
            let Some(pending) = pending else {
                log::info!("DeleteUserCommand: nothing to delete, skipping");
                return;
            };

            let fail = |err: UsersApiError| {
                log::error!("DeleteUserCommand: failed to delete {}: {err}", pending.id);
                updater.set(DeleteUserCompute {
                    result: OperationResult::Failed(err),
                });
            };

            if target.is_some_and(|t| !t.can_be_deleted()) {
                return fail(UsersApiError::Protected);
            }
            let api = match UsersApi::from_parts(&config, &session) {
                Ok(api) => api,
                Err(err) => return fail(err),
            };

            updater.set(DeleteUserCompute {
                result: OperationResult::Pending,
            });
            if let Err(err) = api.delete_user(&pending.id).await {
                return fail(err);
            }

            log::info!("DeleteUserCommand: deleted {}", pending.id);
            let id = pending.id.clone();
            updater.patch::<UsersState>(move |s| {
                s.remove_user(&id);
            });
            let id = pending.id.clone();
            updater.patch::<UserDialogsState>(move |d| {
                if d.pending_delete.as_ref().is_some_and(|p| p.id == id) {
                    d.cancel_delete();
                }
            });
            updater.set(DeleteUserCompute {
                result: OperationResult::Succeeded,
            });
        })
    }
}

/// Opens the confirmation for `user`. Returns `false` for protected users.
pub fn request_delete(ctx: &mut StateCtx, user: &User) -> bool {
    let mut opened = false;
    ctx.update::<UserDialogsState>(|d| opened = d.request_delete(user));
    if opened {
        ctx.updater().set(DeleteUserCompute::default());
    }
    opened
}

pub fn confirm_delete(ctx: &mut StateCtx) {
    let in_flight = ctx
        .cached::<DeleteUserCompute>()
        .is_some_and(|c| c.result.is_pending());
    if in_flight || ctx.state::<UserDialogsState>().pending_delete.is_none() {
        return;
    }
    ctx.dispatch::<DeleteUserCommand>();
}

/// Declining closes the confirmation and changes nothing else.
pub fn cancel_delete(ctx: &mut StateCtx) {
    ctx.update::<UserDialogsState>(UserDialogsState::cancel_delete);
    ctx.updater().set(DeleteUserCompute::default());
}

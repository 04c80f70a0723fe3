//! Create user command + compute cache.
//!
//! Register once during setup:
//! - `ctx.record_compute(CreateUserCompute::default());`
//! - `ctx.record_command(CreateUserCommand);`
//!
//! The dialog edits `UserDialogsState::create`; "Create Account" calls
//! [`submit_create`]. On success the dialog closes, the draft resets and the
//! collection is fetched again in the same task.

use std::any::Any;

use accounts_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, StateCtx,
    Updater,
};
use tokio_util::sync::CancellationToken;

use crate::{BusinessConfig, Session};

use super::api::{UsersApi, UsersApiError};
use super::draft::DraftError;
use super::fetch::refresh_users;
use super::outcome::OperationResult;
use super::state::UserDialogsState;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateUserError {
    #[error(transparent)]
    Invalid(#[from] DraftError),
    #[error(transparent)]
    Api(#[from] UsersApiError),
}

/// Outcome of the last create attempt.
#[derive(Debug, Clone, Default)]
pub struct CreateUserCompute {
    pub result: OperationResult<CreateUserError>,
}

impl SnapshotClone for CreateUserCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for CreateUserCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    // Written by `CreateUserCommand` only.
    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Submits `UserDialogsState::create`.
#[derive(Debug, Default)]
pub struct CreateUserCommand;

impl Command for CreateUserCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _cancel: CancellationToken) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let session = snap.state::<Session>().clone();
        let draft = snap.state::<UserDialogsState>().create.clone();

        Box::pin(async move {
            let fail = |err: CreateUserError| {
                log::error!("CreateUserCommand: {err}");
                updater.set(CreateUserCompute {
                    result: OperationResult::Failed(err),
                });
            };

            let request = match draft.to_request() {
                Ok(request) => request,
                Err(err) => return fail(err.into()),
            };
            let api = match UsersApi::from_parts(&config, &session) {
                Ok(api) => api,
                Err(err) => return fail(err.into()),
            };

            updater.set(CreateUserCompute {
                result: OperationResult::Pending,
            });
            log::info!("CreateUserCommand: creating {}", request.email);

            if let Err(err) = api.create_account(&request).await {
                return fail(err.into());
            }

            updater.patch::<UserDialogsState>(UserDialogsState::close_create);
            updater.set(CreateUserCompute {
                result: OperationResult::Succeeded,
            });
            refresh_users(&api, &updater).await;
        })
    }
}

pub fn open_create_dialog(ctx: &mut StateCtx) {
    ctx.update::<UserDialogsState>(UserDialogsState::open_create);
    ctx.updater().set(CreateUserCompute::default());
}

pub fn cancel_create_dialog(ctx: &mut StateCtx) {
    ctx.update::<UserDialogsState>(UserDialogsState::close_create);
    ctx.updater().set(CreateUserCompute::default());
}

/// Dispatches [`CreateUserCommand`] unless a create is already in flight.
///
/// The result goes `Pending` before the task is spawned, so a second click in
/// the same frame is ignored.
pub fn submit_create(ctx: &mut StateCtx) {
    let pending = ctx
        .cached::<CreateUserCompute>()
        .is_some_and(|c| c.result.is_pending());
    if pending {
        return;
    }
    ctx.updater().set(CreateUserCompute {
        result: OperationResult::Pending,
    });
    ctx.sync_computes();
    ctx.dispatch::<CreateUserCommand>();
}

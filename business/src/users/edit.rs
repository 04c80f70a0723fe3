//! Update user command: profile update, then an optional password change.
//!
//! The two requests are sequential and not atomic. If either fails the
//! collection is left unpatched, even when the profile was already saved on
//! the server; [`UpdateUserError::Password`] marks that partial save and the
//! dialog stays open.

use std::any::Any;

use accounts_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, StateCtx,
    Updater,
};
use tokio_util::sync::CancellationToken;

use crate::{BusinessConfig, Session};

use super::api::{UsersApi, UsersApiError};
use super::draft::{DraftError, PasswordError, apply_profile};
use super::model::{UpdateUserRequest, User};
use super::outcome::OperationResult;
use super::state::{UserDialogsState, UsersState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateUserError {
    #[error(transparent)]
    Incomplete(#[from] DraftError),
    #[error(transparent)]
    Invalid(#[from] PasswordError),
    #[error("Failed to update user: {0}")]
    Profile(UsersApiError),
    #[error("Profile saved, but the password change failed: {0}")]
    Password(UsersApiError),
}

/// Outcome of the last edit submission.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCompute {
    pub result: OperationResult<UpdateUserError>,
}

impl SnapshotClone for UpdateUserCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for UpdateUserCompute {
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

fn patch_saved_profile(updater: &Updater, saved: UpdateUserRequest) {
    updater.patch::<UsersState>(move |s| {
        if !s.patch_user(&saved.user_id, |user| apply_profile(user, &saved)) {
            log::warn!("UpdateUserCommand: user {} vanished from the list", saved.user_id);
        }
    });
}

/// Submits the open `UserDialogsState::edit` draft.
#[derive(Debug, Default)]
pub struct UpdateUserCommand;

impl Command for UpdateUserCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _cancel: CancellationToken) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let session = snap.state::<Session>().clone();
        let draft = snap.state::<UserDialogsState>().edit.clone();

        Box::pin(async move {
            let Some(draft) = draft else {
                log::info!("UpdateUserCommand: no user being edited, skipping");
                updater.set(UpdateUserCompute::default());
                return;
            };

            let fail = |err: UpdateUserError| {
                log::error!("UpdateUserCommand: {err}");
                updater.set(UpdateUserCompute {
                    result: OperationResult::Failed(err),
                });
            };

            if let Err(err) = draft.validate_profile() {
                updater.patch::<UserDialogsState>(move |d| d.profile_error = Some(err));
                return fail(err.into());
            }
            if let Err(err) = draft.validate() {
                updater.patch::<UserDialogsState>(move |d| d.password_error = Some(err));
                return fail(err.into());
            }
            let api = match UsersApi::from_parts(&config, &session) {
                Ok(api) => api,
                Err(err) => return fail(UpdateUserError::Profile(err)),
            };

            updater.set(UpdateUserCompute {
                result: OperationResult::Pending,
            });

            let profile = draft.profile_request();
            if let Err(err) = api.update_user(&profile).await {
                return fail(UpdateUserError::Profile(err));
            }
            log::info!("UpdateUserCommand: saved profile of {}", profile.user_id);

            if let Some(password) = draft.password_request()
                && let Err(err) = api.change_password(&password).await
            {
                return fail(UpdateUserError::Password(err));
            }

            let id = profile.user_id.clone();
            patch_saved_profile(&updater, profile);
            updater.patch::<UserDialogsState>(move |d| {
                if d.edit.as_ref().is_some_and(|e| e.id == id) {
                    d.close_edit();
                }
            });
            updater.set(UpdateUserCompute {
                result: OperationResult::Succeeded,
            });
        })
    }
}

pub fn open_edit_dialog(ctx: &mut StateCtx, user: &User) {
    ctx.update::<UserDialogsState>(|d| d.open_edit(user));
    ctx.updater().set(UpdateUserCompute::default());
}

pub fn cancel_edit_dialog(ctx: &mut StateCtx) {
    ctx.update::<UserDialogsState>(UserDialogsState::close_edit);
    ctx.updater().set(UpdateUserCompute::default());
}

/// Checks the names and password fields and dispatches [`UpdateUserCommand`]
/// when they pass. Returns `false` if the draft was refused.
///
/// The result goes `Pending` before the task is spawned, so a second click in
/// the same frame is ignored.
pub fn submit_edit(ctx: &mut StateCtx) -> bool {
    let pending = ctx
        .cached::<UpdateUserCompute>()
        .is_some_and(|c| c.result.is_pending());
    if pending {
        return false;
    }
    let mut accepted = false;
    ctx.update::<UserDialogsState>(|d| accepted = d.check_edit());
    if accepted {
        ctx.updater().set(UpdateUserCompute {
            result: OperationResult::Pending,
        });
        ctx.sync_computes();
        ctx.dispatch::<UpdateUserCommand>();
    }
    accepted
}

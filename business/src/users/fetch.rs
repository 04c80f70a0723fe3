//! Loading the user collection.

use std::any::Any;

use accounts_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, SnapshotClone, StateCtx,
    Updater,
};
use tokio_util::sync::CancellationToken;

use crate::{BusinessConfig, Session};

use super::api::{UsersApi, UsersApiError};
use super::outcome::OperationResult;
use super::state::UsersState;

/// Outcome of the last collection fetch. Written by [`FetchUsersCommand`] only.
#[derive(Debug, Clone, Default)]
pub struct FetchUsersCompute {
    pub result: OperationResult<UsersApiError>,
}

impl SnapshotClone for FetchUsersCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for FetchUsersCompute {
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

/// Fetches the full collection and replaces [`UsersState::users`] on success.
///
/// The loading flag is raised before the request and lowered after it,
/// whatever the outcome. Without a session token nothing is sent.
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(&self, snap: CommandSnapshot, updater: Updater, _cancel: CancellationToken) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().clone();
        let session = snap.state::<Session>().clone();

        Box::pin(async move {
            let api = match UsersApi::from_parts(&config, &session) {
                Ok(api) => api,
                Err(err) => {
                    log::info!("FetchUsersCommand: no session token, skipping");
                    updater.set(FetchUsersCompute {
                        result: OperationResult::Failed(err),
                    });
                    return;
                }
            };
            refresh_users(&api, &updater).await;
        })
    }
}

/// Runs one list request and publishes its outcome.
///
/// Shared by the fetch command and by flows that need the authoritative list
/// afterwards.
pub(crate) async fn refresh_users(api: &UsersApi, updater: &Updater) {
    updater.patch::<UsersState>(|s| s.is_loading = true);
    updater.set(FetchUsersCompute {
        result: OperationResult::Pending,
    });

    let result = api.list_users().await;
    match result {
        Ok(users) => {
            log::info!("FetchUsersCommand: loaded {} users", users.len());
            updater.patch::<UsersState>(move |s| {
                s.users = users;
                s.is_loading = false;
            });
            updater.set(FetchUsersCompute {
                result: OperationResult::Succeeded,
            });
        }
        Err(err) => {
            log::error!("FetchUsersCommand: failed to load users: {err}");
            updater.patch::<UsersState>(|s| s.is_loading = false);
            updater.set(FetchUsersCompute {
                result: OperationResult::Failed(err),
            });
        }
    }
}

/// Dispatches the initial fetch once per screen lifetime.
pub fn load_users_once(ctx: &mut StateCtx) {
    if ctx.state::<UsersState>().has_fetched {
        return;
    }
    ctx.update::<UsersState>(|s| s.has_fetched = true);
    ctx.dispatch::<FetchUsersCommand>();
}

/// Re-fetches the collection, e.g. from the toolbar's Refresh button.
pub fn reload_users(ctx: &mut StateCtx) {
    if ctx.state::<UsersState>().is_loading {
        return;
    }
    ctx.update::<UsersState>(|s| s.has_fetched = true);
    ctx.dispatch::<FetchUsersCommand>();
}

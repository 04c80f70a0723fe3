use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

/// Future returned by [`Command::run`].
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Explicit side effect (network IO and the like).
///
/// Commands never run implicitly. They are triggered with
/// `StateCtx::dispatch::<C>()`, read their inputs from a [`CommandSnapshot`]
/// and report back through the [`Updater`].
pub trait Command: Send + Sync + 'static {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken)
    -> CommandFuture;
}

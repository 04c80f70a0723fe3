//! Reactive state container shared by the business and UI crates.
//!
//! - [`State`]: plain data, mutated on the UI thread.
//! - [`Compute`]: derived cache, re-run when one of its dependencies changes.
//! - [`Command`]: explicit side effect, runs as a tokio task on a [`CommandSnapshot`].
//! - [`Updater`]: how computes and commands publish changes back to the [`StateCtx`].

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod runtime;
mod snapshot;
mod state;
mod state_sync_status;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::StateError;
pub use runtime::{Updater, Waker};
pub use snapshot::CommandSnapshot;
pub use state::{SnapshotClone, State};
pub use state_sync_status::StateSyncStatus;

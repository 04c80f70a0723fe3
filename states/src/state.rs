use std::any::Any;

/// Produces an owned, `Send` copy of a value for command snapshots.
///
/// Types that commands never read can keep the default, which leaves them out
/// of the snapshot.
pub trait SnapshotClone {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Plain data owned by a [`crate::StateCtx`].
///
/// States are mutated synchronously on the UI thread (`StateCtx::update`) or
/// asynchronously through an [`crate::Updater`].
pub trait State: Any + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

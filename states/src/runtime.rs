use std::any::{Any, TypeId, type_name};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use flume::{Receiver, Sender};

type Mutation = Box<dyn FnOnce(&mut dyn Any) -> bool + Send>;

/// Callback invoked after an update is queued, e.g. to request a repaint.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// A queued change to one registered state or compute.
pub(crate) struct Update {
    pub(crate) target: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) apply: Mutation,
}

/// Channel pair shared by a context and all of its updaters.
pub(crate) struct UpdateChannel {
    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for UpdateChannel {
    fn default() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }
}

impl UpdateChannel {
    pub(crate) fn sender(&self) -> Sender<Update> {
        self.send.clone()
    }

    pub(crate) fn drain(&self) -> impl Iterator<Item = Update> + '_ {
        self.recv.try_iter()
    }
}

/// Handle used by computes and commands to publish changes.
///
/// Updates are only queued here. They land in the context when the owner
/// calls [`crate::StateCtx::sync_computes`] on the UI thread.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    waker: Option<Waker>,
}

impl Debug for Updater {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .field("waker", &self.waker.is_some())
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>, waker: Option<Waker>) -> Self {
        Self { send, waker }
    }

    /// Replaces the registered value of type `T` wholesale.
    pub fn set<T: Any + Send>(&self, value: T) {
        self.push::<T>(Box::new(move |target| match target.downcast_mut::<T>() {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }));
    }

    /// Mutates the registered value of type `T` in place.
    pub fn patch<T: Any>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        self.push::<T>(Box::new(move |target| match target.downcast_mut::<T>() {
            Some(slot) => {
                f(slot);
                true
            }
            None => false,
        }));
    }

    fn push<T: Any>(&self, apply: Mutation) {
        let update = Update {
            target: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            apply,
        };
        if self.send.send(update).is_err() {
            log::debug!("Updater: context dropped, discarding update for {}", type_name::<T>());
            return;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

use std::any::{Any, TypeId};

use crate::{Dep, SnapshotClone, State, Updater};

/// Dependencies of a compute: the states and computes it reads.
///
/// Whenever one of them changes, the compute is marked dirty and re-run by
/// [`crate::StateCtx::run_computed`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    pub states: Vec<TypeId>,
    pub computes: Vec<TypeId>,
}

impl ComputeDeps {
    /// A compute with no dependencies. Used by caches that only commands write.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn compute<T: Compute>(mut self) -> Self {
        self.computes.push(TypeId::of::<T>());
        self
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TypeId> {
        self.states.iter().chain(self.computes.iter())
    }
}

/// Derived or command-written cache stored in a [`crate::StateCtx`].
///
/// `compute` must stay free of side effects: it can run implicitly whenever a
/// dependency changes. It publishes its new value through the `Updater`.
pub trait Compute: Any + SnapshotClone {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

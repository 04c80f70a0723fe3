use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, State, StateError};

/// Owned copy of every snapshot-able state and compute, taken when a command is flushed.
///
/// Commands run off the UI thread, so they read from this copy instead of the
/// live context.
#[derive(Default)]
pub struct CommandSnapshot {
    states: BTreeMap<TypeId, Box<dyn Any + Send>>,
    computes: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .finish()
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_state(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.insert(id, value);
    }

    pub fn insert_compute(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.computes.insert(id, value);
    }

    /// Adds a state value directly. Mostly useful for tests that drive a command by hand.
    pub fn with_state<T: State + Send>(mut self, value: T) -> Self {
        self.states.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    pub fn try_state<T: State>(&self) -> Result<&T, StateError> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&T, StateError> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(StateError::compute_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` is missing from the snapshot (not registered, or its
    /// `SnapshotClone` returns `None`).
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("State snapshot for {} is missing", type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` is missing from the snapshot.
    pub fn compute<T: Compute>(&self) -> &T {
        self.try_compute::<T>()
            .unwrap_or_else(|_| panic!("Compute snapshot for {} is missing", type_name::<T>()))
    }
}

use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::ctx::Entry;
use crate::{Compute, State, StateError};

/// Read-only view over the context handed to [`Compute::compute`].
pub struct Dep<'a> {
    entries: &'a BTreeMap<TypeId, Entry>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(entries: &'a BTreeMap<TypeId, Entry>) -> Self {
        Self { entries }
    }

    pub fn try_state<T: State>(&self) -> Result<&'a T, StateError> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.as_any().downcast_ref::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    pub fn try_compute<T: Compute>(&self) -> Result<&'a T, StateError> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.as_any().downcast_ref::<T>())
            .ok_or_else(StateError::compute_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was not registered with the context.
    pub fn state<T: State>(&self) -> &'a T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("state {} is not registered", type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was not recorded with the context.
    pub fn compute<T: Compute>(&self) -> &'a T {
        self.try_compute::<T>()
            .unwrap_or_else(|_| panic!("compute {} is not recorded", type_name::<T>()))
    }
}

use std::any::Any;

use accounts_states::{Compute, ComputeDeps, Dep, SnapshotClone, Updater};

use super::model::{AccountType, User};
use super::state::{UserFilterState, UsersState};

/// Users matching the search text (name or email, case-insensitive) and the
/// role, in collection order. Empty filters match everything.
pub fn filter_users(users: &[User], search: &str, role: Option<AccountType>) -> Vec<User> {
    let needle = search.to_lowercase();
    users
        .iter()
        .filter(|user| {
            needle.is_empty()
                || user.full_name().to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
        })
        .filter(|user| role.is_none_or(|role| user.account_type == role))
        .cloned()
        .collect()
}

/// Displayed subset of [`UsersState`], recomputed when the collection or the
/// filter changes.
#[derive(Debug, Clone, Default)]
pub struct FilteredUsersCompute {
    pub users: Vec<User>,
}

impl SnapshotClone for FilteredUsersCompute {}

impl Compute for FilteredUsersCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
            .state::<UsersState>()
            .state::<UserFilterState>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let users = deps.state::<UsersState>();
        let filter = deps.state::<UserFilterState>();
        updater.set(Self {
            users: filter_users(&users.users, &filter.search, filter.role),
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

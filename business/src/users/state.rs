//! States backing the user management screen.
//!
//! UI code reads these and renders; it changes them through `StateCtx::update`
//! or the helpers in the flow modules, and dispatches commands for network IO.

use std::any::Any;

use accounts_states::{SnapshotClone, State};

use super::draft::{CreateUserDraft, DraftError, EditUserDraft, PasswordError};
use super::model::{AccountType, User};

/// The full user collection as last returned by the server.
#[derive(Debug, Clone, Default)]
pub struct UsersState {
    pub users: Vec<User>,
    pub is_loading: bool,
    /// Set once the initial fetch has been requested.
    pub has_fetched: bool,
}

impl UsersState {
    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Applies `f` to the user with `id`. Returns `false` if there is none.
    pub fn patch_user(&mut self, id: &str, f: impl FnOnce(&mut User)) -> bool {
        match self.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                f(user);
                true
            }
            None => false,
        }
    }

    /// Removes the user with `id`, keeping the order of the rest.
    pub fn remove_user(&mut self, id: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }
}

impl SnapshotClone for UsersState {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for UsersState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Search box and role selector of the toolbar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilterState {
    pub search: String,
    /// `None` shows every role.
    pub role: Option<AccountType>,
}

impl UserFilterState {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.role.is_none()
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.role = None;
    }
}

impl SnapshotClone for UserFilterState {}

impl State for UserFilterState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// User awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

/// Open dialogs and their drafts.
#[derive(Debug, Clone, Default)]
pub struct UserDialogsState {
    pub create_open: bool,
    pub create: CreateUserDraft,
    /// Edit dialog is open iff this is `Some`.
    pub edit: Option<EditUserDraft>,
    /// Blank name in the edit draft.
    pub profile_error: Option<DraftError>,
    pub password_error: Option<PasswordError>,
    /// Delete confirmation is open iff this is `Some`.
    pub pending_delete: Option<PendingDelete>,
}

impl UserDialogsState {
    pub fn open_create(&mut self) {
        self.create.reset();
        self.create_open = true;
    }

    /// Closes the create dialog and discards what was typed.
    pub fn close_create(&mut self) {
        self.create_open = false;
        self.create.reset();
    }

    pub fn open_edit(&mut self, user: &User) {
        self.edit = Some(EditUserDraft::from_user(user));
        self.profile_error = None;
        self.password_error = None;
    }

    pub fn close_edit(&mut self) {
        self.edit = None;
        self.profile_error = None;
        self.password_error = None;
    }

    pub fn set_new_password(&mut self, value: impl Into<String>) {
        if let Some(draft) = &mut self.edit {
            draft.new_password = value.into();
            self.password_error = None;
        }
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        if let Some(draft) = &mut self.edit {
            draft.confirm_password = value.into();
            self.password_error = None;
        }
    }

    /// Runs the name and password checks of the open edit draft and records
    /// both errors. Returns `true` when the draft may be submitted.
    pub fn check_edit(&mut self) -> bool {
        let Some(draft) = &self.edit else {
            return false;
        };
        self.profile_error = draft.validate_profile().err();
        self.password_error = draft.validate().err();
        self.profile_error.is_none() && self.password_error.is_none()
    }

    /// Opens the delete confirmation. Protected users are refused.
    pub fn request_delete(&mut self, user: &User) -> bool {
        if !user.account_type.can_be_deleted() {
            log::info!("Refusing to delete protected user {}", user.id);
            return false;
        }
        self.pending_delete = Some(PendingDelete {
            id: user.id.clone(),
            name: user.full_name(),
        });
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

impl SnapshotClone for UserDialogsState {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for UserDialogsState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

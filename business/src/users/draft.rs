//! Form drafts for the create and edit dialogs, with their validation rules.

use super::model::{
    AccountType, ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, User,
};

/// Shortest accepted new password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("SuperAdmin accounts cannot be created here")]
    ProtectedRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("Passwords do not match")]
    Mismatch,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    TooShort,
}

/// Input of the "Create New User" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub account_type: AccountType,
}

impl CreateUserDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        let required = [
            ("First Name", &self.first_name),
            ("Last Name", &self.last_name),
            ("Email", &self.email),
            ("Password", &self.password),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(DraftError::MissingField(field));
        }
        if !looks_like_email(&self.email) {
            return Err(DraftError::InvalidEmail);
        }
        if !self.account_type.is_assignable() {
            return Err(DraftError::ProtectedRole);
        }
        Ok(())
    }

    /// Validates and builds the request body. Fields are sent as typed.
    pub fn to_request(&self) -> Result<CreateUserRequest, DraftError> {
        self.validate()?;
        Ok(CreateUserRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            account_type: self.account_type,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `local@domain`, no whitespace, one `@`.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Input of the "Edit User" dialog, seeded from an existing user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditUserDraft {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Read-only in the form.
    pub email: String,
    pub new_password: String,
    pub confirm_password: String,
    account_type: AccountType,
    role_locked: bool,
}

impl EditUserDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            new_password: String::new(),
            confirm_password: String::new(),
            account_type: user.account_type,
            role_locked: user.account_type.role_is_locked(),
        }
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn role_locked(&self) -> bool {
        self.role_locked
    }

    /// Changes the role. Returns `false` and leaves the draft as is when the
    /// role is locked or `account_type` cannot be assigned.
    pub fn set_account_type(&mut self, account_type: AccountType) -> bool {
        if self.role_locked || !account_type.is_assignable() {
            return false;
        }
        self.account_type = account_type;
        true
    }

    pub fn wants_password_change(&self) -> bool {
        !self.new_password.is_empty()
    }

    /// Both names are required, as on the create form.
    pub fn validate_profile(&self) -> Result<(), DraftError> {
        if self.first_name.trim().is_empty() {
            return Err(DraftError::MissingField("First Name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DraftError::MissingField("Last Name"));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PasswordError> {
        if !self.wants_password_change() {
            return Ok(());
        }
        if self.confirm_password != self.new_password {
            return Err(PasswordError::Mismatch);
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PasswordError::TooShort);
        }
        Ok(())
    }

    pub fn profile_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            user_id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            account_type: self.account_type,
        }
    }

    /// `None` when the password fields were left empty.
    pub fn password_request(&self) -> Option<ChangePasswordRequest> {
        self.wants_password_change().then(|| ChangePasswordRequest {
            user_id: self.id.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

/// Copies the saved profile fields onto a user. Email and creation date stay.
pub fn apply_profile(user: &mut User, saved: &UpdateUserRequest) {
    user.first_name.clone_from(&saved.first_name);
    user.last_name.clone_from(&saved.last_name);
    user.account_type = saved.account_type;
}

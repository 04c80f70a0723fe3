use std::any::Any;

use accounts_states::{SnapshotClone, State};

/// Credential of the signed-in operator, injected by the host.
///
/// The token is sent verbatim in the `Authorization` header. An empty token
/// counts as signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn sign_out(&mut self) {
        self.token = None;
    }
}

impl SnapshotClone for Session {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for Session {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_signed_out() {
        assert!(!Session::new(Some(String::new())).is_authenticated());
        assert!(!Session::new(Some("   ".to_owned())).is_authenticated());
        assert!(!Session::default().is_authenticated());
    }

    #[test]
    fn token_is_kept_verbatim() {
        let mut session = Session::with_token("Bearer abc");
        assert_eq!(session.token(), Some("Bearer abc"));

        session.sign_out();
        assert_eq!(session.token(), None);
    }
}

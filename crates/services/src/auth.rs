//! Sign-in seam and the identity store.

use std::fmt;
use std::sync::Arc;

use quest_core::model::{DEFAULT_AGE_HINT, Identity, Role, UserId};
use tracing::info;

use crate::error::AuthError;

/// What the login form submits.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub child_age: Option<u8>,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: None,
            child_age: None,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_child_age(mut self, age: u8) -> Self {
        self.child_age = Some(age);
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("child_age", &self.child_age)
            .finish_non_exhaustive()
    }
}

/// Turns credentials into an identity. Swap the implementation to add a real check.
pub trait Authenticator: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` when the credentials are not accepted.
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError>;
}

/// Placeholder sign-in: every credential is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAuthenticator;

impl Authenticator for MockAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let display_name = credentials
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        Ok(Identity::new(
            UserId::new(1),
            display_name,
            credentials.role,
            credentials.child_age,
        ))
    }
}

/// Holds at most one signed-in identity.
#[derive(Clone)]
pub struct IdentityStore {
    authenticator: Arc<dyn Authenticator>,
    current: Option<Identity>,
}

impl IdentityStore {
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            current: None,
        }
    }

    #[must_use]
    pub fn mock() -> Self {
        Self::new(Arc::new(MockAuthenticator))
    }

    /// Signs in, replacing any current identity.
    ///
    /// # Errors
    ///
    /// Propagates `AuthError` from the authenticator; the current identity is kept.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&Identity, AuthError> {
        let identity = self.authenticator.authenticate(credentials)?;
        info!(user = %identity.id(), role = ?identity.role(), "signed in");
        Ok(self.current.insert(identity))
    }

    pub fn logout(&mut self) -> Option<Identity> {
        let previous = self.current.take();
        if let Some(identity) = &previous {
            info!(user = %identity.id(), "signed out");
        }
        previous
    }

    #[must_use]
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Age for question selection, defaulting when nobody is signed in.
    #[must_use]
    pub fn age_hint(&self) -> u8 {
        self.current
            .as_ref()
            .map_or(DEFAULT_AGE_HINT, Identity::age_hint)
    }
}

impl fmt::Debug for IdentityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectAll;

    impl Authenticator for RejectAll {
        fn authenticate(&self, _credentials: &Credentials) -> Result<Identity, AuthError> {
            Err(AuthError::Rejected)
        }
    }

    #[test]
    fn mock_trusts_anything_and_names_from_email() {
        let mut store = IdentityStore::mock();
        let identity = store
            .login(
                &Credentials::new("maya@example.com", "")
                    .with_role(Role::Child)
                    .with_child_age(10),
            )
            .unwrap();
        assert_eq!(identity.display_name(), "maya");
        assert_eq!(identity.role(), Some(Role::Child));
        assert_eq!(store.age_hint(), 10);
        assert!(store.is_authenticated());
    }

    #[test]
    fn logout_clears_identity() {
        let mut store = IdentityStore::mock();
        store.login(&Credentials::new("dad", "pw")).unwrap();
        assert_eq!(store.logout().unwrap().display_name(), "dad");
        assert!(!store.is_authenticated());
        assert!(store.logout().is_none());
        assert_eq!(store.age_hint(), DEFAULT_AGE_HINT);
    }

    #[test]
    fn rejected_login_keeps_previous_identity() {
        let mut store = IdentityStore::mock();
        store.login(&Credentials::new("kid@home", "x")).unwrap();
        store.authenticator = Arc::new(RejectAll);

        assert_eq!(
            store.login(&Credentials::new("other@home", "x")).unwrap_err(),
            AuthError::Rejected
        );
        assert_eq!(store.current().unwrap().display_name(), "kid");
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("a@b", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}

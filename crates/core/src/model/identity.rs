use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Age used for question selection when the identity carries none.
pub const DEFAULT_AGE_HINT: u8 = 8;

/// Role picked at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Admin,
    Child,
}

/// The signed-in user for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: UserId,
    display_name: String,
    role: Option<Role>,
    child_age: Option<u8>,
}

impl Identity {
    #[must_use]
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        role: Option<Role>,
        child_age: Option<u8>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
            child_age,
        }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn child_age(&self) -> Option<u8> {
        self.child_age
    }

    /// Age handed to the quiz engine. An unset or zero age falls back to
    /// [`DEFAULT_AGE_HINT`].
    #[must_use]
    pub fn age_hint(&self) -> u8 {
        self.child_age
            .filter(|age| *age > 0)
            .unwrap_or(DEFAULT_AGE_HINT)
    }
}

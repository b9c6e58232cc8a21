//! Identity of whoever is driving the client.
//!
//! Built once at start-up and passed explicitly to every call that needs it.

use uuid::Uuid;

use crate::error::{PadError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<Uuid>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// The signed-in user, or [`PadError::NotSignedIn`].
    pub fn require_user(&self) -> Result<Uuid> {
        self.user_id.ok_or(PadError::NotSignedIn)
    }
}

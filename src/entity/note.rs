// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::{self, DecodedNote};
use crate::session::Session;

/// A stored note as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub url: String,
    /// Encoded content, see [`crate::codec`].
    pub content: Option<String>,
    pub is_reserved: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub version_number: u32,
    #[serde(default)]
    pub previous_versions: Vec<NoteVersion>,
}

/// A superseded revision of a note's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteVersion {
    pub version_number: u32,
    pub content: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn decoded(&self) -> DecodedNote {
        codec::decode_opt(self.content.as_deref())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whole days left before expiry, rounded up and never negative.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        let secs = (self.expires_at - now).num_seconds();
        if secs <= 0 {
            return 0;
        }
        (secs + 86_399) / 86_400
    }

    /// Anyone may edit an unreserved note; a reserved one only by its owner.
    pub fn can_edit(&self, session: &Session) -> bool {
        if !self.is_reserved {
            return true;
        }
        match (self.owner_id, session.user_id()) {
            (Some(owner), Some(user)) => owner == user,
            _ => false,
        }
    }
}

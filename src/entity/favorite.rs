use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note url bookmarked by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: Uuid,
    pub note_url: String,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(user_id: Uuid, note_url: String) -> Self {
        Self {
            user_id,
            note_url,
            created_at: Utc::now(),
        }
    }
}

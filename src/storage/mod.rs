mod sqlite_store;

pub use sqlite_store::{SqliteStore, NOTES_DB, PAD_DIR};

use chrono::{DateTime, Utc};

use crate::entity::{Favorite, Note};
use crate::error::Result;
use crate::session::Session;

/// Request to store a new note.
#[derive(Debug, Clone, Default)]
pub struct CreateNote {
    /// Encoded note content.
    pub content: String,
    /// Requested slug. `None` lets the backend pick one.
    pub custom_url: Option<String>,
    /// Restrict edits to the creating user.
    pub reserve: bool,
}

/// The note storage service.
///
/// Owns persistence and the business rules around it: url uniqueness, expiry,
/// reservation quotas and who may change a reserved note.
pub trait NoteBackend {
    /// Store a note and return the url it lives under.
    fn create_note(&self, request: &CreateNote, session: &Session) -> Result<String>;

    /// Fetch a live note. Expired notes are reported as missing.
    fn get_note(&self, url: &str) -> Result<Option<Note>>;

    /// Replace a note's content, keeping the old content as a previous version.
    fn update_note(&self, url: &str, content: &str, session: &Session) -> Result<()>;

    fn delete_note(&self, url: &str, session: &Session) -> Result<()>;

    /// Live reserved notes owned by the session user, newest first.
    fn list_reserved(&self, session: &Session) -> Result<Vec<Note>>;

    /// Whether `url` belongs to a live reserved note.
    fn is_reserved_url(&self, url: &str) -> Result<bool>;

    fn add_favorite(&self, url: &str, session: &Session) -> Result<Favorite>;

    fn remove_favorite(&self, url: &str, session: &Session) -> Result<()>;

    /// Favorites of the session user, newest first.
    fn list_favorites(&self, session: &Session) -> Result<Vec<Favorite>>;

    /// Drop every note expired at `now`. Returns how many were removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PadError {
    #[error("Not in a ghostpad directory. Run 'ghostpad init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .ghostpad/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("URL is already taken: {0}")]
    UrlTaken(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Note '{0}' is reserved by another user")]
    NotOwner(String),

    #[error("You must be signed in to reserve a URL")]
    NotSignedIn,

    #[error("Reservation limit reached: {used}/{max} reserved notes in use")]
    ReservationLimit { used: usize, max: usize },

    #[error("Favorite not found: {0}")]
    FavoriteNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, PadError>;

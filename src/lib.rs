pub mod cli;
pub mod codec;
pub mod config;
pub mod draft;
pub mod entity;
pub mod error;
pub mod service;
pub mod session;
pub mod slug;
pub mod storage;

pub use codec::{decode, encode, CodeSnippet, DecodedNote};
pub use error::{PadError, Result};
pub use service::{NoteService, UrlStatus};
pub use storage::{NoteBackend, SqliteStore};

//! Editor and viewer operations on top of a [`NoteBackend`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::codec::DecodedNote;
use crate::draft::NoteDraft;
use crate::entity::Note;
use crate::error::{PadError, Result};
use crate::session::Session;
use crate::slug::{normalize_url, validate_url};
use crate::storage::{CreateNote, NoteBackend};

/// A stored note together with its decoded content.
#[derive(Debug, Clone, Serialize)]
pub struct NoteView {
    pub note: Note,
    pub decoded: DecodedNote,
}

/// Whether a custom url can be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlStatus {
    Available,
    Taken,
    Reserved,
}

pub struct NoteService<B> {
    backend: B,
}

impl<B: NoteBackend> NoteService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Encode a draft and store it as a new note. Returns the note's url.
    pub fn save(
        &self,
        draft: &NoteDraft,
        custom_url: Option<&str>,
        reserve: bool,
        session: &Session,
    ) -> Result<String> {
        self.save_content(draft.to_content(), custom_url, reserve, session)
    }

    /// Store already encoded content as a new note.
    pub fn save_content(
        &self,
        content: String,
        custom_url: Option<&str>,
        reserve: bool,
        session: &Session,
    ) -> Result<String> {
        let custom_url = custom_url.map(normalize_url).filter(|url| !url.is_empty());
        let request = CreateNote {
            content,
            custom_url,
            reserve,
        };

        debug!(url = ?request.custom_url, reserve, "saving note");
        self.backend.create_note(&request, session).inspect_err(|e| {
            warn!(error = %e, "failed to create note");
        })
    }

    /// Normalize `url` and report whether a new note could claim it.
    pub fn url_status(&self, url: &str) -> Result<(String, UrlStatus)> {
        let url = normalize_url(url);
        validate_url(&url)?;

        let status = if self.backend.is_reserved_url(&url)? {
            UrlStatus::Reserved
        } else if self.backend.get_note(&url)?.is_some() {
            UrlStatus::Taken
        } else {
            UrlStatus::Available
        };
        Ok((url, status))
    }

    /// Fetch and decode a note.
    pub fn open(&self, url: &str) -> Result<NoteView> {
        let note = self
            .backend
            .get_note(url)?
            .ok_or_else(|| PadError::NoteNotFound(url.to_string()))?;
        let decoded = note.decoded();
        Ok(NoteView { note, decoded })
    }

    /// Replace a note's content with the encoded draft.
    pub fn edit(&self, url: &str, draft: &NoteDraft, session: &Session) -> Result<()> {
        self.edit_content(url, &draft.to_content(), session)
    }

    /// Replace a note's content with already encoded content.
    pub fn edit_content(&self, url: &str, content: &str, session: &Session) -> Result<()> {
        let view = self.open(url)?;
        if !view.note.can_edit(session) {
            return Err(PadError::NotOwner(url.to_string()));
        }
        debug!(url, "editing note");
        self.backend.update_note(url, content, session)
    }
}

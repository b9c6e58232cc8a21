//! Editable note state, the structured side of the codec.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::{self, CodeSnippet};

/// Language given to snippets added without one.
pub const EDITOR_LANGUAGE: &str = "javascript";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub text_content: String,
    pub snippets: Vec<CodeSnippet>,
}

impl NoteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing from stored content.
    pub fn from_content(content: &str) -> Self {
        let decoded = codec::decode(content);
        Self {
            title: decoded.title,
            text_content: decoded.text_content,
            snippets: decoded.code_snippets,
        }
    }

    /// Append an empty snippet and return its id.
    pub fn add_snippet(&mut self, language: Option<&str>) -> Uuid {
        let snippet = CodeSnippet::new(language.unwrap_or(EDITOR_LANGUAGE), "");
        let id = snippet.id;
        self.snippets.push(snippet);
        id
    }

    pub fn update_snippet(&mut self, id: Uuid, content: impl Into<String>) -> bool {
        match self.snippet_mut(id) {
            Some(snippet) => {
                snippet.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn set_snippet_language(&mut self, id: Uuid, language: impl Into<String>) -> bool {
        match self.snippet_mut(id) {
            Some(snippet) => {
                snippet.language = language.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_snippet(&mut self, id: Uuid) -> bool {
        let before = self.snippets.len();
        self.snippets.retain(|s| s.id != id);
        self.snippets.len() != before
    }

    /// Encode the draft for storage.
    pub fn to_content(&self) -> String {
        codec::encode(&self.title, &self.text_content, &self.snippets)
    }

    fn snippet_mut(&mut self, id: Uuid) -> Option<&mut CodeSnippet> {
        self.snippets.iter_mut().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_editing() {
        let mut draft = NoteDraft::new();
        draft.title = "Snippets".to_string();

        let first = draft.add_snippet(None);
        let second = draft.add_snippet(Some("rust"));
        assert_eq!(draft.snippets[0].language, EDITOR_LANGUAGE);

        assert!(draft.update_snippet(first, "alert(1)"));
        assert!(draft.update_snippet(second, "fn main() {}"));
        assert!(draft.set_snippet_language(first, "ts"));
        assert!(draft.remove_snippet(second));

        assert_eq!(draft.snippets.len(), 1);
        assert_eq!(draft.snippets[0].language, "ts");
        assert_eq!(draft.snippets[0].content, "alert(1)");
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut draft = NoteDraft::new();
        draft.add_snippet(None);
        let stranger = Uuid::new_v4();
        assert!(!draft.update_snippet(stranger, "x"));
        assert!(!draft.set_snippet_language(stranger, "x"));
        assert!(!draft.remove_snippet(stranger));
        assert_eq!(draft.snippets.len(), 1);
    }

    #[test]
    fn test_reopen_stored_content() {
        let mut draft = NoteDraft::new();
        draft.title = "Deploy".to_string();
        draft.text_content = "Steps below.".to_string();
        let id = draft.add_snippet(Some("sh"));
        draft.update_snippet(id, "make deploy");

        let reopened = NoteDraft::from_content(&draft.to_content());
        assert_eq!(reopened.title, "Deploy");
        assert_eq!(reopened.text_content, "Steps below.");
        assert_eq!(reopened.snippets.len(), 1);
        assert_eq!(reopened.snippets[0].language, "sh");
        assert_eq!(reopened.snippets[0].content, "make deploy");
    }

    #[test]
    fn test_language_outside_word_characters_still_reopens() {
        let mut draft = NoteDraft::new();
        draft.title = "Sharp".to_string();
        let id = draft.add_snippet(None);
        draft.update_snippet(id, "int x;");
        draft.set_snippet_language(id, "c++");

        let reopened = NoteDraft::from_content(&draft.to_content());
        assert_eq!(reopened.text_content, "");
        assert_eq!(reopened.snippets.len(), 1);
        assert_eq!(reopened.snippets[0].language, "c");
        assert_eq!(reopened.snippets[0].content, "int x;");
    }
}

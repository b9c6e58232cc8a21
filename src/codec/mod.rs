//! Note content codec.
//!
//! A note is stored as one text column. Title, body and code snippets are packed
//! into that column as plain text with fenced blocks:
//!
//! ````text
//! <title>
//!
//! <body>
//!
//! ```<language>
//! <snippet>
//! ```
//! ````
//!
//! The layout is the persisted format, so it must stay stable for notes that are
//! already stored. Decoding never fails: malformed fences are kept as prose.
//!
//! Two things do not survive a round trip. Snippet content holding "```" is cut
//! short at that point on decode. Language tags keep only word characters on
//! encode, so `c++` is written and read back as `c`.

pub mod scanner;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use scanner::FENCE;

/// Language used when a snippet has none.
pub const DEFAULT_LANGUAGE: &str = "text";

/// Title used when decoded content has no prose.
pub const UNTITLED_TITLE: &str = "Untitled Note";

/// A code snippet embedded in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    /// Client-side handle. Regenerated on every decode, never persisted.
    pub id: Uuid,
    pub language: String,
    pub content: String,
}

impl CodeSnippet {
    pub fn new(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            language: language.into(),
            content: content.into(),
        }
    }

    /// Language to write into the fence: the word characters of `language`,
    /// falling back to [`DEFAULT_LANGUAGE`]. Anything else would stop the
    /// opening fence from being recognised on decode.
    pub fn effective_language(&self) -> String {
        let tag: String = self
            .language
            .chars()
            .filter(|c| scanner::is_word_char(*c))
            .collect();
        if tag.is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            tag
        }
    }
}

/// Structured view of stored note content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedNote {
    pub title: String,
    pub text_content: String,
    pub code_snippets: Vec<CodeSnippet>,
}

/// Pack a title, body and snippets into the stored text layout.
pub fn encode(title: &str, text_content: &str, snippets: &[CodeSnippet]) -> String {
    let snippet_len: usize = snippets
        .iter()
        .map(|s| s.content.len() + s.language.len() + 10)
        .sum();
    let mut out = String::with_capacity(title.len() + text_content.len() + 2 + snippet_len);

    out.push_str(title);

    if !text_content.is_empty() {
        out.push_str("\n\n");
        out.push_str(text_content);
    }

    for snippet in snippets {
        out.push_str("\n\n");
        out.push_str(FENCE);
        out.push_str(&snippet.effective_language());
        out.push('\n');
        out.push_str(&snippet.content);
        out.push('\n');
        out.push_str(FENCE);
    }

    out
}

/// Unpack stored content into title, body and snippets.
pub fn decode(content: &str) -> DecodedNote {
    let blocks = scanner::scan(content);

    let code_snippets = blocks
        .iter()
        .map(|block| CodeSnippet::new(block.language.unwrap_or(DEFAULT_LANGUAGE), block.body.trim()))
        .collect();

    let prose = scanner::strip(content, &blocks);
    let prose = prose.trim();

    let (title, rest) = match prose.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (prose, ""),
    };

    let title = if title.is_empty() {
        UNTITLED_TITLE
    } else {
        title
    };

    DecodedNote {
        title: title.to_string(),
        text_content: rest.trim().to_string(),
        code_snippets,
    }
}

/// Decode a nullable content column, treating `None` as empty content.
pub fn decode_opt(content: Option<&str>) -> DecodedNote {
    decode(content.unwrap_or_default())
}

//! Fenced code block scanner.
//!
//! A block opens with "```", an optional language made of word characters
//! (`[A-Za-z0-9_]`) and a newline. It closes at the first "```" after the opening
//! line, wherever it sits: at the start of a line, at the end of a code line, or
//! right after the opening line for an empty body. The closing search is
//! non-greedy and does not understand nesting, so a body containing "```" is cut
//! short there.

use std::ops::Range;

pub const FENCE: &str = "```";

/// A fenced block located in some input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Byte range of the whole block, fences included.
    pub span: Range<usize>,
    /// Language identifier after the opening fence, if any.
    pub language: Option<&'a str>,
    /// Raw body between the opening line and the closing fence, untrimmed.
    pub body: &'a str,
}

/// Locate every fenced block in `input`, in order of appearance.
pub fn scan(input: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find(FENCE) {
        let start = cursor + offset;

        let Some((language, body_start)) = parse_opening(input, start) else {
            // Not an opening fence here, try the next backtick.
            cursor = start + 1;
            continue;
        };

        // An unterminated fence stays prose. Any later opening would need a
        // closing fence further along, so nothing else can match either.
        let Some((body_end, block_end)) = find_closing(input, body_start) else {
            break;
        };

        blocks.push(FencedBlock {
            span: start..block_end,
            language,
            body: &input[body_start..body_end],
        });
        cursor = block_end;
    }

    blocks
}

/// Return everything in `input` outside the given blocks.
pub fn strip<'a>(input: &'a str, blocks: &[FencedBlock<'a>]) -> String {
    let mut prose = String::with_capacity(input.len());
    let mut last = 0;
    for block in blocks {
        prose.push_str(&input[last..block.span.start]);
        last = block.span.end;
    }
    prose.push_str(&input[last..]);
    prose
}

/// Parse "```lang\n" at `start`. Returns the language and the offset of the body.
fn parse_opening(input: &str, start: usize) -> Option<(Option<&str>, usize)> {
    let after_fence = start + FENCE.len();
    let rest = &input[after_fence..];

    let lang_len = rest
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    if !rest[lang_len..].starts_with('\n') {
        return None;
    }

    let language = (lang_len > 0).then(|| &rest[..lang_len]);
    Some((language, after_fence + lang_len + 1))
}

/// Find the first "```" at or after `body_start`.
/// Returns (end of body, end of closing fence).
fn find_closing(input: &str, body_start: usize) -> Option<(usize, usize)> {
    input[body_start..].find(FENCE).map(|offset| {
        let body_end = body_start + offset;
        (body_end, body_end + FENCE.len())
    })
}

/// Characters allowed in a language tag.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

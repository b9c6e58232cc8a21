//! Note url slugs.

use uuid::Uuid;

use crate::error::{PadError, Result};

/// Longest slug accepted for a note url.
pub const MAX_URL_LEN: usize = 50;

/// Length of system-assigned slugs.
pub const RANDOM_URL_LEN: usize = 8;

/// Turn whatever the user typed or pasted into a slug.
///
/// - Drops a leading `http://` or `https://`
/// - Drops a leading `host/` segment and a leading `/`
/// - Replaces anything outside `[A-Za-z0-9-]` with a hyphen
/// - Collapses consecutive hyphens and lowercases
/// - Truncates to [`MAX_URL_LEN`]
pub fn normalize_url(input: &str) -> String {
    let mut rest = input;
    for scheme in ["http://", "https://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }
    if let Some(slash) = rest.find('/') {
        if slash > 0 {
            rest = &rest[slash + 1..];
        }
    }
    let rest = rest.strip_prefix('/').unwrap_or(rest).trim();

    let mut slug = String::with_capacity(rest.len());
    for c in rest.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' {
            c.to_ascii_lowercase()
        } else {
            '-'
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug.truncate(MAX_URL_LEN);
    slug
}

/// Check that `url` is a usable slug.
pub fn validate_url(url: &str) -> Result<()> {
    let invalid = |reason: &str| PadError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    if url.is_empty() {
        return Err(invalid("url is empty"));
    }
    if url.len() > MAX_URL_LEN {
        return Err(invalid(&format!("longer than {} characters", MAX_URL_LEN)));
    }
    if !url
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid("only lowercase letters, digits and '-' are allowed"));
    }
    Ok(())
}

/// A fresh system-assigned slug.
pub fn random_url() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..RANDOM_URL_LEN].to_string()
}

//! Blog post constants and validators.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum number of posts returned by the public feed.
pub const FEED_LIMIT: i64 = 20;

/// Maximum length for a post slug in characters.
pub const MAX_SLUG_LENGTH: usize = 120;

/// Lowercase words separated by single hyphens, e.g. `stop-working-weekends`.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("valid regex"));

/// Validate a post slug: non-empty, within length limit, URL-safe.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

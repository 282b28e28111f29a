//! Registry-safe tag components.

use crate::job::ValidationError;

pub const SHORT_SHA_LEN: usize = 7;

fn is_tag_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

/// Replaces every character outside `[a-z0-9_.-]` with `-`.
///
/// Uppercase letters are replaced, not lowercased: `Feature/X` becomes
/// `-eature--`. Each character maps to exactly one output character.
pub fn sanitize_tag(raw: &str) -> String {
    raw.chars()
        .map(|c| if is_tag_char(c) { c } else { '-' })
        .collect()
}

/// First seven characters of a commit SHA, lowercased.
///
/// Fails with [`ValidationError::InvalidSha`] when the SHA has fewer than seven
/// characters or its first seven are not all hexadecimal.
pub fn short_sha(commit_sha: &str) -> Result<String, ValidationError> {
    let prefix: String = commit_sha.chars().take(SHORT_SHA_LEN).collect();
    if prefix.chars().count() < SHORT_SHA_LEN || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidSha {
            value: commit_sha.to_string(),
        });
    }
    Ok(prefix.to_ascii_lowercase())
}

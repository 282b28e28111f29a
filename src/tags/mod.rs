//! Image tag computation.
//!
//! Tags are derived purely from the branch, commit and optional suffix, so the
//! same revision always yields the same tags in the same order:
//!
//! 1. the sanitized branch name,
//! 2. the sanitized branch name joined with the short commit SHA,
//! 3. `latest`, only when the branch is the release branch,
//! 4. the sanitized suffix, only when one was requested.
//!
//! Duplicates are dropped, keeping the first occurrence.
//!
//! ```
//! use dockplan::tags::compute_tags;
//!
//! let tags = compute_tags("main", "abc123456789", "", "main").unwrap();
//! assert_eq!(tags.as_slice(), &["main", "main-abc1234", "latest"]);
//! ```

pub mod sanitize;

pub use sanitize::{sanitize_tag, short_sha, SHORT_SHA_LEN};

use crate::job::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const LATEST_TAG: &str = "latest";

/// Ordered set of distinct image tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tag unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.tags
    }
}

impl TryFrom<Vec<String>> for TagSet {
    type Error = String;

    fn try_from(tags: Vec<String>) -> Result<Self, Self::Error> {
        let mut set = TagSet::new();
        for tag in tags {
            if !set.insert(tag.clone()) {
                return Err(format!("duplicate tag '{}'", tag));
            }
        }
        Ok(set)
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(", "))
    }
}

/// Derives the tags for one build of `branch` at `commit_sha`.
///
/// `latest` is decided on the raw branch name, before sanitization.
pub fn compute_tags(
    branch: &str,
    commit_sha: &str,
    suffix: &str,
    release_branch: &str,
) -> Result<TagSet, ValidationError> {
    if branch.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "branch",
            reason: "branch name cannot be empty".to_string(),
        });
    }

    let branch_tag = sanitize_tag(branch);
    let short = short_sha(commit_sha)?;

    let mut tags = TagSet::new();
    tags.insert(branch_tag.clone());
    tags.insert(format!("{}-{}", branch_tag, short));
    if branch == release_branch {
        tags.insert(LATEST_TAG);
    }
    if !suffix.is_empty() && !tags.insert(sanitize_tag(suffix)) {
        debug!(suffix, "Tag suffix duplicates a derived tag, skipping");
    }

    debug!(branch, tags = %tags, "Computed image tags");
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_branch_gets_latest() {
        let tags = compute_tags("main", "abc123456789", "", "main").unwrap();
        assert_eq!(tags.as_slice(), &["main", "main-abc1234", "latest"]);
    }

    #[test]
    fn test_feature_branch_with_suffix() {
        let tags = compute_tags("feature/x", "deadbeef0000", "staging", "main").unwrap();
        assert_eq!(
            tags.as_slice(),
            &["feature-x", "feature-x-deadbee", "staging"]
        );
        assert!(!tags.contains(LATEST_TAG));
    }

    #[test]
    fn test_latest_suffix_is_not_duplicated() {
        let tags = compute_tags("main", "abc123456789", "latest", "main").unwrap();
        assert_eq!(tags.as_slice(), &["main", "main-abc1234", "latest"]);
    }

    #[test]
    fn test_suffix_matching_branch_is_not_duplicated() {
        let tags = compute_tags("develop", "abc123456789", "develop", "main").unwrap();
        assert_eq!(tags.as_slice(), &["develop", "develop-abc1234"]);
    }

    #[test]
    fn test_suffix_is_sanitized() {
        let tags = compute_tags("develop", "abc123456789", "qa/eu", "main").unwrap();
        assert_eq!(tags.as_slice()[2], "qa-eu");
    }

    #[test]
    fn test_latest_decided_on_raw_branch() {
        // "release/x" sanitizes to "release-x" but only the raw name matches
        let tags = compute_tags("release-x", "abc123456789", "", "release/x").unwrap();
        assert!(!tags.contains(LATEST_TAG));

        let tags = compute_tags("release/x", "abc123456789", "", "release/x").unwrap();
        assert!(tags.contains(LATEST_TAG));
    }

    #[test]
    fn test_latest_suffix_on_non_release_branch() {
        let tags = compute_tags("develop", "abc123456789", "latest", "main").unwrap();
        assert_eq!(tags.as_slice(), &["develop", "develop-abc1234", "latest"]);
    }

    #[test]
    fn test_invalid_sha() {
        let err = compute_tags("main", "abc12", "", "main").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSha { .. }));
    }

    #[test]
    fn test_empty_branch() {
        let err = compute_tags("", "abc123456789", "", "main").unwrap_err();
        assert_eq!(err.field(), "branch");
    }

    #[test]
    fn test_deterministic() {
        let a = compute_tags("feature/y", "0123456789ab", "rc", "main").unwrap();
        let b = compute_tags("feature/y", "0123456789ab", "rc", "main").unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_tag_set_serializes_as_list() {
        let tags = compute_tags("main", "abc123456789", "", "main").unwrap();
        assert_eq!(
            serde_json::to_string(&tags).unwrap(),
            r#"["main","main-abc1234","latest"]"#
        );
    }

    #[test]
    fn test_tag_set_rejects_duplicates_on_deserialize() {
        let result: Result<TagSet, _> = serde_json::from_str(r#"["a","b","a"]"#);
        assert!(result.is_err());
        let ok: TagSet = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn test_insert_preserves_first_occurrence() {
        let mut set = TagSet::new();
        assert!(set.insert("x"));
        assert!(set.insert("y"));
        assert!(!set.insert("x"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(set.to_string(), "x, y");
    }
}

use crate::job::{RawJobConfig, ValidationError};
use crate::stack::BuildToolId;
use crate::tags::short_sha;
use regex::Regex;
use std::sync::OnceLock;

/// Registry-safe repository name: lowercase alphanumeric runs joined by single
/// `.`, `_` or `-` separators. A `/` never matches, which also rules out
/// registry and namespace prefixes.
pub const IMAGE_NAME_PATTERN: &str = r"^[a-z0-9]+(?:[._-][a-z0-9]+)*$";

fn image_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IMAGE_NAME_PATTERN).expect("valid regex"))
}

pub fn is_valid_image_name(name: &str) -> bool {
    image_name_regex().is_match(name)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate(&self, raw: &RawJobConfig) -> Result<(), ValidationError>;
}

pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn name(&self) -> &'static str {
        "RequiredFields"
    }

    fn validate(&self, raw: &RawJobConfig) -> Result<(), ValidationError> {
        if is_blank(&raw.image_name) {
            return Err(ValidationError::MissingField {
                field: "image_name",
            });
        }
        if raw.branch.is_none() {
            return Err(ValidationError::MissingField { field: "branch" });
        }
        if raw.commit_sha.is_none() {
            return Err(ValidationError::MissingField {
                field: "commit_sha",
            });
        }
        Ok(())
    }
}

pub struct ValidImageNameRule;

impl ValidationRule for ValidImageNameRule {
    fn name(&self) -> &'static str {
        "ValidImageName"
    }

    fn validate(&self, raw: &RawJobConfig) -> Result<(), ValidationError> {
        if let Some(name) = raw.image_name.as_deref() {
            if !is_valid_image_name(name) {
                return Err(ValidationError::InvalidImageName {
                    value: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub struct KnownBuildToolRule;

impl ValidationRule for KnownBuildToolRule {
    fn name(&self) -> &'static str {
        "KnownBuildTool"
    }

    fn validate(&self, raw: &RawJobConfig) -> Result<(), ValidationError> {
        if let Some(tool) = raw.build_tool.as_deref() {
            if BuildToolId::from_name(tool).is_none() {
                return Err(ValidationError::UnknownBuildTool {
                    value: tool.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub struct NonEmptyPathsRule;

impl ValidationRule for NonEmptyPathsRule {
    fn name(&self) -> &'static str {
        "NonEmptyPaths"
    }

    fn validate(&self, raw: &RawJobConfig) -> Result<(), ValidationError> {
        let paths = [
            ("dockerfile_path", &raw.dockerfile_path),
            ("build_context", &raw.build_context),
            ("java_version", &raw.java_version),
        ];
        for (field, value) in paths {
            if matches!(value.as_deref(), Some(v) if v.trim().is_empty()) {
                return Err(ValidationError::InvalidField {
                    field,
                    reason: "value cannot be empty; omit it to use the default".to_string(),
                });
            }
        }
        Ok(())
    }
}

pub struct SourceRevisionRule;

impl ValidationRule for SourceRevisionRule {
    fn name(&self) -> &'static str {
        "SourceRevision"
    }

    fn validate(&self, raw: &RawJobConfig) -> Result<(), ValidationError> {
        if let Some(branch) = raw.branch.as_deref() {
            if branch.is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "branch",
                    reason: "branch name cannot be empty".to_string(),
                });
            }
        }
        if let Some(sha) = raw.commit_sha.as_deref() {
            short_sha(sha)?;
        }
        Ok(())
    }
}

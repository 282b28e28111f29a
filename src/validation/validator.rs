use crate::job::{
    JobConfig, RawJobConfig, ValidationError, DEFAULT_BUILD_CONTEXT, DEFAULT_DOCKERFILE_PATH,
    DEFAULT_JAVA_VERSION,
};
use crate::stack::BuildToolId;
use crate::validation::rules::{
    is_valid_image_name, KnownBuildToolRule, NonEmptyPathsRule, RequiredFieldsRule,
    SourceRevisionRule, ValidImageNameRule, ValidationRule,
};
use tracing::debug;

/// Checks raw job input and normalises it into a [`JobConfig`].
///
/// Rules run in order and the first failure is returned. Validation is purely
/// structural: no filesystem or network access.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    pub fn check(&self, raw: &RawJobConfig) -> Result<(), ValidationError> {
        for rule in &self.rules {
            if let Err(e) = rule.validate(raw) {
                debug!(rule = rule.name(), field = e.field(), "Validation rule failed");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Runs every rule, then fills in defaults for omitted optional inputs.
    ///
    /// The image name is always checked here as well, whatever rules the
    /// validator was built with.
    pub fn validate(&self, raw: &RawJobConfig) -> Result<JobConfig, ValidationError> {
        self.check(raw)?;

        let image_name = required(&raw.image_name, "image_name")?;
        if image_name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "image_name",
            });
        }
        if !is_valid_image_name(&image_name) {
            return Err(ValidationError::InvalidImageName { value: image_name });
        }
        let build_tool = match raw.build_tool.as_deref() {
            Some(tool) => {
                BuildToolId::from_name(tool).ok_or_else(|| ValidationError::UnknownBuildTool {
                    value: tool.to_string(),
                })?
            }
            None => BuildToolId::default(),
        };

        Ok(JobConfig::new(
            image_name,
            or_default(&raw.dockerfile_path, DEFAULT_DOCKERFILE_PATH),
            or_default(&raw.build_context, DEFAULT_BUILD_CONTEXT),
            build_tool,
            or_default(&raw.java_version, DEFAULT_JAVA_VERSION),
            raw.docker_tag_suffix.clone().unwrap_or_default(),
            required(&raw.branch, "branch")?,
            required(&raw.commit_sha, "commit_sha")?,
        ))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredFieldsRule),
                Box::new(ValidImageNameRule),
                Box::new(KnownBuildToolRule),
                Box::new(NonEmptyPathsRule),
                Box::new(SourceRevisionRule),
            ],
        }
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .clone()
        .ok_or(ValidationError::MissingField { field })
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

/// Validates `raw` with the default rule set
pub fn validate(raw: &RawJobConfig) -> Result<JobConfig, ValidationError> {
    Validator::default().validate(raw)
}

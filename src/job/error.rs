use thiserror::Error;

/// Reasons a job description cannot be compiled into a plan.
///
/// Every variant names the offending field so callers can point users at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error(
        "Invalid image name '{value}': use lowercase letters, digits and single '.', '_' or '-' separators, without a registry or namespace prefix"
    )]
    InvalidImageName { value: String },

    #[error("Unknown build tool '{value}'. Valid options: maven, gradle, go, npm, none")]
    UnknownBuildTool { value: String },

    #[error("Invalid commit SHA '{value}': need at least 7 hexadecimal characters")]
    InvalidSha { value: String },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::InvalidImageName { .. } => "image_name",
            ValidationError::UnknownBuildTool { .. } => "build_tool",
            ValidationError::InvalidSha { .. } => "commit_sha",
            ValidationError::InvalidField { field, .. } => field,
        }
    }
}

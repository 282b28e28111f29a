//! Caller-supplied job description, before validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Accepts strings, numbers and booleans for string-typed inputs, so
/// `java_version: 17` in YAML reads the same as `java_version: "17"`.
fn deserialize_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Str(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Unvalidated job inputs.
///
/// The six user-facing inputs come from a job file or flags. Unknown keys are
/// ignored so older tooling keeps reading newer files. `branch` and
/// `commit_sha` describe the checked-out revision and are only ever set by the
/// caller's environment, never read from a job file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJobConfig {
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub image_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub dockerfile_path: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub build_context: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub build_tool: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub java_version: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub docker_tag_suffix: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
}

/// Job file encodings, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFileFormat {
    Json,
    Yaml,
    Toml,
}

impl JobFileFormat {
    /// Picks the format from a file extension. Unknown extensions read as YAML,
    /// which also accepts JSON documents.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => JobFileFormat::Json,
            Some("toml") => JobFileFormat::Toml,
            _ => JobFileFormat::Yaml,
        }
    }
}

impl RawJobConfig {
    pub fn new(image_name: impl Into<String>) -> Self {
        Self {
            image_name: Some(image_name.into()),
            ..Default::default()
        }
    }

    pub fn parse(content: &str, format: JobFileFormat) -> Result<Self> {
        match format {
            JobFileFormat::Json => {
                serde_json::from_str(content).context("Failed to parse job file as JSON")
            }
            JobFileFormat::Yaml => {
                // An empty document is an empty job, not a parse error
                if content.trim().is_empty() {
                    return Ok(Self::default());
                }
                serde_yaml::from_str(content).context("Failed to parse job file as YAML")
            }
            JobFileFormat::Toml => {
                toml::from_str(content).context("Failed to parse job file as TOML")
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        Self::parse(&content, JobFileFormat::from_path(path))
            .with_context(|| format!("Invalid job file {}", path.display()))
    }

    /// Attaches the checked-out revision supplied by the source checkout provider
    pub fn with_revision(mut self, branch: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self.commit_sha = Some(commit_sha.into());
        self
    }

    pub fn with_build_tool(mut self, build_tool: impl Into<String>) -> Self {
        self.build_tool = Some(build_tool.into());
        self
    }

    pub fn with_tag_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.docker_tag_suffix = Some(suffix.into());
        self
    }

    pub fn with_java_version(mut self, version: impl Into<String>) -> Self {
        self.java_version = Some(version.into());
        self
    }
}

use crate::stack::BuildToolId;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_DOCKERFILE_PATH: &str = "./Dockerfile";
pub const DEFAULT_BUILD_CONTEXT: &str = ".";
pub const DEFAULT_JAVA_VERSION: &str = "17";

/// A validated job description.
///
/// Only [`crate::validation::Validator`] constructs this type, so holding a
/// `JobConfig` means the image name is registry-safe, the build tool is known
/// and every optional input carries its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    image_name: String,
    dockerfile_path: String,
    build_context: String,
    build_tool: BuildToolId,
    java_version: String,
    docker_tag_suffix: String,
    branch: String,
    commit_sha: String,
}

impl JobConfig {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        image_name: String,
        dockerfile_path: String,
        build_context: String,
        build_tool: BuildToolId,
        java_version: String,
        docker_tag_suffix: String,
        branch: String,
        commit_sha: String,
    ) -> Self {
        Self {
            image_name,
            dockerfile_path,
            build_context,
            build_tool,
            java_version,
            docker_tag_suffix,
            branch,
            commit_sha,
        }
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn dockerfile_path(&self) -> &str {
        &self.dockerfile_path
    }

    pub fn build_context(&self) -> &str {
        &self.build_context
    }

    pub fn build_tool(&self) -> BuildToolId {
        self.build_tool
    }

    /// Requested JVM version; only consulted for maven and gradle
    pub fn java_version(&self) -> &str {
        &self.java_version
    }

    /// Extra tag to apply, empty when none was requested
    pub fn docker_tag_suffix(&self) -> &str {
        &self.docker_tag_suffix
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn commit_sha(&self) -> &str {
        &self.commit_sha
    }
}

impl fmt::Display for JobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Job Configuration:")?;
        writeln!(f, "  Image Name: {}", self.image_name)?;
        writeln!(f, "  Dockerfile: {}", self.dockerfile_path)?;
        writeln!(f, "  Build Context: {}", self.build_context)?;
        writeln!(f, "  Build Tool: {}", self.build_tool)?;
        if self.build_tool.is_jvm() {
            writeln!(f, "  Java Version: {}", self.java_version)?;
        }
        if !self.docker_tag_suffix.is_empty() {
            writeln!(f, "  Tag Suffix: {}", self.docker_tag_suffix)?;
        }
        writeln!(f, "  Branch: {}", self.branch)?;
        writeln!(f, "  Commit: {}", self.commit_sha)?;
        Ok(())
    }
}

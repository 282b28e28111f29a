//! Build tool definitions
//!
//! Each supported build tool knows which language runtime it needs, how to
//! resolve dependencies, how to compile and package the application, and which
//! directories are worth caching between runs. The planner never runs these
//! commands; it only copies them into the step payloads of a build plan.

use crate::stack::BuildToolId;
use serde::{Deserialize, Serialize};

/// Language runtime provisioned before the tool runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Runtime name (e.g., "java", "go", "node")
    pub name: String,
    /// Version to install
    pub version: String,
    /// Distribution, where the runtime has several (e.g., "temurin")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
}

/// Build tool trait
pub trait BuildSystem: Send + Sync {
    fn id(&self) -> BuildToolId;

    /// Runtime to set up. `java_version` is the job's requested JVM version and
    /// is only meaningful for JVM tools.
    fn runtime(&self, java_version: &str) -> RuntimeSpec;

    /// Command that downloads dependencies without building
    fn dependency_command(&self) -> &'static str;

    /// Command that compiles and packages the application
    fn package_command(&self) -> &'static str;

    /// Directories cached between builds
    fn cache_paths(&self) -> &[&'static str];
}

pub mod go_mod;
pub mod gradle;
pub mod maven;
pub mod npm;

pub use go_mod::GoModBuildSystem;
pub use gradle::GradleBuildSystem;
pub use maven::MavenBuildSystem;
pub use npm::NpmBuildSystem;

pub(crate) const JAVA_DISTRIBUTION: &str = "temurin";

pub(crate) fn java_runtime(java_version: &str) -> RuntimeSpec {
    RuntimeSpec {
        name: "java".to_string(),
        version: java_version.to_string(),
        distribution: Some(JAVA_DISTRIBUTION.to_string()),
    }
}

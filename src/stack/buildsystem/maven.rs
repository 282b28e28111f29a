//! Maven build system (Java/Kotlin)

use super::{java_runtime, BuildSystem, RuntimeSpec};
use crate::stack::BuildToolId;

pub struct MavenBuildSystem;

impl BuildSystem for MavenBuildSystem {
    fn id(&self) -> BuildToolId {
        BuildToolId::Maven
    }

    fn runtime(&self, java_version: &str) -> RuntimeSpec {
        java_runtime(java_version)
    }

    fn dependency_command(&self) -> &'static str {
        "mvn -B dependency:go-offline"
    }

    fn package_command(&self) -> &'static str {
        "mvn -B clean package -DskipTests"
    }

    fn cache_paths(&self) -> &[&'static str] {
        &["~/.m2/repository"]
    }
}

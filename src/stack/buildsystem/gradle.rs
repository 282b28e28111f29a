//! Gradle build system (Java/Kotlin)

use super::{java_runtime, BuildSystem, RuntimeSpec};
use crate::stack::BuildToolId;

pub struct GradleBuildSystem;

impl BuildSystem for GradleBuildSystem {
    fn id(&self) -> BuildToolId {
        BuildToolId::Gradle
    }

    fn runtime(&self, java_version: &str) -> RuntimeSpec {
        java_runtime(java_version)
    }

    fn dependency_command(&self) -> &'static str {
        "./gradlew dependencies --no-daemon"
    }

    fn package_command(&self) -> &'static str {
        "./gradlew build -x test --no-daemon"
    }

    fn cache_paths(&self) -> &[&'static str] {
        &["~/.gradle/caches", "~/.gradle/wrapper"]
    }
}

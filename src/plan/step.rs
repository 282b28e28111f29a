use crate::stack::{BuildToolId, RuntimeSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed catalogue of steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    Checkout,
    SetupLanguageRuntime,
    DependencyResolve,
    CompileAndPackage,
    DockerBuild,
    DockerTagAndPush,
}

impl StepName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::Checkout => "checkout",
            StepName::SetupLanguageRuntime => "setup_language_runtime",
            StepName::DependencyResolve => "dependency_resolve",
            StepName::CompileAndPackage => "compile_and_package",
            StepName::DockerBuild => "docker_build",
            StepName::DockerTagAndPush => "docker_tag_and_push",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a step does, with every parameter resolved.
///
/// The executor interprets these; nothing here is evaluated at plan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepCommand {
    /// Check out the revision the plan was compiled for
    Checkout { commit_sha: String },
    /// Install a language runtime and restore tool caches
    SetupRuntime {
        runtime: RuntimeSpec,
        cache_paths: Vec<String>,
    },
    /// Run a build tool command
    Tool { tool: BuildToolId, command: String },
    /// Build the image from a Dockerfile
    DockerBuild {
        dockerfile_path: String,
        build_context: String,
        image_name: String,
    },
    /// Apply the plan's tags to the built image and push each one
    DockerTagAndPush { image_name: String },
    /// Placeholder for catalogue entries excluded from the plan
    Skip,
}

/// One step of a build plan.
///
/// `condition` is decided when the plan is compiled. Steps in a compiled plan
/// always carry `condition: true`; excluded steps only appear when inspecting
/// the full catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    pub name: StepName,
    pub command: StepCommand,
    pub condition: bool,
}

impl BuildStep {
    pub fn included(name: StepName, command: StepCommand) -> Self {
        Self {
            name,
            command,
            condition: true,
        }
    }

    pub fn skipped(name: StepName) -> Self {
        Self {
            name,
            command: StepCommand::Skip,
            condition: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_name_serialization() {
        assert_eq!(
            serde_json::to_string(&StepName::SetupLanguageRuntime).unwrap(),
            "\"setup_language_runtime\""
        );
        for name in [
            StepName::Checkout,
            StepName::DependencyResolve,
            StepName::CompileAndPackage,
            StepName::DockerBuild,
            StepName::DockerTagAndPush,
        ] {
            assert_eq!(
                serde_json::to_string(&name).unwrap(),
                format!("\"{}\"", name)
            );
        }
    }

    #[test]
    fn test_step_name_order_matches_catalogue() {
        assert!(StepName::Checkout < StepName::SetupLanguageRuntime);
        assert!(StepName::CompileAndPackage < StepName::DockerBuild);
        assert!(StepName::DockerBuild < StepName::DockerTagAndPush);
    }

    #[test]
    fn test_command_is_tagged() {
        let command = StepCommand::Tool {
            tool: BuildToolId::Npm,
            command: "npm ci".to_string(),
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["kind"], "tool");
        assert_eq!(json["tool"], "npm");
    }

    #[test]
    fn test_skipped_step() {
        let step = BuildStep::skipped(StepName::CompileAndPackage);
        assert!(!step.condition);
        assert_eq!(step.command, StepCommand::Skip);
    }
}

//! Step planning.
//!
//! The catalogue is a strict linear chain; the planner evaluates each entry's
//! predicate against the job's build tool once and keeps the matches in
//! catalogue order. It never executes anything.

use super::step::{BuildStep, StepCommand, StepName};
use crate::job::{JobConfig, ValidationError};
use crate::stack::{BuildSystem, BuildToolId, StackRegistry};
use tracing::debug;

struct StepDefinition {
    name: StepName,
    include: fn(BuildToolId) -> bool,
}

fn always(_: BuildToolId) -> bool {
    true
}

fn with_toolchain(tool: BuildToolId) -> bool {
    tool.has_toolchain()
}

static CATALOGUE: [StepDefinition; 6] = [
    StepDefinition {
        name: StepName::Checkout,
        include: always,
    },
    StepDefinition {
        name: StepName::SetupLanguageRuntime,
        include: with_toolchain,
    },
    StepDefinition {
        name: StepName::DependencyResolve,
        include: with_toolchain,
    },
    StepDefinition {
        name: StepName::CompileAndPackage,
        include: with_toolchain,
    },
    StepDefinition {
        name: StepName::DockerBuild,
        include: always,
    },
    StepDefinition {
        name: StepName::DockerTagAndPush,
        include: always,
    },
];

/// Every step name in catalogue order
pub fn catalogue_names() -> impl Iterator<Item = StepName> {
    CATALOGUE.iter().map(|def| def.name)
}

pub struct StepPlanner {
    registry: StackRegistry,
}

impl StepPlanner {
    pub fn new(registry: StackRegistry) -> Self {
        Self { registry }
    }

    /// All catalogue steps with their condition evaluated for `config`.
    ///
    /// Fails when the job needs toolchain steps but no build system is
    /// registered for its build tool.
    pub fn catalogue(&self, config: &JobConfig) -> Result<Vec<BuildStep>, ValidationError> {
        let tool = config.build_tool();
        let build_system = self.registry.get_build_system(tool);

        CATALOGUE
            .iter()
            .map(|def| {
                if !(def.include)(tool) {
                    debug!(step = %def.name, tool = %tool, "Step excluded");
                    return Ok(BuildStep::skipped(def.name));
                }
                let command = command_for(def.name, config, build_system)?;
                Ok(BuildStep::included(def.name, command))
            })
            .collect()
    }

    /// Steps to run for `config`, in order
    pub fn plan_steps(&self, config: &JobConfig) -> Result<Vec<BuildStep>, ValidationError> {
        Ok(self
            .catalogue(config)?
            .into_iter()
            .filter(|step| step.condition)
            .collect())
    }
}

impl Default for StepPlanner {
    fn default() -> Self {
        Self::new(StackRegistry::with_defaults())
    }
}

fn command_for(
    name: StepName,
    config: &JobConfig,
    build_system: Option<&dyn BuildSystem>,
) -> Result<StepCommand, ValidationError> {
    let toolchain = || {
        build_system.ok_or_else(|| ValidationError::InvalidField {
            field: "build_tool",
            reason: format!("no build system registered for '{}'", config.build_tool()),
        })
    };
    let command = match name {
        StepName::Checkout => StepCommand::Checkout {
            commit_sha: config.commit_sha().to_string(),
        },
        StepName::SetupLanguageRuntime => {
            let bs = toolchain()?;
            StepCommand::SetupRuntime {
                runtime: bs.runtime(config.java_version()),
                cache_paths: bs.cache_paths().iter().map(|p| p.to_string()).collect(),
            }
        }
        StepName::DependencyResolve => {
            let bs = toolchain()?;
            StepCommand::Tool {
                tool: bs.id(),
                command: bs.dependency_command().to_string(),
            }
        }
        StepName::CompileAndPackage => {
            let bs = toolchain()?;
            StepCommand::Tool {
                tool: bs.id(),
                command: bs.package_command().to_string(),
            }
        }
        StepName::DockerBuild => StepCommand::DockerBuild {
            dockerfile_path: config.dockerfile_path().to_string(),
            build_context: config.build_context().to_string(),
            image_name: config.image_name().to_string(),
        },
        StepName::DockerTagAndPush => StepCommand::DockerTagAndPush {
            image_name: config.image_name().to_string(),
        },
    };
    Ok(command)
}

/// Plans steps with the default build tool registry
pub fn plan_steps(config: &JobConfig) -> Result<Vec<BuildStep>, ValidationError> {
    StepPlanner::default().plan_steps(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::RawJobConfig;
    use crate::validation::validate;
    use yare::parameterized;

    fn config(tool: &str) -> JobConfig {
        validate(
            &RawJobConfig::new("svc")
                .with_build_tool(tool)
                .with_revision("main", "abc123456789"),
        )
        .unwrap()
    }

    fn names(steps: &[BuildStep]) -> Vec<StepName> {
        steps.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_none_skips_toolchain_steps() {
        let steps = plan_steps(&config("none")).unwrap();
        assert_eq!(
            names(&steps),
            vec![
                StepName::Checkout,
                StepName::DockerBuild,
                StepName::DockerTagAndPush
            ]
        );
    }

    #[parameterized(
        maven = { "maven" },
        gradle = { "gradle" },
        go = { "go" },
        npm = { "npm" },
    )]
    fn test_toolchains_get_full_chain(tool: &str) {
        let steps = plan_steps(&config(tool)).unwrap();
        assert_eq!(names(&steps), catalogue_names().collect::<Vec<_>>());
        assert!(steps.iter().all(|s| s.condition));
    }

    #[test]
    fn test_maven_runtime_uses_java_version() {
        let steps = plan_steps(&config("maven")).unwrap();
        match &steps[1].command {
            StepCommand::SetupRuntime { runtime, cache_paths } => {
                assert_eq!(runtime.name, "java");
                assert_eq!(runtime.version, "17");
                assert_eq!(cache_paths, &vec!["~/.m2/repository".to_string()]);
            }
            other => panic!("Expected SetupRuntime, got {:?}", other),
        }
    }

    #[test]
    fn test_go_runtime_ignores_java_version() {
        let cfg = validate(
            &RawJobConfig::new("svc")
                .with_build_tool("go")
                .with_java_version("21")
                .with_revision("main", "abc123456789"),
        )
        .unwrap();
        let steps = plan_steps(&cfg).unwrap();
        match &steps[1].command {
            StepCommand::SetupRuntime { runtime, .. } => {
                assert_eq!(runtime.name, "go");
                assert_ne!(runtime.version, "21");
            }
            other => panic!("Expected SetupRuntime, got {:?}", other),
        }
    }

    #[test]
    fn test_catalogue_marks_skipped_steps() {
        let planner = StepPlanner::default();
        let steps = planner.catalogue(&config("none")).unwrap();
        assert_eq!(steps.len(), 6);
        let skipped: Vec<_> = steps.iter().filter(|s| !s.condition).map(|s| s.name).collect();
        assert_eq!(
            skipped,
            vec![
                StepName::SetupLanguageRuntime,
                StepName::DependencyResolve,
                StepName::CompileAndPackage
            ]
        );
    }

    #[test]
    fn test_missing_build_system_is_an_error() {
        let planner = StepPlanner::new(StackRegistry::new());
        let err = planner.plan_steps(&config("npm")).unwrap_err();
        assert_eq!(err.field(), "build_tool");
        assert!(err.to_string().contains("npm"));

        // `none` never needs a build system
        let steps = planner.plan_steps(&config("none")).unwrap();
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_docker_build_carries_paths() {
        let steps = plan_steps(&config("none")).unwrap();
        assert_eq!(
            steps[1].command,
            StepCommand::DockerBuild {
                dockerfile_path: "./Dockerfile".to_string(),
                build_context: ".".to_string(),
                image_name: "svc".to_string(),
            }
        );
    }
}

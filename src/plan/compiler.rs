use super::planner::StepPlanner;
use super::schema::BuildPlan;
use crate::job::{JobConfig, RawJobConfig, ValidationError};
use crate::tags::compute_tags;
use crate::validation::Validator;
use tracing::info;

pub const DEFAULT_RELEASE_BRANCH: &str = "main";

/// Turns job descriptions into build plans.
///
/// Compilation is a pure function of the job input and the release branch:
/// no I/O, no clock, no shared mutable state. One compiler can serve any
/// number of jobs concurrently.
pub struct PlanCompiler {
    validator: Validator,
    planner: StepPlanner,
    release_branch: String,
}

impl PlanCompiler {
    pub fn new(release_branch: impl Into<String>) -> Self {
        Self {
            validator: Validator::default(),
            planner: StepPlanner::default(),
            release_branch: release_branch.into(),
        }
    }

    pub fn with_parts(
        validator: Validator,
        planner: StepPlanner,
        release_branch: impl Into<String>,
    ) -> Self {
        Self {
            validator,
            planner,
            release_branch: release_branch.into(),
        }
    }

    pub fn release_branch(&self) -> &str {
        &self.release_branch
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn planner(&self) -> &StepPlanner {
        &self.planner
    }

    /// Validates `raw` and compiles it. Any validation error aborts compilation.
    pub fn compile(&self, raw: &RawJobConfig) -> Result<BuildPlan, ValidationError> {
        let config = self.validator.validate(raw)?;
        self.compile_config(&config)
    }

    pub fn compile_config(&self, config: &JobConfig) -> Result<BuildPlan, ValidationError> {
        let tags = compute_tags(
            config.branch(),
            config.commit_sha(),
            config.docker_tag_suffix(),
            &self.release_branch,
        )?;
        let steps = self.planner.plan_steps(config)?;

        info!(
            image = config.image_name(),
            tool = %config.build_tool(),
            steps = steps.len(),
            tags = %tags,
            "Compiled build plan"
        );

        Ok(BuildPlan::new(
            config.image_name().to_string(),
            config.build_tool(),
            config.dockerfile_path().to_string(),
            config.build_context().to_string(),
            tags,
            steps,
        ))
    }
}

impl Default for PlanCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_BRANCH)
    }
}

/// Compiles `raw` with default rules and planner
pub fn compile(raw: &RawJobConfig, release_branch: &str) -> Result<BuildPlan, ValidationError> {
    PlanCompiler::new(release_branch).compile(raw)
}

//! Plan execution contract.
//!
//! The compiler never builds or pushes anything. A [`PlanExecutor`] takes
//! ownership of a [`BuildPlan`] and performs it, given registry credentials
//! that come from outside the plan. Executors must:
//!
//! - run steps strictly in plan order, so identical plans produce identical
//!   side-effect sequences;
//! - stop at the first failing step and report which step failed together with
//!   the underlying cause, unchanged;
//! - leave retries to themselves: the compiler never retries.
//!
//! [`SequentialExecutor`] implements this contract on top of a [`StepRunner`],
//! which performs individual steps. [`DryRunRunner`] is a runner that records
//! the shell commands each step would run instead of running them.

pub mod credentials;
pub mod dry_run;
pub mod script;
pub mod sequential;
pub mod target;

pub use credentials::RegistryCredentials;
pub use dry_run::DryRunRunner;
pub use script::{render_script, step_commands};
pub use sequential::SequentialExecutor;
pub use target::RegistryTarget;

use crate::plan::{BuildPlan, BuildStep, StepName};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Result of one successfully executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: StepName,
    pub index: usize,
    pub duration_ms: u64,
}

/// Summary of a fully successful plan execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub image_name: String,
    pub steps: Vec<StepOutcome>,
    /// Fully qualified references actually pushed
    pub published_tags: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    /// A step failed; the steps after it were not run
    #[error("Step '{step}' (#{index}) failed")]
    StepFailed {
        step: StepName,
        index: usize,
        /// Steps that completed before the failure
        completed: Vec<StepOutcome>,
        #[source]
        cause: anyhow::Error,
    },
}

impl ExecutionError {
    pub fn failed_step(&self) -> StepName {
        match self {
            ExecutionError::StepFailed { step, .. } => *step,
        }
    }
}

/// Everything a runner may need besides the step itself
pub struct StepContext<'a> {
    pub plan: &'a BuildPlan,
    pub target: &'a RegistryTarget,
    pub credentials: &'a RegistryCredentials,
    pub index: usize,
}

/// Performs a single step
#[async_trait]
pub trait StepRunner: Send + Sync {
    /// Runs `step`. Returns the fully qualified references it pushed, which is
    /// empty for every step but `docker_tag_and_push`.
    async fn run_step(&self, step: &BuildStep, ctx: &StepContext<'_>) -> anyhow::Result<Vec<String>>;
}

/// Consumes a build plan and performs it
#[async_trait]
pub trait PlanExecutor: Send + Sync {
    async fn execute(
        &self,
        plan: BuildPlan,
        credentials: &RegistryCredentials,
    ) -> Result<ExecutionReport, ExecutionError>;
}

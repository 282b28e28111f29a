use super::script::step_commands;
use super::{StepContext, StepRunner};
use crate::plan::{BuildStep, StepCommand};
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

/// Runner that records the commands each step would issue instead of running them
#[derive(Debug, Default)]
pub struct DryRunRunner {
    commands: Mutex<Vec<String>>,
}

impl DryRunRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far, in execution order
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl StepRunner for DryRunRunner {
    async fn run_step(&self, step: &BuildStep, ctx: &StepContext<'_>) -> anyhow::Result<Vec<String>> {
        let login = !ctx.credentials.is_anonymous();
        let lines = step_commands(step, ctx.plan, ctx.target, login);
        for line in &lines {
            info!(step = %step.name, "[dry-run] {}", line);
        }
        self.commands
            .lock()
            .map_err(|_| anyhow::anyhow!("dry-run command log poisoned"))?
            .extend(lines);

        let published = match &step.command {
            StepCommand::DockerTagAndPush { image_name } => ctx
                .plan
                .tags()
                .iter()
                .map(|tag| ctx.target.image_ref(image_name, tag))
                .collect(),
            _ => Vec::new(),
        };
        Ok(published)
    }
}

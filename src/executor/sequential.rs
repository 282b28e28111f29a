use super::{
    ExecutionError, ExecutionReport, PlanExecutor, RegistryCredentials, RegistryTarget,
    StepContext, StepOutcome, StepRunner,
};
use crate::plan::BuildPlan;
use crate::progress::{ProgressEvent, ProgressHandler};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs plan steps one after another, stopping at the first failure
pub struct SequentialExecutor<R> {
    runner: R,
    target: RegistryTarget,
    progress_handler: Option<Box<dyn ProgressHandler>>,
}

impl<R: StepRunner> SequentialExecutor<R> {
    pub fn new(runner: R, target: RegistryTarget) -> Self {
        Self {
            runner,
            target,
            progress_handler: None,
        }
    }

    pub fn with_progress(mut self, handler: impl ProgressHandler + 'static) -> Self {
        self.progress_handler = Some(Box::new(handler));
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn target(&self) -> &RegistryTarget {
        &self.target
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }
}

#[async_trait]
impl<R: StepRunner> PlanExecutor for SequentialExecutor<R> {
    async fn execute(
        &self,
        plan: BuildPlan,
        credentials: &RegistryCredentials,
    ) -> Result<ExecutionReport, ExecutionError> {
        let start = Instant::now();
        info!(
            image = plan.image_name(),
            target = %self.target,
            "Executing build plan"
        );
        self.emit(ProgressEvent::ExecutionStarted {
            image_name: plan.image_name().to_string(),
            steps: plan.steps().len(),
        });

        let mut completed = Vec::with_capacity(plan.steps().len());
        let mut published_tags = Vec::new();

        for (index, step) in plan.steps().iter().enumerate() {
            if !step.condition {
                warn!(step = %step.name, "Plan contains an excluded step, skipping");
                continue;
            }

            self.emit(ProgressEvent::StepStarted {
                step: step.name,
                index,
            });
            let step_start = Instant::now();
            let ctx = StepContext {
                plan: &plan,
                target: &self.target,
                credentials,
                index,
            };

            match self.runner.run_step(step, &ctx).await {
                Ok(published) => {
                    let duration = step_start.elapsed();
                    self.emit(ProgressEvent::StepComplete {
                        step: step.name,
                        index,
                        duration,
                    });
                    debug!(step = %step.name, published = published.len(), "Step finished");
                    published_tags.extend(published);
                    completed.push(StepOutcome {
                        step: step.name,
                        index,
                        duration_ms: duration.as_millis() as u64,
                    });
                }
                Err(cause) => {
                    self.emit(ProgressEvent::StepFailed {
                        step: step.name,
                        index,
                        error: format!("{:#}", cause),
                    });
                    return Err(ExecutionError::StepFailed {
                        step: step.name,
                        index,
                        completed,
                        cause,
                    });
                }
            }
        }

        self.emit(ProgressEvent::ExecutionComplete {
            published_tags: published_tags.len(),
            total_time: start.elapsed(),
        });

        Ok(ExecutionReport {
            image_name: plan.image_name().to_string(),
            steps: completed,
            published_tags,
        })
    }
}

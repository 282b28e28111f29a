//! Progress handler trait and events

use crate::plan::StepName;
use std::time::Duration;

/// Events emitted while an executor works through a build plan
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Execution of a plan started
    ExecutionStarted { image_name: String, steps: usize },

    /// A step started
    StepStarted { step: StepName, index: usize },

    /// A step finished successfully
    StepComplete {
        step: StepName,
        index: usize,
        duration: Duration,
    },

    /// A step failed; no further steps run
    StepFailed {
        step: StepName,
        index: usize,
        error: String,
    },

    /// Every step succeeded
    ExecutionComplete {
        published_tags: usize,
        total_time: Duration,
    },
}

/// Trait for handling progress events during execution
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

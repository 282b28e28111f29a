//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::ExecutionStarted { image_name, steps } => {
                info!(image = %image_name, steps, "Starting plan execution");
            }
            ProgressEvent::StepStarted { step, index } => {
                debug!(step = %step, index, "Running step");
            }
            ProgressEvent::StepComplete {
                step,
                index,
                duration,
            } => {
                info!(
                    step = %step,
                    index,
                    duration_ms = duration.as_millis() as u64,
                    "Step complete"
                );
            }
            ProgressEvent::StepFailed { step, index, error } => {
                warn!(step = %step, index, error = %error, "Step failed, aborting plan");
            }
            ProgressEvent::ExecutionComplete {
                published_tags,
                total_time,
            } => {
                info!(
                    published_tags,
                    total_time_ms = total_time.as_millis() as u64,
                    "Plan execution complete"
                );
            }
        }
    }
}

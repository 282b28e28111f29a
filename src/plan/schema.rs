//! BuildPlan schema
//!
//! A build plan is the fully resolved output of the compiler: what to run, in
//! which order, and which tags to publish. It holds no credentials and no
//! registry namespace; both are supplied to the executor separately.

use super::step::{BuildStep, StepName};
use crate::stack::BuildToolId;
use crate::tags::TagSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PLAN_SCHEMA_VERSION: &str = "1.0";

/// Immutable, self-contained description of one build invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    version: String,
    image_name: String,
    build_tool: BuildToolId,
    dockerfile_path: String,
    build_context: String,
    tags: TagSet,
    steps: Vec<BuildStep>,
}

impl BuildPlan {
    pub(crate) fn new(
        image_name: String,
        build_tool: BuildToolId,
        dockerfile_path: String,
        build_context: String,
        tags: TagSet,
        steps: Vec<BuildStep>,
    ) -> Self {
        Self {
            version: PLAN_SCHEMA_VERSION.to_string(),
            image_name,
            build_tool,
            dockerfile_path,
            build_context,
            tags,
            steps,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn build_tool(&self) -> BuildToolId {
        self.build_tool
    }

    pub fn dockerfile_path(&self) -> &str {
        &self.dockerfile_path
    }

    pub fn build_context(&self) -> &str {
        &self.build_context
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<StepName> {
        self.steps.iter().map(|s| s.name).collect()
    }

    pub fn has_step(&self, name: StepName) -> bool {
        self.steps.iter().any(|s| s.name == name)
    }

    /// Canonical serialization, byte-identical for identical plans
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize build plan to JSON")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse build plan JSON")
    }
}

impl fmt::Display for BuildPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Build Plan")?;
        writeln!(f, "==========")?;
        writeln!(f, "Image: {}", self.image_name)?;
        writeln!(f, "Build Tool: {}", self.build_tool)?;
        writeln!(f, "Dockerfile: {}", self.dockerfile_path)?;
        writeln!(f, "Context: {}", self.build_context)?;
        writeln!(f, "Tags: {}", self.tags)?;
        writeln!(f)?;
        writeln!(f, "Steps:")?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, step.name)?;
        }
        Ok(())
    }
}

//! Output formatting for multiple formats
//!
//! Plans, tag sets, validated jobs and execution reports can be printed as
//! JSON, YAML, or human-readable text. JSON and YAML are stable for a given
//! input; human output is meant for terminals and may change.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::executor::ExecutionReport;
use crate::job::JobConfig;
use crate::plan::{BuildPlan, BuildStep, StepCommand, StepName};
use crate::tags::TagSet;

const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Plan plus the catalogue steps left out of it
#[derive(Serialize)]
struct PlanWithSkipped<'a> {
    plan: &'a BuildPlan,
    skipped_steps: Vec<StepName>,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn format_plan(&self, plan: &BuildPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(plan, "build plan"),
            OutputFormat::Yaml => to_yaml(plan, "build plan"),
            OutputFormat::Human => Ok(self.format_plan_human(plan, &[])),
        }
    }

    /// Formats a plan together with the full catalogue it was selected from
    pub fn format_plan_with_catalogue(
        &self,
        plan: &BuildPlan,
        catalogue: &[BuildStep],
    ) -> Result<String> {
        let skipped: Vec<StepName> = catalogue
            .iter()
            .filter(|s| !s.condition)
            .map(|s| s.name)
            .collect();

        match self.format {
            OutputFormat::Json => to_json(
                &PlanWithSkipped {
                    plan,
                    skipped_steps: skipped,
                },
                "build plan",
            ),
            OutputFormat::Yaml => to_yaml(
                &PlanWithSkipped {
                    plan,
                    skipped_steps: skipped,
                },
                "build plan",
            ),
            OutputFormat::Human => Ok(self.format_plan_human(plan, &skipped)),
        }
    }

    pub fn format_tags(&self, tags: &TagSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(tags, "tags"),
            OutputFormat::Yaml => to_yaml(tags, "tags"),
            OutputFormat::Human => {
                let mut output = String::new();
                for tag in tags {
                    output.push_str(tag);
                    output.push('\n');
                }
                Ok(output)
            }
        }
    }

    pub fn format_job(&self, job: &JobConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(job, "job configuration"),
            OutputFormat::Yaml => to_yaml(job, "job configuration"),
            OutputFormat::Human => Ok(format!("\u{2713} Job is valid\n\n{}", job)),
        }
    }

    pub fn format_report(&self, report: &ExecutionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "execution report"),
            OutputFormat::Yaml => to_yaml(report, "execution report"),
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    fn format_plan_human(&self, plan: &BuildPlan, skipped: &[StepName]) -> String {
        let mut output = String::new();

        output.push_str(&format!("Build Plan for {}\n", plan.image_name()));
        output.push_str(&"\u{2501}".repeat(RULE_WIDTH));
        output.push_str("\n\n");

        output.push_str(&format!("Build Tool:  {}\n", plan.build_tool()));
        output.push_str(&format!("Dockerfile:  {}\n", plan.dockerfile_path()));
        output.push_str(&format!("Context:     {}\n\n", plan.build_context()));

        output.push_str("Tags:\n");
        push_tree(&mut output, plan.tags().iter().map(str::to_string).collect());
        output.push('\n');

        output.push_str("Steps:\n");
        let steps: Vec<String> = plan
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| match describe(&step.command) {
                Some(detail) => format!("{}. {:<24} {}", i + 1, step.name.as_str(), detail),
                None => format!("{}. {}", i + 1, step.name),
            })
            .collect();
        push_tree(&mut output, steps);

        if !skipped.is_empty() {
            output.push_str("\nSkipped:\n");
            push_tree(&mut output, skipped.iter().map(|s| s.to_string()).collect());
        }

        output
    }

    fn format_report_human(&self, report: &ExecutionReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("\u{2713} Executed plan for {}\n", report.image_name));
        output.push_str(&"\u{2501}".repeat(RULE_WIDTH));
        output.push_str("\n\n");

        output.push_str("Steps:\n");
        push_tree(
            &mut output,
            report
                .steps
                .iter()
                .map(|s| format!("{:<24} {}ms", s.step.as_str(), s.duration_ms))
                .collect(),
        );

        output.push_str("\nPublished:\n");
        if report.published_tags.is_empty() {
            output.push_str("\u{2514}\u{2500} (none)\n");
        } else {
            push_tree(&mut output, report.published_tags.clone());
        }

        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}

fn push_tree(output: &mut String, items: Vec<String>) {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter().enumerate() {
        let connector = if i == last { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item));
    }
}

/// Short human description of a step command
fn describe(command: &StepCommand) -> Option<String> {
    match command {
        StepCommand::Checkout { commit_sha } => Some(commit_sha.clone()),
        StepCommand::SetupRuntime { runtime, .. } => Some(match &runtime.distribution {
            Some(dist) => format!("{} {} ({})", runtime.name, runtime.version, dist),
            None => format!("{} {}", runtime.name, runtime.version),
        }),
        StepCommand::Tool { command, .. } => Some(command.clone()),
        StepCommand::DockerBuild {
            dockerfile_path,
            build_context,
            ..
        } => Some(format!("{} in {}", dockerfile_path, build_context)),
        StepCommand::DockerTagAndPush { .. } | StepCommand::Skip => None,
    }
}

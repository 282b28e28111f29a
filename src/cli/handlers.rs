//! Command handlers.
//!
//! Each handler returns the process exit code: 0 on success, 2 when the job
//! fails validation, 1 for anything else (unreadable files, bad settings,
//! failed steps).

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

use super::commands::{
    PlanArgs, RenderArgs, RevisionArgs, RunArgs, TagsArgs, TargetArgs, ValidateArgs,
};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::DockplanConfig;
use crate::executor::{
    render_script, DryRunRunner, PlanExecutor, RegistryCredentials, RegistryTarget,
    SequentialExecutor,
};
use crate::job::{RawJobConfig, ValidationError};
use crate::plan::PlanCompiler;
use crate::progress::LoggingHandler;
use crate::tags::compute_tags;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_VALIDATION: i32 = 2;

pub fn handle_validate(args: &ValidateArgs) -> i32 {
    finish(run_validate(args))
}

pub fn handle_tags(args: &TagsArgs) -> i32 {
    finish(run_tags(args))
}

pub fn handle_plan(args: &PlanArgs) -> i32 {
    finish(run_plan(args))
}

pub fn handle_render(args: &RenderArgs) -> i32 {
    finish(run_render(args))
}

pub async fn handle_run(args: &RunArgs, quiet: bool) -> i32 {
    finish(run_run(args, quiet).await)
}

fn finish(result: Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => match e.downcast_ref::<ValidationError>() {
            Some(validation) => {
                error!(field = validation.field(), "Job validation failed");
                eprintln!("Error: {}", validation);
                EXIT_VALIDATION
            }
            None => {
                eprintln!("Error: {:#}", e);
                EXIT_FAILURE
            }
        },
    }
}

fn load_settings() -> Result<DockplanConfig> {
    let config = DockplanConfig::default();
    config.validate().context("Invalid dockplan configuration")?;
    debug!(settings = ?config.to_display_map(), "Loaded configuration");
    Ok(config)
}

fn load_job(path: &Path, revision: &RevisionArgs) -> Result<RawJobConfig> {
    let mut raw = RawJobConfig::from_path(path)?;
    raw.branch = revision.resolve_branch();
    raw.commit_sha = revision.resolve_commit_sha();
    Ok(raw)
}

fn compiler_for(release_branch: Option<&str>, settings: &DockplanConfig) -> PlanCompiler {
    PlanCompiler::new(release_branch.unwrap_or(&settings.release_branch))
}

fn resolve_target(args: &TargetArgs, settings: &DockplanConfig) -> Result<RegistryTarget> {
    let registry = args.registry.clone().or_else(|| settings.registry.clone());
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| settings.namespace.clone());
    if namespace.trim().is_empty() {
        bail!("A registry namespace is required: pass --namespace or set DOCKPLAN_NAMESPACE");
    }
    Ok(RegistryTarget::new(registry, namespace))
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            debug!(path = %path.display(), "Output written");
        }
        None => print!("{}", ensure_newline(content)),
    }
    Ok(())
}

fn ensure_newline(content: &str) -> String {
    if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    }
}

fn run_validate(args: &ValidateArgs) -> Result<()> {
    let settings = load_settings()?;
    let raw = load_job(&args.job_file, &args.revision)?;
    let job = compiler_for(None, &settings).validator().validate(&raw)?;

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    emit(&formatter.format_job(&job)?, None)
}

fn run_tags(args: &TagsArgs) -> Result<()> {
    let settings = load_settings()?;
    let branch = args
        .revision
        .resolve_branch()
        .ok_or(ValidationError::MissingField { field: "branch" })?;
    let commit_sha = args
        .revision
        .resolve_commit_sha()
        .ok_or(ValidationError::MissingField {
            field: "commit_sha",
        })?;
    let release_branch = args
        .release_branch
        .as_deref()
        .unwrap_or(&settings.release_branch);

    let tags = compute_tags(
        &branch,
        &commit_sha,
        args.suffix.as_deref().unwrap_or(""),
        release_branch,
    )?;

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    emit(&formatter.format_tags(&tags)?, None)
}

fn run_plan(args: &PlanArgs) -> Result<()> {
    let settings = load_settings()?;
    let raw = load_job(&args.job_file, &args.revision)?;
    let compiler = compiler_for(args.release_branch.as_deref(), &settings);

    let job = compiler.validator().validate(&raw)?;
    let plan = compiler.compile_config(&job)?;

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let content = if args.show_skipped {
        formatter.format_plan_with_catalogue(&plan, &compiler.planner().catalogue(&job)?)?
    } else {
        formatter.format_plan(&plan)?
    };
    emit(&content, args.output.as_deref())
}

fn run_render(args: &RenderArgs) -> Result<()> {
    let settings = load_settings()?;
    let raw = load_job(&args.job_file, &args.revision)?;
    let target = resolve_target(&args.target, &settings)?;
    let plan = compiler_for(args.release_branch.as_deref(), &settings).compile(&raw)?;
    let login = RegistryCredentials::from_env().is_some();

    emit(&render_script(&plan, &target, login), args.output.as_deref())
}

async fn run_run(args: &RunArgs, quiet: bool) -> Result<()> {
    if !args.dry_run {
        bail!("Only dry runs are supported; pass --dry-run");
    }

    let settings = load_settings()?;
    let raw = load_job(&args.job_file, &args.revision)?;
    let target = resolve_target(&args.target, &settings)?;
    let plan = compiler_for(args.release_branch.as_deref(), &settings).compile(&raw)?;
    let credentials = RegistryCredentials::from_env().unwrap_or_else(RegistryCredentials::anonymous);

    let mut executor = SequentialExecutor::new(DryRunRunner::new(), target);
    if !quiet {
        executor = executor.with_progress(LoggingHandler);
    }

    let report = executor
        .execute(plan, &credentials)
        .await
        .context("Dry run failed")?;

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    emit(&formatter.format_report(&report)?, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_job(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn revision(branch: &str, commit: &str) -> RevisionArgs {
        RevisionArgs {
            branch: Some(branch.to_string()),
            commit_sha: Some(commit.to_string()),
        }
    }

    #[test]
    fn test_finish_maps_validation_errors() {
        let err: anyhow::Error = ValidationError::MissingField {
            field: "image_name",
        }
        .into();
        assert_eq!(finish(Err(err)), EXIT_VALIDATION);
        assert_eq!(finish(Err(anyhow::anyhow!("disk on fire"))), EXIT_FAILURE);
        assert_eq!(finish(Ok(())), EXIT_SUCCESS);
    }

    #[test]
    fn test_finish_keeps_validation_code_through_context() {
        let err = anyhow::Error::from(ValidationError::InvalidImageName {
            value: "Bad".to_string(),
        })
        .context("while compiling");
        assert_eq!(finish(Err(err)), EXIT_VALIDATION);
    }

    #[test]
    fn test_plan_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let job = write_job(&dir, "job.yaml", "image_name: svc\nbuild_tool: npm\n");
        let out = dir.path().join("plan.json");

        let args = PlanArgs {
            job_file: job,
            revision: revision("main", "abc123456789"),
            release_branch: Some("main".to_string()),
            format: OutputFormatArg::Json,
            show_skipped: false,
            output: Some(out.clone()),
        };
        assert_eq!(handle_plan(&args), EXIT_SUCCESS);

        let written = fs::read_to_string(out).unwrap();
        assert!(written.contains("\"npm ci\""));
        assert!(written.contains("\"main-abc1234\""));
    }

    #[test]
    fn test_plan_rejects_invalid_job() {
        let dir = TempDir::new().unwrap();
        let job = write_job(&dir, "job.yaml", "image_name: Bad_Name\n");

        let args = PlanArgs {
            job_file: job,
            revision: revision("main", "abc123456789"),
            release_branch: Some("main".to_string()),
            format: OutputFormatArg::Human,
            show_skipped: false,
            output: None,
        };
        assert_eq!(handle_plan(&args), EXIT_VALIDATION);
    }

    #[test]
    fn test_missing_job_file_is_a_failure() {
        let args = ValidateArgs {
            job_file: PathBuf::from("/nonexistent/job.yaml"),
            revision: revision("main", "abc123456789"),
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_validate(&args), EXIT_FAILURE);
    }

    #[test]
    fn test_render_requires_namespace() {
        let settings = DockplanConfig {
            release_branch: "main".to_string(),
            registry: None,
            namespace: String::new(),
            log_level: "info".to_string(),
        };
        assert!(resolve_target(&TargetArgs::default(), &settings).is_err());

        let target = resolve_target(
            &TargetArgs {
                registry: Some("ghcr.io".to_string()),
                namespace: Some("acme".to_string()),
            },
            &settings,
        )
        .unwrap();
        assert_eq!(target.repository("svc"), "ghcr.io/acme/svc");
    }

    #[test]
    fn test_ensure_newline() {
        assert_eq!(ensure_newline("a"), "a\n");
        assert_eq!(ensure_newline("a\n"), "a\n");
    }
}

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;

/// Environment variables CI runners set for the checked-out revision
pub const BRANCH_FALLBACK_ENV: &str = "GITHUB_REF_NAME";
pub const COMMIT_FALLBACK_ENV: &str = "GITHUB_SHA";

/// Compiles container build jobs into deterministic build plans
#[derive(Parser, Debug)]
#[command(
    name = "dockplan",
    about = "Compiles container build jobs into deterministic build plans",
    version,
    author,
    long_about = "dockplan validates a container build job, computes the image tags for the \
                  checked-out revision and produces the ordered list of steps needed to build \
                  and publish the image. Plans can be printed, rendered as a shell script or \
                  walked through in dry-run mode."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Validate a job file",
        long_about = "Validates a job file against the checked-out revision and prints the \
                      normalised job with defaults applied.\n\n\
                      Examples:\n  \
                      dockplan validate job.yaml --branch main --commit $(git rev-parse HEAD)\n  \
                      dockplan validate job.json --format json"
    )]
    Validate(ValidateArgs),

    #[command(
        about = "Compute image tags for a revision",
        long_about = "Computes the tags an image built from the given revision receives.\n\n\
                      Examples:\n  \
                      dockplan tags --branch main --commit abc1234def\n  \
                      dockplan tags --branch feature/login --commit abc1234def --suffix rc1"
    )]
    Tags(TagsArgs),

    #[command(
        about = "Compile a job file into a build plan",
        long_about = "Validates a job file, computes tags and prints the ordered build plan.\n\n\
                      Examples:\n  \
                      dockplan plan job.yaml\n  \
                      dockplan plan job.yaml --format json -o plan.json\n  \
                      dockplan plan job.yaml --show-skipped"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Render a build plan as a shell script",
        long_about = "Compiles a job file and renders the plan as a POSIX shell script that \
                      stops at the first failing command. Registry credentials are read from \
                      DOCKPLAN_REGISTRY_USERNAME and DOCKPLAN_REGISTRY_TOKEN when the script \
                      runs and are never written into it.\n\n\
                      Examples:\n  \
                      dockplan render job.yaml --registry ghcr.io --namespace acme > build.sh"
    )]
    Render(RenderArgs),

    #[command(
        about = "Walk through a build plan",
        long_about = "Compiles a job file and drives it through the sequential executor. \
                      Only dry runs are supported: every command is logged and recorded, \
                      nothing is built or pushed.\n\n\
                      Examples:\n  \
                      dockplan run job.yaml --namespace acme --dry-run"
    )]
    Run(RunArgs),
}

/// Checked-out revision, from flags or the CI environment
#[derive(Args, Debug, Clone, Default)]
pub struct RevisionArgs {
    #[arg(
        long,
        value_name = "BRANCH",
        help = "Branch being built (defaults to $GITHUB_REF_NAME)"
    )]
    pub branch: Option<String>,

    #[arg(
        long = "commit",
        value_name = "SHA",
        help = "Commit being built (defaults to $GITHUB_SHA)"
    )]
    pub commit_sha: Option<String>,
}

impl RevisionArgs {
    pub fn resolve_branch(&self) -> Option<String> {
        self.branch
            .clone()
            .or_else(|| env::var(BRANCH_FALLBACK_ENV).ok())
    }

    pub fn resolve_commit_sha(&self) -> Option<String> {
        self.commit_sha
            .clone()
            .or_else(|| env::var(COMMIT_FALLBACK_ENV).ok())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(value_name = "JOB_FILE", help = "Job file (.yaml, .yml, .json or .toml)")]
    pub job_file: PathBuf,

    #[command(flatten)]
    pub revision: RevisionArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct TagsArgs {
    #[command(flatten)]
    pub revision: RevisionArgs,

    #[arg(long, value_name = "SUFFIX", help = "Extra tag to add")]
    pub suffix: Option<String>,

    #[arg(
        long,
        value_name = "BRANCH",
        help = "Branch tagged 'latest' (defaults to $DOCKPLAN_RELEASE_BRANCH or main)"
    )]
    pub release_branch: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(value_name = "JOB_FILE", help = "Job file (.yaml, .yml, .json or .toml)")]
    pub job_file: PathBuf,

    #[command(flatten)]
    pub revision: RevisionArgs,

    #[arg(
        long,
        value_name = "BRANCH",
        help = "Branch tagged 'latest' (defaults to $DOCKPLAN_RELEASE_BRANCH or main)"
    )]
    pub release_branch: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Also list catalogue steps excluded for this build tool")]
    pub show_skipped: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

/// Where images are published; overrides DOCKPLAN_REGISTRY and DOCKPLAN_NAMESPACE
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    #[arg(long, value_name = "HOST", help = "Registry host, e.g. ghcr.io")]
    pub registry: Option<String>,

    #[arg(long, value_name = "NAMESPACE", help = "Registry namespace")]
    pub namespace: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "JOB_FILE", help = "Job file (.yaml, .yml, .json or .toml)")]
    pub job_file: PathBuf,

    #[command(flatten)]
    pub revision: RevisionArgs,

    #[arg(long, value_name = "BRANCH", help = "Branch tagged 'latest'")]
    pub release_branch: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the script to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(value_name = "JOB_FILE", help = "Job file (.yaml, .yml, .json or .toml)")]
    pub job_file: PathBuf,

    #[command(flatten)]
    pub revision: RevisionArgs,

    #[arg(long, value_name = "BRANCH", help = "Branch tagged 'latest'")]
    pub release_branch: Option<String>,

    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(
        long,
        required = true,
        help = "Record the commands each step would run instead of running them"
    )]
    pub dry_run: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format for the execution report"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_plan_defaults() {
        let args = CliArgs::parse_from(["dockplan", "plan", "job.yaml"]);
        match args.command {
            Commands::Plan(plan_args) => {
                assert_eq!(plan_args.job_file, PathBuf::from("job.yaml"));
                assert_eq!(plan_args.format, OutputFormatArg::Human);
                assert!(!plan_args.show_skipped);
                assert!(plan_args.output.is_none());
                assert!(plan_args.release_branch.is_none());
                assert!(plan_args.revision.branch.is_none());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_plan_with_options() {
        let args = CliArgs::parse_from([
            "dockplan",
            "plan",
            "job.yaml",
            "--branch",
            "develop",
            "--commit",
            "abc1234",
            "--release-branch",
            "trunk",
            "--format",
            "json",
            "--show-skipped",
            "-o",
            "plan.json",
        ]);
        match args.command {
            Commands::Plan(plan_args) => {
                assert_eq!(plan_args.revision.branch.as_deref(), Some("develop"));
                assert_eq!(plan_args.revision.commit_sha.as_deref(), Some("abc1234"));
                assert_eq!(plan_args.release_branch.as_deref(), Some("trunk"));
                assert_eq!(plan_args.format, OutputFormatArg::Json);
                assert!(plan_args.show_skipped);
                assert_eq!(plan_args.output, Some(PathBuf::from("plan.json")));
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_tags_command() {
        let args = CliArgs::parse_from([
            "dockplan", "tags", "--branch", "main", "--commit", "abc1234", "--suffix", "rc1",
        ]);
        match args.command {
            Commands::Tags(tags_args) => {
                assert_eq!(tags_args.revision.branch.as_deref(), Some("main"));
                assert_eq!(tags_args.suffix.as_deref(), Some("rc1"));
            }
            _ => panic!("Expected Tags command"),
        }
    }

    #[test]
    fn test_render_target_flags() {
        let args = CliArgs::parse_from([
            "dockplan",
            "render",
            "job.yaml",
            "--registry",
            "ghcr.io",
            "--namespace",
            "acme",
        ]);
        match args.command {
            Commands::Render(render_args) => {
                assert_eq!(render_args.target.registry.as_deref(), Some("ghcr.io"));
                assert_eq!(render_args.target.namespace.as_deref(), Some("acme"));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_run_requires_dry_run() {
        assert!(CliArgs::try_parse_from(["dockplan", "run", "job.yaml"]).is_err());

        let args = CliArgs::parse_from(["dockplan", "run", "job.yaml", "--dry-run"]);
        match args.command {
            Commands::Run(run_args) => assert!(run_args.dry_run),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["dockplan", "-v", "validate", "job.yaml"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["dockplan", "--log-level", "debug", "-q", "validate", "job.yaml"]);
        assert!(args.quiet);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["dockplan", "-v", "-q", "validate", "job.yaml"]).is_err());
    }

    #[test]
    fn test_explicit_revision_wins_over_environment() {
        let revision = RevisionArgs {
            branch: Some("release/1.0".to_string()),
            commit_sha: Some("abc1234".to_string()),
        };
        assert_eq!(revision.resolve_branch().as_deref(), Some("release/1.0"));
        assert_eq!(revision.resolve_commit_sha().as_deref(), Some("abc1234"));
    }
}

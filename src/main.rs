use dockplan::cli::commands::{CliArgs, Commands};
use dockplan::cli::handlers::{
    handle_plan, handle_render, handle_run, handle_tags, handle_validate,
};
use dockplan::util::logging::{init_logging, parse_level, LoggingConfig, LOG_JSON_ENV, LOG_LEVEL_ENV};
use dockplan::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("dockplan v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Validate(validate_args) => handle_validate(validate_args),
        Commands::Tags(tags_args) => handle_tags(tags_args),
        Commands::Plan(plan_args) => handle_plan(plan_args),
        Commands::Render(render_args) => handle_render(render_args),
        Commands::Run(run_args) => handle_run(run_args, args.quiet).await,
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        env::var(LOG_LEVEL_ENV)
            .map(|v| parse_level(&v))
            .unwrap_or(Level::INFO)
    };

    let use_json = env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}

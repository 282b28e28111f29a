pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, PlanArgs, RenderArgs, RunArgs, TagsArgs, ValidateArgs};
pub use output::{OutputFormat, OutputFormatter};

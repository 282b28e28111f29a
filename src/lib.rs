//! dockplan - build plan compiler for container images
//!
//! dockplan turns a container build job (image name, Dockerfile location,
//! build tool, tag suffix) and the checked-out revision into a deterministic,
//! ordered [`BuildPlan`]: the steps needed to fetch, build, tag and publish
//! the image. Executing a plan is left to a [`executor::PlanExecutor`].
//!
//! # Core Concepts
//!
//! - **Validation**: a [`RawJobConfig`] is checked rule by rule and becomes a
//!   [`JobConfig`] with defaults applied
//! - **Tags**: branch, branch-plus-short-SHA, `latest` on the release branch,
//!   and an optional suffix, computed by [`tags::compute_tags`]
//! - **Planning**: a fixed step catalogue filtered by build tool
//! - **Execution**: plans are consumed by executors that stop at the first
//!   failing step
//!
//! # Example Usage
//!
//! ```
//! use dockplan::{PlanCompiler, RawJobConfig};
//!
//! let job = RawJobConfig::new("orders-api")
//!     .with_build_tool("gradle")
//!     .with_revision("main", "0123456789abcdef");
//!
//! let plan = PlanCompiler::new("main").compile(&job).unwrap();
//! assert_eq!(plan.tags().as_slice(), ["main", "main-0123456", "latest"]);
//! assert_eq!(plan.steps().len(), 6);
//! ```
//!
//! # Project Structure
//!
//! - [`job`]: job inputs and validation errors
//! - [`validation`]: validation rules
//! - [`tags`]: tag computation
//! - [`plan`]: step catalogue, planner, and compiler
//! - [`stack`]: build tool descriptors
//! - [`executor`]: plan execution contract, dry-run runner, script rendering

pub mod cli;
pub mod config;
pub mod executor;
pub mod job;
pub mod plan;
pub mod progress;
pub mod stack;
pub mod tags;
pub mod util;
pub mod validation;

pub use config::{ConfigError, DockplanConfig};
pub use executor::{ExecutionError, ExecutionReport, PlanExecutor, RegistryCredentials, RegistryTarget};
pub use job::{JobConfig, RawJobConfig, ValidationError};
pub use plan::{BuildPlan, BuildStep, PlanCompiler, StepCommand, StepName};
pub use stack::BuildToolId;
pub use tags::{compute_tags, TagSet};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

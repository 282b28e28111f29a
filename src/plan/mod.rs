//! Build plan compilation.
//!
//! [`PlanCompiler`] validates a job, computes its tags, plans its steps and
//! combines the results into a [`BuildPlan`]. Tag computation and step
//! planning are independent of each other; both only read the validated job.
//!
//! ```
//! use dockplan::job::RawJobConfig;
//! use dockplan::plan::{PlanCompiler, StepName};
//!
//! let raw = RawJobConfig::new("svc")
//!     .with_build_tool("none")
//!     .with_revision("main", "abc123456789");
//! let plan = PlanCompiler::new("main").compile(&raw).unwrap();
//!
//! assert_eq!(
//!     plan.step_names(),
//!     vec![StepName::Checkout, StepName::DockerBuild, StepName::DockerTagAndPush]
//! );
//! ```

pub mod compiler;
pub mod planner;
pub mod schema;
pub mod step;

pub use compiler::{compile, PlanCompiler, DEFAULT_RELEASE_BRANCH};
pub use planner::{catalogue_names, plan_steps, StepPlanner};
pub use schema::{BuildPlan, PLAN_SCHEMA_VERSION};
pub use step::{BuildStep, StepCommand, StepName};

//! Build tool identifiers and definitions.
//!
//! [`BuildToolId`] is the closed set of tools a job may select. Each tool
//! other than `none` has a [`BuildSystem`] definition registered in the
//! [`StackRegistry`], which the step planner consults to fill in runtime and
//! command parameters.
//!
//! # Example
//!
//! ```
//! use dockplan::stack::{BuildToolId, StackRegistry};
//!
//! let registry = StackRegistry::with_defaults();
//! let maven = registry.get_build_system(BuildToolId::Maven).unwrap();
//! assert_eq!(maven.runtime("17").name, "java");
//! assert!(registry.get_build_system(BuildToolId::None).is_none());
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod build_tool_id;
pub mod buildsystem;
pub mod registry;

pub use build_tool_id::BuildToolId;
pub use buildsystem::{BuildSystem, RuntimeSpec};
pub use registry::StackRegistry;

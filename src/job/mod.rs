//! Job descriptions: the raw caller input, its validated form, and the
//! errors validation reports.

pub mod config;
pub mod error;
pub mod raw;

pub use config::{JobConfig, DEFAULT_BUILD_CONTEXT, DEFAULT_DOCKERFILE_PATH, DEFAULT_JAVA_VERSION};
pub use error::ValidationError;
pub use raw::{JobFileFormat, RawJobConfig};

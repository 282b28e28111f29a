//! Go modules build system

use super::{BuildSystem, RuntimeSpec};
use crate::stack::BuildToolId;

pub const DEFAULT_GO_VERSION: &str = "1.22";

pub struct GoModBuildSystem;

impl BuildSystem for GoModBuildSystem {
    fn id(&self) -> BuildToolId {
        BuildToolId::Go
    }

    fn runtime(&self, _java_version: &str) -> RuntimeSpec {
        RuntimeSpec {
            name: "go".to_string(),
            version: DEFAULT_GO_VERSION.to_string(),
            distribution: None,
        }
    }

    fn dependency_command(&self) -> &'static str {
        "go mod download"
    }

    fn package_command(&self) -> &'static str {
        "go build ./..."
    }

    fn cache_paths(&self) -> &[&'static str] {
        &["~/go/pkg/mod"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_ignores_java_version() {
        let runtime = GoModBuildSystem.runtime("21");
        assert_eq!(runtime.name, "go");
        assert_eq!(runtime.version, DEFAULT_GO_VERSION);
        assert!(runtime.distribution.is_none());
    }
}

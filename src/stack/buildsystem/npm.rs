//! npm build system (JavaScript/TypeScript)

use super::{BuildSystem, RuntimeSpec};
use crate::stack::BuildToolId;

pub const DEFAULT_NODE_VERSION: &str = "20";

pub struct NpmBuildSystem;

impl BuildSystem for NpmBuildSystem {
    fn id(&self) -> BuildToolId {
        BuildToolId::Npm
    }

    fn runtime(&self, _java_version: &str) -> RuntimeSpec {
        RuntimeSpec {
            name: "node".to_string(),
            version: DEFAULT_NODE_VERSION.to_string(),
            distribution: None,
        }
    }

    fn dependency_command(&self) -> &'static str {
        "npm ci"
    }

    fn package_command(&self) -> &'static str {
        "npm run build --if-present"
    }

    fn cache_paths(&self) -> &[&'static str] {
        &["~/.npm"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_runtime_is_node() {
        let runtime = NpmBuildSystem.runtime("17");
        assert_eq!(runtime.name, "node");
        assert_eq!(runtime.version, DEFAULT_NODE_VERSION);
    }

    #[test]
    fn test_npm_uses_lockfile_install() {
        assert_eq!(NpmBuildSystem.dependency_command(), "npm ci");
    }
}

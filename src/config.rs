//! Configuration management for dockplan
//!
//! Settings that are not part of an individual job are loaded from environment
//! variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `DOCKPLAN_RELEASE_BRANCH`: branch whose builds are also tagged `latest` - default: "main"
//! - `DOCKPLAN_REGISTRY`: registry host (e.g. "ghcr.io") - default: daemon default
//! - `DOCKPLAN_NAMESPACE`: registry namespace images are pushed under - default: none
//! - `DOCKPLAN_LOG_LEVEL`: logging level - default: "info"
//!
//! Registry credentials are deliberately not part of this configuration; see
//! [`crate::executor::RegistryCredentials::from_env`].
//!
//! # Example
//!
//! ```no_run
//! use dockplan::DockplanConfig;
//!
//! let config = DockplanConfig::default();
//! config.validate().expect("Invalid configuration");
//! let target = config.registry_target();
//! ```

use crate::executor::RegistryTarget;
use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

const DEFAULT_RELEASE_BRANCH: &str = "main";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockplanConfig {
    pub release_branch: String,
    pub registry: Option<String>,
    pub namespace: String,
    pub log_level: String,
}

impl Default for DockplanConfig {
    fn default() -> Self {
        let release_branch = env::var("DOCKPLAN_RELEASE_BRANCH")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_RELEASE_BRANCH.to_string());

        let registry = env::var("DOCKPLAN_REGISTRY").ok().filter(|v| !v.is_empty());

        let namespace = env::var("DOCKPLAN_NAMESPACE").unwrap_or_default();

        let log_level = env::var("DOCKPLAN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            release_branch,
            registry,
            namespace,
            log_level,
        }
    }
}

impl DockplanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.release_branch.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Release branch cannot be empty".to_string(),
            ));
        }

        if let Some(registry) = &self.registry {
            if registry.contains("://") {
                return Err(ConfigError::ParseError {
                    field: "DOCKPLAN_REGISTRY".to_string(),
                    error: format!("expected a host name, got URL '{}'", registry),
                });
            }
        }

        if self.namespace.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(ConfigError::ParseError {
                field: "DOCKPLAN_NAMESPACE".to_string(),
                error: format!("'{}' is not a valid namespace", self.namespace),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn registry_target(&self) -> RegistryTarget {
        RegistryTarget::new(self.registry.clone(), self.namespace.clone())
    }

    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("release_branch".to_string(), self.release_branch.clone());
        if let Some(registry) = &self.registry {
            map.insert("registry".to_string(), registry.clone());
        }
        map.insert("namespace".to_string(), self.namespace.clone());
        map.insert("log_level".to_string(), self.log_level.clone());
        map
    }
}

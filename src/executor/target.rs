use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an executor publishes images.
///
/// The registry host and namespace never appear in a build plan; the same plan
/// can be pushed to different targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryTarget {
    /// Registry host (e.g., "ghcr.io"). `None` means the daemon's default registry.
    pub registry: Option<String>,
    /// Namespace or organisation the image lives under
    pub namespace: String,
}

impl RegistryTarget {
    pub fn new(registry: Option<String>, namespace: impl Into<String>) -> Self {
        Self {
            registry: registry.filter(|r| !r.is_empty()),
            namespace: namespace.into(),
        }
    }

    /// Fully qualified repository, without a tag
    pub fn repository(&self, image_name: &str) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(registry) = &self.registry {
            parts.push(registry.trim_end_matches('/'));
        }
        let namespace = self.namespace.trim_matches('/');
        if !namespace.is_empty() {
            parts.push(namespace);
        }
        parts.push(image_name);
        parts.join("/")
    }

    /// Fully qualified reference for one tag
    pub fn image_ref(&self, image_name: &str, tag: &str) -> String {
        format!("{}:{}", self.repository(image_name), tag)
    }
}

impl fmt::Display for RegistryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.registry {
            Some(registry) => write!(f, "{}/{}", registry, self.namespace),
            None => f.write_str(&self.namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reference() {
        let target = RegistryTarget::new(Some("ghcr.io".to_string()), "acme");
        assert_eq!(target.repository("svc"), "ghcr.io/acme/svc");
        assert_eq!(target.image_ref("svc", "main"), "ghcr.io/acme/svc:main");
    }

    #[test]
    fn test_default_registry() {
        let target = RegistryTarget::new(None, "acme");
        assert_eq!(target.image_ref("svc", "latest"), "acme/svc:latest");
    }

    #[test]
    fn test_empty_parts_are_dropped() {
        let target = RegistryTarget::new(Some(String::new()), "");
        assert!(target.registry.is_none());
        assert_eq!(target.image_ref("svc", "main"), "svc:main");
    }

    #[test]
    fn test_slashes_trimmed() {
        let target = RegistryTarget::new(Some("registry.local:5000/".to_string()), "/team/");
        assert_eq!(target.repository("svc"), "registry.local:5000/team/svc");
    }
}

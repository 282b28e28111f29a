use super::buildsystem::*;
use super::BuildToolId;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup table from build tool identifier to its definition.
///
/// `BuildToolId::None` has no definition: a job without a toolchain goes
/// straight from checkout to the image build.
pub struct StackRegistry {
    build_systems: HashMap<BuildToolId, Arc<dyn BuildSystem>>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self {
            build_systems: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for id in BuildToolId::all_variants() {
            let bs: Arc<dyn BuildSystem> = match id {
                BuildToolId::Maven => Arc::new(MavenBuildSystem),
                BuildToolId::Gradle => Arc::new(GradleBuildSystem),
                BuildToolId::Go => Arc::new(GoModBuildSystem),
                BuildToolId::Npm => Arc::new(NpmBuildSystem),
                BuildToolId::None => continue,
            };
            registry.register(bs);
        }

        registry
    }

    pub fn register(&mut self, build_system: Arc<dyn BuildSystem>) {
        self.build_systems.insert(build_system.id(), build_system);
    }

    pub fn get_build_system(&self, id: BuildToolId) -> Option<&dyn BuildSystem> {
        self.build_systems.get(&id).map(|bs| bs.as_ref())
    }
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_every_toolchain() {
        let registry = StackRegistry::with_defaults();
        for id in BuildToolId::all_variants() {
            let found = registry.get_build_system(*id);
            assert_eq!(found.is_some(), id.has_toolchain(), "{}", id);
            if let Some(bs) = found {
                assert_eq!(bs.id(), *id);
            }
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = StackRegistry::new();
        assert!(registry.get_build_system(BuildToolId::Maven).is_none());
    }
}

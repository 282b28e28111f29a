crate::define_id_enum! {
    /// Build tool selected by a job. `None` skips the language toolchain entirely.
    BuildToolId {
        Maven => "maven" : "Maven" | "mvn",
        Gradle => "gradle" : "Gradle",
        Go => "go" : "Go" | "go-mod" | "golang",
        Npm => "npm" : "npm" | "node",
        None => "none" : "none",
    }
}

impl BuildToolId {
    /// Whether this tool runs on the JVM and honours `java_version`
    pub fn is_jvm(&self) -> bool {
        matches!(self, Self::Maven | Self::Gradle)
    }

    /// Whether the job compiles anything before the image build
    pub fn has_toolchain(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for BuildToolId {
    fn default() -> Self {
        Self::Maven
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_build_tool_id_serialization() {
        assert_eq!(
            serde_json::to_string(&BuildToolId::Maven).unwrap(),
            "\"maven\""
        );
        assert_eq!(serde_json::to_string(&BuildToolId::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_build_tool_id_deserialization() {
        let tool: BuildToolId = serde_json::from_str("\"gradle\"").unwrap();
        assert_eq!(tool, BuildToolId::Gradle);
    }

    #[test]
    fn test_unknown_build_tool_is_rejected() {
        let result: Result<BuildToolId, _> = serde_json::from_str("\"bazel\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("bazel"));
        assert!(err.contains("maven"));
    }

    #[parameterized(
        canonical = { "maven", Some(BuildToolId::Maven) },
        uppercase = { "MAVEN", Some(BuildToolId::Maven) },
        mvn_alias = { "mvn", Some(BuildToolId::Maven) },
        gradle = { "Gradle", Some(BuildToolId::Gradle) },
        golang_alias = { "golang", Some(BuildToolId::Go) },
        go_mod_alias = { "go-mod", Some(BuildToolId::Go) },
        node_alias = { "node", Some(BuildToolId::Npm) },
        none = { "none", Some(BuildToolId::None) },
        padded = { "  npm ", Some(BuildToolId::Npm) },
        unknown = { "bazel", None },
        empty = { "", None },
    )]
    fn test_from_name(input: &str, expected: Option<BuildToolId>) {
        assert_eq!(BuildToolId::from_name(input), expected);
    }

    #[test]
    fn test_default_is_maven() {
        assert_eq!(BuildToolId::default(), BuildToolId::Maven);
    }

    #[test]
    fn test_tool_traits() {
        assert!(BuildToolId::Maven.is_jvm());
        assert!(BuildToolId::Gradle.is_jvm());
        assert!(!BuildToolId::Go.is_jvm());
        assert!(!BuildToolId::None.has_toolchain());
        assert!(BuildToolId::Npm.has_toolchain());
        assert_eq!(BuildToolId::all_variants().len(), 5);
    }
}

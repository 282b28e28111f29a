//! Output format tests for plans, tags and execution reports

use dockplan::cli::output::{OutputFormat, OutputFormatter};
use dockplan::executor::{ExecutionReport, StepOutcome};
use dockplan::plan::{compile, BuildPlan, StepName};
use dockplan::RawJobConfig;
use serde_json::Value;

fn plan() -> BuildPlan {
    compile(
        &RawJobConfig::new("orders-api")
            .with_build_tool("gradle")
            .with_revision("main", "0123456789abcdef"),
        "main",
    )
    .unwrap()
}

#[test]
fn test_plan_json_shape() {
    let json = OutputFormatter::new(OutputFormat::Json)
        .format_plan(&plan())
        .unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], "1.0");
    assert_eq!(value["image_name"], "orders-api");
    assert_eq!(value["build_tool"], "gradle");
    assert_eq!(value["dockerfile_path"], "./Dockerfile");
    assert_eq!(value["build_context"], ".");
    assert_eq!(
        value["tags"],
        serde_json::json!(["main", "main-0123456", "latest"])
    );

    let steps = value["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 6);
    assert_eq!(steps[0]["name"], "checkout");
    assert_eq!(steps[0]["command"]["kind"], "checkout");
    assert_eq!(steps[0]["command"]["commit_sha"], "0123456789abcdef");
    assert_eq!(steps[1]["command"]["runtime"]["distribution"], "temurin");
    assert_eq!(steps[2]["command"]["command"], "./gradlew dependencies --no-daemon");
    assert!(steps.iter().all(|s| s["condition"] == true));
}

#[test]
fn test_plan_yaml_contains_steps() {
    let yaml = OutputFormatter::new(OutputFormat::Yaml)
        .format_plan(&plan())
        .unwrap();
    let restored: BuildPlan = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(restored, plan());
    assert!(yaml.contains("kind: docker_tag_and_push"));
}

#[test]
fn test_plan_human_output() {
    let output = OutputFormatter::new(OutputFormat::Human)
        .format_plan(&plan())
        .unwrap();

    assert!(output.contains("Build Plan for orders-api"));
    assert!(output.contains("Build Tool:  gradle"));
    assert!(output.contains("java 17 (temurin)"));
    assert!(output.contains("./gradlew build -x test --no-daemon"));
    assert!(output.contains("6. docker_tag_and_push"));
}

#[test]
fn test_report_formats() {
    let report = ExecutionReport {
        image_name: "orders-api".to_string(),
        steps: vec![StepOutcome {
            step: StepName::Checkout,
            index: 0,
            duration_ms: 3,
        }],
        published_tags: vec!["ghcr.io/acme/orders-api:main".to_string()],
    };

    let json = OutputFormatter::new(OutputFormat::Json)
        .format_report(&report)
        .unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["steps"][0]["step"], "checkout");
    assert_eq!(value["published_tags"][0], "ghcr.io/acme/orders-api:main");

    let human = OutputFormatter::new(OutputFormat::Human)
        .format_report(&report)
        .unwrap();
    assert!(human.contains("Executed plan for orders-api"));
    assert!(human.contains("\u{2514}\u{2500} ghcr.io/acme/orders-api:main"));
}

//! Shell rendering of build plans.
//!
//! Produces the commands an executor on a plain CI runner would issue for
//! each step. Registry credentials are referenced through environment
//! variables and never written into the output.

use super::credentials::{TOKEN_ENV, USERNAME_ENV};
use super::RegistryTarget;
use crate::plan::{BuildPlan, BuildStep, StepCommand};

/// Quotes `arg` for a POSIX shell when it contains anything but safe characters
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Shell lines for one step; comments for steps a shell cannot express directly.
///
/// With `login` unset the push step relies on whatever the docker daemon is
/// already logged in to.
pub fn step_commands(
    step: &BuildStep,
    plan: &BuildPlan,
    target: &RegistryTarget,
    login: bool,
) -> Vec<String> {
    match &step.command {
        StepCommand::Checkout { commit_sha } => vec![format!(
            "git -c advice.detachedHead=false checkout {}",
            shell_quote(commit_sha)
        )],
        StepCommand::SetupRuntime {
            runtime,
            cache_paths,
        } => {
            let mut lines = vec![match &runtime.distribution {
                Some(dist) => format!("# runtime: {} {} ({})", runtime.name, runtime.version, dist),
                None => format!("# runtime: {} {}", runtime.name, runtime.version),
            }];
            lines.extend(cache_paths.iter().map(|p| format!("# cache: {}", p)));
            lines
        }
        StepCommand::Tool { command, .. } => vec![command.clone()],
        StepCommand::DockerBuild {
            dockerfile_path,
            build_context,
            image_name,
        } => vec![format!(
            "docker build -f {} -t {} {}",
            shell_quote(dockerfile_path),
            shell_quote(image_name),
            shell_quote(build_context)
        )],
        StepCommand::DockerTagAndPush { image_name } => {
            let mut lines = Vec::new();
            if login {
                let login_host = target
                    .registry
                    .as_deref()
                    .map(|r| format!(" {}", shell_quote(r)))
                    .unwrap_or_default();
                lines.push(format!(
                    "printf '%s' \"${}\" | docker login{} -u \"${}\" --password-stdin",
                    TOKEN_ENV, login_host, USERNAME_ENV
                ));
            }
            for tag in plan.tags() {
                let reference = shell_quote(&target.image_ref(image_name, tag));
                lines.push(format!("docker tag {} {}", shell_quote(image_name), reference));
                lines.push(format!("docker push {}", reference));
            }
            lines
        }
        StepCommand::Skip => vec![],
    }
}

/// Renders the whole plan as a POSIX shell script that stops on the first error
pub fn render_script(plan: &BuildPlan, target: &RegistryTarget, login: bool) -> String {
    let mut script = String::new();
    script.push_str("#!/bin/sh\n");
    script.push_str("set -eu\n");
    script.push_str(&format!(
        "# image: {} ({})\n",
        target.repository(plan.image_name()),
        plan.build_tool()
    ));

    for (i, step) in plan.steps().iter().filter(|s| s.condition).enumerate() {
        script.push('\n');
        script.push_str(&format!("# step {}: {}\n", i + 1, step.name));
        for line in step_commands(step, plan, target, login) {
            script.push_str(&line);
            script.push('\n');
        }
    }

    script
}

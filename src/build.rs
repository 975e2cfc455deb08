//! Build verification
//!
//! Invokes the project's external build step exactly once per assessment
//! run and propagates the outcome to every probed module that carries a
//! manifest. The invocation is time-bounded; a timeout is non-fatal and
//! the pipeline continues with whatever state the modules already have.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::models::ModuleStatus;

/// Outcome of the single build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    /// Build ran to completion with a non-zero result.
    Failed { error_output: String },
    /// Build exceeded the configured timeout and was killed.
    TimedOut { seconds: u64 },
    /// Build could not be run at all (command missing, wait failure).
    Error { message: String },
}

/// Collaborator that runs the external build step.
pub trait BuildRunner: Send + Sync {
    fn run_build(&self, project_root: &Path, timeout_secs: u64) -> BuildOutcome;
}

/// Runs a configured command as a subprocess, polling for completion with
/// a hard timeout (the child is killed when it fires).
pub struct CommandBuildRunner {
    command: Vec<String>,
}

impl CommandBuildRunner {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl BuildRunner for CommandBuildRunner {
    fn run_build(&self, project_root: &Path, timeout_secs: u64) -> BuildOutcome {
        let Some((program, args)) = self.command.split_first() else {
            return BuildOutcome::Error {
                message: "empty build command".into(),
            };
        };

        debug!("running build: {} {:?}", program, args);

        let mut child = match Command::new(program)
            .args(args)
            .current_dir(project_root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return BuildOutcome::Error {
                    message: format!("{} not found. Please install it first.", program),
                };
            }
            Err(e) => {
                return BuildOutcome::Error {
                    message: format!("failed to run {}: {}", program, e),
                };
            }
        };

        let start = Instant::now();
        let timeout = Duration::from_secs(timeout_secs);

        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    if status.success() {
                        return BuildOutcome::Succeeded;
                    }
                    let stderr = child
                        .stderr
                        .take()
                        .map(|s| {
                            BufReader::new(s)
                                .lines()
                                .map_while(Result::ok)
                                .collect::<Vec<_>>()
                                .join("\n")
                        })
                        .unwrap_or_default();
                    return BuildOutcome::Failed {
                        error_output: stderr,
                    };
                }
                Ok(None) => {
                    if start.elapsed() > timeout {
                        let _ = child.kill();
                        return BuildOutcome::TimedOut {
                            seconds: timeout_secs,
                        };
                    }
                    std::thread::sleep(Duration::from_millis(100));
                }
                Err(e) => {
                    return BuildOutcome::Error {
                        message: format!("failed to wait for {}: {}", program, e),
                    };
                }
            }
        }
    }
}

/// Applies one build outcome to the probed module set.
pub struct BuildVerifier {
    runner: Box<dyn BuildRunner>,
    timeout_secs: u64,
}

impl BuildVerifier {
    pub fn new(runner: Box<dyn BuildRunner>, timeout_secs: u64) -> Self {
        Self {
            runner,
            timeout_secs,
        }
    }

    /// Run the build once and update `buildable` on every module with a
    /// manifest. On timeout or launch error the fields are left untouched
    /// and the failure is recorded at pipeline level only.
    pub fn verify(&self, project_root: &Path, modules: &mut [ModuleStatus]) -> BuildOutcome {
        let outcome = self.runner.run_build(project_root, self.timeout_secs);
        apply_outcome(&outcome, modules);
        outcome
    }
}

/// Propagate a build outcome onto the module set.
pub fn apply_outcome(outcome: &BuildOutcome, modules: &mut [ModuleStatus]) {
    match outcome {
        BuildOutcome::Succeeded => {
            info!("build succeeded");
            for module in modules.iter_mut().filter(|m| m.is_working()) {
                module.buildable = true;
            }
        }
        BuildOutcome::Failed { error_output } => {
            warn!("build failed: {}", error_output);
            for module in modules.iter_mut().filter(|m| m.is_working()) {
                module.buildable = false;
                module.issues.push("build failed".into());
            }
        }
        // Timeout and launch errors deliberately do not annotate modules;
        // the reference tool records these only in the run log.
        BuildOutcome::TimedOut { seconds } => {
            error!("build timed out after {}s", seconds);
        }
        BuildOutcome::Error { message } => {
            error!("build check failed: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModuleGroup;

    fn working_module(name: &str) -> ModuleStatus {
        let mut m = ModuleStatus::new(name, ModuleGroup::Framework, format!("frame/frame-{name}"));
        m.exists = true;
        m.has_manifest = true;
        m
    }

    fn missing_manifest_module(name: &str) -> ModuleStatus {
        let mut m = ModuleStatus::new(name, ModuleGroup::Business, format!("business/{name}"));
        m.exists = true;
        m.issues.push("missing manifest file".into());
        m
    }

    #[test]
    fn test_success_marks_only_working_modules() {
        let mut modules = vec![working_module("actor"), missing_manifest_module("login")];
        apply_outcome(&BuildOutcome::Succeeded, &mut modules);

        assert!(modules[0].buildable);
        assert!(!modules[1].buildable);
    }

    #[test]
    fn test_failure_appends_issue_per_working_module() {
        let mut modules = vec![working_module("actor"), missing_manifest_module("login")];
        apply_outcome(
            &BuildOutcome::Failed {
                error_output: "compilation error".into(),
            },
            &mut modules,
        );

        assert!(!modules[0].buildable);
        assert_eq!(modules[0].issues, vec!["build failed"]);
        // Modules without a manifest are untouched by the build stage
        assert_eq!(modules[1].issues, vec!["missing manifest file"]);
    }

    #[test]
    fn test_timeout_leaves_modules_untouched() {
        let mut modules = vec![working_module("actor")];
        apply_outcome(&BuildOutcome::TimedOut { seconds: 300 }, &mut modules);

        assert!(!modules[0].buildable);
        assert!(modules[0].issues.is_empty());
    }

    #[test]
    fn test_buildable_implies_working() {
        // The invariant holds across every outcome kind.
        let outcomes = [
            BuildOutcome::Succeeded,
            BuildOutcome::Failed {
                error_output: String::new(),
            },
            BuildOutcome::TimedOut { seconds: 1 },
            BuildOutcome::Error {
                message: "boom".into(),
            },
        ];

        for outcome in outcomes {
            let mut modules = vec![
                working_module("actor"),
                missing_manifest_module("login"),
                ModuleStatus::new("ecs", ModuleGroup::Framework, "frame/frame-ecs"),
            ];
            apply_outcome(&outcome, &mut modules);
            for module in &modules {
                assert!(!module.buildable || module.is_working());
            }
        }
    }

    #[test]
    fn test_command_runner_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();

        let ok = CommandBuildRunner::new(vec!["true".into()]);
        assert_eq!(ok.run_build(dir.path(), 10), BuildOutcome::Succeeded);

        let fail = CommandBuildRunner::new(vec!["false".into()]);
        assert!(matches!(
            fail.run_build(dir.path(), 10),
            BuildOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_command_runner_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandBuildRunner::new(vec!["gatecheck-no-such-tool".into()]);
        assert!(matches!(
            runner.run_build(dir.path(), 10),
            BuildOutcome::Error { .. }
        ));
    }

    #[test]
    fn test_command_runner_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandBuildRunner::new(vec!["sleep".into(), "5".into()]);
        assert_eq!(
            runner.run_build(dir.path(), 1),
            BuildOutcome::TimedOut { seconds: 1 }
        );
    }
}

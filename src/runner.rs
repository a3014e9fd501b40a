//! @ai:module:intent Run dispatch: execute built benchmarks and decode results
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkRunner, Mode, RunStatus, RunReport, SuiteReport
//! @ai:module:stateless false

use crate::builder::BuildOutcome;
use crate::config::HarnessConfig;
use crate::lang::Language;
use crate::report;
use crate::suite::Suite;
use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// @ai:intent Literal CLI token selecting validate mode
pub const VALIDATE_TOKEN: &str = "validate";

/// @ai:intent Run mode: time the benchmarks, or check their correctness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Timing,
    Validate,
}

impl Mode {
    /// @ai:intent Decode the optional positional CLI argument. Only the exact
    ///            literal `validate` selects validate mode; any other token
    ///            (typos included) falls back to timing mode without error
    /// @ai:effects pure
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(VALIDATE_TOKEN) => Mode::Validate,
            _ => Mode::Timing,
        }
    }
}

/// @ai:intent Outcome of one benchmark run, decoded per mode
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// Validate mode, exit code zero
    Passed,
    /// Validate mode, any non-zero exit (or termination by signal)
    Failed,
    /// Timing mode: the process self-reports its elapsed milliseconds as the
    /// exit code; `total_secs` is the harness-measured wall clock around the
    /// whole invocation, spawn overhead included
    Timing {
        benchmark_secs: f64,
        total_secs: f64,
    },
    /// Killed after the configured timeout
    TimedOut,
    /// The process could not be started or died to a signal in timing mode
    Error(String),
}

/// @ai:intent Result of running one language's benchmark for a suite
#[derive(Debug, Clone)]
pub struct RunReport {
    pub language: Language,
    pub status: RunStatus,
}

/// @ai:intent All run reports for one suite
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite: String,
    pub reports: Vec<RunReport>,
}

/// @ai:intent Interpret a process exit code as self-reported milliseconds.
///            Exit codes are truncated by the OS to 0-255 on most platforms,
///            so any benchmark longer than 255 ms wraps silently; this is a
///            known limitation of the encoding, pinned by tests
/// @ai:effects pure
pub fn exit_code_millis(code: i32) -> u64 {
    code.max(0) as u64
}

/// @ai:intent Runs built benchmark artifacts sequentially, one per
///            successful build outcome, in declaration order
pub struct BenchmarkRunner {
    python_runtime: String,
    timeout: Option<Duration>,
}

impl BenchmarkRunner {
    /// @ai:intent Create a runner from configuration
    /// @ai:effects pure
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            python_runtime: config.toolchain.python_runtime.clone(),
            timeout: config.run.timeout_secs.map(Duration::from_secs),
        }
    }

    /// @ai:intent Run every successful build outcome for one suite, printing
    ///            per-language progress and results as the original harness
    ///            did. Outcomes recorded as failed are skipped explicitly
    /// @ai:effects io
    pub async fn run_suite(
        &self,
        suite: &Suite,
        outcomes: &[BuildOutcome],
        mode: Mode,
    ) -> Result<SuiteReport> {
        let mut reports = Vec::new();

        for outcome in outcomes {
            if !outcome.succeeded {
                tracing::warn!(
                    "skipping {}/{}: build did not succeed",
                    outcome.suite,
                    outcome.language.folder()
                );
                continue;
            }

            report::print_language(outcome.language);
            let status = self.run_one(suite, outcome, mode).await;
            report::print_status(&status);

            reports.push(RunReport {
                language: outcome.language,
                status,
            });
        }

        Ok(SuiteReport {
            suite: suite.name.clone(),
            reports,
        })
    }

    /// @ai:intent Execute one benchmark: runnable command plus the suite data
    ///            directory, plus the validate token in validate mode
    /// @ai:effects io
    async fn run_one(&self, suite: &Suite, outcome: &BuildOutcome, mode: Mode) -> RunStatus {
        let mut tokens = outcome
            .language
            .artifact_kind()
            .runnable_command(&outcome.output_dir, &self.python_runtime);
        tokens.push(suite.data_dir().display().to_string());

        if mode == Mode::Validate {
            tokens.push(VALIDATE_TOKEN.to_string());
        }

        let mut command = Command::new(&tokens[0]);
        command.args(&tokens[1..]);

        let start = Instant::now();
        let waited = self.wait(command).await;
        let total_secs = start.elapsed().as_secs_f64();

        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => return RunStatus::TimedOut,
            Err(e) => return RunStatus::Error(format!("failed to launch {}: {}", tokens[0], e)),
        };

        match mode {
            Mode::Validate => {
                if status.success() {
                    RunStatus::Passed
                } else {
                    RunStatus::Failed
                }
            }
            Mode::Timing => match status.code() {
                Some(code) => RunStatus::Timing {
                    benchmark_secs: exit_code_millis(code) as f64 / 1000.0,
                    total_secs,
                },
                None => RunStatus::Error("benchmark terminated by signal".to_string()),
            },
        }
    }

    /// @ai:intent Wait for the benchmark, applying the configured timeout.
    ///            Ok(None) means the process was killed after the deadline
    /// @ai:effects io
    async fn wait(&self, mut command: Command) -> std::io::Result<Option<std::process::ExitStatus>> {
        match self.timeout {
            None => command.status().await.map(Some),
            Some(limit) => {
                let mut child = command.spawn()?;

                match tokio::time::timeout(limit, child.wait()).await {
                    Ok(status) => status.map(Some),
                    Err(_) => {
                        child.kill().await.ok();
                        Ok(None)
                    }
                }
            }
        }
    }
}

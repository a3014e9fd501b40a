//! @ai:module:intent Build dispatch: run each suite's per-language build scripts
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkBuilder, BuildTask, BuildOutcome, ADAPTER_ENV
//! @ai:module:stateless false

use crate::config::HarnessConfig;
use crate::lang::Language;
use crate::suite::Suite;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// @ai:intent Environment variable naming the adapter CLI binary; set on each
///            build-script subprocess (and nothing else) so scripts can locate
///            shared build logic without ambient process state
pub const ADAPTER_ENV: &str = "LANGBENCH_ADAPTER";

/// @ai:intent One pending (suite, language) build
#[derive(Debug, Clone)]
pub struct BuildTask {
    pub suite: String,
    pub language: Language,
    pub script: PathBuf,
    pub output_dir: PathBuf,
    /// Resolved location of the adapter CLI, passed to the script subprocess
    pub adapter: PathBuf,
}

/// @ai:intent Explicit per-task build result, threaded from builder to runner
///            instead of re-derived from directory existence
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub suite: String,
    pub language: Language,
    pub succeeded: bool,
    pub output_dir: PathBuf,
    pub artifact: PathBuf,
}

/// @ai:intent Plans and executes build tasks for benchmark suites. A language
///            participates in a suite exactly when its build script exists;
///            a failing script is recorded and logged, never fatal to the
///            orchestration
pub struct BenchmarkBuilder {
    interpreter: String,
    build_dir: PathBuf,
    adapter: PathBuf,
    timeout: Option<Duration>,
}

impl BenchmarkBuilder {
    /// @ai:intent Create a builder from configuration plus the resolved
    ///            adapter CLI location
    /// @ai:effects pure
    pub fn new(config: &HarnessConfig, adapter: PathBuf) -> Self {
        Self {
            interpreter: config.toolchain.script_interpreter.clone(),
            build_dir: config.paths.build_dir.clone(),
            adapter,
            timeout: config.run.timeout_secs.map(Duration::from_secs),
        }
    }

    /// @ai:intent Build tasks for one suite: one per language whose build
    ///            script exists. Absent script means the language opts out of
    ///            this suite, not an error
    /// @ai:effects fs:read
    pub fn plan(&self, suite: &Suite) -> Vec<BuildTask> {
        let mut tasks = Vec::new();

        for language in Language::all() {
            let script = suite.build_script(language);

            if !script.exists() {
                continue;
            }

            tasks.push(BuildTask {
                suite: suite.name.clone(),
                language,
                script,
                output_dir: self
                    .build_dir
                    .join(&suite.name)
                    .join(language.folder()),
                adapter: self.adapter.clone(),
            });
        }

        tasks
    }

    /// @ai:intent Execute every build task for one suite sequentially and
    ///            record explicit outcomes. Fails only on orchestration
    ///            invariant violations (pre-existing output directory,
    ///            unwritable build root); script failures become outcomes
    /// @ai:effects io, fs:write
    pub async fn build_suite(&self, suite: &Suite) -> Result<Vec<BuildOutcome>> {
        let mut outcomes = Vec::new();

        for task in self.plan(suite) {
            outcomes.push(self.run_task(&task).await?);
        }

        Ok(outcomes)
    }

    /// @ai:intent Run one build script with the absolute output directory as
    ///            its single argument
    /// @ai:pre the output directory does not exist yet
    /// @ai:effects io, fs:write
    async fn run_task(&self, task: &BuildTask) -> Result<BuildOutcome> {
        if let Some(parent) = task.output_dir.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Must fail loudly if the directory survives from a previous run:
        // the orchestrator clears the build root exactly once per invocation.
        std::fs::create_dir(&task.output_dir).with_context(|| {
            format!(
                "output directory {} already exists; build root was not cleared",
                task.output_dir.display()
            )
        })?;

        let output_dir = task
            .output_dir
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", task.output_dir.display()))?;

        tracing::info!("building {}/{}", task.suite, task.language.folder());

        let mut command = Command::new(&self.interpreter);
        command
            .arg(&task.script)
            .arg(&output_dir)
            .env(ADAPTER_ENV, &task.adapter);

        let succeeded = match self.wait(command).await {
            Ok(Some(status)) if status.success() => true,
            Ok(Some(status)) => {
                tracing::warn!(
                    "build script {} failed with status {} for {}/{}",
                    task.script.display(),
                    status.code().unwrap_or(-1),
                    task.suite,
                    task.language.folder()
                );
                false
            }
            Ok(None) => {
                tracing::warn!(
                    "build script {} timed out for {}/{}",
                    task.script.display(),
                    task.suite,
                    task.language.folder()
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    "failed to invoke build script {}: {}",
                    task.script.display(),
                    e
                );
                false
            }
        };

        let artifact = output_dir.join(task.language.artifact_kind().artifact_name());

        Ok(BuildOutcome {
            suite: task.suite.clone(),
            language: task.language,
            succeeded,
            output_dir,
            artifact,
        })
    }

    /// @ai:intent Wait for the subprocess, applying the configured timeout.
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        config.paths.benchmarks_dir = root.join("benchmarks");
        config.paths.build_dir = root.join("build");
        // sh executes the "build.py" files as shell scripts in tests
        config.toolchain.script_interpreter = "sh".to_string();
        config
    }

    fn write_script(root: &Path, suite: &str, language: Language, body: &str) {
        let dir = root.join("benchmarks").join(suite).join(language.folder());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("build.py"), body).unwrap();
    }

    fn suite(root: &Path, name: &str) -> Suite {
        std::fs::create_dir_all(root.join("benchmarks").join(name)).unwrap();
        Suite::new(&root.join("benchmarks"), name)
    }

    #[test]
    fn test_plan_skips_languages_without_build_script() {
        let temp = TempDir::new().unwrap();
        let suite = suite(temp.path(), "kdtree");
        write_script(temp.path(), "kdtree", Language::Cpp, "exit 0");

        let builder = BenchmarkBuilder::new(&test_config(temp.path()), PathBuf::from("adapter"));
        let tasks = builder.plan(&suite);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].language, Language::Cpp);
    }

    #[tokio::test]
    async fn test_successful_script_yields_succeeded_outcome_with_artifact() {
        let temp = TempDir::new().unwrap();
        let suite = suite(temp.path(), "kdtree");
        write_script(
            temp.path(),
            "kdtree",
            Language::Python,
            "echo 'pass' > \"$1/benchmark.py\"\n",
        );

        let builder = BenchmarkBuilder::new(&test_config(temp.path()), PathBuf::from("adapter"));
        let outcomes = builder.build_suite(&suite).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].succeeded);
        assert!(outcomes[0].artifact.exists());
        assert!(outcomes[0].artifact.ends_with("benchmark.py"));
    }

    #[tokio::test]
    async fn test_failing_script_is_recorded_not_fatal() {
        let temp = TempDir::new().unwrap();
        let suite = suite(temp.path(), "kdtree");
        write_script(temp.path(), "kdtree", Language::Go, "exit 1\n");

        let builder = BenchmarkBuilder::new(&test_config(temp.path()), PathBuf::from("adapter"));
        let outcomes = builder.build_suite(&suite).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].succeeded);
    }

    #[tokio::test]
    async fn test_preexisting_output_dir_fails_loudly() {
        let temp = TempDir::new().unwrap();
        let suite = suite(temp.path(), "kdtree");
        write_script(temp.path(), "kdtree", Language::Cpp, "exit 0\n");

        let stale = temp.path().join("build").join("kdtree").join("lang_cpp");
        std::fs::create_dir_all(&stale).unwrap();

        let builder = BenchmarkBuilder::new(&test_config(temp.path()), PathBuf::from("adapter"));
        let err = builder.build_suite(&suite).await.unwrap_err();

        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_adapter_path_reaches_script_environment() {
        let temp = TempDir::new().unwrap();
        let suite = suite(temp.path(), "kdtree");
        write_script(
            temp.path(),
            "kdtree",
            Language::Python,
            "printf '%s' \"$LANGBENCH_ADAPTER\" > \"$1/seen\"\n",
        );

        let builder = BenchmarkBuilder::new(
            &test_config(temp.path()),
            PathBuf::from("/opt/langbench-adapter"),
        );
        let outcomes = builder.build_suite(&suite).await.unwrap();

        let seen = std::fs::read_to_string(outcomes[0].output_dir.join("seen")).unwrap();
        assert_eq!(seen, "/opt/langbench-adapter");
    }

    #[tokio::test]
    async fn test_hung_script_is_killed_after_timeout() {
        let temp = TempDir::new().unwrap();
        let suite = suite(temp.path(), "kdtree");
        write_script(temp.path(), "kdtree", Language::D, "sleep 30\n");

        let mut config = test_config(temp.path());
        config.run.timeout_secs = Some(1);

        let builder = BenchmarkBuilder::new(&config, PathBuf::from("adapter"));
        let start = std::time::Instant::now();
        let outcomes = builder.build_suite(&suite).await.unwrap();

        assert!(!outcomes[0].succeeded);
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}

//! @ai:module:intent Top-level driver: reset, discover, build all, run all
//! @ai:module:layer application
//! @ai:module:public_api Orchestrator, resolve_adapter_path
//! @ai:module:stateless false

use crate::builder::{BenchmarkBuilder, BuildOutcome};
use crate::config::HarnessConfig;
use crate::report;
use crate::runner::{BenchmarkRunner, Mode, SuiteReport};
use crate::suite;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// @ai:intent Drives one full orchestration: the build root is cleared and
///            recreated exactly once, every suite builds, then every suite
///            runs in the same (sorted) discovery order. Strictly sequential
pub struct Orchestrator {
    config: HarnessConfig,
    adapter: PathBuf,
}

impl Orchestrator {
    /// @ai:intent Create an orchestrator with a resolved adapter CLI path
    /// @ai:effects pure
    pub fn new(config: HarnessConfig, adapter: PathBuf) -> Self {
        Self { config, adapter }
    }

    /// @ai:intent Run the whole harness in the given mode
    /// @ai:post the build root holds exactly this invocation's artifacts
    /// @ai:effects io, fs:write
    pub async fn run(&self, mode: Mode) -> Result<Vec<SuiteReport>> {
        self.reset_build_root()?;

        let suites = suite::discover(&self.config.paths.benchmarks_dir)?;
        tracing::info!("discovered {} suites", suites.len());

        let builder = BenchmarkBuilder::new(&self.config, self.adapter.clone());
        let mut built: Vec<Vec<BuildOutcome>> = Vec::with_capacity(suites.len());

        for suite in &suites {
            built.push(builder.build_suite(suite).await?);
        }

        println!();

        let runner = BenchmarkRunner::new(&self.config);
        let mut reports = Vec::with_capacity(suites.len());

        for (suite, outcomes) in suites.iter().zip(&built) {
            report::print_suite_header(&suite.name);
            reports.push(runner.run_suite(suite, outcomes, mode).await?);
        }

        report::print_summary(&reports, mode);
        Ok(reports)
    }

    /// @ai:intent Remove the previous build root, if any, and recreate it
    ///            empty. Called exactly once per invocation, before any build
    /// @ai:effects fs:write
    fn reset_build_root(&self) -> Result<()> {
        let build_dir = &self.config.paths.build_dir;

        if build_dir.exists() {
            std::fs::remove_dir_all(build_dir)
                .with_context(|| format!("failed to clear build root {}", build_dir.display()))?;
        }

        std::fs::create_dir_all(build_dir)
            .with_context(|| format!("failed to create build root {}", build_dir.display()))?;

        Ok(())
    }
}

/// @ai:intent Locate the adapter CLI binary next to the running executable
/// @ai:effects fs:read
pub fn resolve_adapter_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to resolve current executable")?;
    let dir = exe
        .parent()
        .context("current executable has no parent directory")?;

    Ok(dir.join(format!("langbench-adapter{}", std::env::consts::EXE_SUFFIX)))
}

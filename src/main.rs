//! @ai:module:intent CLI for the benchmark orchestration harness
//! @ai:module:layer presentation

use anyhow::Result;
use clap::Parser;
use langbench::{
    config::HarnessConfig,
    orchestrator::{resolve_adapter_path, Orchestrator},
    runner::Mode,
    toolchain::ToolchainValidator,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "langbench")]
#[command(about = "Benchmark orchestration harness for cross-language benchmark suites")]
#[command(version)]
struct Cli {
    /// Run mode: the literal `validate` checks correctness instead of timing.
    /// Any other value selects timing mode.
    mode: Option<String>,

    /// Path to configuration file (default: langbench.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the benchmarks root directory
    #[arg(long)]
    benchmarks_dir: Option<PathBuf>,

    /// Override the build root directory
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Kill a build or run subprocess after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("langbench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mode = Mode::from_arg(cli.mode.as_deref());

    let mut config = HarnessConfig::load_or_default(cli.config.as_deref())?;

    if let Some(dir) = cli.benchmarks_dir {
        config.paths.benchmarks_dir = dir;
    }

    if let Some(dir) = cli.build_dir {
        config.paths.build_dir = dir;
    }

    if let Some(secs) = cli.timeout_secs {
        config.run.timeout_secs = Some(secs);
    }

    let status = ToolchainValidator::validate(&config.toolchain).await;
    ToolchainValidator::log_status(&status);

    let orchestrator = Orchestrator::new(config, resolve_adapter_path()?);
    orchestrator.run(mode).await?;

    Ok(())
}

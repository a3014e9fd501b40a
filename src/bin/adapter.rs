//! @ai:module:intent Adapter CLI invoked by suite build scripts
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use langbench::adapter::{CppBuildAdapter, ScriptStageAdapter};
use langbench::config::CppToolchain;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "langbench-adapter")]
#[command(about = "Per-language build steps for benchmark build scripts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and link C++ sources into a benchmark executable
    Cpp {
        /// Directory holding the .cpp sources (flat, non-recursive)
        #[arg(long)]
        source_dir: PathBuf,

        /// Clean output directory for objects and the linked executable
        #[arg(long)]
        output_dir: PathBuf,

        /// Toolchain family
        #[arg(long, value_enum, default_value = "gcc")]
        toolchain: ToolchainArg,

        /// Compiler executable for gcc/clang toolchains
        #[arg(long)]
        compiler: Option<String>,

        /// Path to vcvarsall.bat for the msvc toolchain
        #[arg(long)]
        vcvars_path: Option<PathBuf>,
    },

    /// Stage interpreted-language sources into the output directory
    Script {
        /// Directory holding the sources (flat, non-recursive)
        #[arg(long)]
        source_dir: PathBuf,

        /// Clean output directory the sources are copied into
        #[arg(long)]
        output_dir: PathBuf,

        /// Source file extension to stage
        #[arg(long, default_value = "py")]
        extension: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ToolchainArg {
    Msvc,
    Gcc,
    Clang,
}

/// @ai:intent Resolve CLI flags into a toolchain variant
/// @ai:effects pure
fn cpp_toolchain(
    toolchain: ToolchainArg,
    compiler: Option<String>,
    vcvars_path: Option<PathBuf>,
) -> Result<CppToolchain> {
    match toolchain {
        ToolchainArg::Msvc => {
            let vcvars_path =
                vcvars_path.ok_or_else(|| anyhow::anyhow!("--vcvars-path is required for msvc"))?;
            Ok(CppToolchain::Msvc { vcvars_path })
        }
        ToolchainArg::Gcc => Ok(CppToolchain::Gcc {
            compiler: compiler.unwrap_or_else(|| "g++".to_string()),
        }),
        ToolchainArg::Clang => Ok(CppToolchain::Clang {
            compiler: compiler.unwrap_or_else(|| "clang++".to_string()),
        }),
    }
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

    match cli.command {
        Commands::Cpp {
            source_dir,
            output_dir,
            toolchain,
            compiler,
            vcvars_path,
        } => {
            let adapter = CppBuildAdapter::new(cpp_toolchain(toolchain, compiler, vcvars_path)?);
            let artifact = adapter.build(&source_dir, &output_dir).await?;
            tracing::info!("built {}", artifact.display());
        }
        Commands::Script {
            source_dir,
            output_dir,
            extension,
        } => {
            let adapter = ScriptStageAdapter::new(extension);
            let staged = adapter.build(&source_dir, &output_dir)?;
            tracing::info!("staged {} files into {}", staged.len(), output_dir.display());
        }
    }

    Ok(())
}

//! @ai:module:intent Configuration structs for the benchmark harness
//! @ai:module:layer infrastructure
//! @ai:module:public_api HarnessConfig, PathConfig, ToolchainConfig, CppToolchain, RunConfig
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the harness
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// @ai:intent Input/output directory layout
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_benchmarks_dir")]
    pub benchmarks_dir: PathBuf,
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
}

/// @ai:intent Toolchain selection for build scripts and runnables
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Interpreter used to execute per-suite build scripts
    #[serde(default = "default_script_interpreter")]
    pub script_interpreter: String,
    /// Runtime used to execute interpreted-script artifacts
    #[serde(default = "default_python_runtime")]
    pub python_runtime: String,
    #[serde(default)]
    pub cpp: CppToolchain,
}

/// @ai:intent C++ toolchain variant with its toolchain-specific path
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CppToolchain {
    Msvc { vcvars_path: PathBuf },
    Gcc { compiler: String },
    Clang { compiler: String },
}

/// @ai:intent Run-phase behavior
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Kill a build or run subprocess after this many seconds. Absent means
    /// no timeout, preserving blocking semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            benchmarks_dir: default_benchmarks_dir(),
            build_dir: default_build_dir(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            script_interpreter: default_script_interpreter(),
            python_runtime: default_python_runtime(),
            cpp: CppToolchain::default(),
        }
    }
}

impl Default for CppToolchain {
    fn default() -> Self {
        CppToolchain::Gcc {
            compiler: "g++".to_string(),
        }
    }
}

fn default_benchmarks_dir() -> PathBuf {
    PathBuf::from("benchmarks")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_script_interpreter() -> String {
    "python".to_string()
}

fn default_python_runtime() -> String {
    "pypy".to_string()
}

impl HarnessConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Load from an explicit path, from `langbench.toml` if it
    ///            exists, or fall back to defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = std::path::Path::new("langbench.toml");

                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

//! @ai:module:intent Preflight probe of the tools a run will shell out to
//! @ai:module:layer infrastructure
//! @ai:module:public_api ToolchainValidator, ToolchainStatus, ToolReport, MissingTool
//! @ai:module:stateless true

use crate::config::{CppToolchain, ToolchainConfig};
use tokio::process::Command;

/// @ai:intent A tool that answered its version probe
#[derive(Debug)]
pub struct ToolReport {
    pub tool: String,
    /// First line of the tool's version output, for the log
    pub version: String,
}

/// @ai:intent A configured tool that could not be found
#[derive(Debug)]
pub struct MissingTool {
    pub tool: String,
    pub install_hint: &'static str,
}

/// @ai:intent Result of probing the configured toolchain. Warning-only:
///            whether a language builds is still decided by build-script
///            existence, never by this probe
#[derive(Debug)]
pub struct ToolchainStatus {
    pub available: Vec<ToolReport>,
    pub missing: Vec<MissingTool>,
}

/// @ai:intent Probes the configured toolchain before a run
pub struct ToolchainValidator;

impl ToolchainValidator {
    /// @ai:intent Install hint for a known tool name
    /// @ai:effects pure
    fn install_hint(tool: &str) -> &'static str {
        match tool {
            "python" | "python3" => "Install Python: https://www.python.org/downloads/",
            "pypy" | "pypy3" => "Install PyPy: https://pypy.org/download.html",
            "g++" => "Install GCC: https://gcc.gnu.org/install/",
            "clang++" => "Install Clang: https://releases.llvm.org/",
            _ => "Check the tool's documentation for installation instructions",
        }
    }

    /// @ai:intent Run a `--version`-style probe and capture the first output
    ///            line (stdout, falling back to stderr)
    /// @ai:effects io
    async fn probe_version(tool: &str) -> Option<String> {
        let output = Command::new(tool).arg("--version").output().await.ok()?;

        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        stdout
            .lines()
            .chain(stderr.lines())
            .next()
            .map(|line| line.trim().to_string())
    }

    /// @ai:intent Probe every configured tool and return its status
    /// @ai:effects io
    pub async fn validate(config: &ToolchainConfig) -> ToolchainStatus {
        let mut available = Vec::new();
        let mut missing = Vec::new();

        let mut probes = vec![
            config.script_interpreter.clone(),
            config.python_runtime.clone(),
        ];

        match &config.cpp {
            CppToolchain::Msvc { vcvars_path } => {
                // vcvars is a batch file, not a --version-capable binary
                if vcvars_path.exists() {
                    available.push(ToolReport {
                        tool: vcvars_path.display().to_string(),
                        version: "vcvars environment script".to_string(),
                    });
                } else {
                    missing.push(MissingTool {
                        tool: vcvars_path.display().to_string(),
                        install_hint: "Install Visual Studio with the C++ workload",
                    });
                }
            }
            CppToolchain::Gcc { compiler } | CppToolchain::Clang { compiler } => {
                probes.push(compiler.clone());
            }
        }

        for tool in probes {
            match Self::probe_version(&tool).await {
                Some(version) => available.push(ToolReport { tool, version }),
                None => {
                    let install_hint = Self::install_hint(&tool);
                    missing.push(MissingTool { tool, install_hint });
                }
            }
        }

        ToolchainStatus { available, missing }
    }

    /// @ai:intent Log the probe outcome: versions at info, gaps at warn
    /// @ai:effects io
    pub fn log_status(status: &ToolchainStatus) {
        for report in &status.available {
            tracing::info!("{}: {}", report.tool, report.version);
        }

        for missing in &status.missing {
            tracing::warn!(
                "tool '{}' not found - builds that need it will fail. {}",
                missing.tool,
                missing.install_hint
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_hint_known_tools() {
        assert!(ToolchainValidator::install_hint("python").contains("python.org"));
        assert!(ToolchainValidator::install_hint("pypy").contains("pypy.org"));
        assert!(ToolchainValidator::install_hint("g++").contains("gcc.gnu.org"));
    }

    #[tokio::test]
    async fn test_probe_nonexistent_tool() {
        assert!(ToolchainValidator::probe_version("nonexistent_tool_xyz")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_missing_tools_are_reported_not_fatal() {
        let config = ToolchainConfig {
            script_interpreter: "nonexistent_interpreter_xyz".to_string(),
            python_runtime: "nonexistent_runtime_xyz".to_string(),
            cpp: CppToolchain::Gcc {
                compiler: "nonexistent_compiler_xyz".to_string(),
            },
        };

        let status = ToolchainValidator::validate(&config).await;
        assert_eq!(status.missing.len(), 3);
    }
}

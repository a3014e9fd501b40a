//! @ai:module:intent Language descriptors for benchmark suites
//! @ai:module:layer domain
//! @ai:module:public_api Language, ArtifactKind
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Name of the built artifact, without extension
pub const ARTIFACT_STEM: &str = "benchmark";

/// @ai:intent Target language of a benchmark implementation
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    D,
    Go,
    Python,
}

impl Language {
    /// @ai:intent All known languages, in build/run declaration order
    /// @ai:effects pure
    pub fn all() -> [Language; 4] {
        [Language::Cpp, Language::D, Language::Go, Language::Python]
    }

    /// @ai:intent Convert language to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::D => "d",
            Language::Go => "go",
            Language::Python => "python",
        }
    }

    /// @ai:intent Per-language subfolder name inside a suite
    /// @ai:effects pure
    pub fn folder(&self) -> &'static str {
        match self {
            Language::Cpp => "lang_cpp",
            Language::D => "lang_d",
            Language::Go => "lang_go",
            Language::Python => "lang_python",
        }
    }

    /// @ai:intent Source file extension for this language
    /// @ai:effects pure
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::D => "d",
            Language::Go => "go",
            Language::Python => "py",
        }
    }

    /// @ai:intent Kind of artifact this language's build produces
    /// @ai:effects pure
    pub fn artifact_kind(&self) -> ArtifactKind {
        match self {
            Language::Cpp | Language::D | Language::Go => ArtifactKind::NativeExecutable,
            Language::Python => ArtifactKind::InterpretedScript,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Closed set of artifact kinds a build can produce; each kind
///            owns the rule for turning an output directory into a runnable
///            command line
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    NativeExecutable,
    InterpretedScript,
}

impl ArtifactKind {
    /// @ai:intent File name of the built artifact inside the output directory
    /// @ai:effects pure
    pub fn artifact_name(&self) -> String {
        match self {
            ArtifactKind::NativeExecutable => {
                format!("{}{}", ARTIFACT_STEM, std::env::consts::EXE_SUFFIX)
            }
            ArtifactKind::InterpretedScript => format!("{}.py", ARTIFACT_STEM),
        }
    }

    /// @ai:intent Build the command line that executes the artifact.
    ///            `runtime` names the interpreter used for script artifacts;
    ///            native executables ignore it
    /// @ai:effects pure
    pub fn runnable_command(&self, output_dir: &Path, runtime: &str) -> Vec<String> {
        let artifact = output_dir.join(self.artifact_name());

        match self {
            ArtifactKind::NativeExecutable => vec![artifact.display().to_string()],
            ArtifactKind::InterpretedScript => {
                vec![runtime.to_string(), artifact.display().to_string()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_folder_names_match_suite_layout() {
        assert_eq!(Language::Cpp.folder(), "lang_cpp");
        assert_eq!(Language::D.folder(), "lang_d");
        assert_eq!(Language::Go.folder(), "lang_go");
        assert_eq!(Language::Python.folder(), "lang_python");
    }

    #[test]
    fn test_native_languages_produce_executables() {
        assert_eq!(Language::Cpp.artifact_kind(), ArtifactKind::NativeExecutable);
        assert_eq!(Language::Go.artifact_kind(), ArtifactKind::NativeExecutable);
        assert_eq!(Language::Python.artifact_kind(), ArtifactKind::InterpretedScript);
    }

    #[test]
    fn test_native_runnable_is_bare_artifact() {
        let out = PathBuf::from("build/suite/lang_cpp");
        let cmd = ArtifactKind::NativeExecutable.runnable_command(&out, "pypy");

        assert_eq!(cmd.len(), 1);
        assert!(cmd[0].contains(ARTIFACT_STEM));
    }

    #[test]
    fn test_interpreted_runnable_prepends_runtime() {
        let out = PathBuf::from("build/suite/lang_python");
        let cmd = ArtifactKind::InterpretedScript.runnable_command(&out, "pypy");

        assert_eq!(cmd[0], "pypy");
        assert!(cmd[1].ends_with("benchmark.py"));
    }
}

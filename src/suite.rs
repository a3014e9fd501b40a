//! @ai:module:intent Benchmark suite layout and discovery
//! @ai:module:layer domain
//! @ai:module:public_api Suite, discover
//! @ai:module:stateless true

use crate::lang::Language;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Name of the per-suite input data directory
pub const DATA_DIR: &str = "data";

/// @ai:intent Name of the per-language build script inside a suite
pub const BUILD_SCRIPT: &str = "build.py";

/// @ai:intent One benchmark problem implemented in parallel across languages,
///            identified by its directory name under the benchmarks root
/// @ai:effects pure
#[derive(Debug, Clone)]
pub struct Suite {
    pub name: String,
    root: PathBuf,
}

impl Suite {
    /// @ai:intent Create a suite rooted at `<benchmarks_dir>/<name>`
    /// @ai:effects pure
    pub fn new(benchmarks_dir: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        let root = benchmarks_dir.join(&name);
        Self { name, root }
    }

    /// @ai:intent Input data directory passed to every runnable
    /// @ai:effects pure
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// @ai:intent Source tree for one language
    /// @ai:effects pure
    pub fn lang_dir(&self, language: Language) -> PathBuf {
        self.root.join(language.folder())
    }

    /// @ai:intent Optional build script for one language
    /// @ai:effects pure
    pub fn build_script(&self, language: Language) -> PathBuf {
        self.lang_dir(language).join(BUILD_SCRIPT)
    }
}

/// @ai:intent List all suites: the immediate subdirectories of the
///            benchmarks root, sorted by name so build and run order are
///            deterministic
/// @ai:pre benchmarks_dir exists
/// @ai:effects fs:read
pub fn discover(benchmarks_dir: &Path) -> Result<Vec<Suite>> {
    if !benchmarks_dir.is_dir() {
        anyhow::bail!("benchmarks root {} does not exist", benchmarks_dir.display());
    }

    let mut suites = Vec::new();

    for entry in WalkDir::new(benchmarks_dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| {
            format!("failed to list benchmarks root {}", benchmarks_dir.display())
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        if let Some(name) = entry.file_name().to_str() {
            suites.push(Suite::new(benchmarks_dir, name));
        }
    }

    suites.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(suites)
}

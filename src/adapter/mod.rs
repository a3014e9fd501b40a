//! @ai:module:intent Per-language build adapters: source files in, artifact out
//! @ai:module:layer infrastructure
//! @ai:module:public_api CppBuildAdapter, ScriptStageAdapter, AdapterError

pub mod cpp;
pub mod script;

pub use cpp::CppBuildAdapter;
pub use script::ScriptStageAdapter;

use crate::session::SessionError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Failure of one build task. Fatal to that task only; sibling
///            build tasks are unaffected
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("source directory {0} does not exist")]
    MissingSourceDir(PathBuf),

    #[error("no .{extension} sources in {dir}")]
    NoSources { dir: PathBuf, extension: String },

    #[error(transparent)]
    Toolchain(#[from] SessionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// @ai:intent Flat (non-recursive) listing of source files by extension,
///            sorted for a deterministic compile order
/// @ai:effects fs:read
pub(crate) fn sources_with_extension(
    source_dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, AdapterError> {
    if !source_dir.is_dir() {
        return Err(AdapterError::MissingSourceDir(source_dir.to_path_buf()));
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == extension)
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    if sources.is_empty() {
        return Err(AdapterError::NoSources {
            dir: source_dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    sources.sort();
    Ok(sources)
}

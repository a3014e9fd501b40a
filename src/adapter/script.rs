//! @ai:module:intent Interpreted-language build adapter: stage sources as-is
//! @ai:module:layer infrastructure
//! @ai:module:public_api ScriptStageAdapter
//! @ai:module:stateless true

use crate::adapter::{sources_with_extension, AdapterError};
use std::path::{Path, PathBuf};

/// @ai:intent "Build" for interpreted languages: there is no compile step, so
///            the flat set of sources is copied into the output directory and
///            the run phase interprets them from there
pub struct ScriptStageAdapter {
    extension: String,
}

impl ScriptStageAdapter {
    /// @ai:intent Create an adapter staging files with the given extension
    /// @ai:effects pure
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// @ai:intent Copy every matching source into `output_dir`, returning the
    ///            staged paths
    /// @ai:pre source_dir exists and holds at least one matching file
    /// @ai:effects fs:read, fs:write
    pub fn build(&self, source_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, AdapterError> {
        let sources = sources_with_extension(source_dir, &self.extension)?;
        let mut staged = Vec::with_capacity(sources.len());

        for source in &sources {
            // file_name is always present: sources_with_extension only yields files
            let Some(name) = source.file_name() else {
                continue;
            };
            let target = output_dir.join(name);
            std::fs::copy(source, &target)?;
            staged.push(target);
        }

        Ok(staged)
    }
}

//! @ai:module:intent C++ build adapter: compile every source, then link
//! @ai:module:layer infrastructure
//! @ai:module:public_api CppBuildAdapter
//! @ai:module:stateless true

use crate::adapter::{sources_with_extension, AdapterError};
use crate::config::CppToolchain;
use crate::lang::ArtifactKind;
use crate::session::CommandSession;
use std::path::{Path, PathBuf};

/// @ai:intent Builds a benchmark executable from the flat set of `.cpp` files
///            in a source directory. Three phases: toolchain initialization
///            (MSVC only), one compile command per source producing an object
///            named after the source's base name, one link command combining
///            the objects with release/LTO flags
pub struct CppBuildAdapter {
    toolchain: CppToolchain,
}

impl CppBuildAdapter {
    /// @ai:intent Create an adapter for the given toolchain
    /// @ai:effects pure
    pub fn new(toolchain: CppToolchain) -> Self {
        Self { toolchain }
    }

    /// @ai:intent Path of the executable the build produces
    /// @ai:effects pure
    pub fn artifact_path(output_dir: &Path) -> PathBuf {
        output_dir.join(ArtifactKind::NativeExecutable.artifact_name())
    }

    /// @ai:intent Compile all `.cpp` sources in `source_dir` and link them
    ///            into `<output_dir>/benchmark`. The caller guarantees a
    ///            clean, existing output directory
    /// @ai:pre source_dir exists and holds at least one .cpp file
    /// @ai:post on Ok, the returned path names the linked executable
    /// @ai:effects io, fs:write
    pub async fn build(
        &self,
        source_dir: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, AdapterError> {
        let sources = sources_with_extension(source_dir, "cpp")?;
        let artifact = Self::artifact_path(output_dir);

        let session = match &self.toolchain {
            CppToolchain::Msvc { vcvars_path } => {
                msvc_session(vcvars_path, &sources, output_dir, &artifact)
            }
            CppToolchain::Gcc { compiler } | CppToolchain::Clang { compiler } => {
                unix_session(compiler, &sources, output_dir, &artifact)
            }
        };

        session.run().await?;
        Ok(artifact)
    }
}

/// @ai:intent Object file path for one source, named after its base name
/// @ai:effects pure
fn object_path(source: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.{}", stem, extension))
}

/// @ai:intent MSVC command sequence: vcvars init, cl per source, link
/// @ai:effects pure
fn msvc_session(
    vcvars_path: &Path,
    sources: &[PathBuf],
    output_dir: &Path,
    artifact: &Path,
) -> CommandSession {
    let mut session = CommandSession::new();
    session.add_command([vcvars_path.display().to_string(), "amd64".to_string()]);

    let mut objects = Vec::with_capacity(sources.len());

    for source in sources {
        let object = object_path(source, output_dir, "obj");

        session.add_command([
            "cl".to_string(),
            "/c".to_string(),
            "/O2".to_string(),
            "/GL".to_string(),
            "/EHsc".to_string(),
            "/nologo".to_string(),
            "/DNDEBUG".to_string(),
            format!("/Fo{}", object.display()),
            source.display().to_string(),
        ]);

        objects.push(object);
    }

    let mut link = vec![
        "link".to_string(),
        format!("/OUT:{}", artifact.display()),
        "/LTCG".to_string(),
        "/OPT:REF".to_string(),
        "/OPT:ICF".to_string(),
        "/INCREMENTAL:NO".to_string(),
        "/NOLOGO".to_string(),
    ];
    link.extend(objects.iter().map(|o| o.display().to_string()));
    session.add_command(link);

    session
}

/// @ai:intent GCC/Clang command sequence: compile per source with LTO, then
///            link stripped with dead-code elimination
/// @ai:effects pure
fn unix_session(
    compiler: &str,
    sources: &[PathBuf],
    output_dir: &Path,
    artifact: &Path,
) -> CommandSession {
    let mut session = CommandSession::new();
    let mut objects = Vec::with_capacity(sources.len());

    for source in sources {
        let object = object_path(source, output_dir, "o");

        session.add_command([
            compiler.to_string(),
            "-std=c++11".to_string(),
            "-m64".to_string(),
            "-O3".to_string(),
            "-flto".to_string(),
            "-c".to_string(),
            source.display().to_string(),
            "-o".to_string(),
            object.display().to_string(),
        ]);

        objects.push(object);
    }

    let mut link = vec![
        compiler.to_string(),
        "-O3".to_string(),
        "-flto".to_string(),
        "-s".to_string(),
        "-o".to_string(),
        artifact.display().to_string(),
    ];
    link.extend(objects.iter().map(|o| o.display().to_string()));
    session.add_command(link);

    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_unix_session_shape() {
        let sources = vec![PathBuf::from("src/main.cpp"), PathBuf::from("src/tree.cpp")];
        let out = PathBuf::from("build/suite/lang_cpp");
        let artifact = CppBuildAdapter::artifact_path(&out);

        let session = unix_session("g++", &sources, &out, &artifact);

        // One compile per source plus the link step; no init command.
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_msvc_session_is_init_compile_link() {
        let sources = vec![PathBuf::from("main.cpp")];
        let out = PathBuf::from("out");
        let artifact = out.join("benchmark.exe");

        let session = msvc_session(Path::new("C:/VS/vcvarsall.bat"), &sources, &out, &artifact);

        // vcvars init, one compile, one link.
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_object_named_after_source_base_name() {
        let object = object_path(Path::new("src/kdtree.cpp"), Path::new("out"), "o");
        assert_eq!(object, PathBuf::from("out/kdtree.o"));
    }

    #[tokio::test]
    async fn test_build_fails_for_missing_source_dir() {
        let temp = TempDir::new().unwrap();
        let adapter = CppBuildAdapter::new(CppToolchain::Gcc {
            compiler: "g++".to_string(),
        });

        let err = adapter
            .build(&temp.path().join("nope"), temp.path())
            .await
            .unwrap_err();

        assert!(matches!(err, AdapterError::MissingSourceDir(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_compile_failure_propagates_toolchain_error() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let out = temp.path().join("out");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&out).unwrap();
        touch(&src, "main.cpp");

        // "false" as the compiler: every compile command exits non-zero.
        let adapter = CppBuildAdapter::new(CppToolchain::Gcc {
            compiler: "false".to_string(),
        });

        let err = adapter.build(&src, &out).await.unwrap_err();
        assert!(matches!(err, AdapterError::Toolchain(_)));
    }
}

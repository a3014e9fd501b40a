//! @ai:module:intent Benchmark orchestration harness library
//! @ai:module:layer application
//! @ai:module:public_api config, lang, suite, session, adapter, builder, runner, report, orchestrator, toolchain

pub mod adapter;
pub mod builder;
pub mod config;
pub mod lang;
pub mod orchestrator;
pub mod report;
pub mod runner;
pub mod session;
pub mod suite;
pub mod toolchain;

pub use adapter::{AdapterError, CppBuildAdapter, ScriptStageAdapter};
pub use builder::{BenchmarkBuilder, BuildOutcome, BuildTask};
pub use config::HarnessConfig;
pub use lang::{ArtifactKind, Language};
pub use orchestrator::Orchestrator;
pub use runner::{BenchmarkRunner, Mode, RunReport, RunStatus, SuiteReport};
pub use session::{CommandSession, SessionError};
pub use suite::Suite;
pub use toolchain::{ToolchainStatus, ToolchainValidator};

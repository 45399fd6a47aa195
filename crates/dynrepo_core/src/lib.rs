//! Core engine for contract-declared data access.
//! This crate is the single source of truth for template and proxy semantics.

pub mod contract;
pub mod exec;
pub mod logging;
pub mod model;
pub mod proxy;
pub mod render;

pub use contract::{
    ContractError, ContractManifest, MethodContract, ParamKind, ParamSpec, RepositoryContract,
    ReturnShape,
};
pub use exec::{ExecError, ExecOutcome, ExecResult, QueryExecutor, SqliteExecutor};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::value::Value;
pub use proxy::registry::{RegistryError, RepositoryRegistry};
pub use proxy::synthesizer::{
    synthesize, CallError, CallResult, GeneratedRepository, SynthesisError, SynthesisResult,
};
pub use render::env::ParamEnv;
pub use render::template::{render, RenderedQuery};
pub use render::{RenderError, RenderResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

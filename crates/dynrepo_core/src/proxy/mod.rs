//! Repository proxy synthesis and registration.
//!
//! # Responsibility
//! - Turn validated contract metadata into callable repository
//!   implementations (generic dispatch, no runtime code emission).
//! - Keep synthesized implementations discoverable by contract identity.
//!
//! # Invariants
//! - Synthesis runs once per contract, single-threaded, before any call
//!   traffic; malformed contracts fail here, never at call time.
//! - Generated repositories are stateless beyond their executor handle and
//!   safe for concurrent callers.

pub mod registry;
pub mod synthesizer;

pub use registry::{RegistryError, RepositoryRegistry};
pub use synthesizer::{
    synthesize, CallError, CallResult, GeneratedRepository, SynthesisError, SynthesisResult,
};

//! Static repository contract metadata.
//!
//! # Responsibility
//! - Describe each repository method: name, ordered parameters, return
//!   shape and SQL template text.
//! - Provide an explicit, enumerable manifest of contracts built at
//!   composition time (no reflective scanning of the running process).
//!
//! # Invariants
//! - Contract metadata is immutable once loaded; lifetime = process lifetime.
//! - Exactly one template per method; absence is a definition error caught
//!   at synthesis, never at call time.

pub mod metadata;

pub use metadata::{
    ContractError, ContractManifest, MethodContract, ParamKind, ParamSpec, RepositoryContract,
    ReturnShape,
};

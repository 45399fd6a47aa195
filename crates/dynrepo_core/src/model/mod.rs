//! Call-argument value model shared by renderer, proxy and executor.
//!
//! # Responsibility
//! - Define the canonical tagged value used for every call argument and
//!   nested field.
//! - Keep literal shaping independent from any SQL dialect details.
//!
//! # Invariants
//! - A value's shape is fixed at construction.
//! - `Object` field order is the caller's declaration order.

pub mod value;

//! Query execution boundary.
//!
//! # Responsibility
//! - Define the executor contract consumed by generated repositories.
//! - Keep execution opaque to the renderer and synthesizer: rendered SQL
//!   goes in, a shaped outcome comes out.
//!
//! # Invariants
//! - Executor failures pass through to callers unmodified; the core never
//!   interprets or retries them.
//! - Implementations must be callable from multiple threads.

use crate::contract::ReturnShape;
use crate::model::value::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqliteExecutor;

pub type ExecResult<T> = Result<T, ExecError>;

/// Execution transport errors.
#[derive(Debug)]
pub enum ExecError {
    Sqlite(rusqlite::Error),
    /// The shared connection handle could not be acquired for this call.
    ConnectionUnavailable,
    /// Result column with no `Value` mapping (e.g. blobs).
    UnsupportedColumnType { column: String },
}

impl Display for ExecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ConnectionUnavailable => write!(f, "executor connection is unavailable"),
            Self::UnsupportedColumnType { column } => {
                write!(f, "result column `{column}` has no supported value mapping")
            }
        }
    }
}

impl Error for ExecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ConnectionUnavailable | Self::UnsupportedColumnType { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for ExecError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Shaped result of one executed query.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    /// One `Value::Object` per row, fields in column order.
    Rows(Vec<Value>),
    /// First column of the first row; `Value::Null` over an empty result.
    Scalar(Value),
    /// Affected-row count of an effect statement.
    RowCount(usize),
}

/// Executes rendered SQL and adapts the result to a declared return shape.
///
/// Any implementation satisfying this contract is acceptable to the proxy
/// layer; the bundled SQLite executor is one such collaborator.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, sql: &str, shape: ReturnShape) -> ExecResult<ExecOutcome>;
}

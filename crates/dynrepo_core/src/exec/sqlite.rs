//! SQLite-backed query executor.
//!
//! # Responsibility
//! - Run rendered SQL on a mutex-guarded SQLite connection.
//! - Map result columns into `Value` rows per the declared return shape.
//!
//! # Invariants
//! - The connection is acquired per call and released on every exit path,
//!   including failure.
//! - No retries, timeouts or statement caching.

use crate::contract::ReturnShape;
use crate::exec::{ExecError, ExecOutcome, ExecResult, QueryExecutor};
use crate::model::value::Value;
use log::{debug, error};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::sync::Mutex;
use std::time::Instant;

/// Executor over one owned SQLite connection.
pub struct SqliteExecutor {
    conn: Mutex<Connection>,
}

impl SqliteExecutor {
    /// Wraps an already opened and configured connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl QueryExecutor for SqliteExecutor {
    fn execute(&self, sql: &str, shape: ReturnShape) -> ExecResult<ExecOutcome> {
        let started_at = Instant::now();
        let conn = self
            .conn
            .lock()
            .map_err(|_| ExecError::ConnectionUnavailable)?;

        let outcome = match shape {
            ReturnShape::Rows => read_rows(&conn, sql).map(ExecOutcome::Rows),
            ReturnShape::Scalar => read_scalar(&conn, sql).map(ExecOutcome::Scalar),
            ReturnShape::RowCount => conn
                .execute(sql, [])
                .map(ExecOutcome::RowCount)
                .map_err(ExecError::from),
        };

        match &outcome {
            Ok(_) => debug!(
                "event=query_exec module=exec status=ok shape={shape:?} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=query_exec module=exec status=error shape={shape:?} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }

        outcome
    }
}

fn read_rows(conn: &Connection, sql: &str) -> ExecResult<Vec<Value>> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|name| name.to_string()).collect();

    let mut rows = stmt.query([])?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        let mut fields = Vec::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            let value = column_value(row.get_ref(index)?, column)?;
            fields.push((column.clone(), value));
        }
        result.push(Value::Object(fields));
    }

    Ok(result)
}

fn read_scalar(conn: &Connection, sql: &str) -> ExecResult<Value> {
    let mut stmt = conn.prepare(sql)?;
    let column = stmt
        .column_names()
        .first()
        .map(|name| name.to_string())
        .unwrap_or_default();

    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => column_value(row.get_ref(0)?, &column),
        None => Ok(Value::Null),
    }
}

fn column_value(value: ValueRef<'_>, column: &str) -> ExecResult<Value> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(number) => Ok(Value::Integer(number)),
        ValueRef::Real(number) => Ok(Value::Real(number)),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Value::Text(text.to_string())),
            Err(_) => Err(ExecError::UnsupportedColumnType {
                column: column.to_string(),
            }),
        },
        ValueRef::Blob(_) => Err(ExecError::UnsupportedColumnType {
            column: column.to_string(),
        }),
    }
}

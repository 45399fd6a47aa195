//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire one demo contract end to end against an in-memory database.
//! - Keep output deterministic for quick local sanity checks.

use dynrepo_core::{
    synthesize, ContractManifest, MethodContract, ParamKind, ParamSpec, RepositoryContract,
    RepositoryRegistry, ReturnShape, SqliteExecutor, Value,
};
use rusqlite::Connection;
use std::error::Error;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn Error>> {
    println!("dynrepo_core version={}", dynrepo_core::core_version());

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER
        );",
    )?;
    let executor = Arc::new(SqliteExecutor::new(conn));

    let manifest = ContractManifest::new().with_contract(RepositoryContract::new(
        "user_repository",
        vec![
            MethodContract::new(
                "insert_user",
                vec![ParamSpec::new("user", ParamKind::Object)],
                ReturnShape::RowCount,
                "INSERT INTO users (id, name, age) VALUES (:user)",
            ),
            MethodContract::new(
                "find_by_id",
                vec![ParamSpec::new("id", ParamKind::Integer)],
                ReturnShape::Rows,
                "SELECT id, name, age FROM users WHERE id = :id",
            ),
            MethodContract::new(
                "count_users",
                vec![],
                ReturnShape::Scalar,
                "SELECT COUNT(*) FROM users",
            ),
        ],
    ));

    let mut registry = RepositoryRegistry::new();
    for contract in manifest.contracts() {
        let repository = synthesize(contract, executor.clone())?;
        registry.register(Arc::new(repository))?;
    }

    let users = registry.require("user_repository")?;
    let inserted = users.call(
        "insert_user",
        &[Value::object(vec![
            ("id", Value::from(1)),
            ("name", Value::from("Ann")),
            ("age", Value::from(30)),
        ])],
    )?;
    println!("insert_user -> {inserted:?}");

    let found = users.call("find_by_id", &[Value::from(1)])?;
    println!("find_by_id(1) -> {found:?}");

    let count = users.call("count_users", &[])?;
    println!("count_users -> {count:?}");

    Ok(())
}

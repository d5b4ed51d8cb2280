//! Shared test helpers for `PostgreSQL` integration tests.

use std::env;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use taskboard::task::adapters::postgres::PostgresTaskStore;

/// Environment variable naming the server used for test databases.
pub const DATABASE_URL_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

const POOL_SIZE: u32 = 4;

fn base_url() -> Result<String, eyre::Report> {
    env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| eyre::eyre!("set {DATABASE_URL_ENV} to run the PostgreSQL tests"))
}

/// Replaces the database path of `base`, keeping any query string.
fn database_url(base: &str, db_name: &str) -> Result<String, eyre::Report> {
    let authority_start = base
        .find("://")
        .map(|index| index + 3)
        .ok_or_else(|| eyre::eyre!("{DATABASE_URL_ENV} must be a postgres:// URL"))?;
    let (scheme, rest) = base.split_at(authority_start);
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let query = tail.find('?').map_or("", |index| &tail[index..]);
    Ok(format!("{scheme}{authority}/{db_name}{query}"))
}

fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn execute_admin_sql(base: &str, sql: &str) -> Result<(), eyre::Report> {
    let mut connection = PgConnection::establish(base)?;
    connection.batch_execute(sql)?;
    Ok(())
}

/// Drops the temporary database even if the test panics.
pub struct CleanupGuard {
    base_url: String,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(&self.db_name)
        );
        if let Err(err) = execute_admin_sql(&self.base_url, &sql) {
            eprintln!("Warning: failed to drop test database {}: {err}", self.db_name);
        }
    }
}

/// Store bound to a database that exists only for one test.
///
/// Fields drop in order, so the pool closes before the database is dropped.
pub struct TestDatabase {
    /// Store connected to the temporary database.
    pub store: Arc<PostgresTaskStore>,
    _guard: CleanupGuard,
}

/// Creates an empty database with the task board schema.
///
/// # Errors
///
/// Returns an error if [`DATABASE_URL_ENV`] is unset, the server is
/// unreachable, or the schema cannot be applied.
pub async fn temporary_store() -> Result<TestDatabase, eyre::Report> {
    let base = base_url()?;
    let db_name = format!("taskboard_test_{}", uuid::Uuid::new_v4().simple());
    execute_admin_sql(
        &base,
        &format!("CREATE DATABASE {}", quote_identifier(&db_name)),
    )?;
    let guard = CleanupGuard {
        base_url: base.clone(),
        db_name: db_name.clone(),
    };

    let store = PostgresTaskStore::connect(&database_url(&base, &db_name)?, POOL_SIZE)?;
    store.sync_schema().await?;
    // Re-applying the schema must be harmless.
    store.sync_schema().await?;
    Ok(TestDatabase {
        store: Arc::new(store),
        _guard: guard,
    })
}

#[cfg(test)]
mod tests {
    use super::database_url;
    use rstest::rstest;

    #[rstest]
    #[case("postgres://u:p@db:5432/postgres", "postgres://u:p@db:5432/t1")]
    #[case("postgres://u@db/postgres?sslmode=disable", "postgres://u@db/t1?sslmode=disable")]
    #[case("postgres://db:5432", "postgres://db:5432/t1")]
    #[case("postgresql://db?sslmode=require", "postgresql://db/t1?sslmode=require")]
    fn database_path_is_replaced(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(database_url(base, "t1").expect("valid url"), expected);
    }
}

//! Schema migrations, tracked with SQLite's `user_version` pragma.

use libsql::Connection;

use crate::error::DatabaseError;

/// Schema steps; entry `i` brings the schema to version `i + 1`.
static MIGRATIONS: &[&str] = &[
    // 1: profiles and the restart-surviving session
    r#"
        CREATE TABLE IF NOT EXISTS profiles (
            email TEXT PRIMARY KEY,
            data TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS active_session (
            slot INTEGER PRIMARY KEY CHECK (slot = 1),
            email TEXT NOT NULL,
            started_at TEXT NOT NULL
        );
    "#,
];

/// Latest schema version this build knows about.
pub fn latest_version() -> i64 {
    MIGRATIONS.len() as i64
}

/// Bring the schema up to [`latest_version`]. Each step runs in its own
/// transaction together with the version bump.
pub async fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current = schema_version(conn).await?;

    for (version, sql) in (1..).zip(MIGRATIONS.iter()).skip(current.max(0) as usize) {
        tracing::info!(version, "Applying schema migration");
        let batch = format!("BEGIN;\n{sql}\nPRAGMA user_version = {version};\nCOMMIT;");
        conn.execute_batch(&batch)
            .await
            .map_err(|e| DatabaseError::Migration(format!("V{version}: {e}")))?;
    }

    Ok(())
}

/// Version recorded in the database file, 0 for a fresh one.
pub async fn schema_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query("PRAGMA user_version", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("read user_version: {e}")))?;
    match rows
        .next()
        .await
        .map_err(|e| DatabaseError::Migration(format!("read user_version: {e}")))?
    {
        Some(row) => row
            .get::<i64>(0)
            .map_err(|e| DatabaseError::Migration(format!("parse user_version: {e}"))),
        None => Ok(0),
    }
}

//! libSQL backend — async `Database` trait implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::DatabaseError;
use crate::profile::UserProfile;
use crate::store::migrations;
use crate::store::traits::Database;

/// libSQL database backend on a single reused connection.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::connect(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;
        Self::connect(db).await
    }

    async fn connect(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;
        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    /// First column of the first row, if any.
    async fn query_text(
        &self,
        op: &str,
        sql: &str,
        args: impl libsql::params::IntoParams,
    ) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, args)
            .await
            .map_err(|e| DatabaseError::Query(format!("{op}: {e}")))?;
        match rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("{op}: {e}")))?
        {
            Some(row) => row
                .get::<String>(0)
                .map(Some)
                .map_err(|e| DatabaseError::Query(format!("{op}: {e}"))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Database for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(&self.conn).await
    }

    async fn load_profile(&self, email: &str) -> Result<Option<UserProfile>, DatabaseError> {
        let data = self
            .query_text(
                "load_profile",
                "SELECT data FROM profiles WHERE email = ?1",
                params![email],
            )
            .await?;
        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save_profile(&self, email: &str, profile: &UserProfile) -> Result<(), DatabaseError> {
        let data = serde_json::to_string(profile)?;
        self.conn
            .execute(
                "INSERT INTO profiles (email, data, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (email) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
                params![email, data, Utc::now().to_rfc3339()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("save_profile: {e}")))?;
        Ok(())
    }

    async fn active_session(&self) -> Result<Option<String>, DatabaseError> {
        self.query_text(
            "active_session",
            "SELECT email FROM active_session WHERE slot = 1",
            (),
        )
        .await
    }

    async fn set_active_session(&self, email: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO active_session (slot, email, started_at) VALUES (1, ?1, ?2)",
                params![email, Utc::now().to_rfc3339()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("set_active_session: {e}")))?;
        Ok(())
    }

    async fn clear_active_session(&self) -> Result<bool, DatabaseError> {
        let removed = self
            .conn
            .execute("DELETE FROM active_session", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("clear_active_session: {e}")))?;
        Ok(removed > 0)
    }
}

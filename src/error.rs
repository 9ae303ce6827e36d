//! Error types for the profile service.
//!
//! The completion rules in `profile::fields`, `profile::status` and
//! `profile::steps` are total and never produce these; only the session,
//! store and configuration layers do.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DatabaseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Errors from the profile session (login, update, logout).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    #[error("No active profile; log in first")]
    NoActiveProfile,

    #[error("Profile update must be a JSON object, got {0}")]
    InvalidUpdate(String),

    #[error("Email cannot be changed from {current} to {requested}")]
    EmailImmutable { current: String, requested: String },
}

/// Result type alias for the profile service.
pub type Result<T> = std::result::Result<T, Error>;

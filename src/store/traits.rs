//! `Database` trait — async interface for profile persistence.

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::profile::UserProfile;

/// Stored profiles, keyed by email, plus the single logged-in user.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    /// Stored profile for `email`, if one was ever saved.
    async fn load_profile(&self, email: &str) -> Result<Option<UserProfile>, DatabaseError>;

    /// Insert or replace the profile stored for `email`.
    async fn save_profile(&self, email: &str, profile: &UserProfile) -> Result<(), DatabaseError>;

    /// Email of the user whose session survives a restart.
    async fn active_session(&self) -> Result<Option<String>, DatabaseError>;

    async fn set_active_session(&self, email: &str) -> Result<(), DatabaseError>;

    /// Forget the active session. Returns whether one was set.
    async fn clear_active_session(&self) -> Result<bool, DatabaseError>;
}

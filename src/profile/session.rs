//! ProfileSession — owns the current user's profile, mirrors it to the
//! profile store, and derives completion status and resume step on demand.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{DatabaseError, Result, SessionError};
use crate::store::Database;

use super::fields::ProfileField;
use super::model::{ProfileStatus, UserProfile};
use super::status::{classify, missing_fields};
use super::steps::next_incomplete_step;

/// Derived view of the session returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub status: ProfileStatus,
    /// `2..=5`, or `0` when registration is finished.
    pub next_step: u8,
    pub missing_fields: Vec<&'static str>,
    pub profile: Option<UserProfile>,
}

impl ProfileSnapshot {
    pub fn of(profile: Option<&UserProfile>) -> Self {
        Self {
            status: classify(profile),
            next_step: next_incomplete_step(profile),
            missing_fields: missing_fields(profile).iter().map(|f| f.key()).collect(),
            profile: profile.cloned(),
        }
    }
}

/// Single source of truth for the logged-in user's profile.
///
/// Status and step are never cached: every snapshot recomputes them from the
/// profile as it is at that moment. Mutations hold the write lock while
/// persisting so memory and store stay in step.
pub struct ProfileSession {
    db: Arc<dyn Database>,
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl ProfileSession {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self {
            db,
            profile: Arc::new(RwLock::new(None)),
        }
    }

    /// Reload the last active user's profile from the store, if any.
    pub async fn restore(&self) -> Result<Option<ProfileSnapshot>> {
        let Some(email) = self.db.active_session().await? else {
            debug!("No active session to restore");
            return Ok(None);
        };

        let Some(profile) = self.load_profile(&email).await? else {
            warn!(email = %email, "Active session has no stored profile; clearing it");
            self.db.clear_active_session().await?;
            return Ok(None);
        };

        let snapshot = ProfileSnapshot::of(Some(&profile));
        info!(
            email = %email,
            status = %snapshot.status,
            next_step = snapshot.next_step,
            "Restored profile session"
        );
        *self.profile.write().await = Some(profile);
        Ok(Some(snapshot))
    }

    /// Start a session for `email`, loading its stored profile or creating a
    /// minimal identity-only one.
    pub async fn login(&self, email: &str, name: Option<&str>) -> Result<ProfileSnapshot> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SessionError::InvalidEmail(email.to_string()).into());
        }

        let mut guard = self.profile.write().await;

        let profile = match self.load_profile(email).await? {
            Some(existing) => existing,
            None => {
                let created = UserProfile::with_identity(email, name);
                self.db.save_profile(email, &created).await?;
                created
            }
        };

        self.db.set_active_session(email).await?;

        let snapshot = ProfileSnapshot::of(Some(&profile));
        info!(
            email = %email,
            status = %snapshot.status,
            next_step = snapshot.next_step,
            "Logged in"
        );
        *guard = Some(profile);
        Ok(snapshot)
    }

    /// Merge `fields` (a JSON object) into the active profile.
    ///
    /// Registration steps send intake names, the dashboard sends canonical
    /// names; both are stored as given. A `null` value removes the key.
    pub async fn update(&self, fields: Value) -> Result<ProfileSnapshot> {
        let fields = match fields {
            Value::Object(map) => map,
            other => return Err(SessionError::InvalidUpdate(json_kind(&other).to_string()).into()),
        };

        let mut guard = self.profile.write().await;
        let current = guard.as_ref().ok_or(SessionError::NoActiveProfile)?;
        let current_email = current.email().unwrap_or_default().to_string();

        if let Some(requested) = fields.get(ProfileField::Email.key()) {
            if requested.as_str() != Some(current_email.as_str()) {
                return Err(SessionError::EmailImmutable {
                    current: current_email,
                    requested: requested.to_string(),
                }
                .into());
            }
        }

        let before = classify(Some(current));
        let mut updated = current.clone();
        updated.merge(fields);
        self.db.save_profile(&current_email, &updated).await?;

        let snapshot = ProfileSnapshot::of(Some(&updated));
        if snapshot.status != before {
            info!(
                email = %current_email,
                from = %before,
                to = %snapshot.status,
                "Profile status changed"
            );
        }
        debug!(
            email = %current_email,
            next_step = snapshot.next_step,
            missing = snapshot.missing_fields.len(),
            "Profile updated"
        );

        *guard = Some(updated);
        Ok(snapshot)
    }

    /// End the session. The user's profile stays stored for the next login.
    pub async fn logout(&self) -> Result<()> {
        let mut guard = self.profile.write().await;
        self.db.clear_active_session().await?;
        if let Some(email) = guard.as_ref().and_then(UserProfile::email) {
            info!(email = %email, "Logged out");
        }
        *guard = None;
        Ok(())
    }

    /// Current status, resume step, and profile.
    pub async fn snapshot(&self) -> ProfileSnapshot {
        let guard = self.profile.read().await;
        ProfileSnapshot::of(guard.as_ref())
    }

    pub async fn is_logged_in(&self) -> bool {
        self.profile.read().await.is_some()
    }

    /// Stored profile for `email`; an unreadable record counts as absent
    /// and is replaced on the next save.
    async fn load_profile(&self, email: &str) -> Result<Option<UserProfile>> {
        match self.db.load_profile(email).await {
            Ok(found) => Ok(found),
            Err(DatabaseError::Serialization(reason)) => {
                warn!(email = %email, %reason, "Ignoring malformed stored profile");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! User profile and completion status data models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::ProfileField;

/// What the client currently knows about a user.
///
/// Assembled incrementally: the registration wizard writes intake names
/// (`dob`, `traits`, ...) while the dashboard edit form writes canonical
/// names (`dateOfBirth`, `personalityTraits`, ...). The record is kept as a
/// plain JSON object so both shapes, and any unknown keys, survive a
/// persistence round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimal identity-only record created at login.
    pub fn with_identity(email: &str, name: Option<&str>) -> Self {
        let mut profile = Self::new();
        profile.set(ProfileField::Email.key(), Value::String(email.to_string()));
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            profile.set(ProfileField::Name.key(), Value::String(name.to_string()));
        }
        profile
    }

    /// Raw value stored under `key`, without alias fallback.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn email(&self) -> Option<&str> {
        self.get(ProfileField::Email.key()).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Shallow-merge `fields` into the record. A `null` value deletes the key.
    pub fn merge(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            if value.is_null() {
                self.0.remove(&key);
            } else {
                self.0.insert(key, value);
            }
        }
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for UserProfile {
    type Error = Value;

    /// Only JSON objects are profiles; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Completion label derived from a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileStatus {
    Basic,
    Completed,
}

impl ProfileStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "BASIC"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

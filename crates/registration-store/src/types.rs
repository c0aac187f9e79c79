//! Registration model types.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Known slot values. The store accepts any non-empty slot text.
pub struct Slot;

impl Slot {
    /// 7pm session.
    pub const EARLY_BIRD: &'static str = "early-bird";
    /// 8pm session.
    pub const REGULAR: &'static str = "regular";
}

/// Opaque registration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Generate a fresh, time-ordered identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RegistrationId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| StoreError::NotFound(s.to_string()))
    }
}

/// A stored registration.
///
/// Serialized with the `_id` / camelCase field names the front end reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(rename = "_id", alias = "id")]
    pub id: RegistrationId,
    pub name: String,
    pub phone: String,
    pub guests: i64,
    pub slot: String,
    #[serde(default)]
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Whether the registration shows up in listings and phone lookups.
    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    /// Merge the supplied patch fields, leaving the rest untouched.
    pub fn apply(&mut self, patch: &RegistrationPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(guests) = patch.guests {
            self.guests = guests;
        }
        if let Some(slot) = &patch.slot {
            self.slot = slot.clone();
        }
        if let Some(cancelled) = patch.cancelled {
            self.cancelled = cancelled;
        }
    }
}

/// Fields required to create a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub name: String,
    pub phone: String,
    pub guests: i64,
    pub slot: String,
}

impl NewRegistration {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        guests: i64,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            guests,
            slot: slot.into(),
        }
    }

    /// Reject empty text fields.
    pub fn validate(&self) -> Result<(), StoreError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("slot", &self.slot),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Build the stored record.
    pub(crate) fn into_registration(self, created_at: DateTime<Utc>) -> Registration {
        Registration {
            id: RegistrationId::new(),
            name: self.name,
            phone: self.phone,
            guests: self.guests,
            slot: self.slot,
            cancelled: false,
            created_at,
        }
    }
}

/// Partial update. `None` fields are left untouched; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_guests"
    )]
    pub guests: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
}

impl RegistrationPatch {
    /// Patch that withdraws a registration.
    pub fn cancel() -> Self {
        Self {
            cancelled: Some(true),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Coerce a JSON guest count into an integer.
///
/// Integers pass through and finite floats are truncated toward zero.
/// Strings must hold a base-10 number, which is coerced the same way.
/// Everything else is rejected.
pub fn coerce_guests(value: &serde_json::Value) -> Result<i64, StoreError> {
    use serde_json::Value;

    let invalid = || StoreError::Validation(format!("guests must be a number, got {}", value));
    let truncate = |f: f64| {
        if f.is_finite() && f.abs() < i64::MAX as f64 {
            Ok(f.trunc() as i64)
        } else {
            Err(invalid())
        }
    };

    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(i),
            None => n.as_f64().map_or_else(|| Err(invalid()), truncate),
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => Ok(i),
                Err(_) => s.parse::<f64>().map_err(|_| invalid()).and_then(truncate),
            }
        }
        _ => Err(invalid()),
    }
}

fn deserialize_guests<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(v) => coerce_guests(&v)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

//! API request and response types.

use crate::error::ApiError;
use registration_store::{coerce_guests, NewRegistration};
use serde::{Deserialize, Serialize};

/// Request to create a registration.
///
/// Every field is optional at the wire level so presence can be reported
/// as a validation error rather than a decode failure. Extra keys sent by
/// older forms (`cancelled`, `createdAt`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateRegistrationRequest {
    pub name: Option<String>,
    pub phone: Option<String>,

    /// Number or numeric string. `0` is a valid count.
    pub guests: Option<serde_json::Value>,

    /// `early-bird` or `regular`; other text is stored as given.
    pub slot: Option<String>,
}

impl CreateRegistrationRequest {
    /// Check presence of every field and coerce the guest count.
    pub fn validate(self) -> Result<NewRegistration, ApiError> {
        let mut missing = Vec::new();

        if self.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name");
        }
        if self.phone.as_deref().map_or(true, str::is_empty) {
            missing.push("phone");
        }
        // Presence, not truthiness
        if self.guests.as_ref().map_or(true, serde_json::Value::is_null) {
            missing.push("guests");
        }
        if self.slot.as_deref().map_or(true, str::is_empty) {
            missing.push("slot");
        }

        if !missing.is_empty() {
            return Err(ApiError::MissingFields(missing));
        }

        let guests = match &self.guests {
            Some(value) => coerce_guests(value)?,
            None => return Err(ApiError::MissingFields(vec!["guests"])),
        };

        Ok(NewRegistration {
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            guests,
            slot: self.slot.unwrap_or_default(),
        })
    }
}

/// Response after an update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

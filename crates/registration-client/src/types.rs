//! Client-side response types and the sign-up sheet view.

use registration_store::{Registration, Slot};
use serde::{Deserialize, Serialize};

/// Response body of a successful update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Active registrations grouped the way the organizer list shows them.
#[derive(Debug, Clone, Default)]
pub struct SignupSheet {
    pub early_bird: Vec<Registration>,
    pub regular: Vec<Registration>,
    /// Registrations whose slot is neither known value
    pub other: Vec<Registration>,
}

impl SignupSheet {
    /// Group registrations by slot, keeping their order.
    pub fn from_registrations(registrations: Vec<Registration>) -> Self {
        let mut sheet = Self::default();
        for registration in registrations {
            // The API never lists cancelled entries; skip any that slip through
            if registration.cancelled {
                continue;
            }
            match registration.slot.as_str() {
                Slot::EARLY_BIRD => sheet.early_bird.push(registration),
                Slot::REGULAR => sheet.regular.push(registration),
                _ => sheet.other.push(registration),
            }
        }
        sheet
    }

    /// Number of registrations on the sheet.
    pub fn total(&self) -> usize {
        self.early_bird.len() + self.regular.len() + self.other.len()
    }

    /// Players expected in a slot: each registrant plus their guests.
    pub fn headcount(registrations: &[Registration]) -> i64 {
        registrations.iter().map(|r| 1 + r.guests.max(0)).sum()
    }

    /// Players expected across the whole sheet.
    pub fn total_headcount(&self) -> i64 {
        Self::headcount(&self.early_bird)
            + Self::headcount(&self.regular)
            + Self::headcount(&self.other)
    }
}

//! In-memory registration collection.

use crate::types::{Registration, RegistrationId, RegistrationPatch};
use serde::{Deserialize, Serialize};

/// Registration documents in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    registrations: Vec<Registration>,
}

impl Collection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Append a record.
    pub fn insert(&mut self, registration: Registration) {
        self.registrations.push(registration);
    }

    /// Get a record by id, cancelled or not.
    pub fn get(&self, id: &RegistrationId) -> Option<&Registration> {
        self.registrations.iter().find(|r| &r.id == id)
    }

    /// Active records sorted by creation time. Ties keep insertion order.
    pub fn list_active(&self) -> Vec<Registration> {
        let mut active: Vec<Registration> = self
            .registrations
            .iter()
            .filter(|r| r.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|r| r.created_at);
        active
    }

    /// First active record with exactly this phone.
    pub fn find_by_phone(&self, phone: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|r| r.is_active() && r.phone == phone)
    }

    /// Merge a patch into the record with this id.
    pub fn apply(&mut self, id: &RegistrationId, patch: &RegistrationPatch) -> Option<&Registration> {
        let record = self.registrations.iter_mut().find(|r| &r.id == id)?;
        record.apply(patch);
        Some(&*record)
    }

    /// Number of stored records, cancelled included.
    pub fn count(&self) -> usize {
        self.registrations.len()
    }

    /// Number of active records.
    pub fn count_active(&self) -> usize {
        self.registrations.iter().filter(|r| r.is_active()).count()
    }
}

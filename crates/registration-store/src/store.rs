//! Registration store: the collection plus its persistence backend.

use crate::backend::Backend;
use crate::collection::Collection;
use crate::error::StoreError;
use crate::types::{NewRegistration, Registration, RegistrationId, RegistrationPatch};
use chrono::Utc;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Registration store.
///
/// Created once at process start and shared behind an `Arc`. Every
/// operation is a single read or write of the collection lock. Writes are
/// applied to a copy, persisted, then committed, so a failed save leaves
/// the store unchanged.
pub struct Store {
    collection: RwLock<Collection>,
    backend: Backend,
}

impl Store {
    /// Open the store described by a database URL and load its contents.
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        Self::with_backend(Backend::from_url(url)?).await
    }

    /// Open a JSON file store.
    pub async fn file(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::with_backend(Backend::File(crate::backend::FileBackend::new(path))).await
    }

    /// In-memory store with no persistence.
    pub fn memory() -> Self {
        Self {
            collection: RwLock::new(Collection::new()),
            backend: Backend::Memory(crate::backend::MemoryBackend),
        }
    }

    async fn with_backend(backend: Backend) -> Result<Self, StoreError> {
        let collection = backend.load().await?;

        info!(
            "Registration store opened (backend={}, records={})",
            backend.kind(),
            collection.count()
        );

        Ok(Self {
            collection: RwLock::new(collection),
            backend,
        })
    }

    /// Backend label, for logs.
    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    /// Persist a new registration.
    #[instrument(skip(self, new), fields(phone = %new.phone))]
    pub async fn create(&self, new: NewRegistration) -> Result<Registration, StoreError> {
        new.validate()?;

        let mut collection = self.collection.write().await;
        let registration = new.into_registration(Utc::now());

        let mut next = collection.clone();
        next.insert(registration.clone());
        self.backend.save(&next).await?;
        *collection = next;

        info!(id = %registration.id, "Registration created");
        Ok(registration)
    }

    /// Active registrations, oldest first.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Registration>, StoreError> {
        let collection = self.collection.read().await;
        let active = collection.list_active();
        debug!("Listed {} active registrations", active.len());
        Ok(active)
    }

    /// First active registration with exactly this phone.
    #[instrument(skip(self))]
    pub async fn find_by_phone(&self, phone: &str) -> Result<Registration, StoreError> {
        let collection = self.collection.read().await;
        collection
            .find_by_phone(phone)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(phone.to_string()))
    }

    /// Registration by id, including cancelled ones.
    pub async fn get(&self, id: &RegistrationId) -> Result<Registration, StoreError> {
        let collection = self.collection.read().await;
        collection
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Merge the supplied fields into a registration.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: &RegistrationId,
        patch: RegistrationPatch,
    ) -> Result<Registration, StoreError> {
        let mut collection = self.collection.write().await;

        let mut next = collection.clone();
        let updated = next
            .apply(id, &patch)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.backend.save(&next).await?;
        *collection = next;

        info!(cancelled = updated.cancelled, "Registration updated");
        Ok(updated)
    }

    /// Withdraw a registration. The record is kept with `cancelled = true`.
    pub async fn cancel(&self, id: &RegistrationId) -> Result<Registration, StoreError> {
        self.update(id, RegistrationPatch::cancel()).await
    }

    /// Total stored registrations, cancelled included.
    pub async fn count(&self) -> usize {
        self.collection.read().await.count()
    }
}

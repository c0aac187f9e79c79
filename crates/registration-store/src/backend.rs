//! Persistence backends for the registration collection.

use crate::collection::Collection;
use crate::error::StoreError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// URL scheme for the in-memory backend.
const MEMORY_SCHEME: &str = "memory://";

/// URL scheme for the JSON file backend.
const FILE_SCHEME: &str = "file://";

/// JSON document file holding the whole collection.
pub struct FileBackend {
    storage_path: PathBuf,
}

impl FileBackend {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Write the collection, replacing the previous document atomically.
    pub async fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(collection)?;

        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.storage_path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.storage_path).await?;

        debug!(
            "Saved {} registrations ({} bytes) to {:?}",
            collection.count(),
            data.len(),
            self.storage_path
        );
        Ok(())
    }

    /// Read the collection. A missing or empty file is an empty collection.
    pub async fn load(&self) -> Result<Collection, StoreError> {
        if !self.storage_path.exists() {
            info!(
                "Registration file not found at {:?}, starting with empty collection",
                self.storage_path
            );
            return Ok(Collection::new());
        }

        let data = fs::read(&self.storage_path).await?;

        if data.iter().all(u8::is_ascii_whitespace) {
            warn!("Registration file is empty, starting with empty collection");
            return Ok(Collection::new());
        }

        let collection: Collection = serde_json::from_slice(&data)?;

        info!(
            "Loaded {} registrations from {:?}",
            collection.count(),
            self.storage_path
        );
        Ok(collection)
    }
}

/// No persistence; the collection lives as long as the process.
pub struct MemoryBackend;

impl MemoryBackend {
    pub async fn save(&self, _collection: &Collection) -> Result<(), StoreError> {
        debug!("Memory backend: save is a no-op");
        Ok(())
    }

    pub async fn load(&self) -> Result<Collection, StoreError> {
        debug!("Memory backend: returning empty collection");
        Ok(Collection::new())
    }
}

/// Storage backend selected from the database URL.
pub enum Backend {
    File(FileBackend),
    Memory(MemoryBackend),
}

impl Backend {
    /// Parse a database URL.
    ///
    /// `memory://` selects the memory backend; `file://<path>` or a bare
    /// path selects the file backend.
    pub fn from_url(url: &str) -> Result<Self, StoreError> {
        let url = url.trim();

        if url == MEMORY_SCHEME || url == "memory" {
            return Ok(Backend::Memory(MemoryBackend));
        }

        if let Some(path) = url.strip_prefix(FILE_SCHEME) {
            if path.is_empty() {
                return Err(StoreError::UnsupportedUrl(url.to_string()));
            }
            return Ok(Backend::File(FileBackend::new(path)));
        }

        if url.is_empty() || url.contains("://") {
            return Err(StoreError::UnsupportedUrl(url.to_string()));
        }

        Ok(Backend::File(FileBackend::new(url)))
    }

    pub async fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        match self {
            Backend::File(b) => b.save(collection).await,
            Backend::Memory(b) => b.save(collection).await,
        }
    }

    pub async fn load(&self) -> Result<Collection, StoreError> {
        match self {
            Backend::File(b) => b.load().await,
            Backend::Memory(b) => b.load().await,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Backend::File(_) => "file",
            Backend::Memory(_) => "memory",
        }
    }
}

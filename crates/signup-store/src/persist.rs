//! Persistent storage backends for the waitlist.

use crate::error::StoreError;
use crate::waitlist::Waitlist;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

/// JSON-file-backed store.
pub struct FileStore {
    storage_path: PathBuf,
}

impl FileStore {
    /// Create a new file store.
    pub fn new(storage_path: PathBuf) -> Self {
        Self { storage_path }
    }

    /// Save the waitlist as a JSON snapshot.
    ///
    /// Written to a temp file and renamed into place so a crash mid-write
    /// never leaves a truncated snapshot behind.
    pub async fn save(&self, waitlist: &Waitlist) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(waitlist)?;

        // Ensure parent directory exists
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.storage_path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.storage_path).await?;

        debug!(
            "Saved waitlist snapshot ({} bytes) to {:?}",
            data.len(),
            self.storage_path
        );
        Ok(())
    }

    /// Load the waitlist from disk.
    ///
    /// Returns an empty waitlist if the file doesn't exist.
    pub async fn load(&self) -> Result<Waitlist, StoreError> {
        if !self.storage_path.exists() {
            info!(
                "Waitlist file not found at {:?}, starting with empty waitlist",
                self.storage_path
            );
            return Ok(Waitlist::new());
        }

        let data = fs::read(&self.storage_path).await?;
        let waitlist: Waitlist = serde_json::from_slice(&data)?;

        info!(
            "Loaded waitlist with {} signups from {:?}",
            waitlist.count(),
            self.storage_path
        );
        Ok(waitlist)
    }

    /// Check if a snapshot file exists.
    pub fn exists(&self) -> bool {
        self.storage_path.exists()
    }
}

/// In-memory store for testing or when persistence is disabled.
pub struct MemoryStore;

impl MemoryStore {
    /// "Save" does nothing for memory store.
    pub async fn save(&self, _waitlist: &Waitlist) -> Result<(), StoreError> {
        debug!("Memory store: save is a no-op");
        Ok(())
    }

    /// "Load" returns an empty waitlist.
    pub async fn load(&self) -> Result<Waitlist, StoreError> {
        debug!("Memory store: returning empty waitlist");
        Ok(Waitlist::new())
    }
}

/// Storage backend selected at startup.
pub enum Store {
    /// JSON file storage
    File(FileStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    /// Create a file store when persistence is enabled, memory otherwise.
    pub fn new(persist: bool, storage_path: PathBuf) -> Self {
        if persist {
            Store::File(FileStore::new(storage_path))
        } else {
            warn!("Persistence disabled, signups will be lost on restart");
            Store::Memory(MemoryStore)
        }
    }

    /// Force file store.
    pub fn file(storage_path: PathBuf) -> Self {
        Store::File(FileStore::new(storage_path))
    }

    /// Force memory store.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore)
    }

    /// Save the waitlist.
    pub async fn save(&self, waitlist: &Waitlist) -> Result<(), StoreError> {
        match self {
            Store::File(s) => s.save(waitlist).await,
            Store::Memory(s) => s.save(waitlist).await,
        }
    }

    /// Load the waitlist.
    pub async fn load(&self) -> Result<Waitlist, StoreError> {
        match self {
            Store::File(s) => s.load().await,
            Store::Memory(s) => s.load().await,
        }
    }
}

//! JSON file-based storage backend.
//!
//! Keeps the catalog in memory and rewrites the whole file after every successful
//! mutation using an atomic write (write-to-temp + rename). The change is staged on
//! a copy first and only installed in memory once it is on disk, so memory and file
//! never disagree.
//!
//! # Performance Characteristics
//!
//! - **Read**: served from memory
//! - **Write**: O(n), serializes and writes the entire catalog
//! - **Best for**: demo catalogs and small fixtures

use crate::domain::error::{MarketplaceError, Result};
use crate::domain::{
    Account, Appointment, AppointmentStatus, Listing, NewAppointment, NewListing, Transaction,
};
use crate::storage::backend::Storage;
use crate::storage::catalog::Catalog;
use crate::storage::memory::MemoryStorage;
use crate::storage::seed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
///
/// ```json
/// {
///   "version": 1,
///   "catalog": {
///     "listings": [ { "id": "car-1", "brand": "BMW", ... } ],
///     "accounts": [],
///     "appointments": [],
///     "transactions": [],
///     "counters": { "listing": 10, "appointment": 1, "account": 2 }
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
struct StorageFile {
    version: u32,
    #[serde(default)]
    catalog: Catalog,
}

/// JSON file storage backend.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; wrap it in a [`SharedStore`](super::SharedStore) to use it
/// from several threads.
#[derive(Debug)]
pub struct JsonStorage {
    file_path: PathBuf,
    inner: MemoryStorage,
}

impl JsonStorage {
    /// Opens a JSON catalog, creating parent directories as needed.
    ///
    /// A missing file starts an empty catalog, or the sample catalog when `seed` is
    /// true; in both cases the file is written immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot be read
    /// or written, or it contains invalid JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use carlot::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::open(PathBuf::from("/tmp/carlot.json"), true)?;
    /// # Ok::<(), carlot::MarketplaceError>(())
    /// ```
    pub fn open(file_path: PathBuf, seed: bool) -> Result<Self> {
        tracing::debug!(path = ?file_path, seed, "opening JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if file_path.exists() {
            let catalog = Self::load_from_file(&file_path)?;
            return Ok(Self {
                file_path,
                inner: MemoryStorage::from_catalog(catalog),
            });
        }

        tracing::debug!("initializing new catalog file");
        let catalog = if seed { seed::catalog() } else { Catalog::default() };
        Self::save_to_file(&file_path, &catalog)?;

        Ok(Self {
            file_path,
            inner: MemoryStorage::from_catalog(catalog),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<Catalog> {
        let contents = std::fs::read_to_string(path)?;
        let file: StorageFile = serde_json::from_str(&contents)
            .map_err(|e| MarketplaceError::Storage(format!("failed to parse JSON: {e}")))?;

        if file.version != FORMAT_VERSION {
            return Err(MarketplaceError::Storage(format!(
                "unsupported catalog version {}",
                file.version
            )));
        }

        tracing::debug!(
            listings = file.catalog.listings.len(),
            appointments = file.catalog.appointments.len(),
            "loaded catalog"
        );
        Ok(file.catalog)
    }

    fn save_to_file(path: &Path, catalog: &Catalog) -> Result<()> {
        #[derive(Serialize)]
        struct StorageFileRef<'a> {
            version: u32,
            catalog: &'a Catalog,
        }

        let json = serde_json::to_string_pretty(&StorageFileRef {
            version: FORMAT_VERSION,
            catalog,
        })
        .map_err(|e| MarketplaceError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;

        tracing::debug!(path = ?path, "catalog saved");
        Ok(())
    }

    /// Stages `change`, persists the result, then installs it in memory.
    fn mutate<T>(&mut self, change: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let (next, value) = self.inner.stage(change)?;
        Self::save_to_file(&self.file_path, &next)?;
        self.inner.install(next);
        Ok(value)
    }
}

impl Storage for JsonStorage {
    fn listings(&self) -> Result<Vec<Listing>> {
        self.inner.listings()
    }

    fn listing(&self, id: &str) -> Result<Option<Listing>> {
        self.inner.listing(id)
    }

    fn create_listing(&mut self, input: NewListing) -> Result<Listing> {
        let _span = tracing::debug_span!("json_create_listing", brand = %input.brand).entered();
        self.mutate(|c| c.create_listing(input, chrono::Utc::now()))
    }

    fn update_listing(&mut self, listing: Listing) -> Result<Listing> {
        let _span = tracing::debug_span!("json_update_listing", listing_id = %listing.id).entered();
        self.mutate(|c| c.update_listing(listing))
    }

    fn delete_listing(&mut self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("json_delete_listing", listing_id = %id).entered();
        if self.inner.listing(id)?.is_none() {
            return Ok(false);
        }
        self.mutate(|c| Ok(c.delete_listing(id)))
    }

    fn appointments_for_user(&self, user_id: &str) -> Result<Vec<Appointment>> {
        self.inner.appointments_for_user(user_id)
    }

    fn create_appointment(&mut self, input: NewAppointment) -> Result<Appointment> {
        let _span = tracing::debug_span!("json_create_appointment", listing_id = %input.listing_id).entered();
        self.mutate(|c| c.create_appointment(input))
    }

    fn update_appointment_status(&mut self, id: &str, status: AppointmentStatus) -> Result<Appointment> {
        let _span = tracing::debug_span!("json_update_appointment_status", appointment_id = %id).entered();
        self.mutate(|c| c.set_appointment_status(id, status))
    }

    fn transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.inner.transactions_for_user(user_id)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<Account>> {
        self.inner.authenticate(email, password)
    }

    fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Account> {
        let _span = tracing::debug_span!("json_register", email = %email).entered();
        self.mutate(|c| c.register(name, email, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        let mut store = JsonStorage::open(path.clone(), true).unwrap();
        let created = store.create_listing(seed::sample_input()).unwrap();
        assert!(store.delete_listing("car-2").unwrap());
        drop(store);

        let reopened = JsonStorage::open(path, true).unwrap();
        let listings = reopened.listings().unwrap();
        assert_eq!(listings.len(), 10);
        assert!(listings.iter().any(|l| l.id == created.id));
        assert!(reopened.listing("car-2").unwrap().is_none());
    }

    #[test]
    fn unseeded_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStorage::open(dir.path().join("empty.json"), false).unwrap();
        assert!(store.listings().unwrap().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonStorage::open(path, true).unwrap_err();
        assert!(matches!(err, MarketplaceError::Storage(_)));
    }

    #[test]
    fn failed_mutation_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mut store = JsonStorage::open(path.clone(), true).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut input = seed::sample_input();
        input.brand.clear();
        assert!(store.create_listing(input).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}

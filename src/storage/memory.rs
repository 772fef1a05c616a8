//! Copy-on-write in-memory storage backend.
//!
//! The catalog lives behind an `Arc`. A mutation clones the current catalog,
//! applies the change to the clone and swaps the reference in only on success, so
//! a reader holding a [`MemoryStorage::snapshot`] never observes a half-applied
//! change.

use super::backend::Storage;
use super::catalog::Catalog;
use super::seed;
use crate::domain::{
    Account, Appointment, AppointmentStatus, Listing, NewAppointment, NewListing, Result,
    Transaction,
};
use std::sync::Arc;

/// In-memory storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    catalog: Arc<Catalog>,
}

impl MemoryStorage {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store populated with the sample catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_catalog(seed::catalog())
    }

    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Cheap, immutable view of the current catalog.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Applies `change` to a private copy of the catalog and returns the copy
    /// without installing it.
    pub(crate) fn stage<T>(&self, change: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<(Catalog, T)> {
        let mut next = Catalog::clone(&self.catalog);
        let value = change(&mut next)?;
        Ok((next, value))
    }

    /// Swaps in a staged catalog.
    pub(crate) fn install(&mut self, next: Catalog) {
        self.catalog = Arc::new(next);
    }

    fn mutate<T>(&mut self, change: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let (next, value) = self.stage(change)?;
        self.install(next);
        Ok(value)
    }
}

impl Storage for MemoryStorage {
    fn listings(&self) -> Result<Vec<Listing>> {
        Ok(self.catalog.listings.clone())
    }

    fn listing(&self, id: &str) -> Result<Option<Listing>> {
        Ok(self.catalog.listing(id).cloned())
    }

    fn create_listing(&mut self, input: NewListing) -> Result<Listing> {
        let _span = tracing::debug_span!("memory_create_listing", brand = %input.brand).entered();
        let listing = self.mutate(|c| c.create_listing(input, chrono::Utc::now()))?;
        tracing::debug!(listing_id = %listing.id, "listing created");
        Ok(listing)
    }

    fn update_listing(&mut self, listing: Listing) -> Result<Listing> {
        let _span = tracing::debug_span!("memory_update_listing", listing_id = %listing.id).entered();
        self.mutate(|c| c.update_listing(listing))
    }

    fn delete_listing(&mut self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("memory_delete_listing", listing_id = %id).entered();
        if self.catalog.listing(id).is_none() {
            tracing::debug!("nothing to delete");
            return Ok(false);
        }
        self.mutate(|c| Ok(c.delete_listing(id)))
    }

    fn appointments_for_user(&self, user_id: &str) -> Result<Vec<Appointment>> {
        Ok(self
            .catalog
            .appointments
            .iter()
            .filter(|a| a.involves(user_id))
            .cloned()
            .collect())
    }

    fn create_appointment(&mut self, input: NewAppointment) -> Result<Appointment> {
        let _span = tracing::debug_span!("memory_create_appointment", listing_id = %input.listing_id).entered();
        self.mutate(|c| c.create_appointment(input))
    }

    fn update_appointment_status(&mut self, id: &str, status: AppointmentStatus) -> Result<Appointment> {
        let _span = tracing::debug_span!("memory_update_appointment_status",
            appointment_id = %id,
            status = status.as_str()
        ).entered();
        self.mutate(|c| c.set_appointment_status(id, status))
    }

    fn transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .catalog
            .transactions
            .iter()
            .filter(|t| t.involves(user_id))
            .cloned()
            .collect())
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<Account>> {
        Ok(self.catalog.authenticate(email, password).cloned())
    }

    fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Account> {
        let _span = tracing::debug_span!("memory_register", email = %email).entered();
        self.mutate(|c| c.register(name, email, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketplaceError;

    #[test]
    fn snapshot_is_isolated_from_later_writes() {
        let mut store = MemoryStorage::seeded();
        let before = store.snapshot();
        assert!(store.delete_listing("car-1").unwrap());
        assert_eq!(before.listings.len(), 10);
        assert_eq!(store.listings().unwrap().len(), 9);
    }

    #[test]
    fn delete_missing_returns_false() {
        let mut store = MemoryStorage::seeded();
        assert!(!store.delete_listing("car-999").unwrap());
    }

    #[test]
    fn update_missing_is_not_found() {
        let mut store = MemoryStorage::seeded();
        let mut ghost = store.listing("car-1").unwrap().unwrap();
        ghost.id = "car-404".to_string();
        let err = store.update_listing(ghost).unwrap_err();
        assert!(matches!(err, MarketplaceError::NotFound { entity: "listing", .. }));
    }

    #[test]
    fn create_stamps_listing_time() {
        let mut store = MemoryStorage::seeded();
        let before = chrono::Utc::now();
        let listing = store.create_listing(seed::sample_input()).unwrap();
        assert!(listing.listed >= before);
        assert_eq!(store.listing(&listing.id).unwrap(), Some(listing));
    }

    #[test]
    fn brands_are_sorted_and_distinct() {
        let store = MemoryStorage::seeded();
        let brands = store.unique_brands().unwrap();
        let mut sorted = brands.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(brands, sorted);
        assert_eq!(brands.len(), 10);
    }

    #[test]
    fn lookups_by_user_match_either_party() {
        let store = MemoryStorage::seeded();
        assert_eq!(store.appointments_for_user("user-1").unwrap().len(), 1);
        assert_eq!(store.appointments_for_user("user-2").unwrap().len(), 1);
        assert!(store.appointments_for_user("user-7").unwrap().is_empty());
        assert_eq!(store.transactions_for_user("user-3").unwrap().len(), 1);
        assert_eq!(store.listings_by_seller("user-4").unwrap()[0].id, "car-4");
    }

    #[test]
    fn appointment_status_changes_in_place() {
        let mut store = MemoryStorage::seeded();
        let cancelled = store
            .update_appointment_status("appointment-1", AppointmentStatus::Cancelled)
            .unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(store.appointments_for_user("user-2").unwrap()[0].status, AppointmentStatus::Cancelled);

        let err = store
            .update_appointment_status("appointment-9", AppointmentStatus::Confirmed)
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::NotFound { entity: "appointment", .. }));
    }
}

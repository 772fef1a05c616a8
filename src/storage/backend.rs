//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait, the repository contract every entity
//! store satisfies. Callers only ever receive owned copies of records, never
//! references into the backing collections, and a mutation is either fully applied
//! or not applied at all.
//!
//! # Implementations
//!
//! - [`MemoryStorage`](super::MemoryStorage): copy-on-write in-memory catalog
//! - [`JsonStorage`](super::JsonStorage): the same catalog persisted to a JSON file
//! - [`SharedStore`](super::SharedStore): lock-guarded wrapper for multi-threaded use

use crate::domain::{
    Account, Appointment, AppointmentStatus, Listing, NewAppointment, NewListing, Result,
    Transaction,
};
use std::collections::BTreeSet;

/// Repository contract for marketplace records.
///
/// Lookups that match nothing return `Ok` with an empty vector or `None`.
/// Errors are reserved for invalid input, missing referents on mutation, and
/// backend failures.
///
/// # Examples
///
/// ```
/// use carlot::storage::{MemoryStorage, Storage};
///
/// let store = MemoryStorage::seeded();
/// let brands = store.unique_brands()?;
/// assert_eq!(brands.first().map(String::as_str), Some("Audi"));
/// # Ok::<(), carlot::MarketplaceError>(())
/// ```
pub trait Storage: Send {
    /// All listings in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn listings(&self) -> Result<Vec<Listing>>;

    /// A single listing by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn listing(&self, id: &str) -> Result<Option<Listing>>;

    /// Creates a listing, assigning its id, `listed = now` and `status = available`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a required attribute is missing, or a backend error.
    fn create_listing(&mut self, input: NewListing) -> Result<Listing>;

    /// Replaces the stored listing with the same id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no listing has that id, or a backend error.
    fn update_listing(&mut self, listing: Listing) -> Result<Listing>;

    /// Removes a listing. Returns `true` if one was removed.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the change cannot be persisted.
    fn delete_listing(&mut self, id: &str) -> Result<bool>;

    /// Appointments where `user_id` is the buyer or the seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn appointments_for_user(&self, user_id: &str) -> Result<Vec<Appointment>>;

    /// Records a viewing request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the listing does not exist, or a backend error.
    fn create_appointment(&mut self, input: NewAppointment) -> Result<Appointment>;

    /// Changes the status of an appointment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no appointment has that id, or a backend error.
    fn update_appointment_status(&mut self, id: &str, status: AppointmentStatus) -> Result<Appointment>;

    /// Transactions where `user_id` is the buyer or the seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Finds the account with this email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn authenticate(&self, email: &str, password: &str) -> Result<Option<Account>>;

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the email is taken, `Validation` for blank input, or a
    /// backend error.
    fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Account>;

    /// Distinct brands across all listings, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn unique_brands(&self) -> Result<Vec<String>> {
        let brands: BTreeSet<String> = self.listings()?.into_iter().map(|l| l.brand).collect();
        Ok(brands.into_iter().collect())
    }

    /// Listings offered by one seller, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn listings_by_seller(&self, seller_id: &str) -> Result<Vec<Listing>> {
        Ok(self
            .listings()?
            .into_iter()
            .filter(|l| l.seller_id == seller_id)
            .collect())
    }
}

//! Thread-shared storage handle.
//!
//! Mutations are serialized behind a single writer lock; readers take a shared
//! lock and receive owned copies, so a query running on one thread sees the store
//! either before or after a concurrent write, never in between.

use super::backend::Storage;
use crate::domain::{
    Account, Appointment, AppointmentStatus, Listing, MarketplaceError, NewAppointment,
    NewListing, Result, Transaction,
};
use std::sync::{Arc, RwLock};

/// Cloneable handle to a lock-guarded backend.
#[derive(Debug)]
pub struct SharedStore<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Storage + Sync> SharedStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(storage)),
        }
    }

    /// Runs `f` under the shared read lock.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the lock is poisoned, or whatever `f`
    /// returns.
    pub fn read<T>(&self, f: impl FnOnce(&S) -> Result<T>) -> Result<T> {
        let guard = self
            .inner
            .read()
            .map_err(|e| MarketplaceError::Storage(format!("store lock poisoned: {e}")))?;
        f(&guard)
    }

    /// Runs `f` under the exclusive write lock.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Storage`] if the lock is poisoned, or whatever `f`
    /// returns.
    pub fn write<T>(&self, f: impl FnOnce(&mut S) -> Result<T>) -> Result<T> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| MarketplaceError::Storage(format!("store lock poisoned: {e}")))?;
        f(&mut guard)
    }
}

impl<S: Storage + Sync> Storage for SharedStore<S> {
    fn listings(&self) -> Result<Vec<Listing>> {
        self.read(|s| s.listings())
    }

    fn listing(&self, id: &str) -> Result<Option<Listing>> {
        self.read(|s| s.listing(id))
    }

    fn create_listing(&mut self, input: NewListing) -> Result<Listing> {
        self.write(|s| s.create_listing(input))
    }

    fn update_listing(&mut self, listing: Listing) -> Result<Listing> {
        self.write(|s| s.update_listing(listing))
    }

    fn delete_listing(&mut self, id: &str) -> Result<bool> {
        self.write(|s| s.delete_listing(id))
    }

    fn appointments_for_user(&self, user_id: &str) -> Result<Vec<Appointment>> {
        self.read(|s| s.appointments_for_user(user_id))
    }

    fn create_appointment(&mut self, input: NewAppointment) -> Result<Appointment> {
        self.write(|s| s.create_appointment(input))
    }

    fn update_appointment_status(&mut self, id: &str, status: AppointmentStatus) -> Result<Appointment> {
        self.write(|s| s.update_appointment_status(id, status))
    }

    fn transactions_for_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.read(|s| s.transactions_for_user(user_id))
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<Account>> {
        self.read(|s| s.authenticate(email, password))
    }

    fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Account> {
        self.write(|s| s.register(name, email, password))
    }
}

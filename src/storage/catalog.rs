//! The in-memory data set shared by every storage backend.
//!
//! [`Catalog`] owns the listing, account, appointment and transaction collections
//! and implements the mutation rules once. Every mutation validates before it
//! touches any collection, so a failed call leaves the catalog unchanged.

use crate::domain::{
    Account, Appointment, AppointmentStatus, Listing, MarketplaceError, NewAppointment,
    NewListing, Result,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest issued numeric suffix per identity prefix.
///
/// Kept separately from the collections so that ids of deleted records are never
/// handed out again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounters {
    pub listing: u64,
    pub appointment: u64,
    pub account: u64,
}

/// Returns the next `<prefix>-N`, bumping `counter` past every existing suffix.
fn issue_id<'a>(counter: &mut u64, prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let highest = existing
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    *counter = (*counter).max(highest).saturating_add(1);
    format!("{prefix}-{counter}")
}

/// All marketplace records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub transactions: Vec<crate::domain::Transaction>,
    #[serde(default)]
    pub counters: IdCounters,
}

impl Catalog {
    #[must_use]
    pub fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Validates `input`, assigns an id and appends the listing.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] if a required attribute is missing.
    pub fn create_listing(&mut self, input: NewListing, now: DateTime<Utc>) -> Result<Listing> {
        input.validate()?;
        let mut counter = self.counters.listing;
        let id = issue_id(&mut counter, "car", self.listings.iter().map(|l| l.id.as_str()));
        let listing = input.into_listing(id, now)?;

        self.counters.listing = counter;
        self.listings.push(listing.clone());
        Ok(listing)
    }

    /// Replaces the listing with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::NotFound`] if no listing has that id.
    pub fn update_listing(&mut self, listing: Listing) -> Result<Listing> {
        let slot = self
            .listings
            .iter_mut()
            .find(|l| l.id == listing.id)
            .ok_or_else(|| MarketplaceError::not_found("listing", listing.id.clone()))?;
        slot.clone_from(&listing);
        Ok(listing)
    }

    /// Removes a listing, returning whether one was removed.
    pub fn delete_listing(&mut self, id: &str) -> bool {
        let before = self.listings.len();
        self.listings.retain(|l| l.id != id);
        self.listings.len() != before
    }

    /// Records a viewing request for an existing listing.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::NotFound`] if the listing does not exist.
    pub fn create_appointment(&mut self, input: NewAppointment) -> Result<Appointment> {
        if self.listing(&input.listing_id).is_none() {
            return Err(MarketplaceError::not_found("listing", input.listing_id));
        }
        let id = issue_id(
            &mut self.counters.appointment,
            "appointment",
            self.appointments.iter().map(|a| a.id.as_str()),
        );
        let appointment = input.into_appointment(id);
        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Moves an appointment to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::NotFound`] if no appointment has that id.
    pub fn set_appointment_status(&mut self, id: &str, status: AppointmentStatus) -> Result<Appointment> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| MarketplaceError::not_found("appointment", id))?;
        appointment.status = status;
        Ok(appointment.clone())
    }

    /// Looks up an account by exact email and password.
    #[must_use]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
    }

    /// Adds an account with a unique email.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] for a blank field and
    /// [`MarketplaceError::Conflict`] if the email is already registered.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Account> {
        for (field, value) in [("name", name), ("email", email), ("password", password)] {
            if value.trim().is_empty() {
                return Err(MarketplaceError::validation(field, format!("{field} is required")));
            }
        }
        if self.accounts.iter().any(|a| a.email == email) {
            return Err(MarketplaceError::Conflict(format!(
                "an account with email {email} already exists"
            )));
        }

        let id = issue_id(
            &mut self.counters.account,
            "user",
            self.accounts.iter().map(|a| a.id.as_str()),
        );
        let account = Account {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
        };
        self.accounts.push(account.clone());
        Ok(account)
    }
}

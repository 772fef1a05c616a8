//! Domain layer for the marketplace.
//!
//! Core types and business rules, independent of storage backends, routing or
//! rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`listing`]: The listing entity and its closed enumerations
//! - [`filter`]: Filter sets, range bounds and sort keys
//! - [`account`]: Accounts and the session identity record
//! - [`appointment`]: Viewing appointments and sale transactions

pub mod account;
pub mod appointment;
pub mod error;
pub mod filter;
pub mod listing;

pub use account::{Account, SessionIdentity};
pub use appointment::{
    partition_upcoming, Appointment, AppointmentStatus, NewAppointment, Transaction,
    TransactionStatus,
};
pub use error::{MarketplaceError, Result};
pub use filter::{Bounds, Dimension, FilterChoice, FilterSet, SortKey};
pub use listing::{
    format_price, group_thousands, Condition, FuelType, Listing, ListingStatus, NewListing, Transmission,
};

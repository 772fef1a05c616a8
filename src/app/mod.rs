//! Controller layer for the listing page.
//!
//! Data flows one way:
//!
//! ```text
//! UI / location → Event → handle_event → BrowseState → Action (navigate)
//!                              │
//!                              └── query engine over a store snapshot
//! ```
//!
//! - [`actions`]: side effects returned to the host
//! - [`booking`]: viewing requests and their status changes, which need a signed-in session
//! - [`dashboard`]: the signed-in user's listings, appointments and transactions
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: the idle / editing / applied phase
//! - [`selling`]: listing, repricing and withdrawing cars
//! - [`state`]: working and applied filter state plus the visible results

pub mod actions;
pub mod booking;
pub mod dashboard;
pub mod handler;
pub mod modes;
pub mod selling;
pub mod state;

pub use actions::Action;
pub use booking::{book_viewing, set_appointment_status, ViewingRequest};
pub use dashboard::Dashboard;
pub use handler::{handle_event, Event};
pub use modes::Phase;
pub use selling::{load_draft, sell_listing, update_listing, withdraw_listing, ListingUpdate};
pub use state::BrowseState;

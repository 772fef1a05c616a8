//! The signed-in user's own records in one place.

use crate::domain::{Appointment, Listing, ListingStatus, Result, Transaction};
use crate::session::SessionContext;
use crate::storage::Storage;

/// Listings the user sells, appointments they take part in, and their sales
/// and purchases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub listings: Vec<Listing>,
    pub appointments: Vec<Appointment>,
    pub transactions: Vec<Transaction>,
}

impl Dashboard {
    /// Collects the dashboard for the session identity.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Unauthenticated`](crate::MarketplaceError::Unauthenticated)
    /// without an active session, or a backend error.
    pub fn load(store: &dyn Storage, session: &SessionContext) -> Result<Self> {
        let user = session.require()?;
        let _span = tracing::debug_span!("load_dashboard", user_id = %user.id).entered();

        let dashboard = Self {
            listings: store.listings_by_seller(&user.id)?,
            appointments: store.appointments_for_user(&user.id)?,
            transactions: store.transactions_for_user(&user.id)?,
        };
        tracing::debug!(
            listings = dashboard.listings.len(),
            appointments = dashboard.appointments.len(),
            transactions = dashboard.transactions.len(),
            "dashboard loaded"
        );
        Ok(dashboard)
    }

    /// Total asking price of the listings still for sale.
    #[must_use]
    pub fn available_value(&self) -> u64 {
        self.listings
            .iter()
            .filter(|l| l.status == ListingStatus::Available)
            .map(|l| l.price)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketplaceError, SessionIdentity};
    use crate::storage::MemoryStorage;

    fn signed_in(id: &str) -> SessionContext {
        SessionContext::signed_in(SessionIdentity {
            id: id.to_string(),
            name: "Someone".to_string(),
            email: format!("{id}@example.com"),
        })
    }

    #[test]
    fn gathers_only_the_users_records() {
        let store = MemoryStorage::seeded();
        let dashboard = Dashboard::load(&store, &signed_in("user-1")).unwrap();

        let ids: Vec<&str> = dashboard.listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["car-1"]);
        assert_eq!(dashboard.appointments.len(), 1);
        assert_eq!(dashboard.transactions[0].id, "transaction-1");
        assert_eq!(dashboard.available_value(), 45_000);
    }

    #[test]
    fn new_user_has_an_empty_dashboard() {
        let store = MemoryStorage::seeded();
        let dashboard = Dashboard::load(&store, &signed_in("user-42")).unwrap();
        assert!(dashboard.listings.is_empty());
        assert!(dashboard.appointments.is_empty());
        assert!(dashboard.transactions.is_empty());
        assert_eq!(dashboard.available_value(), 0);

        let err = Dashboard::load(&store, &SessionContext::anonymous()).unwrap_err();
        assert!(matches!(err, MarketplaceError::Unauthenticated));
    }
}

//! Listing management for signed-in sellers.
//!
//! Every operation here acts on behalf of the session identity. A listing owned
//! by someone else is reported as not found, so the store never reveals which
//! ids belong to other sellers.

use crate::domain::{Listing, ListingStatus, MarketplaceError, NewListing, Result, SessionIdentity};
use crate::session::SessionContext;
use crate::storage::Storage;
use std::path::Path;

/// Fields a seller may change after listing a car.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingUpdate {
    pub price: Option<u64>,
    pub status: Option<ListingStatus>,
}

impl ListingUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none() && self.status.is_none()
    }
}

/// Lists a car for the signed-in user.
///
/// The seller id and name always come from the session, whatever the draft
/// says. The draft is validated before the store sees it.
///
/// # Errors
///
/// - [`MarketplaceError::Unauthenticated`] without an active session
/// - [`MarketplaceError::Validation`] for a draft that fails the create-time rules
pub fn sell_listing(
    store: &mut dyn Storage,
    session: &SessionContext,
    mut input: NewListing,
) -> Result<Listing> {
    let seller = session.require()?;
    let _span = tracing::debug_span!("sell_listing", seller_id = %seller.id, brand = %input.brand).entered();

    input.seller_id.clone_from(&seller.id);
    input.seller_name.clone_from(&seller.name);
    input.validate()?;

    let listing = store.create_listing(input)?;
    tracing::debug!(listing_id = %listing.id, "listing created");
    Ok(listing)
}

/// Changes the price or sale status of one of the user's own listings.
///
/// # Errors
///
/// - [`MarketplaceError::Unauthenticated`] without an active session
/// - [`MarketplaceError::NotFound`] if the user has no listing with that id
/// - [`MarketplaceError::Validation`] for an empty update or a zero price
pub fn update_listing(
    store: &mut dyn Storage,
    session: &SessionContext,
    id: &str,
    update: ListingUpdate,
) -> Result<Listing> {
    let seller = session.require()?;
    let _span = tracing::debug_span!("update_listing", listing_id = %id).entered();

    if update.is_empty() {
        return Err(MarketplaceError::validation("update", "nothing to change"));
    }
    if update.price == Some(0) {
        return Err(MarketplaceError::validation("price", "must be greater than zero"));
    }

    let mut listing = owned_listing(&*store, seller, id)?;
    if let Some(price) = update.price {
        listing.price = price;
    }
    if let Some(status) = update.status {
        listing.status = status;
    }
    store.update_listing(listing)
}

/// Removes one of the user's own listings.
///
/// # Errors
///
/// - [`MarketplaceError::Unauthenticated`] without an active session
/// - [`MarketplaceError::NotFound`] if the user has no listing with that id
pub fn withdraw_listing(store: &mut dyn Storage, session: &SessionContext, id: &str) -> Result<()> {
    let seller = session.require()?;
    let _span = tracing::debug_span!("withdraw_listing", listing_id = %id).entered();

    owned_listing(&*store, seller, id)?;
    if !store.delete_listing(id)? {
        return Err(MarketplaceError::not_found("listing", id));
    }
    tracing::debug!("listing withdrawn");
    Ok(())
}

/// Reads a listing draft from a JSON file.
///
/// Seller fields may be left out; [`sell_listing`] fills them in.
///
/// # Errors
///
/// Returns [`MarketplaceError::Io`] if the file cannot be read, or
/// [`MarketplaceError::Validation`] if it is not a well-formed draft.
pub fn load_draft(path: &Path) -> Result<NewListing> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| MarketplaceError::validation("draft", e.to_string()))
}

fn owned_listing(store: &dyn Storage, seller: &SessionIdentity, id: &str) -> Result<Listing> {
    store
        .listing(id)?
        .filter(|l| l.seller_id == seller.id)
        .ok_or_else(|| MarketplaceError::not_found("listing", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, FuelType, Transmission};
    use crate::storage::MemoryStorage;

    fn john() -> SessionContext {
        SessionContext::signed_in(SessionIdentity {
            id: "user-1".to_string(),
            name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
        })
    }

    fn draft() -> NewListing {
        NewListing {
            title: "Family Wagon with Low Miles".to_string(),
            brand: "Volvo".to_string(),
            model: "V60".to_string(),
            year: Some(2020),
            price: Some(27_000),
            mileage: 18_000,
            fuel_type: FuelType::Hybrid,
            transmission: Transmission::Automatic,
            description: "One owner, dealer serviced, winter tyres included.".to_string(),
            features: vec!["Roof Rails".to_string()],
            images: vec!["https://img.example/v60.jpg".to_string()],
            condition: Condition::Excellent,
            seller_id: "user-9".to_string(),
            seller_name: "Someone Else".to_string(),
            seller_phone: None,
            location: "Portland, OR".to_string(),
        }
    }

    #[test]
    fn seller_comes_from_the_session() {
        let mut store = MemoryStorage::seeded();
        let listing = sell_listing(&mut store, &john(), draft()).unwrap();

        assert_eq!(listing.id, "car-11");
        assert_eq!(listing.seller_id, "user-1");
        assert_eq!(listing.seller_name, "John Smith");
        assert_eq!(listing.status, ListingStatus::Available);
        assert_eq!(store.listings_by_seller("user-1").unwrap().len(), 2);
    }

    #[test]
    fn selling_needs_a_session_and_a_valid_draft() {
        let mut store = MemoryStorage::seeded();
        let err = sell_listing(&mut store, &SessionContext::anonymous(), draft()).unwrap_err();
        assert!(matches!(err, MarketplaceError::Unauthenticated));

        let short = NewListing {
            title: "Wagon".to_string(),
            ..draft()
        };
        let err = sell_listing(&mut store, &john(), short).unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "title", .. }));
        assert_eq!(store.listings().unwrap().len(), 10);
    }

    #[test]
    fn update_changes_only_the_given_fields() {
        let mut store = MemoryStorage::seeded();
        let before = store.listing("car-1").unwrap().unwrap();
        let update = ListingUpdate {
            price: Some(42_500),
            status: None,
        };
        let after = update_listing(&mut store, &john(), "car-1", update).unwrap();

        assert_eq!(after.price, 42_500);
        assert_eq!(after.status, before.status);
        assert_eq!(after.title, before.title);

        let sold = ListingUpdate {
            price: None,
            status: Some(ListingStatus::Sold),
        };
        update_listing(&mut store, &john(), "car-1", sold).unwrap();
        let stored = store.listing("car-1").unwrap().unwrap();
        assert_eq!((stored.price, stored.status), (42_500, ListingStatus::Sold));
    }

    #[test]
    fn update_rejects_empty_and_zero_price() {
        let mut store = MemoryStorage::seeded();
        let err = update_listing(&mut store, &john(), "car-1", ListingUpdate::default()).unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "update", .. }));

        let zero = ListingUpdate {
            price: Some(0),
            status: None,
        };
        let err = update_listing(&mut store, &john(), "car-1", zero).unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "price", .. }));
    }

    #[test]
    fn other_sellers_listings_are_not_found() {
        let mut store = MemoryStorage::seeded();
        let update = ListingUpdate {
            price: Some(1),
            status: None,
        };
        let err = update_listing(&mut store, &john(), "car-2", update).unwrap_err();
        assert!(matches!(err, MarketplaceError::NotFound { entity: "listing", .. }));

        let err = withdraw_listing(&mut store, &john(), "car-2").unwrap_err();
        assert!(matches!(err, MarketplaceError::NotFound { entity: "listing", .. }));
        assert!(store.listing("car-2").unwrap().is_some());
    }

    #[test]
    fn withdraw_removes_own_listing() {
        let mut store = MemoryStorage::seeded();
        withdraw_listing(&mut store, &john(), "car-1").unwrap();
        assert!(store.listing("car-1").unwrap().is_none());

        let err = withdraw_listing(&mut store, &john(), "car-1").unwrap_err();
        assert!(matches!(err, MarketplaceError::NotFound { .. }));
    }

    #[test]
    fn draft_file_without_seller_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(
            &path,
            r#"{
                "title": "Family Wagon with Low Miles",
                "brand": "Volvo",
                "model": "V60",
                "year": 2020,
                "price": 27000,
                "mileage": 18000,
                "fuelType": "hybrid",
                "transmission": "automatic",
                "description": "One owner, dealer serviced, winter tyres included.",
                "features": ["Roof Rails"],
                "images": ["https://img.example/v60.jpg"],
                "condition": "excellent",
                "location": "Portland, OR"
            }"#,
        )
        .unwrap();

        let parsed = load_draft(&path).unwrap();
        assert!(parsed.seller_id.is_empty());
        let mut store = MemoryStorage::seeded();
        let listing = sell_listing(&mut store, &john(), parsed).unwrap();
        assert_eq!(listing.seller_id, "user-1");

        std::fs::write(&path, r#"{"title": "x", "fuelType": "steam"}"#).unwrap();
        let err = load_draft(&path).unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "draft", .. }));
    }
}

//! Sort stage of the query pipeline.

use crate::domain::{Listing, SortKey};
use std::cmp::Ordering;

/// Compares two listings under `key`.
#[must_use]
pub fn compare(key: SortKey, a: &Listing, b: &Listing) -> Ordering {
    match key {
        SortKey::Newest => b.listed.cmp(&a.listed),
        SortKey::Oldest => a.listed.cmp(&b.listed),
        SortKey::PriceLowHigh => a.price.cmp(&b.price),
        SortKey::PriceHighLow => b.price.cmp(&a.price),
        SortKey::MileageLowHigh => a.mileage.cmp(&b.mileage),
        SortKey::YearNewest => b.year.cmp(&a.year),
    }
}

/// Sorts in place. `sort_by` is stable, so listings with equal keys keep their
/// relative input order.
pub fn sort_listings(listings: &mut [Listing], key: SortKey) {
    listings.sort_by(|a, b| compare(key, a, b));
}

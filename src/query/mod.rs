//! Listing query engine.
//!
//! A query is the tuple `(term, filters, sort)`. Running it over a listing
//! collection is a pure, total function: each stage only narrows or reorders the
//! output of the previous one.
//!
//! # Pipeline
//!
//! ```text
//! source ─▶ text search ─▶ categorical filters ─▶ range filters ─▶ stable sort
//! ```
//!
//! 1. **Text search**: a non-empty term must occur, ignoring case, in the title,
//!    brand, model or description. An empty term passes everything.
//! 2. **Categorical filters**: brand, transmission, fuel type and condition. An
//!    empty set does not restrict.
//! 3. **Range filters**: inclusive price and year bounds; an absent side is open.
//! 4. **Sort**: stable, so repeated queries over an unchanged store are identical.

pub mod sort;

use crate::domain::{FilterSet, Listing, SortKey};
use serde::{Deserialize, Serialize};

pub use sort::sort_listings;

/// A complete query description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    pub term: String,
    pub filters: FilterSet,
    pub sort: SortKey,
}

impl Query {
    #[must_use]
    pub fn new(term: impl Into<String>, filters: FilterSet, sort: SortKey) -> Self {
        Self {
            term: term.into(),
            filters,
            sort,
        }
    }

    /// Runs this query over `source`.
    #[must_use]
    pub fn run(&self, source: &[Listing]) -> Vec<Listing> {
        query(source, &self.term, &self.filters, self.sort)
    }
}

/// Filters and sorts `source`, returning owned copies in result order.
///
/// Never fails: bounds outside any real data range simply produce an empty vector.
///
/// # Examples
///
/// ```
/// use carlot::domain::{FilterSet, SortKey};
/// use carlot::query::query;
/// use carlot::storage::seed;
///
/// let catalog = seed::listings();
/// let teslas = query(&catalog, "tesla", &FilterSet::default(), SortKey::Newest);
/// assert!(teslas.iter().all(|l| l.brand == "Tesla"));
/// ```
#[must_use]
pub fn query(source: &[Listing], term: &str, filters: &FilterSet, sort: SortKey) -> Vec<Listing> {
    let _span = tracing::debug_span!("query",
        source_len = source.len(),
        term_len = term.len(),
        sort = %sort
    )
    .entered();

    let needle = term.to_lowercase();

    let mut results: Vec<Listing> = source
        .iter()
        .filter(|listing| needle.is_empty() || listing.matches_text(&needle))
        .filter(|listing| filters.admits_categories(listing))
        .filter(|listing| filters.admits_ranges(listing))
        .cloned()
        .collect();

    sort_listings(&mut results, sort);

    tracing::debug!(result_count = results.len(), "query complete");
    results
}

/// The `limit` most recently listed entries.
#[must_use]
pub fn recent(source: &[Listing], limit: usize) -> Vec<Listing> {
    let mut listings = source.to_vec();
    sort_listings(&mut listings, SortKey::Newest);
    listings.truncate(limit);
    listings
}

//! State owned by one browsing session.
//!
//! [`BrowseState`] keeps two filter sets apart: the *working* set the user is
//! editing and the *applied* set that produced the visible results. Only an
//! explicit apply, a search submission, the brand shortcut or a location load
//! copies working state into applied state.

use super::modes::Phase;
use crate::domain::{FilterSet, Listing, Result, SortKey};
use crate::query::Query;
use crate::routing::ListingRoute;
use crate::storage::Storage;

/// Filter, search and sort state for the listing page, plus its results.
///
/// Fields are read through accessors. Only [`handle_event`](super::handle_event)
/// changes them.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    /// Filters being edited, not yet used for querying.
    pub(super) working: FilterSet,

    /// Filters behind the current results.
    pub(super) applied: FilterSet,

    /// Search box contents.
    pub(super) search_input: String,

    /// Search term behind the current results.
    pub(super) applied_search: String,

    /// Ordering of the current results. Changes take effect immediately.
    pub(super) sort: SortKey,

    pub(super) phase: Phase,

    /// Whether the user has applied anything beyond the defaults since the last
    /// reset. Drives the result summary and the clear affordance.
    pub(super) filters_applied: bool,

    /// Output of the last query.
    pub(super) results: Vec<Listing>,

    listing_route: String,
    default_sort: SortKey,
}

impl BrowseState {
    /// Fresh state in the idle phase. No query has run yet; feed an
    /// [`Event::Load`](super::Event::Load) first.
    #[must_use]
    pub fn new(listing_route: impl Into<String>, default_sort: SortKey) -> Self {
        Self {
            working: FilterSet::default(),
            applied: FilterSet::default(),
            search_input: String::new(),
            applied_search: String::new(),
            sort: default_sort,
            phase: Phase::Idle,
            filters_applied: false,
            results: Vec::new(),
            listing_route: listing_route.into(),
            default_sort,
        }
    }

    /// Filters being edited, not yet used for querying.
    #[must_use]
    pub const fn working(&self) -> &FilterSet {
        &self.working
    }

    /// Filters behind the current results.
    #[must_use]
    pub const fn applied(&self) -> &FilterSet {
        &self.applied
    }

    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    #[must_use]
    pub fn applied_search(&self) -> &str {
        &self.applied_search
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn filters_applied(&self) -> bool {
        self.filters_applied
    }

    /// Output of the last query, in display order.
    #[must_use]
    pub fn results(&self) -> &[Listing] {
        &self.results
    }

    #[must_use]
    pub fn listing_route(&self) -> &str {
        &self.listing_route
    }

    #[must_use]
    pub const fn default_sort(&self) -> SortKey {
        self.default_sort
    }

    /// The query that produced (or will produce) the visible results.
    #[must_use]
    pub fn applied_query(&self) -> Query {
        Query::new(self.applied_search.clone(), self.applied.clone(), self.sort)
    }

    /// True when working state would produce a different query than applied state.
    #[must_use]
    pub fn has_unapplied_edits(&self) -> bool {
        self.working != self.applied || self.search_input != self.applied_search
    }

    /// Location mirroring the applied search term. Toggled brands are not mirrored.
    #[must_use]
    pub fn applied_location(&self) -> String {
        ListingRoute::search(&self.applied_search).to_location(&self.listing_route)
    }

    /// Copies working filters and search input into applied state.
    pub(super) fn promote(&mut self) {
        self.applied.clone_from(&self.working);
        self.applied_search.clone_from(&self.search_input);
        self.filters_applied = true;
        self.phase = Phase::Applied;
    }

    /// Marks the start of an edit. Applied state is left alone.
    pub(super) fn begin_edit(&mut self) {
        self.phase = Phase::Editing;
    }

    /// Returns every field to its default and the phase to idle.
    pub(super) fn restore_defaults(&mut self) {
        self.working = FilterSet::default();
        self.applied = FilterSet::default();
        self.search_input.clear();
        self.applied_search.clear();
        self.sort = self.default_sort;
        self.filters_applied = false;
        self.phase = Phase::Idle;
    }

    /// Re-runs the applied query against the store's current contents.
    ///
    /// Returns whether the visible results changed.
    ///
    /// # Errors
    ///
    /// Returns storage errors from reading the listings.
    pub(super) fn refresh(&mut self, store: &dyn Storage) -> Result<bool> {
        let snapshot = store.listings()?;
        let results = self.applied_query().run(&snapshot);
        let changed = results != self.results;
        self.results = results;

        tracing::debug!(
            result_count = self.results.len(),
            sort = %self.sort,
            phase = self.phase.as_str(),
            changed,
            "results refreshed"
        );
        Ok(changed)
    }
}

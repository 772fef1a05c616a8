//! Event handling and state transitions for the listing page.
//!
//! [`handle_event`] is the single entry point. It mutates [`BrowseState`], decides
//! whether the event re-queries, and returns the actions the host must perform.
//! The boolean in the returned pair tells the host whether anything visible
//! changed and a re-render is due.
//!
//! | Event               | Re-queries | Navigates            |
//! |---------------------|------------|----------------------|
//! | `Load`              | yes        | no                   |
//! | `SetSearchTerm`     | no         | no                   |
//! | `Toggle`, ranges    | no         | no                   |
//! | `Apply`             | yes        | `?search=` or bare   |
//! | `SubmitSearch`      | yes        | `?search=` or bare   |
//! | `Reset`             | yes        | bare                 |
//! | `ChangeSort`        | yes        | no                   |
//! | `BrowseBrand`       | yes        | `?brand=`            |
//! | `StoreChanged`      | yes        | no                   |

use super::{Action, BrowseState, Phase};
use crate::domain::{Dimension, FilterChoice, FilterSet, Result, SortKey};
use crate::routing::ListingRoute;
use crate::storage::Storage;

/// Interactions and notifications the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The listing route was entered or re-entered with this location.
    Load {
        location: String,
    },

    /// Replaces the search box contents without querying.
    SetSearchTerm(String),

    /// Toggles one categorical value in the working filters.
    Toggle(FilterChoice),

    /// Sets the working price bounds. Inverted bounds are rejected.
    SetPriceRange {
        min: Option<u64>,
        max: Option<u64>,
    },

    /// Sets the working model-year bounds. Inverted bounds are rejected.
    SetYearRange {
        min: Option<u16>,
        max: Option<u16>,
    },

    /// Empties one categorical dimension of the working filters.
    ClearDimension(Dimension),

    /// Promotes working state and re-queries.
    Apply,

    /// Sets the search box to the term and applies in one step.
    SubmitSearch(String),

    /// Back to defaults, bare location.
    Reset,

    /// New ordering for the applied query.
    ChangeSort(SortKey),

    /// The "browse by brand" shortcut.
    BrowseBrand(String),

    /// The store was written to; visible results may be stale.
    StoreChanged,
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::SetSearchTerm(_) => "set_search_term",
            Self::Toggle(_) => "toggle",
            Self::SetPriceRange { .. } => "set_price_range",
            Self::SetYearRange { .. } => "set_year_range",
            Self::ClearDimension(_) => "clear_dimension",
            Self::Apply => "apply",
            Self::SubmitSearch(_) => "submit_search",
            Self::Reset => "reset",
            Self::ChangeSort(_) => "change_sort",
            Self::BrowseBrand(_) => "browse_brand",
            Self::StoreChanged => "store_changed",
        }
    }
}

/// Seeds state from a location, then queries.
///
/// The `search` parameter mirrors the term in full, so its absence clears the
/// term. The `brand` parameter replaces the brand set when present and leaves it
/// alone when absent, which keeps toggled brands alive across the bare location an
/// apply navigates to.
fn load(state: &mut BrowseState, location: &str) {
    let route = ListingRoute::parse(location).unwrap_or_else(|e| {
        tracing::warn!(location = %location, error = %e, "undecodable location, treating as bare");
        ListingRoute::default()
    });

    let term = route.search.clone().unwrap_or_default();
    state.search_input.clone_from(&term);
    state.applied_search = term;

    if let Some(brand) = route.brand.clone() {
        state.applied.brands = FilterSet::for_brand(brand).brands;
    }
    state.working.clone_from(&state.applied);

    if !route.is_bare() {
        state.promote();
    } else {
        state.phase = if state.filters_applied { Phase::Applied } else { Phase::Idle };
    }
}

/// Processes one event and returns `(needs_render, actions)`.
///
/// Editing events only touch working state. Everything that re-queries reads a
/// fresh snapshot from `store`.
///
/// # Errors
///
/// Returns [`MarketplaceError::Validation`](crate::MarketplaceError::Validation)
/// for inverted range bounds (the working filters are left unchanged) and storage
/// errors from re-querying.
///
/// # Examples
///
/// ```
/// use carlot::app::{handle_event, Action, BrowseState, Event};
/// use carlot::domain::SortKey;
/// use carlot::storage::MemoryStorage;
///
/// let store = MemoryStorage::seeded();
/// let mut state = BrowseState::new("/buy", SortKey::Newest);
///
/// handle_event(&mut state, &store, &Event::SetSearchTerm("tesla".into()))?;
/// let (_, actions) = handle_event(&mut state, &store, &Event::Apply)?;
///
/// assert_eq!(actions, vec![Action::Navigate { location: "/buy?search=tesla".into() }]);
/// assert!(state.results().iter().all(|l| l.brand == "Tesla"));
/// # Ok::<(), carlot::MarketplaceError>(())
/// ```
pub fn handle_event(
    state: &mut BrowseState,
    store: &dyn Storage,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!(
        "handle_event",
        event = event.name(),
        phase = state.phase.as_str()
    )
    .entered();

    match event {
        Event::Load { location } => {
            load(state, location);
            state.refresh(store)?;
            Ok((true, vec![]))
        }
        Event::SetSearchTerm(term) => {
            if &state.search_input == term {
                return Ok((false, vec![]));
            }
            state.search_input.clone_from(term);
            state.begin_edit();
            Ok((true, vec![]))
        }
        Event::Toggle(choice) => {
            tracing::trace!(dimension = choice.dimension().as_str(), "toggle");
            state.working.toggle(choice.clone());
            state.begin_edit();
            Ok((true, vec![]))
        }
        Event::SetPriceRange { min, max } => {
            state.working.set_price_range(*min, *max)?;
            state.begin_edit();
            Ok((true, vec![]))
        }
        Event::SetYearRange { min, max } => {
            state.working.set_year_range(*min, *max)?;
            state.begin_edit();
            Ok((true, vec![]))
        }
        Event::ClearDimension(dimension) => {
            state.working.clear_dimension(*dimension);
            state.begin_edit();
            Ok((true, vec![]))
        }
        Event::Apply => apply(state, store),
        Event::SubmitSearch(term) => {
            state.search_input.clone_from(term);
            apply(state, store)
        }
        Event::Reset => {
            state.restore_defaults();
            state.refresh(store)?;
            let location = ListingRoute::default().to_location(state.listing_route());
            Ok((true, vec![Action::Navigate { location }]))
        }
        Event::ChangeSort(sort) => {
            if state.sort == *sort {
                return Ok((false, vec![]));
            }
            state.sort = *sort;
            let changed = state.refresh(store)?;
            Ok((changed, vec![]))
        }
        Event::BrowseBrand(brand) => {
            state.search_input.clear();
            state.working = FilterSet::for_brand(brand.clone());
            state.promote();
            state.refresh(store)?;
            let location = ListingRoute::brand(brand).to_location(state.listing_route());
            Ok((true, vec![Action::Navigate { location }]))
        }
        Event::StoreChanged => {
            let changed = state.refresh(store)?;
            if !changed {
                tracing::debug!("results unchanged after store change, skipping render");
            }
            Ok((changed, vec![]))
        }
    }
}

fn apply(state: &mut BrowseState, store: &dyn Storage) -> Result<(bool, Vec<Action>)> {
    state.promote();
    state.refresh(store)?;
    tracing::debug!(term = %state.applied_search, "filters applied");
    Ok((true, vec![Action::Navigate {
        location: state.applied_location(),
    }]))
}

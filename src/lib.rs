//! carlot: listing search, filtering and URL-synchronized browse state for a car
//! marketplace.
//!
//! The crate provides:
//! - A pure query engine (text search, categorical and range filters, stable sort)
//! - A browse controller separating working filters from applied filters
//! - Two-way mapping between the controller and `?search=`/`?brand=` locations
//! - A swappable entity store (in-memory copy-on-write, JSON file, thread-shared)
//! - Mock accounts with an explicit session context, and viewing appointments
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command-line front end (main.rs)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Controller (app/)               Routing (routing/) │
//! │  - Event handling                - search / brand   │
//! │  - Working vs applied filters      parameters       │
//! │  - Viewing booking                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Query (query/)│   │ Storage       │
//! │ - View models │   │ - Filter      │   │ (storage/)    │
//! │ - Text render │   │ - Sort        │   │ - Memory/JSON │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Session (session/),              │
//! │  Infrastructure (infrastructure/)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)  ← optional         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: browse controller with event/action model, viewing booking
//! - [`domain`]: listings, filters, sort keys, accounts, appointments, errors
//! - [`query`]: the query engine
//! - [`routing`]: listing-route location parsing and encoding
//! - [`session`]: session context and the local session slot
//! - [`storage`]: store contract and backends, seed catalog
//! - [`ui`]: view models and plain-text rendering
//! - [`infrastructure`]: data directory and path helpers
//! - [`observability`]: tracing setup with file span export
//!
//! # Configuration
//!
//! ```toml
//! data_file = "~/.local/share/carlot/catalog.json"
//! seed = true
//! listing_route = "/buy"
//! default_sort = "newest"
//! recent_limit = 6
//! featured_limit = 3
//! trace_level = "info"
//!
//! [price_range]
//! min = 0
//! max = 100000
//!
//! [year_range]
//! min = 2010
//! max = 2024
//! ```
//!
//! # Example
//!
//! ```
//! use carlot::{handle_event, initialize, open_storage, Config, Event};
//!
//! let config = Config::default();
//! let store = open_storage(&config)?;
//! let mut state = initialize(&config);
//!
//! handle_event(&mut state, &*store, &Event::Load { location: "/buy?brand=BMW".into() })?;
//! assert!(state.results().iter().all(|listing| listing.brand == "BMW"));
//! # Ok::<(), carlot::MarketplaceError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod query;
pub mod routing;
pub mod session;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{
    book_viewing, handle_event, sell_listing, set_appointment_status, update_listing, withdraw_listing,
    Action, BrowseState, Dashboard, Event, ListingUpdate, Phase, ViewingRequest,
};
pub use domain::{FilterSet, Listing, MarketplaceError, Result, SortKey};
pub use routing::ListingRoute;
pub use session::SessionContext;
pub use storage::{JsonStorage, MemoryStorage, SharedStore, Storage};

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Inclusive extremes offered by a range slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SliderRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> SliderRange<T> {
    /// `None` if `min > max`.
    #[must_use]
    pub fn new(min: T, max: T) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Runtime configuration.
///
/// Loadable from a flat key/value map ([`Config::from_map`]) or a TOML file
/// ([`Config::from_toml_file`]). Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON catalog file. `None` keeps the catalog in memory for the process
    /// lifetime. A leading `~` is expanded.
    pub data_file: Option<PathBuf>,

    /// Populate a fresh store with the sample catalog. Default: `true`
    pub seed: bool,

    /// Base path of the listing route. Default: `"/buy"`
    pub listing_route: String,

    /// Initial and post-reset sort order. Unrecognized values mean `newest`.
    #[serde(deserialize_with = "sort_from_param")]
    pub default_sort: SortKey,

    /// Price slider extremes. Default: `0..=100000`
    pub price_range: SliderRange<u64>,

    /// Model-year slider extremes. Default: `2010..=2024`
    pub year_range: SliderRange<u16>,

    /// Length of the recent-listings strip. Default: 6
    pub recent_limit: usize,

    /// Length of the featured section. Default: 3
    pub featured_limit: usize,

    /// Session slot file. `None` means `session.json` in the data directory.
    pub session_file: Option<PathBuf>,

    /// Tracing filter directive, e.g. `info` or `carlot=debug`. Default: `"info"`
    pub trace_level: String,
}

fn sort_from_param<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<SortKey, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(SortKey::from_param(&value))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            seed: true,
            listing_route: "/buy".to_string(),
            default_sort: SortKey::Newest,
            price_range: SliderRange { min: 0, max: 100_000 },
            year_range: SliderRange { min: 2010, max: 2024 },
            recent_limit: 6,
            featured_limit: 3,
            session_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// Keys: `data_file`, `seed`, `listing_route`, `default_sort`, `price_min`,
    /// `price_max`, `year_min`, `year_max`, `recent_limit`, `featured_limit`,
    /// `session_file`, `trace_level`. Values that fail to parse, and slider
    /// bounds with `min > max`, fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use carlot::{Config, SortKey};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_sort".to_string(), "price-low-high".to_string());
    /// map.insert("recent_limit".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.default_sort, SortKey::PriceLowHigh);
    /// assert_eq!(config.recent_limit, 6);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let price_range = text("price_min")
            .map_or(Some(defaults.price_range.min), |v| v.parse().ok())
            .zip(text("price_max").map_or(Some(defaults.price_range.max), |v| v.parse().ok()))
            .and_then(|(min, max)| SliderRange::new(min, max))
            .unwrap_or(defaults.price_range);

        let year_range = text("year_min")
            .map_or(Some(defaults.year_range.min), |v| v.parse().ok())
            .zip(text("year_max").map_or(Some(defaults.year_range.max), |v| v.parse().ok()))
            .and_then(|(min, max)| SliderRange::new(min, max))
            .unwrap_or(defaults.year_range);

        Self {
            data_file: text("data_file").map(PathBuf::from),
            seed: text("seed").and_then(|v| v.parse().ok()).unwrap_or(defaults.seed),
            listing_route: text("listing_route").map_or(defaults.listing_route, String::from),
            default_sort: text("default_sort").map_or(defaults.default_sort, SortKey::from_param),
            price_range,
            year_range,
            recent_limit: text("recent_limit")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.recent_limit),
            featured_limit: text("featured_limit")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.featured_limit),
            session_file: text("session_file").map(PathBuf::from),
            trace_level: text("trace_level").map_or(defaults.trace_level, String::from),
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Config`] for malformed TOML, mistyped values
    /// or a slider range with `min > max`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| MarketplaceError::Config(e.to_string()))?;

        if !config.price_range.is_ordered() {
            return Err(MarketplaceError::Config("price_range.min exceeds price_range.max".into()));
        }
        if !config.year_range.is_ordered() {
            return Err(MarketplaceError::Config("year_range.min exceeds year_range.max".into()));
        }
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Config`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| MarketplaceError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Catalog file with `~` expanded, if one is configured.
    #[must_use]
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_file
            .as_ref()
            .map(|p| PathBuf::from(infrastructure::expand_tilde(&p.to_string_lossy())))
    }

    /// Session slot file with `~` expanded.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.session_file.as_ref().map_or_else(infrastructure::default_session_file, |p| {
            PathBuf::from(infrastructure::expand_tilde(&p.to_string_lossy()))
        })
    }
}

/// Opens the configured store: a JSON file when `data_file` is set, otherwise an
/// in-memory store.
///
/// # Errors
///
/// Returns I/O or decode errors from opening the JSON file.
pub fn open_storage(config: &Config) -> Result<Box<dyn Storage>> {
    match config.data_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), seed = config.seed, "opening json store");
            Ok(Box::new(JsonStorage::open(path, config.seed)?))
        }
        None if config.seed => Ok(Box::new(MemoryStorage::seeded())),
        None => Ok(Box::new(MemoryStorage::new())),
    }
}

/// Creates the browse state for a new session.
///
/// No query has run yet. Feed an [`Event::Load`] with the current location
/// first.
#[must_use]
pub fn initialize(config: &Config) -> BrowseState {
    tracing::debug!(
        listing_route = %config.listing_route,
        default_sort = %config.default_sort,
        "initializing browse state"
    );
    BrowseState::new(config.listing_route.clone(), config.default_sort)
}

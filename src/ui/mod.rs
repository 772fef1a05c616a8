//! Presentation layer for the listing page.
//!
//! ```text
//! BrowseState → ListingPage::from_state → ListingPage → render_page → text
//! ```
//!
//! - [`viewmodel`]: display-ready view models (cards, filter sidebar, empty state)
//! - [`renderer`]: plain-text rendering used by the command-line front end
//! - [`helpers`]: capitalization, date and truncation helpers

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_cards, render_detail, render_filter_panel, render_page};
pub use viewmodel::{
    result_summary, sort_options, EmptyState, FilterGroup, FilterOption, FilterPanel, HeaderInfo,
    ListingCard, ListingDetail, ListingPage, RangeControl, ResultSummary, SearchBarInfo,
};

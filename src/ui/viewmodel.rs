//! Display-ready view models for the listing page and detail view.
//!
//! View models carry no logic of their own. They are computed from
//! [`BrowseState`] or a [`Listing`] and handed to the renderer, which never sees
//! domain types directly.

use super::helpers::{capitalize, format_listed_date};
use crate::app::BrowseState;
use crate::domain::{
    format_price, group_thousands, Condition, Dimension, FilterChoice, FuelType, Listing, SortKey,
    Transmission,
};
use crate::SliderRange;

/// Everything needed to draw the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// Label of the active sort option, e.g. "Price: Low to High".
    pub sort_label: &'static str,
    /// Present once the user has applied filters or a search.
    pub summary: Option<ResultSummary>,
    pub cards: Vec<ListingCard>,
    /// Present when the result is empty.
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub placeholder: &'static str,
}

/// Result count plus the clear-filters affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub text: String,
    pub clear_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    pub action_label: &'static str,
}

/// One card in the result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCard {
    pub id: String,
    /// `"{brand} {model}"`.
    pub heading: String,
    pub title: String,
    pub price: String,
    pub year: u16,
    /// `"25,000 mi"`.
    pub mileage: String,
    /// `"Automatic • gasoline"`.
    pub drivetrain: String,
    pub location: String,
    pub listed: String,
    pub status: String,
    pub image: Option<String>,
}

/// Full detail view of a single listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetail {
    pub card: ListingCard,
    pub description: String,
    pub condition: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub seller_name: String,
    pub seller_phone: Option<String>,
}

/// `"1 result found"`, `"7 results found"`.
#[must_use]
pub fn result_summary(count: usize) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    format!("{count} {noun} found")
}

impl ListingCard {
    #[must_use]
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            heading: format!("{} {}", listing.brand, listing.model),
            title: listing.title.clone(),
            price: format_price(listing.price),
            year: listing.year,
            mileage: format!("{} mi", group_thousands(listing.mileage)),
            drivetrain: format!(
                "{} • {}",
                capitalize(listing.transmission.as_str()),
                listing.fuel_type.as_str()
            ),
            location: listing.location.clone(),
            listed: format_listed_date(listing.listed),
            status: capitalize(listing.status.as_str()),
            image: listing.images.first().cloned(),
        }
    }
}

impl ListingDetail {
    #[must_use]
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            card: ListingCard::from_listing(listing),
            description: listing.description.clone(),
            condition: capitalize(listing.condition.as_str()),
            features: listing.features.clone(),
            images: listing.images.clone(),
            seller_name: listing.seller_name.clone(),
            seller_phone: listing.seller_phone.clone(),
        }
    }
}

impl ListingPage {
    /// Computes the page for the current controller state.
    #[must_use]
    pub fn from_state(state: &BrowseState) -> Self {
        let cards: Vec<ListingCard> = state.results().iter().map(ListingCard::from_listing).collect();

        let summary = state.filters_applied().then(|| ResultSummary {
            text: result_summary(cards.len()),
            clear_label: "Clear filters",
        });

        let empty_state = cards.is_empty().then(|| EmptyState {
            message: "No cars found".to_string(),
            subtitle: "Try adjusting your search criteria or browse all available cars.".to_string(),
            action_label: "View All Cars",
        });

        Self {
            header: HeaderInfo {
                title: "Browse Available Cars".to_string(),
                subtitle: "Find your perfect car from our curated selection of premium vehicles"
                    .to_string(),
            },
            search_bar: SearchBarInfo {
                query: state.search_input().to_string(),
                placeholder: "Search cars by brand, model, or keywords...",
            },
            sort_label: state.sort().label(),
            summary,
            cards,
            empty_state,
        }
    }
}

/// The filter sidebar, reflecting the *working* filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanel {
    pub groups: Vec<FilterGroup>,
    pub price: RangeControl<u64>,
    pub year: RangeControl<u16>,
    /// True when the sidebar differs from what produced the visible results.
    pub has_unapplied_edits: bool,
}

/// One categorical dimension and its chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    pub dimension: Dimension,
    pub label: &'static str,
    pub options: Vec<FilterOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub choice: FilterChoice,
    pub label: String,
    pub selected: bool,
}

/// A two-handle slider: fixed extremes plus the selected bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeControl<T> {
    pub floor: T,
    pub ceiling: T,
    pub low: T,
    pub high: T,
}

impl<T: Copy> RangeControl<T> {
    fn new(extremes: SliderRange<T>, min: Option<T>, max: Option<T>) -> Self {
        Self {
            floor: extremes.min,
            ceiling: extremes.max,
            low: min.unwrap_or(extremes.min),
            high: max.unwrap_or(extremes.max),
        }
    }
}

fn group(state: &BrowseState, dimension: Dimension, choices: Vec<(FilterChoice, String)>) -> FilterGroup {
    FilterGroup {
        dimension,
        label: dimension.label(),
        options: choices
            .into_iter()
            .map(|(choice, label)| FilterOption {
                selected: state.working().is_selected(&choice),
                choice,
                label,
            })
            .collect(),
    }
}

impl FilterPanel {
    /// Builds the sidebar from the working filters, the store's brands and the
    /// configured slider extremes.
    #[must_use]
    pub fn build(
        state: &BrowseState,
        brands: &[String],
        price_range: SliderRange<u64>,
        year_range: SliderRange<u16>,
    ) -> Self {
        let brand_choices = brands
            .iter()
            .map(|b| (FilterChoice::Brand(b.clone()), b.clone()))
            .collect();
        let transmissions = Transmission::ALL
            .iter()
            .map(|t| (FilterChoice::Transmission(*t), capitalize(t.as_str())))
            .collect();
        let fuels = FuelType::ALL
            .iter()
            .map(|f| (FilterChoice::FuelType(*f), capitalize(f.as_str())))
            .collect();
        let conditions = Condition::ALL
            .iter()
            .map(|c| (FilterChoice::Condition(*c), capitalize(c.as_str())))
            .collect();

        Self {
            groups: vec![
                group(state, Dimension::Brand, brand_choices),
                group(state, Dimension::Transmission, transmissions),
                group(state, Dimension::FuelType, fuels),
                group(state, Dimension::Condition, conditions),
            ],
            price: RangeControl::new(price_range, state.working().price.min(), state.working().price.max()),
            year: RangeControl::new(year_range, state.working().year.min(), state.working().year.max()),
            has_unapplied_edits: state.has_unapplied_edits(),
        }
    }
}

/// Labels for every sort option, in menu order.
#[must_use]
pub fn sort_options() -> Vec<(&'static str, &'static str)> {
    SortKey::ALL.iter().map(|k| (k.as_str(), k.label())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event};
    use crate::storage::{MemoryStorage, Storage};

    #[test]
    fn summary_pluralizes() {
        assert_eq!(result_summary(0), "0 results found");
        assert_eq!(result_summary(1), "1 result found");
        assert_eq!(result_summary(12), "12 results found");
    }

    #[test]
    fn card_formats_numbers() {
        let store = MemoryStorage::seeded();
        let bmw = store.listing("car-1").unwrap().unwrap();
        let card = ListingCard::from_listing(&bmw);
        assert_eq!(card.heading, "BMW 5 Series");
        assert_eq!(card.price, "$45,000");
        assert_eq!(card.listed, "Dec 15, 2023");
        assert_eq!(card.status, "Available");
        assert!(card.mileage.ends_with(" mi"));
    }

    #[test]
    fn idle_page_has_no_summary() {
        let store = MemoryStorage::seeded();
        let mut state = BrowseState::new("/buy", SortKey::Newest);
        handle_event(&mut state, &store, &Event::Load { location: "/buy".into() }).unwrap();

        let page = ListingPage::from_state(&state);
        assert!(page.summary.is_none());
        assert!(page.empty_state.is_none());
        assert_eq!(page.cards.len(), 10);
        assert_eq!(page.sort_label, "Newest First");
    }

    #[test]
    fn empty_applied_result_shows_empty_state() {
        let store = MemoryStorage::seeded();
        let mut state = BrowseState::new("/buy", SortKey::Newest);
        handle_event(&mut state, &store, &Event::SubmitSearch("zeppelin".into())).unwrap();

        let page = ListingPage::from_state(&state);
        assert_eq!(page.summary.unwrap().text, "0 results found");
        assert_eq!(page.empty_state.unwrap().message, "No cars found");
    }

    #[test]
    fn sort_menu_lists_every_key() {
        let options = sort_options();
        assert_eq!(options.len(), SortKey::ALL.len());
        assert_eq!(options[2], ("price-low-high", "Price: Low to High"));
    }

    #[test]
    fn filter_panel_reflects_working_state() {
        let store = MemoryStorage::seeded();
        let mut state = BrowseState::new("/buy", SortKey::Newest);
        handle_event(&mut state, &store, &Event::Load { location: "/buy".into() }).unwrap();
        handle_event(&mut state, &store, &Event::Toggle(FilterChoice::Brand("Audi".into()))).unwrap();
        handle_event(&mut state, &store, &Event::SetYearRange { min: Some(2018), max: None }).unwrap();

        let brands = store.unique_brands().unwrap();
        let panel = FilterPanel::build(
            &state,
            &brands,
            SliderRange { min: 0, max: 100_000 },
            SliderRange { min: 2010, max: 2024 },
        );

        assert!(panel.has_unapplied_edits);
        assert_eq!(panel.groups[0].options.len(), brands.len());
        let selected: Vec<&str> = panel.groups[0]
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected, ["Audi"]);
        assert_eq!(panel.groups[2].label, "Fuel Type");
        assert_eq!((panel.year.low, panel.year.high), (2018, 2024));
        assert_eq!((panel.price.low, panel.price.high), (0, 100_000));
    }
}

//! Filter and sort vocabulary for listing queries.
//!
//! A [`FilterSet`] restricts a listing collection along several dimensions. Every
//! categorical dimension is a set, and **an empty set means "no restriction"**, not
//! "match nothing". Range dimensions are inclusive [`Bounds`] where an absent side
//! is unbounded. Filter dimensions are a closed enumeration ([`Dimension`]); a value
//! for an unknown dimension is rejected when it is parsed into a [`FilterChoice`].

use super::error::{MarketplaceError, Result};
use super::listing::{Condition, FuelType, Listing, Transmission};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Inclusive range with optionally open ends.
///
/// Invariant: when both sides are present, `min <= max`. The only way to build a
/// `Bounds` with both ends is [`Bounds::new`], which enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds<T>", bound(deserialize = "T: PartialOrd + Copy + Deserialize<'de>"))]
pub struct Bounds<T> {
    min: Option<T>,
    max: Option<T>,
}

#[derive(Deserialize)]
struct RawBounds<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: PartialOrd + Copy> TryFrom<RawBounds<T>> for Bounds<T> {
    type Error = MarketplaceError;

    fn try_from(raw: RawBounds<T>) -> Result<Self> {
        Self::new(raw.min, raw.max, "range")
    }
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Builds a range, rejecting `min > max`.
    ///
    /// `field` names the dimension in the validation error.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] if both ends are present and inverted.
    pub fn new(min: Option<T>, max: Option<T>, field: &'static str) -> Result<Self> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(MarketplaceError::validation(
                    field,
                    "minimum must not exceed maximum",
                ));
            }
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> Option<T> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<T> {
        self.max
    }

    /// True if neither side is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Inclusive membership test; an absent side never excludes.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |lo| value >= lo) && self.max.map_or(true, |hi| value <= hi)
    }
}

/// The filterable categorical dimensions of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Brand,
    Transmission,
    FuelType,
    Condition,
}

impl Dimension {
    /// Wire name used by the UI for this dimension.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brands",
            Self::Transmission => "transmission",
            Self::FuelType => "fuelType",
            Self::Condition => "condition",
        }
    }

    /// Heading shown above the dimension's options.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Transmission => "Transmission",
            Self::FuelType => "Fuel Type",
            Self::Condition => "Condition",
        }
    }
}

impl FromStr for Dimension {
    type Err = MarketplaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "brands" | "brand" => Ok(Self::Brand),
            "transmission" => Ok(Self::Transmission),
            "fuelType" => Ok(Self::FuelType),
            "condition" => Ok(Self::Condition),
            other => Err(MarketplaceError::validation(
                "dimension",
                format!("unknown filter dimension '{other}'"),
            )),
        }
    }
}

/// A single value in one categorical dimension, as produced by a chip toggle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterChoice {
    Brand(String),
    Transmission(Transmission),
    FuelType(FuelType),
    Condition(Condition),
}

impl FilterChoice {
    /// Parses a `(dimension, value)` pair coming from the UI.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] for an unknown dimension or a value
    /// outside the dimension's closed enumeration.
    ///
    /// # Examples
    ///
    /// ```
    /// use carlot::domain::{FilterChoice, FuelType};
    ///
    /// let choice = FilterChoice::parse("fuelType", "electric").unwrap();
    /// assert_eq!(choice, FilterChoice::FuelType(FuelType::Electric));
    /// assert!(FilterChoice::parse("colour", "red").is_err());
    /// ```
    pub fn parse(dimension: &str, value: &str) -> Result<Self> {
        Ok(match dimension.parse::<Dimension>()? {
            Dimension::Brand => Self::Brand(value.to_string()),
            Dimension::Transmission => Self::Transmission(value.parse()?),
            Dimension::FuelType => Self::FuelType(value.parse()?),
            Dimension::Condition => Self::Condition(value.parse()?),
        })
    }

    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Self::Brand(_) => Dimension::Brand,
            Self::Transmission(_) => Dimension::Transmission,
            Self::FuelType(_) => Dimension::FuelType,
            Self::Condition(_) => Dimension::Condition,
        }
    }
}

/// Structured multi-dimensional restriction over listings.
///
/// The default value restricts nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    pub brands: BTreeSet<String>,
    pub price: Bounds<u64>,
    pub year: Bounds<u16>,
    pub transmission: BTreeSet<Transmission>,
    pub fuel_type: BTreeSet<FuelType>,
    pub condition: BTreeSet<Condition>,
}

/// Inserts `value` if absent, removes it if present.
fn toggle_member<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl FilterSet {
    /// A filter set restricted to exactly one brand.
    #[must_use]
    pub fn for_brand(brand: impl Into<String>) -> Self {
        Self {
            brands: BTreeSet::from([brand.into()]),
            ..Self::default()
        }
    }

    /// Toggles membership of one categorical value. Applying the same toggle twice
    /// restores the original set.
    pub fn toggle(&mut self, choice: FilterChoice) {
        match choice {
            FilterChoice::Brand(brand) => toggle_member(&mut self.brands, brand),
            FilterChoice::Transmission(t) => toggle_member(&mut self.transmission, t),
            FilterChoice::FuelType(f) => toggle_member(&mut self.fuel_type, f),
            FilterChoice::Condition(c) => toggle_member(&mut self.condition, c),
        }
    }

    /// True if `choice` is currently selected.
    #[must_use]
    pub fn is_selected(&self, choice: &FilterChoice) -> bool {
        match choice {
            FilterChoice::Brand(brand) => self.brands.contains(brand),
            FilterChoice::Transmission(t) => self.transmission.contains(t),
            FilterChoice::FuelType(f) => self.fuel_type.contains(f),
            FilterChoice::Condition(c) => self.condition.contains(c),
        }
    }

    /// Sets the inclusive price range.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] if `min > max`.
    pub fn set_price_range(&mut self, min: Option<u64>, max: Option<u64>) -> Result<()> {
        self.price = Bounds::new(min, max, "price")?;
        Ok(())
    }

    /// Sets the inclusive model-year range.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] if `min > max`.
    pub fn set_year_range(&mut self, min: Option<u16>, max: Option<u16>) -> Result<()> {
        self.year = Bounds::new(min, max, "year")?;
        Ok(())
    }

    /// Empties one categorical dimension, lifting its restriction.
    pub fn clear_dimension(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Brand => self.brands.clear(),
            Dimension::Transmission => self.transmission.clear(),
            Dimension::FuelType => self.fuel_type.clear(),
            Dimension::Condition => self.condition.clear(),
        }
    }

    /// True when the set restricts nothing.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self == &Self::default()
    }

    /// Categorical membership for every dimension. Empty sets pass everything.
    #[must_use]
    pub fn admits_categories(&self, listing: &Listing) -> bool {
        (self.brands.is_empty() || self.brands.contains(&listing.brand))
            && (self.transmission.is_empty() || self.transmission.contains(&listing.transmission))
            && (self.fuel_type.is_empty() || self.fuel_type.contains(&listing.fuel_type))
            && (self.condition.is_empty() || self.condition.contains(&listing.condition))
    }

    /// Inclusive range checks on price and year.
    #[must_use]
    pub fn admits_ranges(&self, listing: &Listing) -> bool {
        self.price.contains(listing.price) && self.year.contains(listing.year)
    }
}

/// Ordering applied to a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recently listed first.
    #[default]
    Newest,
    Oldest,
    PriceLowHigh,
    PriceHighLow,
    MileageLowHigh,
    /// Highest model year first.
    YearNewest,
}

impl SortKey {
    pub const ALL: &'static [Self] = &[
        Self::Newest,
        Self::Oldest,
        Self::PriceLowHigh,
        Self::PriceHighLow,
        Self::MileageLowHigh,
        Self::YearNewest,
    ];

    /// Parses a sort option, falling back to [`SortKey::Newest`] for anything
    /// unrecognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use carlot::domain::SortKey;
    ///
    /// assert_eq!(SortKey::from_param("price-high-low"), SortKey::PriceHighLow);
    /// assert_eq!(SortKey::from_param("cheapest"), SortKey::Newest);
    /// ```
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "oldest" => Self::Oldest,
            "price-low-high" => Self::PriceLowHigh,
            "price-high-low" => Self::PriceHighLow,
            "mileage-low-high" => Self::MileageLowHigh,
            "year-newest" => Self::YearNewest,
            _ => Self::Newest,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::MileageLowHigh => "mileage-low-high",
            Self::YearNewest => "year-newest",
        }
    }

    /// Label shown in the sort picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::PriceLowHigh => "Price: Low to High",
            Self::PriceHighLow => "Price: High to Low",
            Self::MileageLowHigh => "Mileage: Low to High",
            Self::YearNewest => "Year: Newest First",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_is_identity() {
        let original = FilterSet::for_brand("BMW");
        let choices = [
            FilterChoice::Brand("BMW".to_string()),
            FilterChoice::Brand("Tesla".to_string()),
            FilterChoice::Transmission(Transmission::Manual),
            FilterChoice::FuelType(FuelType::Diesel),
            FilterChoice::Condition(Condition::Fair),
        ];
        for choice in choices {
            let mut filters = original.clone();
            filters.toggle(choice.clone());
            assert_ne!(filters, original);
            filters.toggle(choice);
            assert_eq!(filters, original);
        }
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut filters = FilterSet::default();
        assert!(filters.set_price_range(Some(50_000), Some(10_000)).is_err());
        assert!(filters.price.is_unbounded());
        filters.set_year_range(Some(2020), Some(2020)).unwrap();
        assert!(filters.year.contains(2020));
        assert!(!filters.year.contains(2021));
    }

    #[test]
    fn default_bounds_admit_everything() {
        let open = Bounds::<u16>::default();
        assert!(open.is_unbounded());
        assert!(open.contains(0) && open.contains(u16::MAX));
        assert_eq!(Bounds::new(None, None, "year").unwrap(), open);
    }

    #[test]
    fn half_open_bounds() {
        let lower_only = Bounds::new(Some(10u64), None, "price").unwrap();
        assert!(lower_only.contains(10));
        assert!(lower_only.contains(u64::MAX));
        assert!(!lower_only.contains(9));
    }

    #[test]
    fn inverted_bounds_fail_to_deserialize() {
        let err = serde_json::from_str::<Bounds<u64>>(r#"{"min":5,"max":1}"#);
        assert!(err.is_err());
        let ok: Bounds<u64> = serde_json::from_str(r#"{"min":1,"max":null}"#).unwrap();
        assert_eq!(ok.min(), Some(1));
    }

    #[test]
    fn unknown_dimension_is_rejected() {
        let err = FilterChoice::parse("colour", "red").unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "dimension", .. }));
        assert!(FilterChoice::parse("transmission", "cvt").is_err());
        assert_eq!(
            FilterChoice::parse("brands", "Audi").unwrap().dimension(),
            Dimension::Brand
        );
    }

    #[test]
    fn sort_keys_round_trip_through_params() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_param(key.as_str()), *key);
        }
        assert_eq!(SortKey::from_param(""), SortKey::Newest);
    }

    #[test]
    fn default_filter_set_is_unrestricted() {
        let mut filters = FilterSet::default();
        assert!(filters.is_unrestricted());
        filters.toggle(FilterChoice::Condition(Condition::New));
        assert!(!filters.is_unrestricted());
        filters.clear_dimension(Dimension::Condition);
        assert!(filters.is_unrestricted());
    }
}

//! Listing domain model.
//!
//! A [`Listing`] is a vehicle for sale. Its categorical attributes are drawn from
//! closed enumerations so that filter values can be checked when they are parsed
//! instead of silently matching nothing.

use super::error::{MarketplaceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of feature strings a listing may carry.
pub const MAX_FEATURES: usize = 10;

/// Maximum number of image URLs a listing may carry.
pub const MAX_IMAGES: usize = 5;

/// Title length bounds, in characters.
const TITLE_MIN_CHARS: usize = 10;
const TITLE_MAX_CHARS: usize = 100;

/// Minimum description length, in characters.
const DESCRIPTION_MIN_CHARS: usize = 30;

/// Implements `as_str`, `Display` and `FromStr` for a closed string enumeration.
macro_rules! closed_enum {
    ($name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the lowercase wire name of the variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = MarketplaceError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(MarketplaceError::validation(
                        $field,
                        format!("unknown value '{other}'"),
                    )),
                }
            }
        }
    };
}

/// Fuel type of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

closed_enum!(FuelType, "fuelType", {
    Gasoline => "gasoline",
    Diesel => "diesel",
    Electric => "electric",
    Hybrid => "hybrid",
});

/// Gearbox of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

closed_enum!(Transmission, "transmission", {
    Automatic => "automatic",
    Manual => "manual",
});

/// Seller-reported condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
}

closed_enum!(Condition, "condition", {
    New => "new",
    Excellent => "excellent",
    Good => "good",
    Fair => "fair",
    Poor => "poor",
});

/// Sale status. New listings start as [`ListingStatus::Available`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Available,
    Pending,
    Sold,
}

closed_enum!(ListingStatus, "status", {
    Available => "available",
    Pending => "pending",
    Sold => "sold",
});

/// A vehicle for sale.
///
/// Prices are whole currency units (US dollars). `listed` is stamped by the store
/// when the listing is created and drives the `newest`/`oldest` sort orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub price: u64,
    pub mileage: u64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub description: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub condition: Condition,
    pub seller_id: String,
    pub seller_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_phone: Option<String>,
    pub location: String,
    pub listed: DateTime<Utc>,
    #[serde(default)]
    pub status: ListingStatus,
}

impl Listing {
    /// Returns true if `needle` (already lowercased) occurs in the title, brand,
    /// model or description, ignoring case.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.title, &self.brand, &self.model, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Input for creating a listing.
///
/// Identity, `listed` and `status` are assigned by the store. Required numeric
/// attributes are optional here so that a missing value can be reported as a
/// validation failure rather than defaulting silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: Option<u16>,
    pub price: Option<u64>,
    pub mileage: u64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub condition: Condition,
    /// Filled in from the session when a signed-in user sells.
    #[serde(default)]
    pub seller_id: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_phone: Option<String>,
    pub location: String,
}

impl NewListing {
    /// Checks every submission rule, reporting the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.brand.trim().is_empty() {
            return Err(MarketplaceError::validation("brand", "brand is required"));
        }
        if self.model.trim().is_empty() {
            return Err(MarketplaceError::validation("model", "model is required"));
        }
        let Some(year) = self.year else {
            return Err(MarketplaceError::validation("year", "year is required"));
        };
        if !(1000..=9999).contains(&year) {
            return Err(MarketplaceError::validation(
                "year",
                "please enter a valid four digit year",
            ));
        }
        if self.price.is_none() {
            return Err(MarketplaceError::validation("price", "price is required"));
        }

        let title_len = self.title.trim().chars().count();
        if title_len < TITLE_MIN_CHARS {
            return Err(MarketplaceError::validation(
                "title",
                format!("title must be at least {TITLE_MIN_CHARS} characters"),
            ));
        }
        if title_len > TITLE_MAX_CHARS {
            return Err(MarketplaceError::validation(
                "title",
                format!("title can't exceed {TITLE_MAX_CHARS} characters"),
            ));
        }
        if self.description.trim().chars().count() < DESCRIPTION_MIN_CHARS {
            return Err(MarketplaceError::validation(
                "description",
                format!("description must be at least {DESCRIPTION_MIN_CHARS} characters"),
            ));
        }
        if self.location.trim().is_empty() {
            return Err(MarketplaceError::validation("location", "location is required"));
        }
        if self.features.len() > MAX_FEATURES {
            return Err(MarketplaceError::validation(
                "features",
                format!("you can only add up to {MAX_FEATURES} features"),
            ));
        }
        if self.images.is_empty() {
            return Err(MarketplaceError::validation(
                "images",
                "please add at least one image",
            ));
        }
        if self.images.len() > MAX_IMAGES {
            return Err(MarketplaceError::validation(
                "images",
                format!("you can only add up to {MAX_IMAGES} images"),
            ));
        }
        Ok(())
    }

    /// Validates the input and turns it into a stored listing.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] if [`NewListing::validate`] fails.
    pub fn into_listing(self, id: String, listed: DateTime<Utc>) -> Result<Listing> {
        self.validate()?;
        let (Some(year), Some(price)) = (self.year, self.price) else {
            return Err(MarketplaceError::validation("year", "year is required"));
        };

        Ok(Listing {
            id,
            title: self.title,
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year,
            price,
            mileage: self.mileage,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            description: self.description,
            features: self.features,
            images: self.images,
            condition: self.condition,
            seller_id: self.seller_id,
            seller_name: self.seller_name,
            seller_phone: self.seller_phone,
            location: self.location,
            listed,
            status: ListingStatus::Available,
        })
    }
}

/// Formats a whole-dollar amount as `$45,000`.
///
/// # Examples
///
/// ```
/// use carlot::domain::format_price;
///
/// assert_eq!(format_price(45_000), "$45,000");
/// assert_eq!(format_price(999), "$999");
/// ```
#[must_use]
pub fn format_price(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

/// Inserts a comma every three digits: `25000` becomes `25,000`.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewListing {
        NewListing {
            title: "Reliable Daily Driver".to_string(),
            brand: "Honda".to_string(),
            model: "Accord".to_string(),
            year: Some(2019),
            price: Some(21_000),
            mileage: 40_000,
            fuel_type: FuelType::Gasoline,
            transmission: Transmission::Automatic,
            description: "One owner, full service history, new tyres last spring.".to_string(),
            features: vec!["Bluetooth".to_string()],
            images: vec!["https://img.example/accord.jpg".to_string()],
            condition: Condition::Good,
            seller_id: "user-1".to_string(),
            seller_name: "John Smith".to_string(),
            seller_phone: None,
            location: "Portland, OR".to_string(),
        }
    }

    #[test]
    fn closed_enums_parse_wire_names() {
        assert_eq!("hybrid".parse::<FuelType>().unwrap(), FuelType::Hybrid);
        assert_eq!("manual".parse::<Transmission>().unwrap(), Transmission::Manual);
        assert_eq!(Condition::Excellent.as_str(), "excellent");
        assert!("steam".parse::<FuelType>().is_err());
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let mut missing_brand = input();
        missing_brand.brand = "  ".to_string();
        let err = missing_brand.validate().unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "brand", .. }));

        let mut missing_price = input();
        missing_price.price = None;
        let err = missing_price.validate().unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "price", .. }));

        let mut missing_year = input();
        missing_year.year = None;
        let err = missing_year.validate().unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "year", .. }));
    }

    #[test]
    fn image_and_feature_limits() {
        let mut no_images = input();
        no_images.images.clear();
        assert!(no_images.validate().is_err());

        let mut too_many = input();
        too_many.features = (0..=MAX_FEATURES).map(|i| format!("feature {i}")).collect();
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn into_listing_starts_available() {
        let now = Utc::now();
        let listing = input().into_listing("car-11".to_string(), now).unwrap();
        assert_eq!(listing.status, ListingStatus::Available);
        assert_eq!(listing.listed, now);
        assert_eq!(listing.year, 2019);
    }

    #[test]
    fn text_match_covers_searchable_fields() {
        let listing = input().into_listing("car-1".to_string(), Utc::now()).unwrap();
        assert!(listing.matches_text("accord"));
        assert!(listing.matches_text("daily"));
        assert!(listing.matches_text("service history"));
        assert!(!listing.matches_text("portland"));
    }

    #[test]
    fn price_grouping() {
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_price(1_000), "$1,000");
        assert_eq!(format_price(1_234_567), "$1,234,567");
    }
}

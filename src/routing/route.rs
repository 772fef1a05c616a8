//! Parsing and encoding of listing-route locations.

use crate::domain::{MarketplaceError, Result};
use std::borrow::Cow;

/// Query parameter carrying the free-text search term.
pub const SEARCH_PARAM: &str = "search";

/// Query parameter carrying the brand shortcut.
pub const BRAND_PARAM: &str = "brand";

/// The mirrored subset of controller state.
///
/// Empty parameter values are treated as absent, both when parsing and when
/// encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRoute {
    pub search: Option<String>,
    pub brand: Option<String>,
}

/// Decodes one `application/x-www-form-urlencoded` component (`+` is a space).
fn decode_component(raw: &str) -> Result<String> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|e| MarketplaceError::Route(format!("cannot decode '{raw}': {e}")))
}

impl ListingRoute {
    /// Route with only a search term.
    #[must_use]
    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_string()).filter(|t| !t.is_empty()),
            brand: None,
        }
    }

    /// Route with only the brand shortcut.
    #[must_use]
    pub fn brand(brand: &str) -> Self {
        Self {
            search: None,
            brand: Some(brand.to_string()).filter(|b| !b.is_empty()),
        }
    }

    /// True when neither parameter is present.
    #[must_use]
    pub const fn is_bare(&self) -> bool {
        self.search.is_none() && self.brand.is_none()
    }

    /// Extracts the mirrored parameters from a location such as
    /// `/buy?search=tesla&brand=BMW#top`.
    ///
    /// The path is ignored and unknown parameters are skipped, including keys
    /// that do not decode. For repeated parameters the first occurrence wins even
    /// when its value is empty, so `?search=&search=b` has no search term.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Route`] if a mirrored value is not valid
    /// percent-encoded UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use carlot::routing::ListingRoute;
    ///
    /// let route = ListingRoute::parse("/buy?search=model+y&brand=Tesla")?;
    /// assert_eq!(route.search.as_deref(), Some("model y"));
    /// assert_eq!(route.brand.as_deref(), Some("Tesla"));
    /// # Ok::<(), carlot::MarketplaceError>(())
    /// ```
    pub fn parse(location: &str) -> Result<Self> {
        let without_fragment = location.split('#').next().unwrap_or_default();
        let query = without_fragment
            .split_once('?')
            .map_or("", |(_, query)| query);

        let mut route = Self::default();
        let (mut search_seen, mut brand_seen) = (false, false);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let Ok(key) = decode_component(key) else {
                continue;
            };
            let (slot, seen) = match key.as_str() {
                SEARCH_PARAM => (&mut route.search, &mut search_seen),
                BRAND_PARAM => (&mut route.brand, &mut brand_seen),
                _ => continue,
            };
            if !*seen {
                *seen = true;
                *slot = Some(decode_component(value)?).filter(|v| !v.is_empty());
            }
        }
        Ok(route)
    }

    /// Encodes the route under `base` (for example `/buy`).
    ///
    /// # Examples
    ///
    /// ```
    /// use carlot::routing::ListingRoute;
    ///
    /// assert_eq!(ListingRoute::search("model y").to_location("/buy"), "/buy?search=model%20y");
    /// assert_eq!(ListingRoute::default().to_location("/buy"), "/buy");
    /// ```
    #[must_use]
    pub fn to_location(&self, base: &str) -> String {
        let params: Vec<String> = [(SEARCH_PARAM, &self.search), (BRAND_PARAM, &self.brand)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{key}={}", urlencoding::encode(v)))
            })
            .collect();

        if params.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{}", params.join("&"))
        }
    }
}

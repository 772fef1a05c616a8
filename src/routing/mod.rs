//! URL synchronization for the listing route.
//!
//! Only two query parameters are mirrored between the controller and the
//! location: `search` (the free-text term) and `brand` (the single-brand
//! shortcut). Brands picked through the categorical toggles are deliberately left
//! out of the URL to keep it short.
//!
//! ```text
//! /buy                      → no term, no brand shortcut
//! /buy?search=model%20y     → term "model y"
//! /buy?brand=BMW            → brands = {BMW}
//! ```

pub mod route;

pub use route::ListingRoute;

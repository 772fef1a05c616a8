//! Error types for the marketplace core.
//!
//! This module defines the centralized error type [`MarketplaceError`] and a type alias
//! [`Result`] used throughout the crate. Failures are narrow and explicit: they only
//! occur at mutation boundaries (create/update/delete), while queries are total and an
//! empty result is never an error.

use thiserror::Error;

/// The main error type for marketplace operations.
///
/// # Examples
///
/// ```
/// use carlot::MarketplaceError;
///
/// let err = MarketplaceError::not_found("listing", "car-42");
/// assert_eq!(err.to_string(), "listing not found: car-42");
/// ```
#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// Input failed validation.
    ///
    /// Raised for a create request missing a required attribute, an inverted range
    /// bound (`min > max`), or an unknown filter dimension or value.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending attribute.
        field: &'static str,
        /// Human readable description of the rule that failed.
        reason: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record (`listing`, `appointment`, ...).
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The record clashes with an existing one (e.g. a duplicate account email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The operation needs an active session and none was supplied.
    #[error("an active session is required")]
    Unauthenticated,

    /// A location could not be decoded into a listing route.
    #[error("route error: {0}")]
    Route(String),

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a view to its output failed.
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Configuration is invalid or unreadable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MarketplaceError {
    /// Shorthand for a [`MarketplaceError::Validation`].
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`MarketplaceError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// A specialized `Result` type for marketplace operations.
pub type Result<T> = std::result::Result<T, MarketplaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = MarketplaceError::validation("brand", "brand is required");
        assert_eq!(err.to_string(), "invalid brand: brand is required");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MarketplaceError = io.into();
        assert!(matches!(err, MarketplaceError::Io(_)));
    }

    #[test]
    fn render_failures_have_their_own_variant() {
        let err: MarketplaceError = std::fmt::Error.into();
        assert!(matches!(err, MarketplaceError::Render(_)));
        assert!(err.to_string().starts_with("render error"));
    }
}

//! Error types for carousel construction and configuration.
//!
//! Navigation itself never fails: rejected requests are reported through
//! [`Navigation::Ignored`](crate::Navigation::Ignored) instead.

use thiserror::Error;

/// Errors raised while building or wiring up a carousel.
#[derive(Error, Debug)]
pub enum CarouselError {
    /// Required host markup or control was not found
    #[error("missing required element: {selector}")]
    MissingElement { selector: String },

    /// Element was found but is not of the expected kind
    #[error("element is not an HTML element: {selector}")]
    NotAnElement { selector: String },

    /// Indicator dots present but not one per slide
    #[error("found {dots} indicator dots for {slides} slides")]
    IndicatorMismatch { dots: usize, slides: usize },

    /// A browser API call failed
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Configuration values are inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[cfg(feature = "toml")]
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

//! Error types for deck configuration.

use thiserror::Error;

/// Returned when a [`DeckParams`](crate::DeckParams) cannot describe a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DeckParamsError {
    #[error("deck needs at least one segment")]
    NoSegments,

    #[error("{field} must be positive and finite (received {value})")]
    NonPositiveDimension { field: &'static str, value: f32 },

    #[error("{field} must be finite and not negative (received {value})")]
    InvalidTuning { field: &'static str, value: f32 },
}

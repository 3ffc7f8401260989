//! Tunable deck dimensions and deformation constants.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::DeckParamsError;

/// Dimensions and tuning for a deck of `segment_count` equal segments.
///
/// The deck spans the X axis, centered on the origin, with its width along Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckParams {
    /// Number of deck segments (N)
    pub segment_count: usize,
    /// Segment length along the span
    pub segment_length: f32,
    /// Deck width across the span
    pub segment_width: f32,
    /// Deck thickness
    pub segment_height: f32,
    /// Sag of a fully loaded center segment
    pub max_deformation: f32,
    /// Tilt in radians of a fully loaded center segment
    pub max_rotation: f32,
    /// Horizontal pull of a fully loaded center segment
    pub horizontal_shift: f32,
    /// Radius of the stress color falloff
    pub stress_radius: f32,
}

impl Default for DeckParams {
    fn default() -> Self {
        Self {
            segment_count: DEFAULT_SEGMENT_COUNT,
            segment_length: DEFAULT_SEGMENT_LENGTH,
            segment_width: DEFAULT_SEGMENT_WIDTH,
            segment_height: DEFAULT_SEGMENT_HEIGHT,
            max_deformation: DEFAULT_MAX_DEFORMATION,
            max_rotation: DEFAULT_MAX_ROTATION,
            horizontal_shift: DEFAULT_HORIZONTAL_SHIFT,
            stress_radius: DEFAULT_STRESS_RADIUS,
        }
    }
}

impl DeckParams {
    /// Default deck with a different segment count
    pub fn with_segments(segment_count: usize) -> Self {
        Self {
            segment_count,
            ..Self::default()
        }
    }

    /// Check that the parameters describe a drawable deck.
    ///
    /// # Errors
    ///
    /// Returns [`DeckParamsError::NoSegments`] for an empty deck,
    /// [`DeckParamsError::NonPositiveDimension`] when a size or the stress radius
    /// is zero, negative or not finite, and [`DeckParamsError::InvalidTuning`]
    /// when a deformation constant is negative or not finite.
    pub fn validate(&self) -> Result<(), DeckParamsError> {
        if self.segment_count == 0 {
            return Err(DeckParamsError::NoSegments);
        }

        for (field, value) in [
            ("segment_length", self.segment_length),
            ("segment_width", self.segment_width),
            ("segment_height", self.segment_height),
            ("stress_radius", self.stress_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DeckParamsError::NonPositiveDimension { field, value });
            }
        }

        for (field, value) in [
            ("max_deformation", self.max_deformation),
            ("max_rotation", self.max_rotation),
            ("horizontal_shift", self.horizontal_shift),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DeckParamsError::InvalidTuning { field, value });
            }
        }

        Ok(())
    }

    /// Index of the segment nearest the middle, as a real number ((N-1)/2)
    pub fn center_index(&self) -> f32 {
        (self.segment_count as f32 - 1.0) / 2.0
    }

    /// Half the deck length measured in segments (N/2)
    pub fn half_span(&self) -> f32 {
        self.segment_count as f32 / 2.0
    }

    /// Total deck length along the span
    pub fn deck_length(&self) -> f32 {
        self.segment_count as f32 * self.segment_length
    }

    /// True for segments in the left half, which tilt and shift positively
    pub fn is_left_half(&self, index: usize) -> bool {
        (index as f32) < self.half_span()
    }
}

//! Sag, tilt and shift of deck segments under load.
//!
//! Every formula here is stateless: a segment's pose depends only on its own
//! weight, its index and the deck parameters. The engine re-evaluates all
//! segments after any weight change.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::params::DeckParams;

/// Falloff at `offset` segments from the deck center, for a deck of `segment_count`.
///
/// 1.0 at the center, 0.0 at the abutments (offset = ±N/2). Offsets beyond
/// the abutments clamp to 0.
pub fn falloff_at_offset(offset: f32, segment_count: usize) -> f32 {
    let half_span = segment_count as f32 / 2.0;
    if half_span <= 0.0 {
        return 0.0;
    }
    (1.0 - offset.abs() / half_span).max(0.0)
}

/// Falloff for segment `index`: `1 - |i - (N-1)/2| / (N/2)`
pub fn falloff(index: usize, segment_count: usize) -> f32 {
    let center = (segment_count as f32 - 1.0) / 2.0;
    falloff_at_offset(index as f32 - center, segment_count)
}

/// Displacement of one segment from its rest pose
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentOffset {
    /// Downward sag (subtracted from rest Y)
    pub sag: f32,
    /// Signed rotation about Z in radians
    pub rotation_z: f32,
    /// Signed shift along X toward the deck center
    pub shift_x: f32,
}

/// Compute the offset of segment `index` carrying `weight`.
pub fn segment_offset(weight: f32, index: usize, params: &DeckParams) -> SegmentOffset {
    let falloff = falloff(index, params.segment_count);
    let sag = weight * params.max_deformation * falloff;
    let rotation = weight * params.max_rotation * falloff;
    let shift = weight * params.horizontal_shift * falloff;

    // Left half tilts and shifts positively, right half negatively
    let sign = if params.is_left_half(index) { 1.0 } else { -1.0 };

    SegmentOffset {
        sag,
        rotation_z: sign * rotation,
        shift_x: sign * shift,
    }
}

/// One deck section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Position in the deck, 0..N
    pub index: usize,
    /// Unloaded center of the segment
    pub rest_position: Vec3,
    /// Unloaded rotation about Z
    pub rest_rotation_z: f32,
    /// Current center of the segment
    pub position: Vec3,
    /// Current rotation about Z in radians
    pub rotation_z: f32,
}

impl Segment {
    /// Create segment `index` at rest
    pub fn at_rest(index: usize, params: &DeckParams) -> Self {
        let rest_position = Vec3::new(
            (index as f32 - params.center_index()) * params.segment_length,
            params.segment_height / 2.0,
            0.0,
        );
        Self {
            index,
            rest_position,
            rest_rotation_z: 0.0,
            position: rest_position,
            rotation_z: 0.0,
        }
    }

    /// Set the current pose from the rest pose and an offset
    pub fn apply(&mut self, offset: SegmentOffset) {
        self.position = Vec3::new(
            self.rest_position.x + offset.shift_x,
            self.rest_position.y - offset.sag,
            self.rest_position.z,
        );
        self.rotation_z = self.rest_rotation_z + offset.rotation_z;
    }

    /// Vertical drop below the rest position
    pub fn sag(&self) -> f32 {
        self.rest_position.y - self.position.y
    }

    /// True if the segment sits exactly at its rest pose
    pub fn is_at_rest(&self) -> bool {
        self.position == self.rest_position && self.rotation_z == self.rest_rotation_z
    }
}

/// Recompute every segment pose from the per-segment weights.
///
/// `weights` and `segments` are matched by position; any surplus on either
/// side is left untouched.
pub fn deform_all(weights: &[f32], segments: &mut [Segment], params: &DeckParams) {
    for (segment, &weight) in segments.iter_mut().zip(weights) {
        segment.apply(segment_offset(weight, segment.index, params));
    }
}

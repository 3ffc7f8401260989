//! Rest geometry of the whole bridge.
//!
//! Only deck segments and weight markers move at runtime; pillars, railings
//! and the stress overlay stay where [`BridgeLayout::new`] puts them.

use glam::Vec3;

use crate::constants::MARKER_RADIUS;
use crate::deformation::Segment;
use crate::engine::WeightPoint;
use crate::params::DeckParams;

pub const PILLAR_HEIGHT: f32 = 20.0;
pub const PILLAR_RADIUS: f32 = 2.0;
/// Pillars flare slightly toward the ground
pub const PILLAR_BASE_FLARE: f32 = 1.2;
pub const RAILING_HEIGHT: f32 = 3.0;
pub const RAILING_THICKNESS: f32 = 0.3;
pub const POST_SPACING: f32 = 5.0;
/// Gap between the deck top and the stress overlay
pub const OVERLAY_LIFT: f32 = 0.01;

/// A box placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPlacement {
    pub center: Vec3,
    pub size: Vec3,
}

/// A vertical support column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillar {
    pub center: Vec3,
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub height: f32,
}

/// Which railing a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailSide {
    /// -Z edge
    Left,
    /// +Z edge
    Right,
}

impl RailSide {
    pub const BOTH: [RailSide; 2] = [RailSide::Left, RailSide::Right];

    fn z(self, segment_width: f32) -> f32 {
        match self {
            RailSide::Left => -segment_width / 2.0,
            RailSide::Right => segment_width / 2.0,
        }
    }
}

/// The flat stress overlay lying on the deck
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressPlane {
    pub center: Vec3,
    /// Extent along X
    pub length: f32,
    /// Extent along Z
    pub width: f32,
}

/// Everything needed to spawn the bridge, in world space
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeLayout {
    pub segments: Vec<Segment>,
    pub segment_size: Vec3,
    pub pillars: Vec<Pillar>,
    pub posts: Vec<BoxPlacement>,
    pub rails: Vec<BoxPlacement>,
    pub weight_points: Vec<WeightPoint>,
    pub marker_radius: f32,
    pub stress_plane: StressPlane,
}

impl BridgeLayout {
    pub fn new(params: &DeckParams) -> Self {
        let n = params.segment_count;
        let deck_length = params.deck_length();

        let segments = (0..n).map(|i| Segment::at_rest(i, params)).collect();
        let weight_points = (0..n).map(|i| WeightPoint::at_rest(i, params)).collect();

        // One pillar under every joint including both abutments
        let pillars = (0..=n)
            .map(|k| Pillar {
                center: Vec3::new(
                    (k as f32 - params.half_span()) * params.segment_length,
                    -PILLAR_HEIGHT / 2.0,
                    0.0,
                ),
                top_radius: PILLAR_RADIUS,
                bottom_radius: PILLAR_RADIUS * PILLAR_BASE_FLARE,
                height: PILLAR_HEIGHT,
            })
            .collect();

        let post_count = (deck_length / POST_SPACING).floor() as usize;
        let post_y = params.segment_height / 2.0 + RAILING_HEIGHT / 2.0;
        let post_size = Vec3::new(RAILING_THICKNESS, RAILING_HEIGHT, RAILING_THICKNESS);
        let posts = RailSide::BOTH
            .iter()
            .flat_map(|side| {
                let z = side.z(params.segment_width);
                (0..=post_count).map(move |i| BoxPlacement {
                    center: Vec3::new(
                        (i as f32 - post_count as f32 / 2.0) * POST_SPACING,
                        post_y,
                        z,
                    ),
                    size: post_size,
                })
            })
            .collect();

        let rail_size = Vec3::new(deck_length, RAILING_THICKNESS, RAILING_THICKNESS);
        let top_y = params.segment_height / 2.0 + RAILING_HEIGHT - RAILING_THICKNESS / 2.0;
        let middle_y = params.segment_height / 2.0 + RAILING_HEIGHT / 2.0;
        let rails = RailSide::BOTH
            .iter()
            .flat_map(|side| {
                let z = side.z(params.segment_width);
                [top_y, middle_y].map(|y| BoxPlacement {
                    center: Vec3::new(0.0, y, z),
                    size: rail_size,
                })
            })
            .collect();

        Self {
            segments,
            segment_size: Vec3::new(
                params.segment_length,
                params.segment_height,
                params.segment_width,
            ),
            pillars,
            posts,
            rails,
            weight_points,
            marker_radius: MARKER_RADIUS,
            stress_plane: StressPlane {
                center: Vec3::new(0.0, params.segment_height + OVERLAY_LIFT, 0.0),
                length: deck_length,
                width: params.segment_width,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_default_layout_counts() {
        let layout = BridgeLayout::new(&DeckParams::default());
        assert_eq!(layout.segments.len(), 15);
        assert_eq!(layout.weight_points.len(), 15);
        assert_eq!(layout.pillars.len(), 16);
        // 375 / 5 = 75 gaps, 76 posts per side
        assert_eq!(layout.posts.len(), 2 * 76);
        assert_eq!(layout.rails.len(), 4);
    }

    #[test]
    fn test_pillars_sit_under_joints() {
        let layout = BridgeLayout::new(&DeckParams::default());
        let first = layout.pillars[0];
        let last = layout.pillars[15];
        assert!((first.center.x + 187.5).abs() < EPSILON);
        assert!((last.center.x - 187.5).abs() < EPSILON);
        assert!((first.center.y + 10.0).abs() < EPSILON);
        assert!(first.bottom_radius > first.top_radius);
    }

    #[test]
    fn test_posts_line_both_edges() {
        let layout = BridgeLayout::new(&DeckParams::default());
        let (left, right): (Vec<&BoxPlacement>, Vec<&BoxPlacement>) =
            layout.posts.iter().partition(|post| post.center.z < 0.0);
        assert_eq!(left.len(), right.len());
        assert!(left.iter().all(|post| (post.center.z + 7.5).abs() < EPSILON));
        assert!((left[0].center.x + 187.5).abs() < EPSILON);
        assert!((post_y_top(left[0]) - 4.5).abs() < EPSILON);
    }

    fn post_y_top(post: &BoxPlacement) -> f32 {
        post.center.y + post.size.y / 2.0
    }

    #[test]
    fn test_stress_plane_covers_deck_top() {
        let layout = BridgeLayout::new(&DeckParams::default());
        assert!((layout.stress_plane.length - 375.0).abs() < EPSILON);
        assert!((layout.stress_plane.width - 15.0).abs() < EPSILON);
        assert!(layout.stress_plane.center.y > 3.0);
        assert!(layout.stress_plane.center.y < 3.1);
    }
}

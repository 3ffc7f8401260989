//! The deformation and stress engine.
//!
//! [`DeckEngine`] owns one weight per segment, the segment poses derived from
//! those weights, the shared [`StressField`] and the [`Readout`]. Every weight
//! change runs a full O(N) recompute of all segments.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{MARKER_CLEARANCE, MARKER_SCALE_GAIN};
use crate::deformation::{deform_all, Segment};
use crate::error::DeckParamsError;
use crate::params::DeckParams;
use crate::readout::Readout;
use crate::stress::StressField;

/// Marker scale for a given weight
pub fn marker_scale(weight: f32) -> f32 {
    1.0 + weight * MARKER_SCALE_GAIN
}

/// A draggable load marker tied 1:1 to the segment with the same index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    /// Index of the segment this point loads
    pub index: usize,
    /// Load on the segment, always within 0..=1
    pub weight: f32,
    /// Where the marker sits before it is dragged
    pub rest_position: Vec3,
    /// Current marker position (follows the pointer while dragged)
    pub position: Vec3,
}

impl WeightPoint {
    /// Unloaded point resting above segment `index`
    pub fn at_rest(index: usize, params: &DeckParams) -> Self {
        let rest_position = Vec3::new(
            (index as f32 - params.center_index()) * params.segment_length,
            params.segment_height + MARKER_CLEARANCE,
            0.0,
        );
        Self {
            index,
            weight: 0.0,
            rest_position,
            position: rest_position,
        }
    }

    /// Uniform scale of the marker mesh
    pub fn marker_scale(&self) -> f32 {
        marker_scale(self.weight)
    }
}

/// Everything a renderer needs to reflect one weight mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightUpdate {
    /// Index of the mutated point
    pub index: usize,
    /// Clamped weight after the mutation
    pub weight: f32,
    /// New uniform scale for the point's marker
    pub marker_scale: f32,
    /// Stress field after the mutation
    pub stress: StressField,
    /// Readout after the mutation
    pub readout: Readout,
}

/// Which way a mutation moved the weight; the readout treats zero differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Add,
    Remove,
}

/// Per-deck weight state and the deformation and stress derived from it
#[derive(Debug, Clone)]
pub struct DeckEngine {
    params: DeckParams,
    weight_points: Vec<WeightPoint>,
    segments: Vec<Segment>,
    stress: StressField,
    readout: Readout,
}

impl Default for DeckEngine {
    /// Unloaded deck with the default dimensions
    fn default() -> Self {
        Self::build(DeckParams::default())
    }
}

impl DeckEngine {
    /// Build an unloaded deck.
    ///
    /// # Errors
    ///
    /// Returns the [`DeckParamsError`] from [`DeckParams::validate`] when the
    /// parameters cannot describe a deck.
    pub fn new(params: DeckParams) -> Result<Self, DeckParamsError> {
        params.validate()?;
        Ok(Self::build(params))
    }

    fn build(params: DeckParams) -> Self {
        let weight_points = (0..params.segment_count)
            .map(|index| WeightPoint::at_rest(index, &params))
            .collect();
        let segments = (0..params.segment_count)
            .map(|index| Segment::at_rest(index, &params))
            .collect();

        Self {
            params,
            weight_points,
            segments,
            stress: StressField::new(params.stress_radius),
            readout: Readout::hidden(),
        }
    }

    pub fn params(&self) -> &DeckParams {
        &self.params
    }

    /// Number of segments (and weight points)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn weight_points(&self) -> &[WeightPoint] {
        &self.weight_points
    }

    /// Current weight of point `index`, if it exists
    pub fn weight(&self, index: usize) -> Option<f32> {
        self.weight_points.get(index).map(|point| point.weight)
    }

    pub fn stress_field(&self) -> StressField {
        self.stress
    }

    pub fn readout(&self) -> Readout {
        self.readout
    }

    /// Add `amount` to the weight of point `index`, clamping to 0..=1.
    ///
    /// The readout is always shown afterwards, even at 0%. Returns `None`
    /// without touching any state when `index` is out of range or `amount` is NaN.
    pub fn add_weight(&mut self, index: usize, amount: f32) -> Option<WeightUpdate> {
        let current = self.mutable_weight(index, amount)?;
        self.apply_weight(index, current + amount, Direction::Add)
    }

    /// Subtract `amount` from the weight of point `index`, clamping to 0..=1.
    ///
    /// The readout is hidden when the weight reaches exactly zero and otherwise
    /// keeps its visibility while its numbers update. Returns
    /// `None` without touching any state when `index` is out of range or
    /// `amount` is NaN.
    pub fn remove_weight(&mut self, index: usize, amount: f32) -> Option<WeightUpdate> {
        let current = self.mutable_weight(index, amount)?;
        self.apply_weight(index, current - amount, Direction::Remove)
    }

    /// Advance the stress animation clock. Weights are untouched.
    pub fn update(&mut self, time: f32) -> StressField {
        self.stress = self.stress.at_time(time);
        self.stress
    }

    /// Move point `index` (the marker follows a drag). Returns false for an unknown index.
    ///
    /// The stress field keeps its old point until the next weight change.
    pub fn move_weight_point(&mut self, index: usize, position: Vec3) -> bool {
        match self.weight_points.get_mut(index) {
            Some(point) => {
                point.position = position;
                true
            }
            None => false,
        }
    }

    /// Unload every point, return markers to rest and hide the readout
    pub fn clear_weights(&mut self) {
        for point in &mut self.weight_points {
            point.weight = 0.0;
            point.position = point.rest_position;
        }
        self.stress = self.stress.touched(0.0, Vec3::ZERO);
        self.readout = Readout::hidden();
        self.recompute_deformation();
        debug!("Cleared all deck weights");
    }

    /// Current weight of `index` when a mutation by `amount` may proceed
    fn mutable_weight(&self, index: usize, amount: f32) -> Option<f32> {
        if amount.is_nan() {
            debug!("Ignoring NaN weight change for point {}", index);
            return None;
        }
        self.weight(index)
    }

    fn apply_weight(
        &mut self,
        index: usize,
        requested: f32,
        direction: Direction,
    ) -> Option<WeightUpdate> {
        let point = self.weight_points.get_mut(index)?;
        let previous = point.weight;
        let weight = requested.clamp(0.0, 1.0);
        point.weight = weight;
        let position = point.position;
        let scale = point.marker_scale();

        debug!(
            "Weight on point {}: {:.3} -> {:.3} ({:?})",
            index, previous, weight, direction
        );

        self.stress = self.stress.touched(weight, position);
        self.recompute_deformation();

        self.readout = match direction {
            Direction::Add => Readout::shown(weight),
            // Removing never reveals a hidden readout
            Direction::Remove if weight > 0.0 => Readout {
                visible: self.readout.visible,
                ..Readout::shown(weight)
            },
            Direction::Remove => Readout::hidden(),
        };

        Some(WeightUpdate {
            index,
            weight,
            marker_scale: scale,
            stress: self.stress,
            readout: self.readout,
        })
    }

    fn recompute_deformation(&mut self) {
        let weights: Vec<f32> = self.weight_points.iter().map(|point| point.weight).collect();
        deform_all(&weights, &mut self.segments, &self.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readout::StressBand;

    const EPSILON: f32 = 1e-5;

    fn engine() -> DeckEngine {
        DeckEngine::new(DeckParams::default()).expect("default deck is valid")
    }

    #[test]
    fn test_new_engine_is_unloaded() {
        let engine = engine();
        assert_eq!(engine.len(), 15);
        assert!(engine.weight_points().iter().all(|p| p.weight == 0.0));
        assert!(engine.segments().iter().all(Segment::is_at_rest));
        assert!(!engine.readout().visible);
        assert_eq!(engine.stress_field().stress_radius, 20.0);
    }

    #[test]
    fn test_default_matches_validated_default() {
        let built = DeckEngine::default();
        let validated = engine();
        assert_eq!(built.params(), validated.params());
        assert_eq!(built.segments(), validated.segments());
    }

    #[test]
    fn test_invalid_params_propagate() {
        let error = DeckEngine::new(DeckParams::with_segments(0)).expect_err("empty deck");
        assert_eq!(error, DeckParamsError::NoSegments);
    }

    #[test]
    fn test_add_weight_clamps_high() {
        let mut engine = engine();
        engine.add_weight(3, 0.8);
        let update = engine.add_weight(3, 0.8).expect("valid index");
        assert_eq!(update.weight, 1.0);
        assert!((update.marker_scale - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_negative_add_clamps_low() {
        let mut engine = engine();
        let update = engine.add_weight(3, -5.0).expect("valid index");
        assert_eq!(update.weight, 0.0);
        // add always shows the readout, even at zero
        assert!(update.readout.visible);
        assert_eq!(update.readout.band, StressBand::Safe);
    }

    #[test]
    fn test_remove_weight_hides_readout_at_zero() {
        let mut engine = engine();
        engine.add_weight(2, 0.4);
        let update = engine.remove_weight(2, 0.1).expect("valid index");
        assert!(update.readout.visible);
        assert_eq!(update.readout.percent, 30);

        let update = engine.remove_weight(2, 1.0).expect("valid index");
        assert_eq!(update.weight, 0.0);
        assert!(!update.readout.visible);
        assert!(!engine.readout().visible);
    }

    #[test]
    fn test_remove_does_not_reveal_hidden_readout() {
        let mut engine = engine();
        engine.add_weight(2, 0.8);
        engine.add_weight(9, 0.1);
        engine.remove_weight(9, 0.5);
        assert!(!engine.readout().visible);

        let update = engine.remove_weight(2, 0.2).expect("valid index");
        assert!(!update.readout.visible);
        assert_eq!(update.readout.percent, 60);
    }

    #[test]
    fn test_stress_field_follows_last_touched_point() {
        let mut engine = engine();
        engine.update(2.5);
        engine.add_weight(1, 0.9);
        let update = engine.add_weight(12, 0.2).expect("valid index");

        let expected_point = engine.weight_points()[12].position;
        assert_eq!(update.stress.stress_point, expected_point);
        assert!((update.stress.stress_level - 0.2).abs() < EPSILON);
        assert_eq!(update.stress.time, 2.5);
        assert_eq!(engine.stress_field(), update.stress);
    }

    #[test]
    fn test_update_only_moves_clock() {
        let mut engine = engine();
        engine.add_weight(7, 0.5);
        let before: Vec<Segment> = engine.segments().to_vec();
        let field = engine.update(10.0);
        assert_eq!(field.time, 10.0);
        assert!((field.stress_level - 0.5).abs() < EPSILON);
        assert_eq!(engine.segments(), before.as_slice());
        assert_eq!(engine.weight(7), Some(0.5));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut engine = engine();
        assert!(engine.add_weight(15, 0.5).is_none());
        assert!(engine.remove_weight(usize::MAX, 0.5).is_none());
        assert!(!engine.move_weight_point(40, Vec3::ONE));
        assert!(!engine.readout().visible);
    }

    #[test]
    fn test_nan_amount_is_noop() {
        let mut engine = engine();
        engine.add_weight(4, 0.25);
        assert!(engine.add_weight(4, f32::NAN).is_none());
        assert!(engine.remove_weight(4, f32::NAN).is_none());
        assert_eq!(engine.weight(4), Some(0.25));
    }

    #[test]
    fn test_moved_point_becomes_stress_point_on_next_change() {
        let mut engine = engine();
        let target = Vec3::new(12.0, 5.0, -3.0);
        assert!(engine.move_weight_point(6, target));
        assert_eq!(engine.stress_field().stress_point, Vec3::ZERO);

        let update = engine.add_weight(6, 0.1).expect("valid index");
        assert_eq!(update.stress.stress_point, target);
    }

    #[test]
    fn test_clear_weights_returns_to_rest() {
        let mut engine = engine();
        engine.add_weight(7, 1.0);
        engine.move_weight_point(7, Vec3::new(1.0, 5.0, 1.0));
        engine.clear_weights();

        assert!(engine.segments().iter().all(Segment::is_at_rest));
        assert!(engine.weight_points().iter().all(|p| p.position == p.rest_position));
        assert_eq!(engine.stress_field().stress_level, 0.0);
        assert!(!engine.readout().visible);
    }

    #[test]
    fn test_marker_rest_height() {
        let engine = engine();
        let point = engine.weight_points()[0];
        assert!((point.rest_position.y - 13.0).abs() < EPSILON);
        assert_eq!(point.rest_position.x, engine.segments()[0].rest_position.x);
    }
}

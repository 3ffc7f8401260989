use std::f32::consts::PI;

/// Number of deck segments in the default bridge.
pub const DEFAULT_SEGMENT_COUNT: usize = 15;

/// Length of one deck segment along the span (X axis).
pub const DEFAULT_SEGMENT_LENGTH: f32 = 25.0;

/// Width of the deck across the span (Z axis).
pub const DEFAULT_SEGMENT_WIDTH: f32 = 15.0;

/// Thickness of a deck segment.
pub const DEFAULT_SEGMENT_HEIGHT: f32 = 3.0;

/// Sag of a fully loaded center segment, in world units.
pub const DEFAULT_MAX_DEFORMATION: f32 = 8.0;

/// Tilt of a fully loaded center segment (22.5 degrees).
pub const DEFAULT_MAX_ROTATION: f32 = PI / 8.0;

/// Horizontal pull toward the center of a fully loaded segment.
pub const DEFAULT_HORIZONTAL_SHIFT: f32 = 1.0;

/// Radius of the stress color falloff around the stress point.
pub const DEFAULT_STRESS_RADIUS: f32 = 20.0;

/// Height of a resting weight marker above the top of the deck.
pub const MARKER_CLEARANCE: f32 = 10.0;

/// Radius of an unscaled weight marker sphere.
pub const MARKER_RADIUS: f32 = 4.0;

/// Marker scale gained per unit of weight (scale = 1 + weight * gain).
pub const MARKER_SCALE_GAIN: f32 = 2.0;

/// Weight percentage at which the readout leaves the Safe band.
pub const WARNING_PERCENT: u32 = 30;

/// Weight percentage at which the readout enters the Danger band.
pub const DANGER_PERCENT: u32 = 60;

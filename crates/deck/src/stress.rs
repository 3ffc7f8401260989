//! Stress field uniforms and the color ramp evaluated by the deck shader.
//!
//! [`stress_color`] is the reference for `stress.wgsl` in the scene crate and
//! [`marker_tint`] the reference for `stress_marker.wgsl`. Each pair must stay
//! in step: same thresholds, same frequencies.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STRESS_RADIUS;

/// Color of an unstressed deck
pub const SAFE_COLOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Color at the Safe/Warning boundary
pub const WARNING_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.0);
/// Color of a fully loaded deck
pub const DANGER_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Flash target inside the warning band
pub const FLASH_COLOR: Vec3 = Vec3::new(1.0, 0.8, 0.0);

/// Stress level where the ramp switches from green→orange to orange→red
pub const RAMP_KNEE: f32 = 0.3;
/// Upper edge of the flashing warning band
pub const FLASH_BAND_END: f32 = 0.6;

/// Angular frequency of the overall pulse
const PULSE_RATE: f32 = 5.0;
/// Angular frequency of the warning flash
const FLASH_RATE: f32 = 8.0;
/// Angular frequency of the additive glow
const GLOW_RATE: f32 = 2.0;

/// Shader uniforms describing the most recently touched weight point.
///
/// There is exactly one field per deck. Mutations replace it wholesale and
/// hand the new value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressField {
    /// Animation clock in seconds
    pub time: f32,
    /// Weight of the last touched point, 0..=1
    pub stress_level: f32,
    /// World position of the last touched point
    pub stress_point: Vec3,
    /// Distance over which the stress color fades out
    pub stress_radius: f32,
}

impl Default for StressField {
    fn default() -> Self {
        Self::new(DEFAULT_STRESS_RADIUS)
    }
}

impl StressField {
    /// Quiet field with the given falloff radius
    pub fn new(stress_radius: f32) -> Self {
        Self {
            time: 0.0,
            stress_level: 0.0,
            stress_point: Vec3::ZERO,
            stress_radius,
        }
    }

    /// Same field focused on a new point and level, keeping the clock
    pub fn touched(self, stress_level: f32, stress_point: Vec3) -> Self {
        Self {
            stress_level,
            stress_point,
            ..self
        }
    }

    /// Same field at a new animation time
    pub fn at_time(self, time: f32) -> Self {
        Self { time, ..self }
    }

    /// Distance from the stress point to `position`, measured across the deck plane (XZ)
    pub fn planar_distance(&self, position: Vec3) -> f32 {
        Vec2::new(position.x, position.z).distance(Vec2::new(self.stress_point.x, self.stress_point.z))
    }

    /// Shaded color of the deck overlay at `position`.
    ///
    /// CPU mirror of what `stress.wgsl` draws for a fragment at that world
    /// position. Nothing in the render path calls it; it pins the shader's
    /// math down in tests.
    pub fn color_at(&self, position: Vec3) -> StressColor {
        stress_color(
            self.planar_distance(position),
            self.stress_level,
            self.time,
            self.stress_radius,
        )
    }
}

/// Linear RGB plus alpha produced by the stress ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressColor {
    pub rgb: Vec3,
    pub alpha: f32,
}

/// Hermite smoothstep, matching WGSL `smoothstep`
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Spatial weighting of the stress color: 1 at the stress point, 0 beyond `radius`
pub fn stress_factor(distance: f32, radius: f32) -> f32 {
    1.0 - smoothstep(0.0, radius, distance)
}

/// Base ramp color before animation: green→orange below the knee, orange→red above
pub fn ramp_color(stress_level: f32) -> Vec3 {
    if stress_level < RAMP_KNEE {
        SAFE_COLOR.lerp(WARNING_COLOR, stress_level / RAMP_KNEE)
    } else {
        WARNING_COLOR.lerp(DANGER_COLOR, (stress_level - RAMP_KNEE) / (1.0 - RAMP_KNEE))
    }
}

/// Full stress color at `distance` from the stress point.
///
/// Deterministic in its inputs; nothing carries over between frames.
pub fn stress_color(distance: f32, stress_level: f32, time: f32, radius: f32) -> StressColor {
    let factor = stress_factor(distance, radius);
    let pulse = (time * PULSE_RATE).sin() * 0.5 + 0.5;

    let mut color = ramp_color(stress_level);

    if (RAMP_KNEE..FLASH_BAND_END).contains(&stress_level) {
        let flash = (time * FLASH_RATE).sin() * 0.5 + 0.5;
        color = color.lerp(FLASH_COLOR, flash * 0.5);
    }

    color *= factor * pulse;
    let glow = 0.5 + 0.5 * (time * GLOW_RATE).sin();
    color += Vec3::splat(glow * stress_level * factor);

    StressColor {
        rgb: color,
        alpha: 0.4 + stress_level * factor * 0.6,
    }
}

/// Tint of the hovering stress marker: blue→red plus the shared glow term.
///
/// CPU mirror of `stress_marker.wgsl`, kept for tests like [`stress_color`].
pub fn marker_tint(stress_level: f32, time: f32) -> Vec3 {
    let glow = 0.5 + 0.5 * (time * GLOW_RATE).sin();
    Vec3::new(0.0, 0.0, 1.0).lerp(Vec3::new(1.0, 0.0, 0.0), stress_level)
        + Vec3::splat(glow * stress_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn test_ramp_endpoints() {
        assert!(close(ramp_color(0.0), SAFE_COLOR));
        assert!(close(ramp_color(RAMP_KNEE), WARNING_COLOR));
        assert!(close(ramp_color(1.0), DANGER_COLOR));
        assert!(close(ramp_color(0.15), Vec3::new(0.5, 0.75, 0.0)));
    }

    #[test]
    fn test_stress_factor_falloff() {
        assert!((stress_factor(0.0, 20.0) - 1.0).abs() < EPSILON);
        assert!((stress_factor(10.0, 20.0) - 0.5).abs() < EPSILON);
        assert_eq!(stress_factor(20.0, 20.0), 0.0);
        assert_eq!(stress_factor(500.0, 20.0), 0.0);
    }

    #[test]
    fn test_quiet_deck_is_translucent_black() {
        let color = stress_color(0.0, 0.0, 1.234, 20.0);
        // pulse scales green, glow adds nothing at zero stress
        assert!(color.rgb.x.abs() < EPSILON);
        assert!(color.rgb.z.abs() < EPSILON);
        assert!((color.alpha - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_outside_radius_only_alpha_floor() {
        let color = stress_color(100.0, 0.9, 0.7, 20.0);
        assert!(close(color.rgb, Vec3::ZERO));
        assert!((color.alpha - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_full_stress_at_point() {
        // t = 0: pulse 0.5, glow 0.5
        let color = stress_color(0.0, 1.0, 0.0, 20.0);
        assert!(close(color.rgb, Vec3::new(1.0, 0.5, 0.5)));
        assert!((color.alpha - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_warning_band_flashes_toward_yellow() {
        // sin(8t) = 1 at t = pi/16; the base color keeps the pulse term
        let time = std::f32::consts::PI / 16.0;
        let level = 0.45;
        let color = stress_color(0.0, level, time, 20.0);

        let pulse = (time * 5.0).sin() * 0.5 + 0.5;
        let glow = 0.5 + 0.5 * (time * 2.0).sin();
        let base = ramp_color(level).lerp(FLASH_COLOR, 0.5);
        let expected = base * pulse + Vec3::splat(glow * level);
        assert!(close(color.rgb, expected));
    }

    #[test]
    fn test_flash_band_excludes_upper_edge() {
        let time = std::f32::consts::PI / 16.0;
        let color = stress_color(0.0, FLASH_BAND_END, time, 20.0);
        let pulse = (time * 5.0).sin() * 0.5 + 0.5;
        let glow = 0.5 + 0.5 * (time * 2.0).sin();
        let expected = ramp_color(FLASH_BAND_END) * pulse + Vec3::splat(glow * FLASH_BAND_END);
        assert!(close(color.rgb, expected));
    }

    #[test]
    fn test_field_planar_distance_ignores_height() {
        let field = StressField::new(20.0).touched(0.5, Vec3::new(10.0, 15.0, 0.0));
        assert!((field.planar_distance(Vec3::new(13.0, 0.0, 4.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_field_builders_keep_other_values() {
        let field = StressField::new(20.0).at_time(3.0);
        let touched = field.touched(0.7, Vec3::X);
        assert_eq!(touched.time, 3.0);
        assert_eq!(touched.stress_radius, 20.0);
        let later = touched.at_time(4.0);
        assert_eq!(later.stress_level, 0.7);
        assert_eq!(later.stress_point, Vec3::X);
    }

    #[test]
    fn test_marker_tint_blends_blue_to_red() {
        assert!(close(marker_tint(0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)));
        assert!(close(marker_tint(1.0, 0.0), Vec3::new(1.5, 0.5, 0.5)));
    }
}

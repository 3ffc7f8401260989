//! Orbit camera around the bridge
//!
//! Controls:
//! - Right mouse drag: Orbit around target
//! - Scroll wheel: Dolly (zoom)
//!
//! The left button belongs to weight dragging.

use bevy::input::mouse::{MouseButton, MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::protocol::PageToScene;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Lowest pitch, keeps the camera above the ground
const MIN_PITCH: f32 = 0.05;
/// Highest pitch, just short of straight down
const MAX_PITCH: f32 = 1.5;

/// Camera orbit controller state
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle (yaw) in radians
    pub yaw: f32,
    /// Vertical angle (pitch) in radians
    pub pitch: f32,
    /// Orbit sensitivity (radians per pixel)
    pub orbit_sensitivity: f32,
    /// Zoom sensitivity (fraction of distance per scroll line)
    pub zoom_sensitivity: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Looking at the deck center from (0, 50, 200), pulled in to the max distance
        Self {
            target: Vec3::ZERO,
            distance: 200.0,
            yaw: 0.0,
            pitch: 50.0_f32.atan2(200.0),
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
            min_distance: 10.0,
            max_distance: 200.0,
        }
    }
}

impl OrbitCamera {
    /// Calculate camera position from orbit parameters
    pub fn calculate_position(&self) -> Vec3 {
        // pitch is angle from horizontal, yaw is angle around Y axis
        let horizontal_distance = self.distance * self.pitch.cos();
        let y = self.distance * self.pitch.sin();
        let x = horizontal_distance * self.yaw.sin();
        let z = horizontal_distance * self.yaw.cos();

        self.target + Vec3::new(x, y, z)
    }

    /// Rotate by a pointer delta in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.orbit_sensitivity;
        self.pitch = (self.pitch + delta.y * self.orbit_sensitivity).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Dolly by scroll lines (positive moves closer)
    pub fn zoom(&mut self, lines: f32) {
        let zoom_amount = lines * self.zoom_sensitivity * self.distance;
        self.distance = (self.distance - zoom_amount).clamp(self.min_distance, self.max_distance);
    }

    /// Reset to default view
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Plugin for the bridge orbit camera
pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                camera_orbit_system,
                camera_zoom_system,
                reset_camera_on_request,
                update_camera_transform,
            )
                .chain(),
        );
    }
}

/// Handle orbit (right mouse drag)
fn camera_orbit_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    if !mouse_button.pressed(MouseButton::Right) {
        motion_events.clear();
        return;
    }

    let mut delta = Vec2::ZERO;
    for event in motion_events.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        orbit.orbit(delta);
    }
}

/// Handle zoom (scroll wheel)
fn camera_zoom_system(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    let mut scroll_delta = 0.0;
    for event in scroll_events.read() {
        scroll_delta += event.y;
    }

    if scroll_delta == 0.0 {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        orbit.zoom(scroll_delta);
    }
}

fn reset_camera_on_request(
    mut page_commands: MessageReader<PageToScene>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    let reset = page_commands
        .read()
        .any(|cmd| *cmd == PageToScene::ResetCamera);
    if !reset {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        orbit.reset();
    }
    info!("Camera reset to default view");
}

/// Update camera transform from orbit state
fn update_camera_transform(
    mut camera_query: Query<(&OrbitCamera, &mut Transform), (With<MainCamera>, Changed<OrbitCamera>)>,
) {
    for (orbit, mut transform) in camera_query.iter_mut() {
        let position = orbit.calculate_position();
        *transform = Transform::from_translation(position).looking_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_default_view_matches_start_position() {
        let orbit = OrbitCamera::default();
        let position = orbit.calculate_position();
        // (0, 50, 200) scaled onto the max distance
        let expected = Vec3::new(0.0, 50.0, 200.0).normalize() * 200.0;
        assert!((position - expected).length() < EPSILON);
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..200 {
            orbit.zoom(5.0);
        }
        assert!((orbit.distance - 10.0).abs() < EPSILON);

        for _ in 0..200 {
            orbit.zoom(-5.0);
        }
        assert!((orbit.distance - 200.0).abs() < EPSILON);
    }

    #[test]
    fn test_orbit_keeps_camera_above_ground() {
        let mut orbit = OrbitCamera::default();
        orbit.orbit(Vec2::new(0.0, -10_000.0));
        assert!(orbit.calculate_position().y > 0.0);

        orbit.orbit(Vec2::new(0.0, 10_000.0));
        assert!((orbit.pitch - MAX_PITCH).abs() < EPSILON);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut orbit = OrbitCamera::default();
        orbit.orbit(Vec2::new(300.0, 40.0));
        orbit.zoom(3.0);
        orbit.reset();
        assert_eq!(orbit, OrbitCamera::default());
    }
}

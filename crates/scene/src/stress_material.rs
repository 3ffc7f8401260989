//! Materials for the stress overlay plane and the hovering stress marker
//!
//! Both shaders read a small uniform block refreshed from the deck's
//! [`StressField`] every frame. The overlay color ramp matches
//! [`deck::stress_color`] term for term.

use bevy::asset::embedded_asset;
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;
use deck::StressField;

/// Uniform block of the stress overlay shader
#[derive(Clone, Copy, ShaderType, Debug, PartialEq)]
pub struct StressUniform {
    /// World position of the last touched weight point
    pub stress_point: Vec3,
    /// Animation clock in seconds
    pub time: f32,
    pub stress_level: f32,
    /// Distance at which the stress color has faded out
    pub stress_radius: f32,
}

impl Default for StressUniform {
    fn default() -> Self {
        StressField::default().into()
    }
}

impl From<StressField> for StressUniform {
    fn from(field: StressField) -> Self {
        Self {
            stress_point: field.stress_point,
            time: field.time,
            stress_level: field.stress_level,
            stress_radius: field.stress_radius,
        }
    }
}

/// Transparent overlay that paints the stress gradient onto the deck
#[derive(Asset, AsBindGroup, TypePath, Clone, Default)]
pub struct StressMaterial {
    #[uniform(0)]
    pub stress: StressUniform,
}

impl Material for StressMaterial {
    fn fragment_shader() -> ShaderRef {
        "embedded://loadspan_scene/shaders/stress.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}

/// Uniform block of the stress marker shader
///
/// The tint it drives is [`deck::marker_tint`].
#[derive(Clone, Copy, ShaderType, Debug, Default, PartialEq)]
pub struct StressMarkerUniform {
    pub stress_level: f32,
    pub time: f32,
    // WebGL2 uniform buffers must be a multiple of 16 bytes
    pub _webgl2_padding: Vec2,
}

impl From<StressField> for StressMarkerUniform {
    fn from(field: StressField) -> Self {
        Self {
            stress_level: field.stress_level,
            time: field.time,
            _webgl2_padding: Vec2::ZERO,
        }
    }
}

/// Blue-to-red glowing tint for the [`crate::bridge::StressMarker`] cylinder
#[derive(Asset, AsBindGroup, TypePath, Clone, Default)]
pub struct StressMarkerMaterial {
    #[uniform(0)]
    pub marker: StressMarkerUniform,
}

impl Material for StressMarkerMaterial {
    fn fragment_shader() -> ShaderRef {
        "embedded://loadspan_scene/shaders/stress_marker.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}

/// Horizontal scale of the stress marker: widens by half at full stress
pub fn stress_marker_scale(stress_level: f32) -> Vec3 {
    let widen = 1.0 + stress_level * 0.5;
    Vec3::new(widen, 1.0, widen)
}

/// Registers both stress materials and embeds their shaders
pub struct StressMaterialPlugin;

impl Plugin for StressMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "shaders/stress.wgsl");
        embedded_asset!(app, "shaders/stress_marker.wgsl");

        app.add_plugins(MaterialPlugin::<StressMaterial>::default())
            .add_plugins(MaterialPlugin::<StressMarkerMaterial>::default());
    }
}

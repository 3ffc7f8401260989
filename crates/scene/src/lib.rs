//! Bridge scene for Loadspan
//!
//! This crate provides the 3D bridge scene used by both the native app and
//! the WASM build: deck spawning, stress shading, weight dragging, the orbit
//! camera, lighting and the on-screen readout.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use loadspan_config::InteractionConfig;

mod bridge;
mod camera;
mod lighting;
mod overlay;
mod protocol;
mod stress_material;
mod weight_drag;

pub use bridge::{
    spawn_bridge, stress_marker_position, BridgeAssetStores, BridgeEntities, BridgePlugin,
    BridgeRoot, BridgeScenery, BridgeSettings, BridgeState, DeckSegment, StressMarker,
    StressOverlay, WeightMarker,
};
pub use camera::{CameraControllerPlugin, MainCamera, OrbitCamera};
pub use lighting::{LightingPlugin, StressLight, SunLight};
pub use overlay::{
    band_color, InstructionsPanel, OverlayPlugin, ReadoutHeadline, ReadoutPanel, ReadoutStatus,
};
pub use protocol::{log_outbound_messages, OutboundPageMessages, PageToScene, SceneToPage};
pub use stress_material::{
    stress_marker_scale, StressMarkerMaterial, StressMarkerUniform, StressMaterial,
    StressMaterialPlugin, StressUniform,
};
pub use weight_drag::{bridge_local_ray, WeightDrag};

/// Sky blue behind the bridge
pub const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);
const FOG_DENSITY: f32 = 0.01;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OutboundPageMessages>()
            .init_resource::<InteractionConfig>()
            .init_resource::<weight_drag::WeightDrag>()
            .add_message::<PageToScene>()
            .insert_resource(ClearColor(SKY_COLOR));

        app.add_plugins(StressMaterialPlugin);
        app.add_plugins(CameraControllerPlugin);
        app.add_plugins(LightingPlugin);
        app.add_plugins(BridgePlugin);
        app.add_plugins(OverlayPlugin);

        app.add_systems(Startup, setup_scene);

        // Input, one engine mutation, then everything that mirrors the engine
        app.add_systems(
            Update,
            (
                bridge::clear_weights_on_request,
                weight_drag::handle_weight_drag,
                bridge::advance_stress_clock,
                bridge::sync_deck_segments,
                bridge::sync_weight_markers,
                bridge::sync_stress_visuals,
                lighting::update_stress_lights,
                overlay::sync_readout,
            )
                .chain(),
        );
    }
}

/// Spawn the camera looking at the bridge
fn setup_scene(mut commands: Commands) {
    // TonyMcMapFace requires tonemapping_luts which needs zstd (not available in WASM)
    let orbit_camera = OrbitCamera::default();
    let camera_position = orbit_camera.calculate_position();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera_position).looking_at(orbit_camera.target, Vec3::Y),
        Tonemapping::Reinhard,
        DistanceFog {
            color: SKY_COLOR,
            falloff: FogFalloff::Exponential {
                density: FOG_DENSITY,
            },
            ..default()
        },
        MainCamera,
        orbit_camera,
    ));

    info!("Scene initialized");
}

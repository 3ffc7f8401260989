//! Sun, ambient fill and the stress-tinted point lights

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::bridge::BridgeState;

/// Marker component for the sun directional light
#[derive(Component)]
pub struct SunLight;

/// Point lights that swap intensity as the deck gets stressed
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressLight {
    /// Brightens with stress
    Red,
    /// Dims with stress
    Blue,
}

/// Luminous power of a stress light at full share
const STRESS_LIGHT_POWER: f32 = 400_000.0;
const STRESS_LIGHT_RANGE: f32 = 20.0;
const SUN_ILLUMINANCE: f32 = 10_000.0;
const AMBIENT_BRIGHTNESS: f32 = 400.0;

impl StressLight {
    /// Share of full power at `stress_level`: red = s/2, blue = (1 - s)/2
    pub fn share(self, stress_level: f32) -> f32 {
        let s = stress_level.clamp(0.0, 1.0);
        match self {
            StressLight::Red => s * 0.5,
            StressLight::Blue => (1.0 - s) * 0.5,
        }
    }

    fn color(self) -> Color {
        match self {
            StressLight::Red => Color::srgb(1.0, 0.0, 0.0),
            StressLight::Blue => Color::srgb(0.0, 0.0, 1.0),
        }
    }

    fn position(self) -> Vec3 {
        match self {
            StressLight::Red => Vec3::new(-10.0, 5.0, 0.0),
            StressLight::Blue => Vec3::new(10.0, 5.0, 0.0),
        }
    }
}

/// Plugin for scene lighting
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_lighting);
    }
}

/// Spawn the sun, the ambient fill and both stress lights
fn setup_lighting(mut commands: Commands) {
    let direction = Vec3::new(5.0, 10.0, 7.5).normalize();

    commands.spawn((
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        // looking_to takes the forward direction; sun shines in -direction
        Transform::default().looking_to(-direction, Vec3::Y),
        SunLight,
    ));

    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    for light in [StressLight::Red, StressLight::Blue] {
        commands.spawn((
            PointLight {
                color: light.color(),
                intensity: STRESS_LIGHT_POWER * light.share(0.0),
                range: STRESS_LIGHT_RANGE,
                ..default()
            },
            Transform::from_translation(light.position()),
            light,
        ));
    }

    info!("Scene lighting initialized");
}

/// Follow the last stress level with the red/blue light pair
pub(crate) fn update_stress_lights(
    bridge: Res<BridgeState>,
    mut lights: Query<(&StressLight, &mut PointLight)>,
) {
    let stress_level = bridge.stress_field().stress_level;
    for (light, mut point) in lights.iter_mut() {
        let intensity = STRESS_LIGHT_POWER * light.share(stress_level);
        if point.intensity != intensity {
            point.intensity = intensity;
        }
    }
}

//! Bridge entities and the deck engine resource
//!
//! The engine in [`BridgeState`] is the only source of truth for weights and
//! poses. Systems here copy its state onto transforms and material uniforms
//! after input has had its turn each frame.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use deck::{
    BridgeLayout, DeckEngine, DeckParams, StressField, WeightChange, WeightUpdate,
};
use std::ops::Deref;

use crate::protocol::{OutboundPageMessages, PageToScene, SceneToPage};
use crate::stress_material::{
    stress_marker_scale, StressMarkerMaterial, StressMarkerUniform, StressMaterial,
};

/// Deck parameters used when the bridge is spawned
#[derive(Resource, Debug, Clone, Default)]
pub struct BridgeSettings {
    pub params: DeckParams,
}

/// The deck engine driving the scene
#[derive(Resource, Debug)]
pub struct BridgeState {
    engine: DeckEngine,
}

impl BridgeState {
    /// Engine for `params`, or for the default deck if `params` is unusable
    pub fn from_params(params: DeckParams) -> Self {
        let engine = match DeckEngine::new(params) {
            Ok(engine) => engine,
            Err(e) => {
                error!("Invalid deck parameters ({}), using defaults", e);
                DeckEngine::default()
            }
        };
        Self { engine }
    }

    pub fn add_weight(&mut self, index: usize, amount: f32) -> Option<WeightUpdate> {
        self.engine.add_weight(index, amount)
    }

    pub fn remove_weight(&mut self, index: usize, amount: f32) -> Option<WeightUpdate> {
        self.engine.remove_weight(index, amount)
    }

    /// Apply one drag step
    pub fn apply_change(&mut self, index: usize, change: WeightChange) -> Option<WeightUpdate> {
        match change {
            WeightChange::Add(amount) => self.add_weight(index, amount),
            WeightChange::Remove(amount) => self.remove_weight(index, amount),
        }
    }

    pub fn update(&mut self, time: f32) -> StressField {
        self.engine.update(time)
    }

    pub fn move_weight_point(&mut self, index: usize, position: Vec3) -> bool {
        self.engine.move_weight_point(index, position)
    }

    pub fn clear_weights(&mut self) {
        self.engine.clear_weights();
    }
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::from_params(DeckParams::default())
    }
}

impl Deref for BridgeState {
    type Target = DeckEngine;

    fn deref(&self) -> &DeckEngine {
        &self.engine
    }
}

/// Parent of every bridge entity
#[derive(Component)]
pub struct BridgeRoot;

/// One deformable deck box
#[derive(Component, Debug, Clone, Copy)]
pub struct DeckSegment {
    pub index: usize,
}

/// Draggable gold load sphere
#[derive(Component, Debug, Clone, Copy)]
pub struct WeightMarker {
    pub index: usize,
}

/// Transparent plane carrying the stress gradient
#[derive(Component)]
pub struct StressOverlay;

/// Thin cylinder standing on the deck at the stress point
#[derive(Component)]
pub struct StressMarker;

/// Static pillars and railings
#[derive(Component)]
pub struct BridgeScenery;

/// Entities created by [`spawn_bridge`]
#[derive(Resource, Debug, Clone)]
pub struct BridgeEntities {
    pub root: Entity,
    /// Deck boxes by segment index
    pub segments: Vec<Entity>,
    /// Load spheres by segment index
    pub weight_points: Vec<Entity>,
    pub stress_plane: Entity,
    pub stress_marker: Entity,
}

/// Asset stores needed to build the bridge
#[derive(SystemParam)]
pub struct BridgeAssetStores<'w> {
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub materials: ResMut<'w, Assets<StandardMaterial>>,
    pub stress_materials: ResMut<'w, Assets<StressMaterial>>,
    pub marker_materials: ResMut<'w, Assets<StressMarkerMaterial>>,
}

/// Height of the stress marker cylinder
const STRESS_MARKER_HEIGHT: f32 = 2.0;
const STRESS_MARKER_RADIUS: f32 = 0.2;

/// Spawn the bridge described by `layout` under a single root entity
pub fn spawn_bridge(
    commands: &mut Commands,
    stores: &mut BridgeAssetStores,
    layout: &BridgeLayout,
) -> BridgeEntities {
    let root = commands
        .spawn((BridgeRoot, Transform::default(), Visibility::default(), Name::new("Bridge")))
        .id();

    // Deck
    let segment_mesh = stores.meshes.add(Cuboid::from_size(layout.segment_size));
    let segment_material = stores.materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x80, 0x80, 0x80),
        metallic: 0.7,
        perceptual_roughness: 0.3,
        ..default()
    });
    let segments = layout
        .segments
        .iter()
        .map(|segment| {
            commands
                .spawn((
                    Mesh3d(segment_mesh.clone()),
                    MeshMaterial3d(segment_material.clone()),
                    Transform::from_translation(segment.position),
                    DeckSegment {
                        index: segment.index,
                    },
                    ChildOf(root),
                ))
                .id()
        })
        .collect();

    // Pillars
    let pillar_material = stores.materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x5C, 0x40, 0x33),
        metallic: 0.1,
        perceptual_roughness: 0.9,
        ..default()
    });
    for pillar in &layout.pillars {
        let mesh = stores.meshes.add(ConicalFrustum {
            radius_top: pillar.top_radius,
            radius_bottom: pillar.bottom_radius,
            height: pillar.height,
        });
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(pillar_material.clone()),
            Transform::from_translation(pillar.center),
            BridgeScenery,
            ChildOf(root),
        ));
    }

    // Railings
    let railing_material = stores.materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x8B, 0x45, 0x13),
        metallic: 0.1,
        perceptual_roughness: 0.8,
        ..default()
    });
    if let Some(post) = layout.posts.first() {
        let post_mesh = stores.meshes.add(Cuboid::from_size(post.size));
        for post in &layout.posts {
            commands.spawn((
                Mesh3d(post_mesh.clone()),
                MeshMaterial3d(railing_material.clone()),
                Transform::from_translation(post.center),
                BridgeScenery,
                ChildOf(root),
            ));
        }
    }
    for rail in &layout.rails {
        commands.spawn((
            Mesh3d(stores.meshes.add(Cuboid::from_size(rail.size))),
            MeshMaterial3d(railing_material.clone()),
            Transform::from_translation(rail.center),
            BridgeScenery,
            ChildOf(root),
        ));
    }

    // Weight markers
    let weight_mesh = stores
        .meshes
        .add(Sphere::new(layout.marker_radius).mesh().uv(32, 18));
    let weight_material = stores.materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xFF, 0xD7, 0x00),
        emissive: LinearRgba::from(Color::srgb_u8(0x88, 0x66, 0x00)) * 0.5,
        metallic: 0.8,
        perceptual_roughness: 0.2,
        ..default()
    });
    let weight_points = layout
        .weight_points
        .iter()
        .map(|point| {
            commands
                .spawn((
                    Mesh3d(weight_mesh.clone()),
                    MeshMaterial3d(weight_material.clone()),
                    Transform::from_translation(point.position)
                        .with_scale(Vec3::splat(point.marker_scale())),
                    WeightMarker { index: point.index },
                    ChildOf(root),
                ))
                .id()
        })
        .collect();

    // Stress overlay
    let plane = layout.stress_plane;
    let stress_plane = commands
        .spawn((
            Mesh3d(
                stores
                    .meshes
                    .add(Plane3d::default().mesh().size(plane.length, plane.width)),
            ),
            MeshMaterial3d(stores.stress_materials.add(StressMaterial::default())),
            Transform::from_translation(plane.center),
            StressOverlay,
            ChildOf(root),
        ))
        .id();

    let stress_marker = commands
        .spawn((
            Mesh3d(
                stores
                    .meshes
                    .add(Cylinder::new(STRESS_MARKER_RADIUS, STRESS_MARKER_HEIGHT)),
            ),
            MeshMaterial3d(stores.marker_materials.add(StressMarkerMaterial::default())),
            Transform::from_translation(stress_marker_position(
                Vec3::ZERO,
                plane.center.y,
            )),
            StressMarker,
            ChildOf(root),
        ))
        .id();

    BridgeEntities {
        root,
        segments,
        weight_points,
        stress_plane,
        stress_marker,
    }
}

/// Where the stress marker stands for a stress point, with its base on the deck
pub fn stress_marker_position(stress_point: Vec3, deck_top: f32) -> Vec3 {
    Vec3::new(
        stress_point.x,
        deck_top + STRESS_MARKER_HEIGHT / 2.0,
        stress_point.z,
    )
}

/// Plugin that owns the deck engine and keeps the bridge entities in sync with it
pub struct BridgePlugin;

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BridgeSettings>()
            .add_systems(Startup, setup_bridge);
    }
}

fn setup_bridge(
    mut commands: Commands,
    mut stores: BridgeAssetStores,
    settings: Res<BridgeSettings>,
    mut outbound: ResMut<OutboundPageMessages>,
) {
    let state = BridgeState::from_params(settings.params);
    let layout = BridgeLayout::new(state.params());
    let entities = spawn_bridge(&mut commands, &mut stores, &layout);

    info!(
        "Bridge spawned with {} segments and {} pillars",
        layout.segments.len(),
        layout.pillars.len()
    );
    outbound.send(SceneToPage::Ready {
        segment_count: layout.segments.len(),
    });

    commands.insert_resource(state);
    commands.insert_resource(entities);
}

/// Feed the frame clock to the stress animation
pub(crate) fn advance_stress_clock(time: Res<Time>, mut bridge: ResMut<BridgeState>) {
    bridge.update(time.elapsed_secs());
}

pub(crate) fn clear_weights_on_request(
    mut page_commands: MessageReader<PageToScene>,
    mut bridge: ResMut<BridgeState>,
) {
    let clear = page_commands
        .read()
        .any(|cmd| *cmd == PageToScene::ClearWeights);
    if clear {
        bridge.clear_weights();
        info!("All weights cleared");
    }
}

/// Copy segment poses from the engine onto the deck boxes
pub(crate) fn sync_deck_segments(
    bridge: Res<BridgeState>,
    mut segments: Query<(&DeckSegment, &mut Transform)>,
) {
    for (segment, mut transform) in segments.iter_mut() {
        let Some(pose) = bridge.segments().get(segment.index) else {
            continue;
        };
        transform.translation = pose.position;
        transform.rotation = Quat::from_rotation_z(pose.rotation_z);
    }
}

/// Copy marker positions and load scale onto the gold spheres
pub(crate) fn sync_weight_markers(
    bridge: Res<BridgeState>,
    mut markers: Query<(&WeightMarker, &mut Transform)>,
) {
    for (marker, mut transform) in markers.iter_mut() {
        let Some(point) = bridge.weight_points().get(marker.index) else {
            continue;
        };
        transform.translation = point.position;
        transform.scale = Vec3::splat(point.marker_scale());
    }
}

/// Push the stress field into both stress materials and move the stress marker
pub(crate) fn sync_stress_visuals(
    bridge: Res<BridgeState>,
    overlay: Query<(&MeshMaterial3d<StressMaterial>, &Transform), With<StressOverlay>>,
    mut marker: Query<
        (&MeshMaterial3d<StressMarkerMaterial>, &mut Transform),
        (With<StressMarker>, Without<StressOverlay>),
    >,
    mut stress_materials: ResMut<Assets<StressMaterial>>,
    mut marker_materials: ResMut<Assets<StressMarkerMaterial>>,
) {
    let field = bridge.stress_field();

    let mut deck_top = bridge.params().segment_height;
    for (handle, transform) in overlay.iter() {
        deck_top = transform.translation.y;
        if let Some(material) = stress_materials.get_mut(&handle.0) {
            material.stress = field.into();
        }
    }

    for (handle, mut transform) in marker.iter_mut() {
        transform.translation = stress_marker_position(field.stress_point, deck_top);
        transform.scale = stress_marker_scale(field.stress_level);
        if let Some(material) = marker_materials.get_mut(&handle.0) {
            material.marker = StressMarkerUniform::from(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_params_fall_back_to_default_deck() {
        let state = BridgeState::from_params(DeckParams::with_segments(0));
        assert_eq!(state.len(), deck::DEFAULT_SEGMENT_COUNT);
    }

    #[test]
    fn test_apply_change_routes_add_and_remove() {
        let mut state = BridgeState::default();
        state.apply_change(3, WeightChange::Add(0.4));
        assert_eq!(state.weight(3), Some(0.4));

        state.apply_change(3, WeightChange::Remove(0.1));
        assert!((state.weight(3).unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_stress_marker_stands_on_deck() {
        let position = stress_marker_position(Vec3::new(50.0, 13.0, -2.0), 3.0);
        assert_eq!(position, Vec3::new(50.0, 4.0, -2.0));
    }
}

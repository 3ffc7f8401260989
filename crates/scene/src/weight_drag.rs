//! Left-button dragging of the weight markers
//!
//! Press on a gold sphere to pick it up. Moving the pointer up adds weight,
//! moving it down removes weight, and the sphere follows the deck under the
//! pointer. Releasing the button drops it.

use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use deck::{pick_weight_point, raycast_deck, DragState, Ray};
use loadspan_config::InteractionConfig;

use crate::bridge::{BridgeRoot, BridgeState};
use crate::camera::MainCamera;

/// Current drag selection, tuned from [`InteractionConfig`]
#[derive(Resource, Debug, Clone, Copy)]
pub struct WeightDrag(pub DragState);

impl FromWorld for WeightDrag {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<InteractionConfig>()
            .copied()
            .unwrap_or_default();
        Self(DragState::from(config))
    }
}

/// Express a world-space pointer ray in the bridge root's space
pub fn bridge_local_ray(ray: Ray3d, root: &GlobalTransform) -> Ray {
    let to_local = root.affine().inverse();
    Ray::new(
        to_local.transform_point3(ray.origin),
        to_local.transform_vector3(*ray.direction).normalize_or_zero(),
    )
}

/// Pick, drag and drop weight markers
pub(crate) fn handle_weight_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut cursor_events: MessageReader<CursorMoved>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    root_query: Query<&GlobalTransform, With<BridgeRoot>>,
    mut drag: ResMut<WeightDrag>,
    mut bridge: ResMut<BridgeState>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        return;
    };

    // Only the latest position matters; the drag tracks its own last Y
    let cursor = cursor_events
        .read()
        .filter(|e| e.window == window_entity)
        .map(|e| e.position)
        .last();

    if mouse_button.just_released(MouseButton::Left) {
        if let Some(index) = drag.0.selected() {
            debug!("Released weight point {}", index);
        }
        drag.0.release();
        return;
    }

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(root) = root_query.single() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        let Some(cursor_pos) = cursor.or_else(|| window.cursor_position()) else {
            return;
        };
        let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
            return;
        };
        let ray = bridge_local_ray(ray, root);
        let pick = pick_weight_point(ray, bridge.weight_points());
        if let Some(index) = drag.0.press(pick, cursor_pos.y) {
            debug!("Picked weight point {}", index);
        }
        return;
    }

    let Some(cursor_pos) = cursor else {
        return;
    };
    let Some(step) = drag.0.drag(cursor_pos.y) else {
        return;
    };

    bridge.apply_change(step.index, step.change);

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };
    let ray = bridge_local_ray(ray, root);
    if let Some(hit) = raycast_deck(ray, bridge.segments(), bridge.params()) {
        let position = drag.0.marker_position(hit.point, 0.0);
        bridge.move_weight_point(step.index, position);
    }
}

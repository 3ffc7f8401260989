//! End-to-end behavior of the deck engine through its public API.

use deck::{
    falloff, falloff_at_offset, pick_weight_point, raycast_deck, BridgeLayout, DeckEngine,
    DeckParams, DragState, Ray, StressBand, WeightChange,
};
use glam::Vec3;

const EPSILON: f32 = 1e-5;

fn default_engine() -> DeckEngine {
    DeckEngine::new(DeckParams::default()).expect("default deck is valid")
}

#[test]
fn weights_stay_in_unit_range_for_any_amount() {
    let mut engine = default_engine();
    for amount in [0.3, -0.7, 5.0, -12.0, 0.0, 1e9, -1e9, f32::INFINITY] {
        engine.add_weight(5, amount);
        let weight = engine.weight(5).expect("valid index");
        assert!((0.0..=1.0).contains(&weight), "add {} gave {}", amount, weight);

        engine.remove_weight(5, amount);
        let weight = engine.weight(5).expect("valid index");
        assert!((0.0..=1.0).contains(&weight), "remove {} gave {}", amount, weight);
    }
}

#[test]
fn add_and_remove_clamp_at_the_bounds() {
    let mut engine = default_engine();
    engine.add_weight(3, 0.6);
    engine.add_weight(3, 0.3);
    assert!((engine.weight(3).unwrap() - 0.9).abs() < EPSILON);

    engine.remove_weight(3, 0.5);
    assert!((engine.weight(3).unwrap() - 0.4).abs() < EPSILON);

    engine.remove_weight(3, 0.5);
    assert_eq!(engine.weight(3), Some(0.0));
}

#[test]
fn repeated_full_loads_never_exceed_one() {
    let mut engine = default_engine();
    for _ in 0..10 {
        let update = engine.add_weight(11, 1.0).expect("valid index");
        assert_eq!(update.weight, 1.0);
    }
}

#[test]
fn falloff_is_one_at_center_and_zero_at_abutments() {
    assert!((falloff(7, 15) - 1.0).abs() < EPSILON);
    assert_eq!(falloff_at_offset(7.5, 15), 0.0);
    assert_eq!(falloff_at_offset(-7.5, 15), 0.0);
}

#[test]
fn readout_bands_switch_at_thresholds() {
    assert_eq!(StressBand::from_percent(29), StressBand::Safe);
    assert_eq!(StressBand::from_percent(30), StressBand::Warning);
    assert_eq!(StressBand::from_percent(59), StressBand::Warning);
    assert_eq!(StressBand::from_percent(60), StressBand::Danger);
    assert_eq!(StressBand::Danger.label(), "Danger!");
}

#[test]
fn half_load_on_center_segment_drops_it_by_four() {
    let mut engine = default_engine();
    let update = engine.add_weight(7, 0.5).expect("valid index");

    let center = engine.segments()[7];
    assert!((center.sag() - 4.0).abs() < EPSILON);
    assert!(update.readout.visible);
    assert_eq!(update.readout.percent, 50);
    assert_eq!(update.readout.band, StressBand::Warning);
    assert_eq!(update.readout.headline(), "Weight: 50%");
}

#[test]
fn load_then_unload_returns_to_rest() {
    let mut engine = default_engine();
    engine.add_weight(0, 0.9);
    assert!(!engine.segments()[0].is_at_rest());

    let update = engine.remove_weight(0, 0.9).expect("valid index");
    assert_eq!(update.weight, 0.0);
    assert!(!update.readout.visible);
    assert!(engine.segments().iter().all(|segment| segment.is_at_rest()));
}

#[test]
fn out_of_range_index_changes_nothing() {
    let mut engine = default_engine();
    engine.add_weight(2, 0.4);
    let before_segments = engine.segments().to_vec();
    let before_stress = engine.stress_field();
    let before_readout = engine.readout();

    assert!(engine.add_weight(99, 0.5).is_none());
    assert_eq!(engine.segments(), before_segments.as_slice());
    assert_eq!(engine.stress_field(), before_stress);
    assert_eq!(engine.readout(), before_readout);
}

#[test]
fn drag_gesture_loads_the_picked_marker() {
    let mut engine = default_engine();
    let layout = BridgeLayout::new(engine.params());
    let mut drag = DragState::default();

    // Straight down onto marker 10
    let target = layout.weight_points[10].position;
    let ray = Ray::new(target + Vec3::Y * 80.0, Vec3::NEG_Y);
    let pick = pick_weight_point(ray, engine.weight_points());
    assert_eq!(drag.press(pick, 400.0), Some(10));

    // 100 px upward
    let step = drag.drag(300.0).expect("marker held");
    let amount = match step.change {
        WeightChange::Add(amount) => amount,
        WeightChange::Remove(_) => panic!("upward motion should add weight"),
    };
    let update = engine.add_weight(step.index, amount).expect("valid index");
    assert!((update.weight - 0.5).abs() < EPSILON);

    // Marker follows the deck under the pointer
    let deck_ray = Ray::new(Vec3::new(target.x + 3.0, 60.0, 2.0), Vec3::NEG_Y);
    let hit = raycast_deck(deck_ray, engine.segments(), engine.params()).expect("over deck");
    let position = drag.marker_position(hit.point, 0.0);
    assert!(engine.move_weight_point(step.index, position));
    assert!((engine.weight_points()[10].position.y - 5.0).abs() < EPSILON);

    drag.release();
    assert!(!drag.is_dragging());
}

#[test]
fn stress_color_is_hot_near_the_load() {
    let mut engine = default_engine();
    let update = engine.add_weight(7, 1.0).expect("valid index");
    let field = engine.update(0.1);
    assert_eq!(field.stress_point, update.stress.stress_point);

    let near = field.color_at(field.stress_point);
    let far = field.color_at(field.stress_point + Vec3::new(100.0, 0.0, 0.0));
    assert!(near.alpha > far.alpha);
    assert!((far.alpha - 0.4).abs() < EPSILON);
    assert!((near.alpha - 1.0).abs() < EPSILON);
}

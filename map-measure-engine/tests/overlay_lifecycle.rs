use bevy::math::DVec3;

use map_measure_engine::overlay::{OverlayManager, ShapeKind};

#[test]
fn finalized_shapes_stay_in_the_sweep_set() {
    let mut overlays = OverlayManager::default();
    overlays.add_marker(DVec3::ZERO);
    overlays.add_marker(DVec3::X);
    overlays.ensure_live_shape(ShapeKind::Line);
    overlays.finalize_shape(ShapeKind::Line, vec![DVec3::ZERO, DVec3::X]);
    overlays.release_live();

    assert_eq!(overlays.frozen_shape_count(), 1);
    overlays.remove_all();
    assert!(overlays.is_empty());
    assert_eq!(overlays.frozen_shape_count(), 0);
}

#[test]
fn live_shape_allocation_is_idempotent() {
    let mut overlays = OverlayManager::default();
    overlays.ensure_live_shape(ShapeKind::Line);
    overlays.ensure_live_shape(ShapeKind::Polygon);

    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays.live_shape(), Some(ShapeKind::Polygon));
}

#[test]
fn label_is_replaced_in_place() {
    let mut overlays = OverlayManager::default();
    overlays.init_label();
    overlays.set_label(DVec3::ZERO, "Distance: 1.00 m".to_string());
    overlays.set_label(DVec3::X, "Distance: 2.00 m".to_string());

    assert_eq!(overlays.len(), 1);
    let (anchor, text) = overlays.label().expect("label exists");
    assert_eq!(anchor, Some(DVec3::X));
    assert_eq!(text, "Distance: 2.00 m");
}

#[test]
fn set_label_without_init_creates_one() {
    let mut overlays = OverlayManager::default();
    overlays.set_label(DVec3::ZERO, "Area: 6.00 m²".to_string());

    let (anchor, text) = overlays.label().expect("label created on demand");
    assert_eq!(anchor, Some(DVec3::ZERO));
    assert_eq!(text, "Area: 6.00 m²");
}

#[test]
fn release_live_keeps_committed_artifacts() {
    let mut overlays = OverlayManager::default();
    overlays.add_marker(DVec3::ZERO);
    overlays.set_floating_marker(DVec3::X);
    overlays.ensure_live_shape(ShapeKind::Polygon);
    overlays.finalize_shape(ShapeKind::Polygon, vec![DVec3::ZERO, DVec3::X, DVec3::Z]);
    overlays.init_label();

    overlays.release_live();

    assert!(overlays.live_shape().is_none());
    assert!(!overlays.has_floating_marker());
    assert_eq!(overlays.marker_count(), 1);
    assert_eq!(overlays.frozen_shape_count(), 1);
    assert!(overlays.label().is_some());
    assert_eq!(overlays.len(), 3);
}

#[test]
fn removing_one_handle_invalidates_only_that_handle() {
    let mut overlays = OverlayManager::default();
    let marker = overlays.add_marker(DVec3::ZERO);
    let frozen = overlays.finalize_shape(ShapeKind::Line, vec![DVec3::ZERO, DVec3::X]);

    assert!(overlays.remove(marker));
    assert!(!overlays.remove(marker));
    assert_eq!(overlays.frozen_shape_count(), 1);
    assert!(overlays.remove(frozen));
    assert!(overlays.is_empty());
}

#[test]
fn sweeping_twice_is_harmless_and_ids_never_come_back() {
    let mut overlays = OverlayManager::default();
    let before = overlays.add_marker(DVec3::ZERO);
    overlays.remove_all();
    overlays.remove_all();

    let after = overlays.add_marker(DVec3::ZERO);
    assert_ne!(before, after);
    assert_eq!(overlays.len(), 1);
}

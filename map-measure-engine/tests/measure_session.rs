use bevy::math::{DVec3, Vec2};

use map_measure_engine::geometry::PlanarGeometry;
use map_measure_engine::surface::CoordinateProvider;
use map_measure_engine::tools::measure::{MeasureEvent, MeasureKind, MeasureTool};

/// Maps screen pixels straight onto the ground plane, one metre per pixel.
struct FlatPicker;

impl CoordinateProvider for FlatPicker {
    fn pick(&self, screen: Vec2) -> Option<DVec3> {
        Some(DVec3::new(screen.x as f64, 0.0, screen.y as f64))
    }
}

/// Like `FlatPicker`, but everything left of x = 0 misses the surface.
struct EdgePicker;

impl CoordinateProvider for EdgePicker {
    fn pick(&self, screen: Vec2) -> Option<DVec3> {
        if screen.x < 0.0 {
            None
        } else {
            Some(DVec3::new(screen.x as f64, 0.0, screen.y as f64))
        }
    }
}

fn planar_tool() -> MeasureTool {
    MeasureTool::new(Box::new(PlanarGeometry))
}

fn completed(events: &[MeasureEvent]) -> Option<&MeasureEvent> {
    events
        .iter()
        .find(|event| matches!(event, MeasureEvent::Completed { .. }))
}

fn count_terminated(events: &[MeasureEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, MeasureEvent::Terminated))
        .count()
}

#[test]
fn distance_is_sum_of_committed_segments() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_click(&FlatPicker, Vec2::new(30.0, 40.0), 2_000); // 50 m leg
    tool.on_click(&FlatPicker, Vec2::new(30.0, 100.0), 3_000); // 60 m leg
    tool.terminate();

    let events = tool.take_events();
    let Some(MeasureEvent::Completed {
        kind,
        value,
        points,
        ..
    }) = completed(&events)
    else {
        panic!("three committed vertices must produce a completed measurement");
    };
    assert_eq!(*kind, MeasureKind::Distance);
    assert!((value - 110.0).abs() < 1e-9);
    assert_eq!(points.len(), 3);
    assert!(!tool.is_measuring());
}

#[test]
fn final_distance_excludes_the_cursor_sample() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 30.0), 2_000);
    // Cursor wanders far away before the measurement is finished.
    tool.on_move(&FlatPicker, Vec2::new(0.0, 500.0));
    tool.terminate();

    let events = tool.take_events();
    let Some(MeasureEvent::Completed { value, points, .. }) = completed(&events) else {
        panic!("expected a completed measurement");
    };
    assert!((value - 30.0).abs() < 1e-9);
    assert_eq!(points.len(), 2);
}

#[test]
fn live_preview_includes_the_cursor_sample() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_move(&FlatPicker, Vec2::new(10.0, 0.0));

    let events = tool.take_events();
    let live = events
        .iter()
        .rev()
        .find_map(|event| match event {
            MeasureEvent::LiveUpdated { value, text, .. } => Some((*value, text.clone())),
            _ => None,
        })
        .expect("a move after the first vertex must update the live value");
    assert!((live.0 - 10.0).abs() < 1e-9);
    assert_eq!(live.1, "Distance: 10.00 m");
}

#[test]
fn right_triangle_closes_to_area_six() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Area);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_click(&FlatPicker, Vec2::new(3.0, 0.0), 2_000);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 4.0), 3_000);
    tool.on_right_click();

    let events = tool.take_events();
    let Some(MeasureEvent::Completed { kind, value, .. }) = completed(&events) else {
        panic!("three committed vertices must freeze a polygon");
    };
    assert_eq!(*kind, MeasureKind::Area);
    assert!((value - 6.0).abs() < 1e-9);
    assert_eq!(tool.overlays().frozen_shape_count(), 1);
}

#[test]
fn fast_second_click_terminates_without_committing() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_click(&FlatPicker, Vec2::new(10.0, 0.0), 2_000);
    // 300 ms after the previous click: the double-click gesture.
    tool.on_click(&FlatPicker, Vec2::new(10.0, 0.0), 2_300);

    assert!(!tool.is_measuring());
    let events = tool.take_events();
    assert_eq!(count_terminated(&events), 1);
    let vertex_count = events
        .iter()
        .filter(|event| matches!(event, MeasureEvent::VertexAdded { .. }))
        .count();
    assert_eq!(vertex_count, 2);
    let Some(MeasureEvent::Completed { value, points, .. }) = completed(&events) else {
        panic!("two committed vertices must freeze a line");
    };
    assert!((value - 10.0).abs() < 1e-9);
    assert_eq!(points.len(), 2);
}

#[test]
fn click_on_the_interval_boundary_is_a_single_click() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    // Exactly 500 ms later: strictly-less-than means this commits a vertex.
    tool.on_click(&FlatPicker, Vec2::new(10.0, 0.0), 1_500);

    assert!(tool.is_measuring());
    assert_eq!(tool.committed_points().len(), 2);
    assert_eq!(count_terminated(&tool.take_events()), 0);
}

#[test]
fn terminate_below_minimum_freezes_nothing() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.terminate();

    assert!(!tool.is_measuring());
    assert_eq!(tool.overlays().frozen_shape_count(), 0);
    assert!(completed(&tool.take_events()).is_none());
    // The committed marker and the label persist until a clear.
    assert_eq!(tool.overlays().marker_count(), 1);

    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Area);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_click(&FlatPicker, Vec2::new(5.0, 0.0), 2_000);
    tool.terminate();

    assert!(!tool.is_measuring());
    assert_eq!(tool.overlays().frozen_shape_count(), 0);
    assert!(completed(&tool.take_events()).is_none());
}

#[test]
fn clear_sweeps_everything_and_is_idempotent() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Area);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_click(&FlatPicker, Vec2::new(3.0, 0.0), 2_000);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 4.0), 3_000);
    tool.terminate();
    assert!(!tool.overlays().is_empty());

    tool.clear();
    assert!(tool.overlays().is_empty());
    assert!(tool.committed_points().is_empty());

    tool.clear();
    assert!(tool.overlays().is_empty());
}

#[test]
fn restarting_discards_the_uncommitted_session() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    assert!(tool.overlays().live_shape().is_some());

    tool.start_measure(MeasureKind::Area);
    // No leftover live line, markers or vertices from the distance session.
    assert!(tool.overlays().live_shape().is_none());
    assert_eq!(tool.overlays().marker_count(), 0);
    assert!(tool.committed_points().is_empty());
    assert_eq!(tool.kind(), MeasureKind::Area);

    tool.on_click(&FlatPicker, Vec2::new(1.0, 1.0), 5_000);
    assert_eq!(
        tool.overlays().live_shape(),
        Some(map_measure_engine::overlay::ShapeKind::Polygon)
    );
}

#[test]
fn move_before_any_click_is_a_noop() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.take_events();

    tool.on_move(&FlatPicker, Vec2::new(10.0, 10.0));

    assert!(tool.committed_points().is_empty());
    assert!(!tool.overlays().has_floating_marker());
    assert!(tool.overlays().live_shape().is_none());
    assert!(tool.take_events().is_empty());
}

#[test]
fn events_while_idle_are_noops() {
    let mut tool = planar_tool();
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);
    tool.on_move(&FlatPicker, Vec2::new(1.0, 1.0));
    tool.on_right_click();
    tool.terminate();

    assert!(tool.overlays().is_empty());
    assert!(tool.take_events().is_empty());
}

#[test]
fn missed_pick_commits_nothing_but_still_advances_the_clock() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&EdgePicker, Vec2::new(5.0, 5.0), 1_000);
    // Off the surface: no vertex, but the click is still timed.
    tool.on_click(&EdgePicker, Vec2::new(-5.0, 0.0), 2_000);
    assert_eq!(tool.committed_points().len(), 1);

    // 300 ms after the missed click: read as a double-click.
    tool.on_click(&EdgePicker, Vec2::new(5.0, 5.0), 2_300);
    assert!(!tool.is_measuring());
    assert_eq!(tool.overlays().frozen_shape_count(), 0);
}

#[test]
fn label_follows_the_cursor_and_unit_policy() {
    let mut tool = planar_tool();
    tool.start_measure(MeasureKind::Distance);
    tool.on_click(&FlatPicker, Vec2::new(0.0, 0.0), 1_000);

    tool.on_move(&FlatPicker, Vec2::new(50.0, 0.0));
    let (anchor, text) = tool.overlays().label().expect("label allocated at start");
    assert_eq!(anchor, Some(DVec3::new(50.0, 0.0, 0.0)));
    assert_eq!(text, "Distance: 50.00 m");

    tool.on_move(&FlatPicker, Vec2::new(200.0, 0.0));
    let (_, text) = tool.overlays().label().expect("label persists");
    assert_eq!(text, "Distance: 0.20 km");
}

#![allow(clippy::float_cmp)]

use super::*;

fn make_marker(x: f64, y: f64) -> Marker {
    Marker {
        id: new_marker_id(),
        canvas_position: Point::new(x, y),
        logical_position: LogicalPoint::new(0, 0),
        classification: ArcRegion::InsideArc,
        radius: 25.0,
        is_dragging: false,
    }
}

// =============================================================
// Ids
// =============================================================

#[test]
fn ids_are_distinct_within_a_session() {
    let ids: std::collections::HashSet<MarkerId> = (0..1000).map(|_| new_marker_id()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn ids_are_time_ordered() {
    let a = new_marker_id();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let b = new_marker_id();
    assert!(a < b);
}

// =============================================================
// MarkerPatch
// =============================================================

#[test]
fn patch_applies_only_present_fields() {
    let mut m = make_marker(10.0, 20.0);
    let patch = MarkerPatch { canvas_position: Some(Point::new(30.0, 40.0)), ..Default::default() };
    patch.apply_to(&mut m);
    assert_eq!(m.canvas_position, Point::new(30.0, 40.0));
    assert_eq!(m.logical_position, LogicalPoint::new(0, 0));
    assert_eq!(m.classification, ArcRegion::InsideArc);
    assert!(!m.is_dragging);
}

#[test]
fn patch_dragging_helper() {
    let mut m = make_marker(0.0, 0.0);
    MarkerPatch::dragging(true).apply_to(&mut m);
    assert!(m.is_dragging);
    MarkerPatch::dragging(false).apply_to(&mut m);
    assert!(!m.is_dragging);
}

#[test]
fn patch_serde_skips_absent_fields() {
    let json = serde_json::to_value(MarkerPatch::dragging(true)).unwrap();
    assert_eq!(json, serde_json::json!({ "isDragging": true }));
}

// =============================================================
// MarkerStore
// =============================================================

#[test]
fn store_new_is_empty() {
    let store = MarkerStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn store_add_preserves_insertion_order() {
    let mut store = MarkerStore::new();
    let a = make_marker(1.0, 1.0);
    let b = make_marker(2.0, 2.0);
    store.add(a.clone());
    store.add(b.clone());
    assert_eq!(store.markers(), &[a, b]);
}

#[test]
fn store_update_by_id_merges() {
    let mut store = MarkerStore::new();
    let m = make_marker(1.0, 1.0);
    let id = m.id;
    store.add(m);
    let patch = MarkerPatch {
        classification: Some(ArcRegion::OutsideArc),
        is_dragging: Some(true),
        ..Default::default()
    };
    assert!(store.update_by_id(&id, &patch));
    let Some(updated) = store.get(&id) else {
        panic!("marker should exist");
    };
    assert_eq!(updated.classification, ArcRegion::OutsideArc);
    assert!(updated.is_dragging);
    assert_eq!(updated.canvas_position, Point::new(1.0, 1.0));
}

#[test]
fn store_update_missing_id_is_noop() {
    let mut store = MarkerStore::new();
    store.add(make_marker(1.0, 1.0));
    let before = store.markers().to_vec();
    assert!(!store.update_by_id(&new_marker_id(), &MarkerPatch::dragging(true)));
    assert_eq!(store.markers(), before.as_slice());
}

#[test]
fn store_update_after_clear_is_noop() {
    let mut store = MarkerStore::new();
    let m = make_marker(1.0, 1.0);
    let id = m.id;
    store.add(m);
    store.clear_all();
    assert!(!store.update_by_id(&id, &MarkerPatch::dragging(false)));
    assert!(store.is_empty());
}

#[test]
fn store_clear_all_empties() {
    let mut store = MarkerStore::new();
    for i in 0..5 {
        store.add(make_marker(f64::from(i), 0.0));
    }
    store.clear_all();
    assert!(store.is_empty());
}

#[test]
fn store_find_at_uses_marker_radius_by_default() {
    let mut store = MarkerStore::new();
    let m = make_marker(100.0, 100.0);
    let id = m.id;
    store.add(m);
    assert_eq!(store.find_at(Point::new(105.0, 102.0), None).map(|m| m.id), Some(id));
    assert_eq!(store.find_at(Point::new(125.0, 100.0), None).map(|m| m.id), Some(id));
    assert!(store.find_at(Point::new(126.0, 100.0), None).is_none());
}

#[test]
fn store_snapshot_is_independent_copy() {
    let mut store = MarkerStore::new();
    store.add(make_marker(1.0, 1.0));
    let snapshot = store.snapshot();
    store.clear_all();
    assert_eq!(snapshot.len(), 1);
    assert!(store.is_empty());
}

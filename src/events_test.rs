#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::{LogicalPoint, Point};

fn marker_at(x: i32, y: i32, classification: ArcRegion) -> Marker {
    Marker {
        id: crate::marker::new_marker_id(),
        canvas_position: Point::new(0.0, 0.0),
        logical_position: LogicalPoint::new(x, y),
        classification,
        radius: 25.0,
        is_dragging: false,
    }
}

// =============================================================
// Event ids
// =============================================================

#[test]
fn event_id_has_prefix_millis_and_base36_suffix() {
    let id = new_event_id();
    let mut parts = id.split('_');
    assert_eq!(parts.next(), Some("event"));
    let millis = parts.next().unwrap_or_default();
    assert!(!millis.is_empty());
    assert!(millis.chars().all(|c| c.is_ascii_digit()));
    let suffix = parts.next().unwrap_or_default();
    assert_eq!(suffix.len(), 9);
    assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_eq!(parts.next(), None);
}

#[test]
fn event_ids_differ() {
    assert_ne!(new_event_id(), new_event_id());
}

// =============================================================
// Enrichment
// =============================================================

#[test]
fn placed_inside_arc_is_two_point_attempt() {
    let m = marker_at(0, 13, ArcRegion::InsideArc);
    let ev = DomainEvent::placed(&m);
    assert_eq!(ev.kind, EventKind::Placed);
    assert_eq!(ev.marker_id, m.id);
    assert_eq!((ev.logical_x, ev.logical_y), (0, 13));
    assert_eq!(ev.shot_code, "FG2A");
    assert_eq!(ev.shot_value, 2);
    assert_eq!(ev.shot_distance, 13.0);
    assert_eq!(ev.description, "SHOT_PLACED at court position (0, 13)");
    assert!(ev.timestamp > 0);
}

#[test]
fn moved_outside_arc_is_three_point_attempt() {
    let m = marker_at(-3, 4, ArcRegion::OutsideArc);
    let ev = DomainEvent::moved(&m);
    assert_eq!(ev.kind, EventKind::Moved);
    assert_eq!(ev.shot_code, "FG3A");
    assert_eq!(ev.shot_value, 3);
    assert_eq!(ev.shot_distance, 5.0);
    assert_eq!(ev.description, "SHOT_MOVED at court position (-3, 4)");
}

#[test]
fn event_serializes_camel_case() {
    let ev = DomainEvent::placed(&marker_at(1, 2, ArcRegion::InsideArc));
    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(json["kind"], "placed");
    assert_eq!(json["shotCode"], "FG2A");
    assert_eq!(json["shotValue"], 2);
    assert_eq!(json["logicalX"], 1);
    assert_eq!(json["classification"], "insideArc");
    assert!(json["eventId"].as_str().unwrap().starts_with("event_"));
}

// =============================================================
// Sink
// =============================================================

#[tokio::test]
async fn sink_delivers_in_order() {
    let (sink, mut rx) = EventSink::channel(4);
    let a = DomainEvent::placed(&marker_at(1, 1, ArcRegion::InsideArc));
    let b = DomainEvent::moved(&marker_at(2, 2, ArcRegion::InsideArc));
    sink.emit(a.clone());
    sink.emit(b.clone());
    assert_eq!(rx.recv().await, Some(a));
    assert_eq!(rx.recv().await, Some(b));
}

#[tokio::test]
async fn sink_drops_when_full() {
    let (sink, mut rx) = EventSink::channel(1);
    let a = DomainEvent::placed(&marker_at(1, 1, ArcRegion::InsideArc));
    sink.emit(a.clone());
    sink.emit(DomainEvent::placed(&marker_at(9, 9, ArcRegion::InsideArc)));
    assert_eq!(rx.recv().await, Some(a));
    assert!(rx.try_recv().is_err());
}

#[test]
fn sink_survives_closed_consumer() {
    let (sink, rx) = EventSink::channel(1);
    drop(rx);
    sink.emit(DomainEvent::placed(&marker_at(1, 1, ArcRegion::InsideArc)));
}

#[test]
fn default_sink_discards() {
    EventSink::default().emit(DomainEvent::placed(&marker_at(1, 1, ArcRegion::InsideArc)));
}

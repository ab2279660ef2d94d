//! Domain events for placed and moved shots.
//!
//! Each committed placement or completed drag produces one [`DomainEvent`]
//! carrying the marker's logical coordinates, its arc classification and the
//! attempt code derived from it. Events go out on a bounded queue; a slow or
//! absent consumer drops events with a warning and never blocks the gesture
//! pipeline.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::marker::{Marker, MarkerId};
use crate::region::ArcRegion;

const EVENT_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const EVENT_ID_SUFFIX_LEN: usize = 9;

/// What happened to the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Placed,
    Moved,
}

impl EventKind {
    /// Upper-case tag used in event descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Placed => "SHOT_PLACED",
            Self::Moved => "SHOT_MOVED",
        }
    }
}

/// A shot event destined for the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    /// `event_<ms>_<9 base36 chars>`.
    pub event_id: String,
    pub kind: EventKind,
    pub marker_id: MarkerId,
    pub logical_x: i32,
    pub logical_y: i32,
    pub classification: ArcRegion,
    /// `FG2A` inside the arc, `FG3A` outside.
    pub shot_code: String,
    /// Points the attempt is worth if made.
    pub shot_value: u8,
    /// Distance from court centre in logical units.
    pub shot_distance: f64,
    pub description: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl DomainEvent {
    /// Event for a freshly placed marker.
    #[must_use]
    pub fn placed(marker: &Marker) -> Self {
        Self::from_marker(EventKind::Placed, marker)
    }

    /// Event for a marker whose drag just ended.
    #[must_use]
    pub fn moved(marker: &Marker) -> Self {
        Self::from_marker(EventKind::Moved, marker)
    }

    fn from_marker(kind: EventKind, marker: &Marker) -> Self {
        let lp = marker.logical_position;
        Self {
            event_id: new_event_id(),
            kind,
            marker_id: marker.id,
            logical_x: lp.x,
            logical_y: lp.y,
            classification: marker.classification,
            shot_code: marker.classification.attempt_code().to_owned(),
            shot_value: marker.classification.shot_value(),
            shot_distance: lp.distance_from_center(),
            description: format!("{} at court position ({}, {})", kind.label(), lp.x, lp.y),
            timestamp: now_ms(),
        }
    }
}

/// Generate an event id: `event_`, the current epoch millis, `_`, and nine
/// random lowercase base-36 characters.
#[must_use]
pub fn new_event_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..EVENT_ID_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..EVENT_ID_ALPHABET.len());
            EVENT_ID_ALPHABET[idx] as char
        })
        .collect();
    format!("event_{}_{suffix}", now_ms())
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Producer side of the domain-event queue.
///
/// A default sink has no queue and silently discards events.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::Sender<DomainEvent>>,
}

impl EventSink {
    /// Create a sink and its consumer with room for `capacity` events.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<DomainEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    /// Wrap an existing sender.
    #[must_use]
    pub fn new(tx: mpsc::Sender<DomainEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Queue `event` without waiting. Drops it with a warning when the queue is
    /// full or the consumer has gone away.
    pub fn emit(&self, event: DomainEvent) {
        let Some(tx) = &self.tx else {
            return;
        };

        match tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(ev)) => {
                warn!(event_id = %ev.event_id, marker_id = %ev.marker_id, "domain event queue full; dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(ev)) => {
                warn!(event_id = %ev.event_id, marker_id = %ev.marker_id, "domain event queue closed; dropping event");
            }
        }
    }
}

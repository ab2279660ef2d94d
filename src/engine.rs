//! Engine: the main context that owns the marker store, and the gesture worker
//! that feeds it.
//!
//! [`Engine::new`] returns both halves. The [`GestureWorker`] moves to the
//! gesture context, reads layout and marker snapshots, and sends [`Commit`]s
//! over an unbounded channel. The [`Engine`] stays on the main context, applies
//! commits in arrival order, republishes the marker snapshot after each one,
//! and returns [`Action`]s for the host.
//!
//! The engine also counts the queued commits it has applied. A driver that
//! needs lockstep (the replay binary, tests) calls [`GestureWorker::settle`]
//! after each event so the next hit-test sees the markers that event made.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::arbiter::{Commit, GestureArbiter, GestureView, PlaceTrigger};
use crate::config::CourtConfig;
use crate::events::{DomainEvent, EventSink};
use crate::geom::LayoutRect;
use crate::input::PointerEvent;
use crate::layout::{LayoutReader, LayoutSnapshot, LayoutTracker};
use crate::marker::{Marker, MarkerId, MarkerPatch, MarkerSnapshot, MarkerStore};
use crate::render::{RenderMarker, render_list};

/// Outcomes the host reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MarkerPlaced(Marker),
    MarkerUpdated { id: MarkerId, fields: MarkerPatch },
    MarkersCleared,
    /// New text for the "last gesture" status line.
    GestureLabel(String),
    RenderNeeded,
}

/// Main-context state with no channels attached, so it can be tested directly.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub store: MarkerStore,
    last_gesture: String,
    events: EventSink,
}

impl EngineCore {
    #[must_use]
    pub fn new(events: EventSink) -> Self {
        Self { store: MarkerStore::new(), last_gesture: String::new(), events }
    }

    /// Apply one commit from the gesture context.
    ///
    /// Commits that name a marker no longer in the store are dropped without
    /// actions or events; the court may have been cleared mid-gesture.
    pub fn apply(&mut self, commit: Commit) -> Vec<Action> {
        match commit {
            Commit::Place { marker, trigger } => {
                let label = match trigger {
                    PlaceTrigger::Tap => format!("Tap at {}", marker.logical_position),
                    PlaceTrigger::LongPress => format!("Long press at {}", marker.logical_position),
                };
                info!(
                    marker_id = %marker.id,
                    x = marker.logical_position.x,
                    y = marker.logical_position.y,
                    classification = ?marker.classification,
                    trigger = ?trigger,
                    "marker placed"
                );
                self.events.emit(DomainEvent::placed(&marker));
                self.store.add(marker.clone());
                vec![Action::MarkerPlaced(marker), self.label(label), Action::RenderNeeded]
            }
            Commit::BeginDrag { id } => self.update(id, MarkerPatch::dragging(true)),
            Commit::DragTo { id, patch } => {
                let mut actions = self.update(id, patch);
                if !actions.is_empty()
                    && let Some(p) = patch.logical_position
                {
                    actions.insert(1, self.label(format!("Dragging marker at {p}")));
                }
                actions
            }
            Commit::EndDrag { id, patch, cancelled } => {
                let mut actions = self.update(id, patch);
                let Some(marker) = self.store.get(&id) else {
                    debug!(marker_id = %id, "drag ended on a cleared marker");
                    return actions;
                };
                let label = format!("Moved marker to {}", marker.logical_position);
                info!(
                    marker_id = %id,
                    x = marker.logical_position.x,
                    y = marker.logical_position.y,
                    classification = ?marker.classification,
                    cancelled,
                    "marker moved"
                );
                self.events.emit(DomainEvent::moved(marker));
                actions.insert(1, self.label(label));
                actions
            }
            Commit::ClearAll => {
                info!(count = self.store.len(), "markers cleared");
                self.store.clear_all();
                vec![Action::MarkersCleared, self.label("Triple tap - Cleared all".to_owned()), Action::RenderNeeded]
            }
            Commit::DoubleTap => {
                debug!("double tap; nothing to do");
                Vec::new()
            }
        }
    }

    fn update(&mut self, id: MarkerId, patch: MarkerPatch) -> Vec<Action> {
        if !self.store.update_by_id(&id, &patch) {
            debug!(marker_id = %id, "update for missing marker ignored");
            return Vec::new();
        }
        vec![Action::MarkerUpdated { id, fields: patch }, Action::RenderNeeded]
    }

    fn label(&mut self, text: String) -> Action {
        self.last_gesture.clone_from(&text);
        Action::GestureLabel(text)
    }

    /// Text of the most recent gesture label, empty before the first one.
    #[must_use]
    pub fn last_gesture(&self) -> &str {
        &self.last_gesture
    }
}

/// The main-context engine: owns [`EngineCore`] plus the publishing side of
/// both snapshots and the receiving side of the commit channel.
pub struct Engine {
    pub core: EngineCore,
    layout: LayoutTracker,
    markers_tx: watch::Sender<MarkerSnapshot>,
    commits_rx: mpsc::UnboundedReceiver<Commit>,
    applied_tx: watch::Sender<u64>,
}

impl Engine {
    /// Create an engine and the gesture worker wired to it.
    #[must_use]
    pub fn new(config: &CourtConfig, events: EventSink) -> (Self, GestureWorker) {
        let layout = LayoutTracker::new(config.padding_px);
        let (markers_tx, markers_rx) = watch::channel::<MarkerSnapshot>(Arc::from(Vec::new()));
        let (commits_tx, commits_rx) = mpsc::unbounded_channel();
        let (applied_tx, applied_rx) = watch::channel(0_u64);

        let worker = GestureWorker {
            arbiter: GestureArbiter::new(config.gesture, config.marker_radius_px),
            layout: layout.reader(),
            markers: markers_rx,
            commits: commits_tx,
            sent: 0,
            applied: applied_rx,
        };
        let engine = Self { core: EngineCore::new(events), layout, markers_tx, commits_rx, applied_tx };
        (engine, worker)
    }

    /// Handle a layout event from the host.
    pub fn on_layout(&mut self, container: LayoutRect) -> Vec<Action> {
        self.layout.on_layout(container);
        vec![Action::RenderNeeded]
    }

    /// Apply one commit and republish the marker snapshot if anything changed.
    pub fn apply(&mut self, commit: Commit) -> Vec<Action> {
        let actions = self.core.apply(commit);
        if !actions.is_empty() {
            self.markers_tx.send_replace(self.core.store.snapshot());
        }
        actions
    }

    /// Apply every commit already queued, without waiting.
    pub fn pump(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(commit) = self.commits_rx.try_recv() {
            actions.extend(self.apply_queued(commit));
        }
        actions
    }

    /// Wait for the next commit and apply it. `None` once the worker is gone
    /// and the queue is drained.
    pub async fn next_actions(&mut self) -> Option<Vec<Action>> {
        let commit = self.commits_rx.recv().await?;
        Some(self.apply_queued(commit))
    }

    /// Apply a commit taken off the queue, then bump the applied count. The
    /// snapshot is already published when the worker observes the new count.
    fn apply_queued(&mut self, commit: Commit) -> Vec<Action> {
        let actions = self.apply(commit);
        self.applied_tx.send_modify(|n| *n += 1);
        actions
    }

    #[must_use]
    pub fn layout(&self) -> LayoutSnapshot {
        self.layout.current()
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        self.core.store.markers()
    }

    #[must_use]
    pub fn render_list(&self) -> Vec<RenderMarker> {
        render_list(self.core.store.markers())
    }

    #[must_use]
    pub fn last_gesture(&self) -> &str {
        self.core.last_gesture()
    }
}

/// Gesture-context half: runs the arbiter against the latest snapshots.
pub struct GestureWorker {
    arbiter: GestureArbiter,
    layout: LayoutReader,
    markers: watch::Receiver<MarkerSnapshot>,
    commits: mpsc::UnboundedSender<Commit>,
    /// Commits handed to the main context so far.
    sent: u64,
    applied: watch::Receiver<u64>,
}

impl GestureWorker {
    /// Run one pointer event through the arbiter and forward its commits.
    /// Returns how many commits were produced.
    pub fn handle(&mut self, event: &PointerEvent) -> usize {
        let layout = self.layout.current();
        let markers = Arc::clone(&self.markers.borrow());
        let view = GestureView { layout, markers: &markers };

        let commits = self.arbiter.handle(event, &view);
        let produced = commits.len();
        for commit in commits {
            if self.commits.send(commit).is_err() {
                debug!(gesture = event.name(), "main context gone; dropping commits");
                break;
            }
            self.sent += 1;
        }
        produced
    }

    /// Wait until the main context has applied every commit sent so far.
    /// Returns at once if the main context is gone.
    pub async fn settle(&mut self) {
        let sent = self.sent;
        if self.applied.wait_for(|applied| *applied >= sent).await.is_err() {
            debug!(sent, "main context gone; not waiting for commits");
        }
    }

    #[must_use]
    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }
}

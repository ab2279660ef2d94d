//! Gesture arbiter: turns raw pointer events into at most one winning gesture
//! per interaction.
//!
//! The arbiter runs in the gesture context. It reads the latest layout and
//! marker snapshots through a [`GestureView`], does hit-testing and
//! classification itself, and returns [`Commit`]s for the main context to
//! apply. It never touches the marker store.
//!
//! Precedence, highest first:
//!
//! 1. Clear-all: the `clear_tap_count`th tap inside the multi-tap window.
//! 2. Drag: a press that started on a marker and was held past `drag_hold_ms`.
//!    The marker keeps its offset from the finger for the whole drag.
//! 3. Place: a lone tap once the multi-tap window lapses, or a long press on
//!    empty court when `long_press_places` is set.
//! 4. Double tap: swallowed so it never falls through to a single tap.
//!
//! Single taps are deferred until the window lapses, so a clear sequence never
//! leaves stray markers behind.

#[cfg(test)]
#[path = "arbiter_test.rs"]
mod arbiter_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::GestureError;
use crate::geom::{LogicalPoint, Point};
use crate::hit;
use crate::input::{GestureConfig, Grab, PointerEvent, PressState, TapSequence};
use crate::layout::LayoutSnapshot;
use crate::marker::{Marker, MarkerId, MarkerPatch, new_marker_id};
use crate::region::{ArcRegion, CourtGeometry};
use crate::transform::{canvas_to_logical, canvas_to_source};

/// Which gesture placed a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceTrigger {
    Tap,
    LongPress,
}

/// A state change handed from the gesture context to the main context.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    /// Append a new marker.
    Place { marker: Marker, trigger: PlaceTrigger },
    /// Mark a marker as held.
    BeginDrag { id: MarkerId },
    /// Move a held marker.
    DragTo { id: MarkerId, patch: MarkerPatch },
    /// Release a held marker at its final position.
    EndDrag { id: MarkerId, patch: MarkerPatch, cancelled: bool },
    /// Remove every marker.
    ClearAll,
    /// A multi-tap short of clear-all; consumed without effect.
    DoubleTap,
}

/// What the gesture context can see of the main context's state.
#[derive(Debug, Clone, Copy)]
pub struct GestureView<'a> {
    pub layout: LayoutSnapshot,
    pub markers: &'a [Marker],
}

/// Recognizer state for one court surface.
#[derive(Debug)]
pub struct GestureArbiter {
    config: GestureConfig,
    geometry: CourtGeometry,
    marker_radius: f64,
    press: PressState,
    taps: Option<TapSequence>,
    last_ms: Option<u64>,
}

impl GestureArbiter {
    #[must_use]
    pub fn new(config: GestureConfig, marker_radius: f64) -> Self {
        Self {
            config,
            geometry: CourtGeometry::default(),
            marker_radius,
            press: PressState::Idle,
            taps: None,
            last_ms: None,
        }
    }

    /// Current press state.
    #[must_use]
    pub fn press(&self) -> PressState {
        self.press
    }

    /// Taps recognized but not yet resolved.
    #[must_use]
    pub fn pending_taps(&self) -> u32 {
        self.taps.map_or(0, |t| t.count)
    }

    /// Process one pointer event.
    ///
    /// Malformed events are logged and rejected here. A rejected release still
    /// ends the press, and any drag it held is cancelled, so no marker is left
    /// dragging.
    pub fn handle(&mut self, event: &PointerEvent, view: &GestureView<'_>) -> Vec<Commit> {
        let mut out = Vec::new();
        match self.validate(event) {
            Ok(()) => {
                self.last_ms = Some(event.t_ms());
                self.process(event, view, &mut out);
            }
            Err(err) => {
                warn!(gesture = event.name(), event = ?event, error = %err, "rejected pointer event");
                self.recover(event, view, &mut out);
            }
        }
        out
    }

    fn validate(&self, event: &PointerEvent) -> Result<(), GestureError> {
        if let Some(p) = event.position()
            && !p.is_finite()
        {
            return Err(GestureError::NonFinitePosition { x: p.x, y: p.y });
        }
        let now_ms = event.t_ms();
        if let Some(last_ms) = self.last_ms
            && now_ms < last_ms
        {
            return Err(GestureError::ClockWentBackwards { last_ms, now_ms });
        }
        if matches!(event, PointerEvent::Up { .. }) && self.press == PressState::Idle {
            return Err(GestureError::NoActivePress { phase: event.name() });
        }
        Ok(())
    }

    fn recover(&mut self, event: &PointerEvent, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        if !event.is_terminal() {
            return;
        }
        if let PressState::Dragging { grab, last } = self.press {
            out.push(self.end_drag(grab.id, last, true, &view.layout));
        }
        self.press = PressState::Idle;
    }

    fn process(&mut self, event: &PointerEvent, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        let now = event.t_ms();
        self.expire_taps(now, view, out);

        match *event {
            PointerEvent::Down { x, y, .. } => self.on_down(Point::new(x, y), now, view, out),
            PointerEvent::Move { x, y, .. } => self.on_move(Point::new(x, y), now, view, out),
            PointerEvent::Up { x, y, .. } => self.on_up(Point::new(x, y), now, view, out),
            PointerEvent::Cancel { .. } => self.on_cancel(view, out),
            PointerEvent::Tick { .. } => {
                self.check_hold(now, view, out);
            }
        }
    }

    // --- Pointer phases ---

    fn on_down(&mut self, p: Point, now: u64, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        if self.press != PressState::Idle {
            warn!(x = p.x, y = p.y, "pointer down during an active press; cancelling it");
            self.on_cancel(view, out);
        }

        if !view.layout.accepts(p) {
            debug!(x = p.x, y = p.y, ready = view.layout.is_ready(), "press outside diagram ignored");
            self.flush_taps(view, out);
            self.press = PressState::Ignored;
            return;
        }

        let grabbed = hit::find_at(view.markers, p, None).map(|m| Grab::new(m.id, m.canvas_position, p));
        self.press = PressState::Pending { start: p, down_ms: now, grabbed };
    }

    fn on_move(&mut self, p: Point, now: u64, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        self.check_hold(now, view, out);

        match self.press {
            PressState::Pending { start, .. } => {
                if p.distance_to(start) > self.config.tap_slop_px {
                    debug!(x = p.x, y = p.y, "press moved past slop; no gesture");
                    self.press = PressState::Failed;
                    self.flush_taps(view, out);
                }
            }
            PressState::Dragging { grab, .. } => {
                let centre = grab.centre_for(p);
                let Some(patch) = self.position_patch(centre, &view.layout) else {
                    debug!(x = centre.x, y = centre.y, "drag point outside diagram ignored");
                    return;
                };
                out.push(Commit::DragTo { id: grab.id, patch: MarkerPatch { is_dragging: Some(true), ..patch } });
                self.press = PressState::Dragging { grab, last: centre };
            }
            PressState::Idle | PressState::Ignored | PressState::Failed => {}
        }
    }

    fn on_up(&mut self, p: Point, now: u64, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        if let PressState::Pending { start, down_ms, .. } = self.press
            && !self.check_hold(now, view, out)
        {
            let moved = p.distance_to(start) > self.config.tap_slop_px;
            let held = now.saturating_sub(down_ms);
            if !moved && held <= self.config.tap_max_duration_ms {
                self.register_tap(start, now, out);
            } else {
                debug!(held_ms = held, moved, "press was not a tap");
                self.flush_taps(view, out);
            }
        }

        if let PressState::Dragging { grab, last } = self.press {
            let centre = grab.centre_for(p);
            let at = if view.layout.accepts(centre) { centre } else { last };
            out.push(self.end_drag(grab.id, at, false, &view.layout));
        }

        self.press = PressState::Idle;
    }

    fn on_cancel(&mut self, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        match self.press {
            PressState::Dragging { grab, last } => {
                info!(marker_id = %grab.id, "drag cancelled");
                out.push(self.end_drag(grab.id, last, true, &view.layout));
            }
            PressState::Pending { .. } => debug!("press cancelled"),
            PressState::Idle | PressState::Ignored | PressState::Failed => {}
        }
        self.press = PressState::Idle;
    }

    // --- Recognizers ---

    /// Fire whichever hold recognizer the elapsed time has reached. Returns
    /// true when the press was resolved.
    fn check_hold(&mut self, now: u64, view: &GestureView<'_>, out: &mut Vec<Commit>) -> bool {
        let PressState::Pending { start, down_ms, grabbed } = self.press else {
            return false;
        };
        let held = now.saturating_sub(down_ms);

        match grabbed {
            Some(grab) if held >= self.config.drag_hold_ms => {
                self.flush_taps(view, out);
                info!(marker_id = %grab.id, held_ms = held, "drag started");
                self.press = PressState::Dragging { grab, last: grab.centre_for(start) };
                out.push(Commit::BeginDrag { id: grab.id });
                true
            }
            None if self.config.long_press_places && held >= self.config.long_press_ms => {
                self.flush_taps(view, out);
                self.press = PressState::Failed;
                if let Some(marker) = self.build_marker(start, &view.layout) {
                    out.push(Commit::Place { marker, trigger: PlaceTrigger::LongPress });
                }
                true
            }
            _ => false,
        }
    }

    fn register_tap(&mut self, at: Point, now: u64, out: &mut Vec<Commit>) {
        let seq = match self.taps {
            Some(seq) => TapSequence { count: seq.count + 1, last_up_ms: now, ..seq },
            None => TapSequence { count: 1, first: at, last_up_ms: now },
        };

        if seq.count >= self.config.clear_tap_count {
            info!(taps = seq.count, "clear-all recognized");
            self.taps = None;
            out.push(Commit::ClearAll);
        } else {
            self.taps = Some(seq);
        }
    }

    fn expire_taps(&mut self, now: u64, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        let Some(seq) = self.taps else {
            return;
        };
        if self.press == PressState::Idle && now.saturating_sub(seq.last_up_ms) > self.config.multi_tap_delay_ms {
            self.flush_taps(view, out);
        }
    }

    /// Resolve the pending tap sequence now that no further tap can join it.
    fn flush_taps(&mut self, view: &GestureView<'_>, out: &mut Vec<Commit>) {
        let Some(seq) = self.taps.take() else {
            return;
        };

        if seq.count > 1 {
            debug!(taps = seq.count, "multi-tap consumed");
            out.push(Commit::DoubleTap);
            return;
        }

        match self.build_marker(seq.first, &view.layout) {
            Some(marker) => out.push(Commit::Place { marker, trigger: PlaceTrigger::Tap }),
            None => debug!(x = seq.first.x, y = seq.first.y, "tap no longer inside diagram; dropped"),
        }
    }

    // --- Marker data ---

    /// Logical position and classification for `p`, or `None` when the layout
    /// is not ready or `p` lies outside the diagram.
    fn locate(&self, p: Point, layout: &LayoutSnapshot) -> Option<(LogicalPoint, ArcRegion)> {
        if !layout.accepts(p) {
            return None;
        }
        let logical = canvas_to_logical(p, &layout.container)?;
        let source = canvas_to_source(p, &layout.diagram)?;
        Some((logical, self.geometry.classify(source)))
    }

    fn build_marker(&self, p: Point, layout: &LayoutSnapshot) -> Option<Marker> {
        let (logical_position, classification) = self.locate(p, layout)?;
        Some(Marker {
            id: new_marker_id(),
            canvas_position: p,
            logical_position,
            classification,
            radius: self.marker_radius,
            is_dragging: false,
        })
    }

    fn position_patch(&self, p: Point, layout: &LayoutSnapshot) -> Option<MarkerPatch> {
        let (logical, classification) = self.locate(p, layout)?;
        Some(MarkerPatch {
            canvas_position: Some(p),
            logical_position: Some(logical),
            classification: Some(classification),
            is_dragging: None,
        })
    }

    fn end_drag(&self, id: MarkerId, at: Point, cancelled: bool, layout: &LayoutSnapshot) -> Commit {
        let patch = match self.position_patch(at, layout) {
            Some(patch) => MarkerPatch { is_dragging: Some(false), ..patch },
            None => MarkerPatch::dragging(false),
        };
        info!(marker_id = %id, cancelled, "drag ended");
        Commit::EndDrag { id, patch, cancelled }
    }
}

//! Layout tracking: the container rectangle and the letterboxed diagram inside it.
//!
//! The court diagram keeps a fixed aspect ratio inside a container whose size
//! changes with the device and orientation. [`fit_diagram`] computes where the
//! diagram actually lands, and [`LayoutTracker`] publishes the result as an
//! immutable [`LayoutSnapshot`] on every layout event.
//!
//! Snapshots travel through a `tokio::sync::watch` channel. The main context is
//! the only writer; the gesture context holds a [`LayoutReader`] and copies the
//! whole snapshot out on each read, so it can never observe a half-written
//! rectangle.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::consts::{SOURCE_H, SOURCE_W};
use crate::geom::{LayoutRect, Point};

/// Latest measured layout: the container and the diagram rendered inside it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// The canvas container as reported by the host.
    pub container: LayoutRect,
    /// The rendered diagram in canvas coordinates, after aspect fitting.
    pub diagram: LayoutRect,
}

impl LayoutSnapshot {
    /// Whether both rectangles have been measured.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.container.is_ready() && self.diagram.is_ready()
    }

    /// Whether `p` is a usable touch: layout ready and inside the diagram.
    #[must_use]
    pub fn accepts(&self, p: Point) -> bool {
        self.is_ready() && self.diagram.contains(p)
    }
}

/// Fit the diagram's fixed aspect ratio into the container, minus `padding` on
/// every side, and centre it.
///
/// The returned rectangle is in the container's own coordinate space (the
/// canvas frame), so its origin starts at `padding` rather than at the
/// container's position in its parent.
#[must_use]
pub fn fit_diagram(container: &LayoutRect, padding: f64) -> LayoutRect {
    let avail_w = container.width - 2.0 * padding;
    let avail_h = container.height - 2.0 * padding;
    let available = LayoutRect::new(padding, padding, avail_w, avail_h);
    if !available.is_ready() {
        return LayoutRect::default();
    }

    // Compare aspects by cross-multiplying so the native size fits exactly.
    if avail_w * SOURCE_H > avail_h * SOURCE_W {
        // Height limits: full height, centred horizontally.
        let width = avail_h * SOURCE_W / SOURCE_H;
        LayoutRect::new(padding + (avail_w - width) / 2.0, padding, width, avail_h)
    } else {
        // Width limits: full width, centred vertically.
        let height = avail_w * SOURCE_H / SOURCE_W;
        LayoutRect::new(padding, padding + (avail_h - height) / 2.0, avail_w, height)
    }
}

/// Main-context owner of the layout snapshot.
pub struct LayoutTracker {
    padding: f64,
    tx: watch::Sender<LayoutSnapshot>,
}

impl LayoutTracker {
    /// Create a tracker with no measured layout.
    #[must_use]
    pub fn new(padding: f64) -> Self {
        let (tx, _rx) = watch::channel(LayoutSnapshot::default());
        Self { padding, tx }
    }

    /// Handle a layout event from the host and publish the new snapshot.
    pub fn on_layout(&self, container: LayoutRect) -> LayoutSnapshot {
        let snapshot = LayoutSnapshot { container, diagram: fit_diagram(&container, self.padding) };
        if snapshot.is_ready() {
            debug!(
                container_w = container.width,
                container_h = container.height,
                diagram_x = snapshot.diagram.x,
                diagram_y = snapshot.diagram.y,
                diagram_w = snapshot.diagram.width,
                diagram_h = snapshot.diagram.height,
                "layout updated"
            );
        } else {
            debug!(container_w = container.width, container_h = container.height, "layout not ready");
        }
        self.tx.send_replace(snapshot);
        snapshot
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn current(&self) -> LayoutSnapshot {
        *self.tx.borrow()
    }

    /// A read handle for another execution context.
    #[must_use]
    pub fn reader(&self) -> LayoutReader {
        LayoutReader { rx: self.tx.subscribe() }
    }
}

/// Read-only view of the latest layout, safe to move to the gesture context.
#[derive(Clone)]
pub struct LayoutReader {
    rx: watch::Receiver<LayoutSnapshot>,
}

impl LayoutReader {
    /// Copy out the latest snapshot.
    #[must_use]
    pub fn current(&self) -> LayoutSnapshot {
        *self.rx.borrow()
    }
}

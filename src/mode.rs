//! Grid / free-form mode switching and the position handoff between them.
//!
//! Entering free-form mode either restores the persisted layout wholesale or,
//! when nothing is saved, seeds widget positions from where the grid drew
//! them. The grid rects are captured in screen space before the switch, but
//! the canvas they must be converted into only exists after it. The capture
//! is therefore held as pending until the host reports the canvas
//! measurement via [`LayoutModeController::on_canvas_measured`].

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::geom::{CanvasMetrics, Point, Rect};
use crate::persist::{KeyValueStore, PersistenceAdapter};
use crate::store::{LayoutStore, WidgetId};

/// Which presentation the dashboard uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Responsive column grid; positions and sizes are ignored.
    #[default]
    Grid,
    /// Absolute positioning on the canvas.
    Freeform,
}

/// Screen-space rect of a rendered grid widget, taken just before switching to free-form.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRect {
    pub id: WidgetId,
    pub screen: Rect,
}

impl CapturedRect {
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, screen: Rect) -> Self {
        Self { id: id.into(), screen }
    }
}

/// What a mode switch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Already in the requested mode.
    Unchanged,
    /// Free-form entered with the persisted layout.
    Restored,
    /// Free-form entered; `captured` grid rects wait for the canvas measurement.
    AwaitingCanvas { captured: usize },
    /// Free-form entered with nothing saved or captured; the store keeps its positions.
    Defaults,
    /// Back in grid mode.
    EnteredGrid,
}

/// Result of applying a canvas measurement in free-form mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Handoff {
    /// Positions written from the pending capture.
    pub seeded: usize,
    /// Widgets moved back inside the canvas.
    pub clamped: usize,
}

impl Handoff {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.seeded > 0 || self.clamped > 0
    }
}

/// Grid / free-form state machine.
#[derive(Debug, Clone, Default)]
pub struct LayoutModeController {
    mode: LayoutMode,
    pending: Option<Vec<CapturedRect>>,
}

impl LayoutModeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub fn is_freeform(&self) -> bool {
        self.mode == LayoutMode::Freeform
    }

    /// Captured grid rects not yet converted to canvas positions.
    #[must_use]
    pub fn pending_capture(&self) -> Option<&[CapturedRect]> {
        self.pending.as_deref()
    }

    /// Switch to free-form mode.
    ///
    /// A persisted layout wins over `captured`, which is then discarded.
    pub fn enter_freeform<S: KeyValueStore>(
        &mut self,
        store: &mut LayoutStore,
        persistence: &PersistenceAdapter<S>,
        captured: Vec<CapturedRect>,
    ) -> ModeTransition {
        if self.is_freeform() {
            return ModeTransition::Unchanged;
        }
        self.mode = LayoutMode::Freeform;

        if let Some(layout) = persistence.load() {
            info!(widgets = layout.order.len(), "entering free-form with persisted layout");
            store.restore(layout);
            self.pending = None;
            return ModeTransition::Restored;
        }
        if captured.is_empty() {
            debug!("entering free-form with default positions");
            self.pending = None;
            return ModeTransition::Defaults;
        }
        debug!(captured = captured.len(), "entering free-form; waiting for canvas");
        let count = captured.len();
        self.pending = Some(captured);
        ModeTransition::AwaitingCanvas { captured: count }
    }

    /// Switch to grid mode. Any pending capture is dropped; the store is untouched.
    pub fn enter_grid(&mut self) -> ModeTransition {
        if !self.is_freeform() {
            return ModeTransition::Unchanged;
        }
        self.mode = LayoutMode::Grid;
        self.pending = None;
        debug!("entering grid mode");
        ModeTransition::EnteredGrid
    }

    /// Flip the mode. `captured` is only used when entering free-form.
    pub fn toggle<S: KeyValueStore>(
        &mut self,
        store: &mut LayoutStore,
        persistence: &PersistenceAdapter<S>,
        captured: Vec<CapturedRect>,
    ) -> ModeTransition {
        match self.mode {
            LayoutMode::Grid => self.enter_freeform(store, persistence, captured),
            LayoutMode::Freeform => self.enter_grid(),
        }
    }

    /// Apply a canvas measurement: seed any pending capture, then clamp every widget.
    ///
    /// Does nothing in grid mode or for a canvas that is not laid out yet; a
    /// pending capture stays pending until a usable measurement arrives.
    pub fn on_canvas_measured(&mut self, canvas: CanvasMetrics, store: &mut LayoutStore) -> Handoff {
        if !self.is_freeform() {
            return Handoff::default();
        }
        if !canvas.is_laid_out() {
            debug!(width = canvas.width, height = canvas.height, "canvas not laid out; handoff deferred");
            return Handoff::default();
        }
        let seeded = match self.pending.take() {
            Some(captured) => store.seed_positions(captured.into_iter().map(|c| {
                let local = canvas.screen_to_local(c.screen.origin());
                (c.id, Point::new(local.x.max(0.0), local.y.max(0.0)))
            })),
            None => 0,
        };
        let clamped = store.clamp_all(canvas.bounds());
        let handoff = Handoff { seeded, clamped };
        if handoff.changed() {
            debug!(seeded, clamped, "canvas handoff applied");
        }
        handoff
    }
}

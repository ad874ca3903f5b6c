//! Drag-and-drop state machine for free-form widgets.
//!
//! The host's drag primitive reports three events: drag start (element id,
//! pointer, element rect), drag over (the widget under the pointer, if any)
//! and drop. [`DragController`] turns them into store mutations: the drop point
//! is computed from the pointer minus the grab offset captured at drag start,
//! so the widget lands where it was held rather than by its top-left corner.
//!
//! A drop on another widget swaps the two; a drop on blank canvas (or on the
//! dragged widget itself) sends the widget to the end of the order.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::geom::{CanvasMetrics, Point, Rect};
use crate::spatial::clamp;
use crate::store::{LayoutStore, WidgetId};

/// The widget being dragged and where it was grabbed.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Widget being dragged.
    pub source_id: WidgetId,
    /// Pointer position relative to the widget's top-left corner at drag start.
    pub pointer_offset: Point,
    /// Widget currently under the pointer, for highlighting only.
    pub hover_target: Option<WidgetId>,
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A widget is being dragged.
    Dragging(DragSession),
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// No drag was active, or the dragged widget is no longer on the dashboard.
    Ignored,
    /// The widget moved to `position` and went to the end of the order.
    MovedToEnd { id: WidgetId, position: Point },
    /// The widget moved, then traded order slot and position with `target`.
    Swapped { id: WidgetId, target: WidgetId },
}

/// Translates drag primitive events into [`LayoutStore`] calls.
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    grid_snap: bool,
    snap_pitch: f64,
}

impl DragController {
    #[must_use]
    pub fn new(grid_snap: bool, snap_pitch: f64) -> Self {
        Self { state: DragState::Idle, grid_snap, snap_pitch }
    }

    #[must_use]
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.grid_snap, config.snap_pitch)
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Widget to highlight as the current drop target.
    #[must_use]
    pub fn hover_target(&self) -> Option<&str> {
        self.session().and_then(|s| s.hover_target.as_deref())
    }

    #[must_use]
    pub fn grid_snap(&self) -> bool {
        self.grid_snap
    }

    pub fn set_grid_snap(&mut self, enabled: bool) {
        self.grid_snap = enabled;
    }

    /// Begin dragging `element_id`, grabbed at `pointer` within `element_rect` (both screen space).
    ///
    /// Starting a new drag while one is active replaces it.
    pub fn on_drag_start(&mut self, element_id: &str, pointer: Point, element_rect: Rect) {
        if let DragState::Dragging(prev) = &self.state {
            debug!(previous = %prev.source_id, "drag restarted before drop");
        }
        let pointer_offset = Point::new(pointer.x - element_rect.x, pointer.y - element_rect.y);
        debug!(widget_id = %element_id, ?pointer_offset, "drag start");
        self.state = DragState::Dragging(DragSession {
            source_id: element_id.to_string(),
            pointer_offset,
            hover_target: None,
        });
    }

    /// Record the widget under the pointer (`None` over blank canvas).
    ///
    /// The dragged widget never targets itself. Returns `true` when the
    /// highlight changed.
    pub fn on_drag_over(&mut self, element_id: Option<&str>) -> bool {
        let DragState::Dragging(session) = &mut self.state else {
            return false;
        };
        let next = element_id.filter(|id| *id != session.source_id).map(str::to_string);
        if session.hover_target == next {
            return false;
        }
        session.hover_target = next;
        true
    }

    /// Abandon the drag without touching the layout. Returns whether a drag was active.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                debug!(widget_id = %session.source_id, "drag cancelled");
                true
            }
            DragState::Idle => false,
        }
    }

    /// Finish the drag at `pointer` (screen space) over `target`.
    pub fn on_drop(
        &mut self,
        target: Option<&str>,
        pointer: Point,
        canvas: CanvasMetrics,
        store: &mut LayoutStore,
    ) -> DropOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DropOutcome::Ignored;
        };
        let source = session.source_id;
        let Some(size) = store.size(&source).filter(|_| store.contains(&source)) else {
            warn!(widget_id = %source, "drop for widget not on the dashboard ignored");
            return DropOutcome::Ignored;
        };

        let local = canvas.screen_to_local(pointer);
        let mut position = Point::new(local.x - session.pointer_offset.x, local.y - session.pointer_offset.y);
        if self.grid_snap {
            position = snap(position, self.snap_pitch);
        }
        let bounds = canvas.bounds();
        let position = clamp(Rect::from_parts(position, size), bounds).origin();

        store.reposition(&source, position, Some(bounds));

        match target.filter(|t| *t != source && store.contains(t)) {
            Some(target) => {
                store.reorder_swap(&source, Some(target));
                debug!(widget_id = %source, %target, "drop swapped widgets");
                DropOutcome::Swapped { id: source, target: target.to_string() }
            }
            None => {
                store.move_to_end(&source);
                debug!(widget_id = %source, ?position, "drop on canvas");
                DropOutcome::MovedToEnd { id: source, position }
            }
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

/// Round both coordinates to the nearest multiple of `pitch`.
#[must_use]
pub fn snap(p: Point, pitch: f64) -> Point {
    if !(pitch.is_finite() && pitch > 0.0) {
        return p;
    }
    Point::new((p.x / pitch).round() * pitch, (p.y / pitch).round() * pitch)
}

//! Host-facing facade wiring store, persistence, drag and mode handling.
//!
//! [`DashboardCore`] holds no browser types, so every interaction path can be
//! driven from plain tests. Input methods return the [`Action`]s the host
//! must carry out (re-render, highlight, mode switch); mutating inputs
//! auto-save through the dirty-gated persistence adapter before returning.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, warn};

use crate::catalog::{CatalogEntry, WidgetCatalog};
use crate::config::LayoutConfig;
use crate::drag::{DragController, DropOutcome};
use crate::geom::{Bounds, CanvasMetrics, Point, Rect, Size};
use crate::grid;
use crate::mode::{CapturedRect, LayoutMode, LayoutModeController, ModeTransition};
use crate::persist::{KeyValueStore, PersistenceAdapter, SaveOutcome};
use crate::render::{self, RenderContext, WidgetView};
use crate::store::{LayoutStore, WidgetId};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Widget order, positions or sizes changed.
    LayoutChanged,
    /// Highlight this widget as the drop target, or clear the highlight.
    HighlightTarget(Option<WidgetId>),
    /// The dashboard switched presentation.
    ModeChanged(LayoutMode),
    /// The layout was written to storage.
    Saved,
    /// Views must be rebuilt.
    RenderNeeded,
}

/// Dashboard layout state and the interaction entry points a host calls.
pub struct DashboardCore<S: KeyValueStore> {
    pub store: LayoutStore,
    pub persistence: PersistenceAdapter<S>,
    pub drag: DragController,
    pub mode: LayoutModeController,
    /// Last measured free-form canvas; `None` until measured or in grid mode.
    pub canvas: Option<CanvasMetrics>,
    /// Width of the grid-mode container.
    pub grid_width: f64,
}

impl<S: KeyValueStore> DashboardCore<S> {
    /// Dashboard with the catalog's default widgets, backed by `storage`.
    #[must_use]
    pub fn new(storage: S, catalog: WidgetCatalog, config: LayoutConfig) -> Self {
        let persistence = PersistenceAdapter::from_config(storage, &config);
        let drag = DragController::from_config(&config);
        Self {
            store: LayoutStore::new(catalog, config),
            persistence,
            drag,
            mode: LayoutModeController::new(),
            canvas: None,
            grid_width: 0.0,
        }
    }

    /// The case-management dashboard with default tunables.
    #[must_use]
    pub fn crm(storage: S) -> Self {
        Self::new(storage, WidgetCatalog::crm(), LayoutConfig::default())
    }

    // --- Queries ---

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.mode.mode()
    }

    /// Canvas bounds used for clamping, when a canvas has been measured.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.canvas.map(|c| c.bounds())
    }

    /// Catalog widgets not currently on the dashboard.
    #[must_use]
    pub fn available_widgets(&self) -> Vec<&CatalogEntry> {
        self.store.catalog().available(self.store.order())
    }

    /// Render plan for the current mode, in dashboard order.
    #[must_use]
    pub fn views(&self) -> Vec<WidgetView> {
        let catalog = self.store.catalog();
        match self.mode.mode() {
            LayoutMode::Grid => grid::layout(self.store.order(), catalog, self.grid_width)
                .into_iter()
                .map(|(id, frame)| {
                    render::render(catalog, &id, RenderContext { is_freeform: false, highlighted: false, frame })
                })
                .collect(),
            LayoutMode::Freeform => {
                let hover = self.drag.hover_target();
                self.store
                    .rects()
                    .into_iter()
                    .map(|(id, frame)| {
                        let highlighted = hover == Some(id.as_str());
                        render::render(catalog, &id, RenderContext { is_freeform: true, highlighted, frame })
                    })
                    .collect()
            }
        }
    }

    /// [`views`](Self::views) as JSON for a host renderer.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if a view fails to serialize.
    pub fn views_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.views())
    }

    // --- Host measurements ---

    /// Report the free-form canvas bounding box. Applies any pending grid handoff.
    ///
    /// A zero-sized or non-finite box (canvas mounted but not laid out) is
    /// ignored; the previous measurement, if any, stays in effect.
    pub fn set_canvas(&mut self, metrics: CanvasMetrics) -> Vec<Action> {
        if !metrics.is_laid_out() {
            debug!(width = metrics.width, height = metrics.height, "unusable canvas measurement ignored");
            return Vec::new();
        }
        self.canvas = Some(metrics);
        let handoff = self.mode.on_canvas_measured(metrics, &mut self.store);
        if handoff.changed() {
            vec![Action::LayoutChanged, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Report the grid container width.
    pub fn set_grid_width(&mut self, width: f64) -> Vec<Action> {
        self.grid_width = width.max(0.0);
        if self.mode.is_freeform() { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    // --- Mode ---

    /// Switch to free-form. `captured` holds the screen rects of the rendered grid widgets.
    pub fn enter_freeform(&mut self, captured: Vec<CapturedRect>) -> Vec<Action> {
        let transition = self.mode.enter_freeform(&mut self.store, &self.persistence, captured);
        self.after_transition(transition)
    }

    pub fn enter_grid(&mut self) -> Vec<Action> {
        let transition = self.mode.enter_grid();
        self.after_transition(transition)
    }

    /// Toolbar toggle.
    pub fn toggle_mode(&mut self, captured: Vec<CapturedRect>) -> Vec<Action> {
        let transition = self.mode.toggle(&mut self.store, &self.persistence, captured);
        self.after_transition(transition)
    }

    fn after_transition(&mut self, transition: ModeTransition) -> Vec<Action> {
        if transition == ModeTransition::Unchanged {
            return Vec::new();
        }
        // The canvas element is remounted on every switch; wait for a fresh measurement.
        self.canvas = None;
        let mut actions = Vec::new();
        if self.drag.cancel() {
            actions.push(Action::HighlightTarget(None));
        }
        actions.push(Action::ModeChanged(self.mode.mode()));
        if transition == ModeTransition::Restored {
            actions.push(Action::LayoutChanged);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Drag and drop ---

    /// Drag primitive reported a drag start on `id`.
    pub fn on_drag_start(&mut self, id: &str, pointer: Point, element_rect: Rect) -> Vec<Action> {
        if !self.mode.is_freeform() {
            debug!(widget_id = %id, "drag start ignored outside free-form mode");
            return Vec::new();
        }
        if !self.store.contains(id) {
            warn!(widget_id = %id, "drag start for widget not on the dashboard ignored");
            return Vec::new();
        }
        self.drag.on_drag_start(id, pointer, element_rect);
        Vec::new()
    }

    /// Pointer moved over `target` (`None` for blank canvas).
    pub fn on_drag_over(&mut self, target: Option<&str>) -> Vec<Action> {
        if self.drag.on_drag_over(target) {
            vec![Action::HighlightTarget(self.drag.hover_target().map(str::to_string))]
        } else {
            Vec::new()
        }
    }

    /// Drop at `pointer` over `target`.
    pub fn on_drop(&mut self, target: Option<&str>, pointer: Point) -> Vec<Action> {
        if !self.drag.is_dragging() {
            return Vec::new();
        }
        let had_highlight = self.drag.hover_target().is_some();
        let Some(canvas) = self.canvas else {
            warn!("drop before canvas measurement; cancelling drag");
            self.drag.cancel();
            return Self::clear_highlight(had_highlight);
        };
        let outcome = self.drag.on_drop(target, pointer, canvas, &mut self.store);
        let mut actions = Self::clear_highlight(had_highlight);
        if outcome != DropOutcome::Ignored {
            self.changed(&mut actions);
        }
        actions
    }

    /// Abandon the current drag.
    pub fn cancel_drag(&mut self) -> Vec<Action> {
        let had_highlight = self.drag.hover_target().is_some();
        self.drag.cancel();
        Self::clear_highlight(had_highlight)
    }

    fn clear_highlight(had_highlight: bool) -> Vec<Action> {
        if had_highlight { vec![Action::HighlightTarget(None)] } else { Vec::new() }
    }

    // --- Direct edits ---

    /// Add a catalog widget at the first free spot on the canvas.
    pub fn add_widget(&mut self, id: &str) -> Vec<Action> {
        let bounds = self.bounds();
        let mut actions = Vec::new();
        if self.store.place_new(id, bounds) {
            self.changed(&mut actions);
        }
        actions
    }

    pub fn remove_widget(&mut self, id: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.store.remove_widget(id) {
            self.changed(&mut actions);
        }
        actions
    }

    /// Move a widget to a canvas-local position.
    pub fn move_widget(&mut self, id: &str, position: Point) -> Vec<Action> {
        let bounds = self.bounds();
        let mut actions = Vec::new();
        if self.store.reposition(id, position, bounds) {
            self.changed(&mut actions);
        }
        actions
    }

    /// Resize handle released with the widget at `size`.
    pub fn resize_widget(&mut self, id: &str, size: Size) -> Vec<Action> {
        let bounds = self.bounds();
        let mut actions = Vec::new();
        if self.store.resize(id, size, bounds) {
            self.changed(&mut actions);
        }
        actions
    }

    // --- Persistence ---

    /// Explicit "Save layout". Still a no-op when nothing changed.
    pub fn save_now(&mut self) -> Vec<Action> {
        match self.persistence.save(&mut self.store) {
            SaveOutcome::Saved => vec![Action::Saved],
            SaveOutcome::Skipped | SaveOutcome::Failed => Vec::new(),
        }
    }

    /// Final best-effort save when the page is going away.
    pub fn on_unload(&mut self) -> SaveOutcome {
        self.drag.cancel();
        self.persistence.save(&mut self.store)
    }

    fn changed(&mut self, actions: &mut Vec<Action>) {
        actions.push(Action::LayoutChanged);
        actions.push(Action::RenderNeeded);
        if self.persistence.save(&mut self.store) == SaveOutcome::Saved {
            actions.push(Action::Saved);
        }
    }
}

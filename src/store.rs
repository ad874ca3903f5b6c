//! Layout model and the store that owns it.
//!
//! [`Layout`] is the aggregate that gets persisted: widget order plus the
//! position and size maps. [`LayoutStore`] wraps it with the mutation
//! operations driven by user interaction (add, remove, move, resize, reorder)
//! and the dirty flag that gates persistence.
//!
//! Every mutation returns `true` when it changed state and a save is now
//! warranted, `false` when it was a no-op. Operations naming an unknown widget
//! are no-ops and log a warning; they never fail.
//!
//! After a move or resize, overlapping widgets are pushed straight down below
//! the moved widget. This is a single pass: widgets displaced into new
//! overlaps are left where they land.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::WidgetCatalog;
use crate::config::LayoutConfig;
use crate::consts::{CASCADE_STEP_X, CASCADE_STEP_Y};
use crate::geom::{Bounds, Point, Rect, Size};
use crate::spatial::{clamp, find_free_space_with_step, overlaps};

/// Stable, opaque widget identifier.
pub type WidgetId = String;

/// Order, positions and sizes of every widget on the free-form canvas.
///
/// Serializes to the persisted record shape
/// `{ "order": [...], "positions": {id: {x, y}}, "sizes": {id: {width, height}} }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Display / stacking order.
    pub order: Vec<WidgetId>,
    /// Top-left corner per widget, canvas-local.
    #[serde(default)]
    pub positions: BTreeMap<WidgetId, Point>,
    /// Size per widget.
    #[serde(default)]
    pub sizes: BTreeMap<WidgetId, Size>,
}

impl Layout {
    /// A layout holding `order` with every entry filled from the fallbacks.
    #[must_use]
    pub fn from_order(order: Vec<WidgetId>, catalog: &WidgetCatalog) -> Self {
        let mut layout = Self { order, ..Self::default() };
        layout.fill_missing(catalog);
        layout
    }

    /// Give every id in `order` a position and size if it lacks one.
    ///
    /// Positions cascade by index (`i * 120`, `i * 80`); sizes come from the
    /// catalog.
    pub fn fill_missing(&mut self, catalog: &WidgetCatalog) {
        let mut step = 0.0;
        for id in &self.order {
            self.positions
                .entry(id.clone())
                .or_insert_with(|| Point::new(step * CASCADE_STEP_X, step * CASCADE_STEP_Y));
            self.sizes.entry(id.clone()).or_insert_with(|| catalog.default_size(id));
            step += 1.0;
        }
    }

    /// Drop repeated ids, keeping the first occurrence.
    pub fn dedup_order(&mut self) {
        let mut seen = Vec::with_capacity(self.order.len());
        self.order.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(id.clone());
                true
            }
        });
    }

    /// Rect of `id`, if it has both a position and a size.
    #[must_use]
    pub fn rect(&self, id: &str) -> Option<Rect> {
        let pos = self.positions.get(id)?;
        let size = self.sizes.get(id)?;
        Some(Rect::from_parts(*pos, *size))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Canonical free-form layout state plus its mutation operations.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    layout: Layout,
    catalog: WidgetCatalog,
    config: LayoutConfig,
    dirty: bool,
}

impl LayoutStore {
    /// A store seeded with the catalog's default order.
    #[must_use]
    pub fn new(catalog: WidgetCatalog, config: LayoutConfig) -> Self {
        let order = catalog.default_order();
        Self::with_order(order, catalog, config)
    }

    /// A store seeded with an explicit order.
    #[must_use]
    pub fn with_order(order: Vec<WidgetId>, catalog: WidgetCatalog, config: LayoutConfig) -> Self {
        let mut layout = Layout { order, ..Layout::default() };
        layout.dedup_order();
        layout.fill_missing(&catalog);
        Self { layout, catalog, config, dirty: false }
    }

    // --- Queries ---

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Owned copy of the current layout.
    #[must_use]
    pub fn snapshot(&self) -> Layout {
        self.layout.clone()
    }

    #[must_use]
    pub fn order(&self) -> &[WidgetId] {
        &self.layout.order
    }

    /// Whether `id` is currently on the dashboard.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<Point> {
        self.layout.positions.get(id).copied()
    }

    #[must_use]
    pub fn size(&self, id: &str) -> Option<Size> {
        self.layout.sizes.get(id).copied()
    }

    #[must_use]
    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.layout.rect(id)
    }

    /// Rects of every widget on the dashboard, in order.
    #[must_use]
    pub fn rects(&self) -> Vec<(WidgetId, Rect)> {
        self.layout
            .order
            .iter()
            .filter_map(|id| self.layout.rect(id).map(|r| (id.clone(), r)))
            .collect()
    }

    #[must_use]
    pub fn catalog(&self) -> &WidgetCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Whether a user mutation happened since the last successful save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // --- Mutations ---

    /// Put `id` on the dashboard, appending it to the order if absent.
    ///
    /// A provided position or size overwrites the stored one. Without them the
    /// widget keeps entries retained from an earlier removal, or gets the
    /// fallbacks.
    pub fn add_widget(&mut self, id: impl Into<WidgetId>, position: Option<Point>, size: Option<Size>) -> bool {
        let id = id.into();
        if !self.contains(&id) {
            self.layout.order.push(id.clone());
        }
        if let Some(pos) = position {
            self.layout.positions.insert(id.clone(), sanitize_point(pos));
        }
        if let Some(size) = size {
            let size = if size.is_valid() { size } else { self.catalog.default_size(&id) };
            self.layout.sizes.insert(id, size);
        }
        self.layout.fill_missing(&self.catalog);
        self.dirty = true;
        true
    }

    /// Add `id` at the first free spot on the canvas, using its stored or default size.
    ///
    /// Without `bounds` there is no canvas to search, so placement falls back
    /// to the cascade default. Returns `false` if the widget is already placed.
    pub fn place_new(&mut self, id: impl Into<WidgetId>, bounds: Option<Bounds>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        let size = self.size(&id).unwrap_or_else(|| self.catalog.default_size(&id));
        let position = bounds.map(|bounds| {
            let occupied: Vec<Rect> = self.rects().into_iter().map(|(_, r)| r).collect();
            find_free_space_with_step(size, bounds, &occupied, self.config.gap, self.config.free_space_step)
        });
        debug!(widget_id = %id, ?position, "placing new widget");
        self.add_widget(id, position, Some(size))
    }

    /// Take `id` off the dashboard. Its position and size are kept for a later re-add.
    pub fn remove_widget(&mut self, id: &str) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.layout.order.remove(idx);
        self.dirty = true;
        true
    }

    /// Move `id` to `position`, clamped into `bounds`, then push aside anything it now overlaps.
    pub fn reposition(&mut self, id: &str, position: Point, bounds: Option<Bounds>) -> bool {
        if !self.contains(id) {
            warn!(widget_id = %id, "reposition of unknown widget ignored");
            return false;
        }
        let size = self.size(id).unwrap_or_else(|| self.catalog.default_size(id));
        let mut rect = Rect::from_parts(sanitize_point(position), size);
        if let Some(bounds) = bounds {
            rect = clamp(rect, bounds);
        }
        self.layout.positions.insert(id.to_string(), rect.origin());
        self.resolve_collisions(id, bounds);
        self.dirty = true;
        true
    }

    /// Resize `id`, enforcing the minimum size and keeping its far edges on the canvas.
    ///
    /// The canvas cap applies after the floor, so a widget near the edge of a
    /// small canvas can end up below the minimum. Degenerate input sizes are
    /// raised to the floor.
    pub fn resize(&mut self, id: &str, size: Size, bounds: Option<Bounds>) -> bool {
        if !self.contains(id) {
            warn!(widget_id = %id, "resize of unknown widget ignored");
            return false;
        }
        let mut width = floor_dimension(size.width, self.config.min_width);
        let mut height = floor_dimension(size.height, self.config.min_height);

        if let Some(bounds) = bounds {
            let pos = self.position(id).unwrap_or_default();
            let room_w = bounds.width - pos.x;
            let room_h = bounds.height - pos.y;
            if room_w > 0.0 {
                width = width.min(room_w);
            }
            if room_h > 0.0 {
                height = height.min(room_h);
            }
        }

        self.layout.sizes.insert(id.to_string(), Size::new(width, height));
        self.resolve_collisions(id, bounds);
        self.dirty = true;
        true
    }

    /// Swap `source` with `dest` in the order and trade their positions.
    ///
    /// A missing or unknown `dest` (drop on blank canvas) leaves the order as is.
    pub fn reorder_swap(&mut self, source: &str, dest: Option<&str>) -> bool {
        let Some(src_idx) = self.index_of(source) else {
            warn!(widget_id = %source, "reorder of unknown widget ignored");
            return false;
        };
        self.dirty = true;

        let Some(dest_idx) = dest.and_then(|d| self.index_of(d)) else {
            return true;
        };
        if src_idx == dest_idx {
            return true;
        }
        self.layout.order.swap(src_idx, dest_idx);

        let dest_id = self.layout.order[src_idx].clone();
        let src_pos = self.position(source);
        let dest_pos = self.position(&dest_id);
        if let (Some(src_pos), Some(dest_pos)) = (src_pos, dest_pos) {
            self.layout.positions.insert(source.to_string(), dest_pos);
            self.layout.positions.insert(dest_id, src_pos);
        }
        true
    }

    /// Move `id` to the back of the order (top of the stacking order).
    pub fn move_to_end(&mut self, id: &str) -> bool {
        let Some(idx) = self.index_of(id) else {
            warn!(widget_id = %id, "move_to_end of unknown widget ignored");
            return false;
        };
        let moved = self.layout.order.remove(idx);
        self.layout.order.push(moved);
        self.dirty = true;
        true
    }

    // --- Non-user updates (never mark dirty) ---

    /// Replace the whole layout, e.g. with one loaded from storage.
    pub fn restore(&mut self, mut layout: Layout) {
        layout.dedup_order();
        layout.fill_missing(&self.catalog);
        debug!(widgets = layout.order.len(), "layout restored");
        self.layout = layout;
    }

    /// Overwrite positions of widgets on the dashboard. Unknown ids are skipped.
    ///
    /// Returns how many positions were written.
    pub fn seed_positions<I>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = (WidgetId, Point)>,
    {
        let mut seeded = 0;
        for (id, pos) in positions {
            if self.contains(&id) {
                self.layout.positions.insert(id, sanitize_point(pos));
                seeded += 1;
            }
        }
        seeded
    }

    /// Pull every widget back inside `bounds`. Returns how many moved.
    pub fn clamp_all(&mut self, bounds: Bounds) -> usize {
        let mut moved = 0;
        for id in &self.layout.order {
            let Some(rect) = self.layout.rect(id) else {
                continue;
            };
            let clamped = clamp(rect, bounds);
            if clamped != rect {
                self.layout.positions.insert(id.clone(), clamped.origin());
                moved += 1;
            }
        }
        moved
    }

    // --- Internals ---

    fn index_of(&self, id: &str) -> Option<usize> {
        self.layout.order.iter().position(|w| w == id)
    }

    /// Push every widget overlapping `id` straight down below it.
    fn resolve_collisions(&mut self, id: &str, bounds: Option<Bounds>) -> Vec<WidgetId> {
        let Some(main) = self.layout.rect(id) else {
            return Vec::new();
        };
        let gap = self.config.gap;
        let mut pushed = Vec::new();

        for other_id in &self.layout.order {
            if other_id == id {
                continue;
            }
            let (Some(pos), Some(size)) = (self.layout.positions.get(other_id), self.layout.sizes.get(other_id))
            else {
                continue;
            };
            let other = Rect::from_parts(*pos, *size);
            if !overlaps(main, other) {
                continue;
            }
            let mut y = main.bottom() + gap;
            if let Some(bounds) = bounds {
                y = y.min(bounds.height - other.height).max(0.0);
            }
            self.layout.positions.insert(other_id.clone(), Point::new(other.x, y));
            pushed.push(other_id.clone());
        }

        if !pushed.is_empty() {
            debug!(widget_id = %id, ?pushed, "collision resolution pushed widgets down");
        }
        pushed
    }
}

/// Non-finite or negative coordinates become 0.
fn sanitize_point(p: Point) -> Point {
    let fix = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Point::new(fix(p.x), fix(p.y))
}

fn floor_dimension(value: f64, min: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { min }
}

//! Responsive 12-column grid used in grid mode.
//!
//! Widgets flow left to right in dashboard order. Each kind spans a fixed
//! number of columns per breakpoint; an item that would overflow the row
//! starts a new one. Rows are as tall as their tallest default-height item.
//! Spacing surrounds the grid and separates cells.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::catalog::WidgetCatalog;
use crate::consts::{BREAKPOINT_MD_PX, BREAKPOINT_SM_PX, GRID_COLUMNS, GRID_SPACING_PX};
use crate::geom::Rect;
use crate::store::WidgetId;

/// Container width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
}

impl Breakpoint {
    #[must_use]
    pub fn for_width(container_width: f64) -> Self {
        if container_width < BREAKPOINT_SM_PX {
            Self::Xs
        } else if container_width < BREAKPOINT_MD_PX {
            Self::Sm
        } else {
            Self::Md
        }
    }
}

/// Columns `id` spans at `breakpoint`, capped at the grid width.
#[must_use]
pub fn span(catalog: &WidgetCatalog, id: &str, breakpoint: Breakpoint) -> u32 {
    let [xs, sm, md] = catalog.kind(id).grid_spans();
    let span = match breakpoint {
        Breakpoint::Xs => xs,
        Breakpoint::Sm => sm,
        Breakpoint::Md => md,
    };
    span.clamp(1, GRID_COLUMNS)
}

/// Container-local rects for every id in `order`.
#[must_use]
pub fn layout(order: &[WidgetId], catalog: &WidgetCatalog, container_width: f64) -> Vec<(WidgetId, Rect)> {
    let s = GRID_SPACING_PX;
    let columns = f64::from(GRID_COLUMNS);
    let breakpoint = Breakpoint::for_width(container_width);
    let col = ((container_width - 2.0 * s - (columns - 1.0) * s) / columns).max(0.0);

    let mut out = Vec::with_capacity(order.len());
    let mut x = s;
    let mut y = s;
    let mut used = 0;
    let mut row_height: f64 = 0.0;

    for id in order {
        let span = span(catalog, id, breakpoint);
        if used > 0 && used + span > GRID_COLUMNS {
            y += row_height + s;
            x = s;
            used = 0;
            row_height = 0.0;
        }
        let cells = f64::from(span);
        let width = cells * col + (cells - 1.0) * s;
        let height = catalog.default_size(id).height;
        out.push((id.clone(), Rect::new(x, y, width, height)));

        x += width + s;
        used += span;
        row_height = row_height.max(height);
    }
    out
}

/// Total height of a grid produced by [`layout`], including trailing spacing.
#[must_use]
pub fn content_height(rects: &[(WidgetId, Rect)]) -> f64 {
    rects.iter().map(|(_, r)| r.bottom()).fold(0.0, f64::max) + GRID_SPACING_PX
}

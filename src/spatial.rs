//! Pure placement geometry: overlap tests, bounds clamping, free-space search.
//!
//! Nothing in here holds state. The store calls into these functions for
//! collision resolution and clamping, and the host uses [`find_free_space`]
//! when a widget is added from the catalog.

#[cfg(test)]
#[path = "spatial_test.rs"]
mod spatial_test;

use crate::consts::FREE_SPACE_STEP_PX;
use crate::geom::{Bounds, Point, Rect, Size};

/// Axis-aligned intersection test. Rects that only share an edge do not overlap.
#[must_use]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Keep `rect` inside `bounds` by moving it, never by shrinking it.
///
/// On an axis where the rect is larger than the bounds the coordinate pins to
/// `0` and the rect overflows the far edge.
#[must_use]
pub fn clamp(rect: Rect, bounds: Bounds) -> Rect {
    let max_x = (bounds.width - rect.width).max(0.0);
    let max_y = (bounds.height - rect.height).max(0.0);
    Rect { x: clamp_axis(rect.x, max_x), y: clamp_axis(rect.y, max_y), ..rect }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.min(max).max(0.0)
}

/// First point on the default step grid where a `size` rect fits without
/// coming closer than `gap` to any `occupied` rect.
#[must_use]
pub fn find_free_space(size: Size, bounds: Bounds, occupied: &[Rect], gap: f64) -> Point {
    find_free_space_with_step(size, bounds, occupied, gap, FREE_SPACE_STEP_PX)
}

/// [`find_free_space`] with an explicit grid pitch.
///
/// Candidates are scanned row-major (y outer, x inner) from the origin. When
/// none fits, the result stacks below the lowest occupied rect.
#[must_use]
pub fn find_free_space_with_step(size: Size, bounds: Bounds, occupied: &[Rect], gap: f64, step: f64) -> Point {
    let step = if step.is_finite() && step > 0.0 { step } else { FREE_SPACE_STEP_PX };
    let max_x = bounds.width - size.width;
    let max_y = bounds.height - size.height;

    let mut y = 0.0;
    while y <= max_y {
        let mut x = 0.0;
        while x <= max_x {
            let candidate = Rect::new(x, y, size.width, size.height).expand(gap);
            if !occupied.iter().any(|r| overlaps(candidate, *r)) {
                return Point::new(x, y);
            }
            x += step;
        }
        y += step;
    }

    let stacked_y = occupied.iter().map(|r| r.bottom() + gap).fold(0.0, f64::max);
    Point::new(0.0, stacked_y)
}

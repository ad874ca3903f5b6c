//! Shared numeric constants for the layout engine.

// ── Collision / spacing ─────────────────────────────────────────

/// Vertical gap, in pixels, left between a moved widget and any widget it pushes down.
pub const DEFAULT_GAP_PX: f64 = 15.0;

/// Pitch of the candidate grid scanned when looking for free space.
pub const FREE_SPACE_STEP_PX: f64 = 40.0;

/// Pitch used when drop grid-snap is enabled.
pub const SNAP_PITCH_PX: f64 = 16.0;

// ── Widget sizing ───────────────────────────────────────────────

/// Smallest width a resize may produce.
pub const MIN_WIDGET_WIDTH: f64 = 200.0;

/// Smallest height a resize may produce.
pub const MIN_WIDGET_HEIGHT: f64 = 150.0;

/// Default size for widgets the catalog has no entry for.
pub const FALLBACK_WIDGET_WIDTH: f64 = 320.0;
pub const FALLBACK_WIDGET_HEIGHT: f64 = 280.0;

/// Cascade step used to place widgets that have no stored position.
pub const CASCADE_STEP_X: f64 = 120.0;
pub const CASCADE_STEP_Y: f64 = 80.0;

// ── Grid mode ───────────────────────────────────────────────────

/// Columns in the responsive grid.
pub const GRID_COLUMNS: u32 = 12;

/// Spacing between grid cells (and around the grid), in pixels.
pub const GRID_SPACING_PX: f64 = 16.0;

/// Container widths at which the grid switches to the `sm` and `md` spans.
pub const BREAKPOINT_SM_PX: f64 = 600.0;
pub const BREAKPOINT_MD_PX: f64 = 900.0;

// ── Persistence ─────────────────────────────────────────────────

/// Storage key for the persisted free-form layout.
pub const DEFAULT_STORAGE_KEY: &str = "crmFreeformLayout";

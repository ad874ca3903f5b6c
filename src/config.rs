//! Layout tunables with defaults and optional environment overrides.
//!
//! Browser hosts normally use [`LayoutConfig::default`]. Native hosts (test
//! harnesses, server-side pre-rendering) can call [`LayoutConfig::from_env`].
//! Invalid or missing variables fall back to the default silently.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    DEFAULT_GAP_PX, DEFAULT_STORAGE_KEY, FREE_SPACE_STEP_PX, MIN_WIDGET_HEIGHT, MIN_WIDGET_WIDTH, SNAP_PITCH_PX,
};

/// Tunables for placement, collision resolution and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Spacing enforced by collision pushes and free-space search.
    pub gap: f64,
    /// Resize floor for width.
    pub min_width: f64,
    /// Resize floor for height.
    pub min_height: f64,
    /// Pitch of the free-space candidate grid.
    pub free_space_step: f64,
    /// Pitch used when `grid_snap` is on.
    pub snap_pitch: f64,
    /// Snap dropped widgets to `snap_pitch`.
    pub grid_snap: bool,
    /// Key the layout is persisted under.
    pub storage_key: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP_PX,
            min_width: MIN_WIDGET_WIDTH,
            min_height: MIN_WIDGET_HEIGHT,
            free_space_step: FREE_SPACE_STEP_PX,
            snap_pitch: SNAP_PITCH_PX,
            grid_snap: false,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `CASEBOARD_GAP`: default 15
    /// - `CASEBOARD_MIN_WIDTH`: default 200
    /// - `CASEBOARD_MIN_HEIGHT`: default 150
    /// - `CASEBOARD_FREE_SPACE_STEP`: default 40
    /// - `CASEBOARD_SNAP_PITCH`: default 16
    /// - `CASEBOARD_GRID_SNAP`: `true` / `false`, default false
    /// - `CASEBOARD_STORAGE_KEY`: default `crmFreeformLayout`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gap: env_parse_px("CASEBOARD_GAP", defaults.gap),
            min_width: env_parse_px("CASEBOARD_MIN_WIDTH", defaults.min_width),
            min_height: env_parse_px("CASEBOARD_MIN_HEIGHT", defaults.min_height),
            free_space_step: positive_or(
                env_parse_px("CASEBOARD_FREE_SPACE_STEP", defaults.free_space_step),
                defaults.free_space_step,
            ),
            snap_pitch: positive_or(env_parse_px("CASEBOARD_SNAP_PITCH", defaults.snap_pitch), defaults.snap_pitch),
            grid_snap: env_parse("CASEBOARD_GRID_SNAP", defaults.grid_snap),
            storage_key: match std::env::var("CASEBOARD_STORAGE_KEY") {
                Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
                _ => defaults.storage_key,
            },
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Parse a pixel value; negative or non-finite values fall back to `default`.
fn env_parse_px(key: &str, default: f64) -> f64 {
    let value = env_parse(key, default);
    if value.is_finite() && value >= 0.0 { value } else { default }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value > 0.0 { value } else { default }
}

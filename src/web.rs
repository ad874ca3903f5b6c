//! Browser glue: `localStorage` persistence and DOM measurement.
//!
//! Compiled only with the `web` feature. Everything here is a thin adapter
//! over [`web_sys`]; layout behavior lives in [`crate::engine::DashboardCore`].

use wasm_bindgen::JsCast;
use web_sys::{Element, Storage};

use crate::engine::{Action, DashboardCore};
use crate::geom::{CanvasMetrics, Rect};
use crate::mode::CapturedRect;
use crate::persist::{KeyValueStore, PersistError};

/// Attribute hosts put on each rendered widget element.
pub const WIDGET_ID_ATTR: &str = "data-widget-id";

/// [`KeyValueStore`] over the window's `localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::StorageUnavailable`] outside a window or when
    /// storage is disabled (e.g. some private browsing modes).
    pub fn open() -> Result<Self, PersistError> {
        let window = web_sys::window().ok_or(PersistError::StorageUnavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) | Err(_) => Err(PersistError::StorageUnavailable),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(_) => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.storage.set_item(key, value).is_ok()
    }
}

/// Bounding box of `element` in viewport coordinates.
#[must_use]
pub fn measure_canvas(element: &Element) -> CanvasMetrics {
    let r = element.get_bounding_client_rect();
    CanvasMetrics::new(r.left(), r.top(), r.width(), r.height())
}

/// Screen rects of every widget element under `container` carrying [`WIDGET_ID_ATTR`].
#[must_use]
pub fn capture_rects(container: &Element) -> Vec<CapturedRect> {
    let Ok(nodes) = container.query_selector_all(&format!("[{WIDGET_ID_ATTR}]")) else {
        return Vec::new();
    };
    let mut captured = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else {
            continue;
        };
        let Ok(element) = node.dyn_into::<Element>() else {
            continue;
        };
        let Some(id) = element.get_attribute(WIDGET_ID_ATTR) else {
            continue;
        };
        let r = element.get_bounding_client_rect();
        captured.push(CapturedRect::new(id, Rect::new(r.left(), r.top(), r.width(), r.height())));
    }
    captured
}

/// A [`DashboardCore`] bound to its grid container and free-form canvas elements.
pub struct Dashboard {
    container: Element,
    canvas: Option<Element>,
    pub core: DashboardCore<LocalStorage>,
}

impl Dashboard {
    /// # Errors
    ///
    /// Fails when `localStorage` is unavailable.
    pub fn new(container: Element) -> Result<Self, PersistError> {
        let storage = LocalStorage::open()?;
        let mut core = DashboardCore::crm(storage);
        core.set_grid_width(container.client_width().into());
        Ok(Self { container, canvas: None, core })
    }

    /// Toolbar toggle. Captures grid rects first when leaving grid mode.
    pub fn toggle_mode(&mut self) -> Vec<Action> {
        let captured = if self.core.mode.is_freeform() { Vec::new() } else { capture_rects(&self.container) };
        self.canvas = None;
        self.core.toggle_mode(captured)
    }

    /// The host mounted (or resized) the free-form canvas element.
    pub fn attach_canvas(&mut self, canvas: Element) -> Vec<Action> {
        let metrics = measure_canvas(&canvas);
        self.canvas = Some(canvas);
        self.core.set_canvas(metrics)
    }

    /// Window resize: re-measure whichever surface is showing.
    pub fn on_resize(&mut self) -> Vec<Action> {
        match &self.canvas {
            Some(canvas) => {
                let metrics = measure_canvas(canvas);
                self.core.set_canvas(metrics)
            }
            None => self.core.set_grid_width(self.container.client_width().into()),
        }
    }

    /// Current views as JSON for the host renderer.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] if a view fails to serialize.
    pub fn views_json(&self) -> Result<String, serde_json::Error> {
        self.core.views_json()
    }
}

//! Free-form dashboard layout engine for the case-management dashboard.
//!
//! Widgets are shown either in a responsive column grid or on an open canvas
//! where they can be dragged, resized and reordered. This crate owns the
//! canvas layout: positions and sizes per widget, collision pushes, clamping
//! to the canvas, free-space placement, drop reordering, the grid/free-form
//! handoff and persistence of the arrangement. Drawing widget contents and
//! wiring DOM events stay with the host, which drives
//! [`engine::DashboardCore`] and acts on the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Host facade [`engine::DashboardCore`] and its actions |
//! | [`store`] | Layout model and its mutation operations |
//! | [`spatial`] | Overlap, clamping and free-space search |
//! | [`drag`] | Drag-and-drop state machine |
//! | [`mode`] | Grid / free-form switching and position handoff |
//! | [`grid`] | Responsive 12-column grid placement |
//! | [`persist`] | Layout record encoding and key-value storage |
//! | [`render`] | Per-widget views for the host renderer |
//! | [`catalog`] | Known widgets, default sizes and display names |
//! | [`geom`] | Points, sizes, rects and canvas metrics |
//! | [`config`] | Tunables with environment overrides |
//! | [`consts`] | Shared numeric constants (gap, minimum sizes, breakpoints) |
//! | `web` | `localStorage` and DOM measurement (feature `web`) |

pub mod catalog;
pub mod config;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod geom;
pub mod grid;
pub mod mode;
pub mod persist;
pub mod render;
pub mod spatial;
pub mod store;
#[cfg(feature = "web")]
pub mod web;

//! Widget rendering interface: turns a widget id into a host-renderable view.
//!
//! The engine does not draw. It hands the host a [`WidgetView`] per widget:
//! title, frame, interaction flags and a [`WidgetBody`] describing the
//! content. Which body a widget gets is decided by matching on its
//! [`WidgetKind`]; the frame and flags come from the [`RenderContext`].
//!
//! Views serialize to JSON for the host layer.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::catalog::{WidgetCatalog, WidgetKind};
use crate::geom::Rect;
use crate::store::WidgetId;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Per-render inputs that are not properties of the widget itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Free-form mode: the widget is absolutely positioned and interactive.
    pub is_freeform: bool,
    /// The widget is the current drop target.
    pub highlighted: bool,
    /// Where the widget sits: canvas-local in free-form, container-local in grid mode.
    pub frame: Rect,
}

/// Everything the host needs to draw one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub title: String,
    pub frame: Rect,
    pub draggable: bool,
    pub resizable: bool,
    pub highlighted: bool,
    pub body: WidgetBody,
}

/// Content description per widget kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetBody {
    /// Headline figure with two labelled footnotes.
    Stat { heading: &'static str, headline: String, footnotes: Vec<Labelled> },
    /// Headline figure over a small bar sparkline (bar heights in percent).
    Trend { heading: &'static str, badge: &'static str, headline: String, bars: Vec<u32> },
    /// Completion ratio.
    Completion { subtitle: &'static str, completed: u32, total: u32 },
    /// Monthly grouped bar chart.
    BarChart { heading: &'static str, categories: Vec<&'static str>, series: Vec<Series> },
    /// Labelled counters.
    Progress { heading: &'static str, rows: Vec<Labelled> },
    /// Filter chips over a list of case rows.
    CaseList { filters: Vec<Filter>, rows: Vec<CaseRow> },
    /// Widget id with no known kind.
    Placeholder { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labelled {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRow {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub status: &'static str,
}

impl WidgetBody {
    /// Completion percentage, for [`WidgetBody::Completion`] only.
    #[must_use]
    pub fn percent(&self) -> Option<u32> {
        match self {
            Self::Completion { completed, total, .. } if *total > 0 => Some(completed * 100 / total),
            _ => None,
        }
    }
}

fn labelled(label: &'static str, value: impl Into<String>) -> Labelled {
    Labelled { label, value: value.into() }
}

impl WidgetKind {
    /// Build the view for widget `id` titled `title`.
    #[must_use]
    pub fn render(self, id: &str, title: &str, ctx: RenderContext) -> WidgetView {
        let body = match self {
            Self::CaseStats => WidgetBody::Stat {
                heading: "Case Overview",
                headline: "5 Active Cases".into(),
                footnotes: vec![labelled("Due Soon", "Next Review"), labelled("In Review", "3 Cases")],
            },
            Self::PendingCases => WidgetBody::Trend {
                heading: "Pending Action",
                badge: "Delay",
                headline: "2 Cases".into(),
                bars: vec![20, 35, 45, 60, 75, 90, 90, 35, 20, 10, 5, 2],
            },
            Self::ActiveCases => WidgetBody::Completion { subtitle: "In Review", completed: 15, total: 20 },
            Self::Chart => WidgetBody::BarChart {
                heading: "Actions Needed",
                categories: MONTHS.to_vec(),
                series: vec![
                    Series { label: "Scans", values: vec![12, 15, 18, 14, 16, 20, 22, 19, 17, 21, 23, 25] },
                    Series { label: "Molds", values: vec![8, 10, 12, 11, 13, 15, 17, 16, 14, 18, 19, 21] },
                    Series { label: "Impressions", values: vec![5, 7, 9, 8, 10, 12, 14, 13, 11, 15, 16, 18] },
                ],
            },
            Self::ProgressOverview => WidgetBody::Progress {
                heading: "Progress Overview",
                rows: vec![
                    labelled("New Cases", "50"),
                    labelled("Pending", "30"),
                    labelled("In Progress", "20"),
                    labelled("Completed", "10"),
                ],
            },
            Self::CaseList => WidgetBody::CaseList {
                filters: vec![
                    Filter { label: "New", active: true },
                    Filter { label: "In Review", active: false },
                    Filter { label: "Completed", active: false },
                ],
                rows: vec![
                    CaseRow { title: "Case #12345", subtitle: "Dental Case", status: "Status" },
                    CaseRow { title: "Dental Cases", subtitle: "New Case", status: "Pending" },
                    CaseRow { title: "Image Upload", subtitle: "John Doe", status: "Submitted" },
                    CaseRow { title: "Dental Images", subtitle: "X-rays, Impressions", status: "Uploaded" },
                    CaseRow { title: "Priority: High", subtitle: "Workflow Status", status: "Turnaround" },
                ],
            },
            Self::Unknown => WidgetBody::Placeholder { message: format!("Unknown widget: {id}") },
        };

        WidgetView {
            id: id.to_string(),
            kind: self,
            title: title.to_string(),
            frame: ctx.frame,
            draggable: ctx.is_freeform,
            resizable: ctx.is_freeform,
            highlighted: ctx.is_freeform && ctx.highlighted,
            body,
        }
    }
}

/// Look up `id` in the catalog and render it. Unknown ids are titled with the id.
#[must_use]
pub fn render(catalog: &WidgetCatalog, id: &str, ctx: RenderContext) -> WidgetView {
    catalog.kind(id).render(id, catalog.display_name(id), ctx)
}

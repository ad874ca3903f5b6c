//! Widget catalog: the static id → kind / display name / default size table.
//!
//! The catalog is plain configuration handed to [`crate::store::LayoutStore`]
//! and the grid placer at construction. Ids that are not in the catalog still
//! work everywhere; they get [`WidgetKind::Unknown`], their id as display name,
//! and the fallback size.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

use crate::consts::{FALLBACK_WIDGET_HEIGHT, FALLBACK_WIDGET_WIDTH};
use crate::geom::Size;
use crate::store::WidgetId;

/// Which presentational widget an id renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Headline case counters.
    CaseStats,
    /// Cases awaiting action.
    PendingCases,
    /// Active case summary card.
    ActiveCases,
    /// Monthly case volume chart.
    Chart,
    /// Completion progress card.
    ProgressOverview,
    /// Tabular case list.
    CaseList,
    /// An id the catalog does not know.
    Unknown,
}

impl WidgetKind {
    /// Column spans in the 12-column grid at the `xs`, `sm` and `md` breakpoints.
    #[must_use]
    pub fn grid_spans(self) -> [u32; 3] {
        match self {
            Self::Chart => [12, 12, 12],
            Self::CaseList => [12, 12, 6],
            Self::CaseStats | Self::PendingCases | Self::ActiveCases | Self::ProgressOverview | Self::Unknown => {
                [12, 6, 4]
            }
        }
    }
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub name: String,
    pub default_size: Size,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, kind: WidgetKind, name: impl Into<String>, default_size: Size) -> Self {
        Self { id: id.into(), kind, name: name.into(), default_size }
    }
}

/// Ordered collection of known widgets. Entry order is the default dashboard order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetCatalog {
    entries: Vec<CatalogEntry>,
}

impl WidgetCatalog {
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The case-management dashboard's widget set.
    #[must_use]
    pub fn crm() -> Self {
        let card = Size::new(FALLBACK_WIDGET_WIDTH, FALLBACK_WIDGET_HEIGHT);
        Self::new(vec![
            CatalogEntry::new("caseStats", WidgetKind::CaseStats, "Case Statistics", card),
            CatalogEntry::new("pendingCases", WidgetKind::PendingCases, "Pending Cases", card),
            CatalogEntry::new("activeCasesCard", WidgetKind::ActiveCases, "Active Cases", card),
            CatalogEntry::new("chart", WidgetKind::Chart, "Cases Chart", Size::new(600.0, 350.0)),
            CatalogEntry::new("progressOverviewCard", WidgetKind::ProgressOverview, "Progress Overview", card),
            CatalogEntry::new("caseList", WidgetKind::CaseList, "Case List", Size::new(450.0, 400.0)),
        ])
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn kind(&self, id: &str) -> WidgetKind {
        self.get(id).map_or(WidgetKind::Unknown, |e| e.kind)
    }

    /// Display name, or the id itself when the catalog has no entry.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |e| e.name.as_str())
    }

    #[must_use]
    pub fn default_size(&self, id: &str) -> Size {
        self.get(id)
            .map_or(Size::new(FALLBACK_WIDGET_WIDTH, FALLBACK_WIDGET_HEIGHT), |e| e.default_size)
    }

    /// All catalog ids in catalog order.
    #[must_use]
    pub fn default_order(&self) -> Vec<WidgetId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    /// Catalog entries not currently in `order` (the "add widget" drawer).
    #[must_use]
    pub fn available(&self, order: &[WidgetId]) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| !order.contains(&e.id)).collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// WidgetCatalog::crm
// =============================================================

#[test]
fn crm_catalog_has_six_widgets_in_dashboard_order() {
    let catalog = WidgetCatalog::crm();
    assert_eq!(catalog.len(), 6);
    assert_eq!(
        catalog.default_order(),
        vec!["caseStats", "pendingCases", "activeCasesCard", "chart", "progressOverviewCard", "caseList"]
    );
}

#[test]
fn crm_catalog_default_sizes() {
    let catalog = WidgetCatalog::crm();
    assert_eq!(catalog.default_size("chart"), Size::new(600.0, 350.0));
    assert_eq!(catalog.default_size("caseList"), Size::new(450.0, 400.0));
    assert_eq!(catalog.default_size("caseStats"), Size::new(320.0, 280.0));
}

#[test]
fn crm_catalog_display_names() {
    let catalog = WidgetCatalog::crm();
    assert_eq!(catalog.display_name("activeCasesCard"), "Active Cases");
    assert_eq!(catalog.display_name("chart"), "Cases Chart");
}

// =============================================================
// Unknown ids
// =============================================================

#[test]
fn unknown_id_falls_back() {
    let catalog = WidgetCatalog::crm();
    assert!(!catalog.contains("weather"));
    assert_eq!(catalog.kind("weather"), WidgetKind::Unknown);
    assert_eq!(catalog.display_name("weather"), "weather");
    assert_eq!(catalog.default_size("weather"), Size::new(320.0, 280.0));
}

#[test]
fn empty_catalog() {
    let catalog = WidgetCatalog::default();
    assert!(catalog.is_empty());
    assert!(catalog.default_order().is_empty());
    assert!(catalog.available(&[]).is_empty());
}

// =============================================================
// available
// =============================================================

#[test]
fn available_excludes_widgets_on_dashboard() {
    let catalog = WidgetCatalog::crm();
    let order = vec!["chart".to_string(), "caseStats".to_string(), "custom".to_string()];
    let ids: Vec<&str> = catalog.available(&order).iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["pendingCases", "activeCasesCard", "progressOverviewCard", "caseList"]);
}

#[test]
fn available_is_empty_when_everything_placed() {
    let catalog = WidgetCatalog::crm();
    assert!(catalog.available(&catalog.default_order()).is_empty());
}

// =============================================================
// WidgetKind
// =============================================================

#[test]
fn grid_spans_per_kind() {
    assert_eq!(WidgetKind::CaseStats.grid_spans(), [12, 6, 4]);
    assert_eq!(WidgetKind::Chart.grid_spans(), [12, 12, 12]);
    assert_eq!(WidgetKind::CaseList.grid_spans(), [12, 12, 6]);
    assert_eq!(WidgetKind::Unknown.grid_spans(), [12, 6, 4]);
}

#![allow(clippy::float_cmp)]

use super::*;

fn ctx(is_freeform: bool, highlighted: bool) -> RenderContext {
    RenderContext { is_freeform, highlighted, frame: Rect::new(10.0, 20.0, 320.0, 280.0) }
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn catalog_widget_gets_display_name_and_kind() {
    let view = render(&WidgetCatalog::crm(), "chart", ctx(true, false));
    assert_eq!(view.id, "chart");
    assert_eq!(view.kind, WidgetKind::Chart);
    assert_eq!(view.title, "Cases Chart");
    assert_eq!(view.frame, Rect::new(10.0, 20.0, 320.0, 280.0));
}

#[test]
fn unknown_widget_is_titled_with_id() {
    let view = render(&WidgetCatalog::crm(), "mystery", ctx(true, false));
    assert_eq!(view.kind, WidgetKind::Unknown);
    assert_eq!(view.title, "mystery");
    assert!(matches!(view.body, WidgetBody::Placeholder { ref message } if message.contains("mystery")));
}

#[test]
fn every_catalog_kind_has_its_own_body() {
    let catalog = WidgetCatalog::crm();
    let view = |id: &str| render(&catalog, id, ctx(false, false)).body;
    assert!(matches!(view("caseStats"), WidgetBody::Stat { .. }));
    assert!(matches!(view("pendingCases"), WidgetBody::Trend { .. }));
    assert!(matches!(view("activeCasesCard"), WidgetBody::Completion { .. }));
    assert!(matches!(view("chart"), WidgetBody::BarChart { .. }));
    assert!(matches!(view("progressOverviewCard"), WidgetBody::Progress { .. }));
    assert!(matches!(view("caseList"), WidgetBody::CaseList { .. }));
}

// =============================================================
// Context flags
// =============================================================

#[test]
fn freeform_widgets_are_interactive() {
    let view = render(&WidgetCatalog::crm(), "caseStats", ctx(true, true));
    assert!(view.draggable);
    assert!(view.resizable);
    assert!(view.highlighted);
}

#[test]
fn grid_widgets_are_static_and_never_highlighted() {
    let view = render(&WidgetCatalog::crm(), "caseStats", ctx(false, true));
    assert!(!view.draggable);
    assert!(!view.resizable);
    assert!(!view.highlighted);
}

// =============================================================
// Bodies
// =============================================================

#[test]
fn chart_has_three_monthly_series() {
    let WidgetBody::BarChart { categories, series, .. } = WidgetKind::Chart.render("chart", "Chart", ctx(true, false)).body
    else {
        panic!("expected bar chart");
    };
    assert_eq!(categories.len(), 12);
    let labels: Vec<_> = series.iter().map(|s| s.label).collect();
    assert_eq!(labels, ["Scans", "Molds", "Impressions"]);
    assert!(series.iter().all(|s| s.values.len() == 12));
}

#[test]
fn completion_percent() {
    let body = WidgetKind::ActiveCases.render("a", "A", ctx(true, false)).body;
    assert_eq!(body.percent(), Some(75));
    assert_eq!(WidgetBody::Completion { subtitle: "", completed: 1, total: 0 }.percent(), None);
    assert_eq!(WidgetBody::Placeholder { message: String::new() }.percent(), None);
}

#[test]
fn case_list_starts_on_new_filter() {
    let WidgetBody::CaseList { filters, rows } = WidgetKind::CaseList.render("c", "C", ctx(true, false)).body else {
        panic!("expected case list");
    };
    let active: Vec<_> = filters.iter().filter(|f| f.active).map(|f| f.label).collect();
    assert_eq!(active, ["New"]);
    assert_eq!(rows.len(), 5);
}

#[test]
fn view_serializes_with_tagged_body() {
    let view = render(&WidgetCatalog::crm(), "progressOverviewCard", ctx(true, false));
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["kind"], "progress_overview");
    assert_eq!(value["body"]["type"], "progress");
    assert_eq!(value["body"]["rows"][0]["label"], "New Cases");
    assert_eq!(value["frame"]["width"], 320.0);
}

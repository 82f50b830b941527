//! Tests for duplicate identifier detection.

use polars::prelude::{Column, DataFrame};
use savcheck_core::{ScriptedResolver, display_value, find_duplicate_ids};
use savcheck_model::{CheckOptions, Diagnostics};

fn subset() -> Vec<String> {
    vec![
        "SBJNUM".to_string(),
        "ID".to_string(),
        "STATUS".to_string(),
    ]
}

fn id_values(df: &DataFrame) -> Vec<String> {
    let column = df.column("ID").unwrap();
    (0..df.height())
        .map(|idx| display_value(column.get(idx).unwrap()))
        .collect()
}

#[test]
fn reports_all_occurrences_of_duplicated_ids() {
    // Identifiers {5,5,7,9,9,9}: expect the two 5s and three 9s, never the 7.
    let df = DataFrame::new(vec![
        Column::new("SBJNUM".into(), vec![1i64, 2, 3, 4, 5, 6]),
        Column::new("ID".into(), vec![9i64, 5, 7, 9, 5, 9]),
        Column::new(
            "STATUS".into(),
            vec!["Completa"; 6],
        ),
    ])
    .unwrap();

    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::proceed();
    let report = find_duplicate_ids(
        &df,
        &subset(),
        &CheckOptions::default(),
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    assert_eq!(report.height(), 5);
    assert_eq!(id_values(&report), vec!["5", "5", "9", "9", "9"]);
}

#[test]
fn sort_is_stable_for_equal_ids() {
    let df = DataFrame::new(vec![
        Column::new("SBJNUM".into(), vec![10i64, 20, 30, 40]),
        Column::new("ID".into(), vec![9i64, 5, 9, 5]),
        Column::new("STATUS".into(), vec!["Completa"; 4]),
    ])
    .unwrap();

    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::proceed();
    let report = find_duplicate_ids(
        &df,
        &subset(),
        &CheckOptions::default(),
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    // Equal identifiers keep their original relative order.
    let subjects: Vec<String> = {
        let column = report.column("SBJNUM").unwrap();
        (0..report.height())
            .map(|idx| display_value(column.get(idx).unwrap()))
            .collect()
    };
    assert_eq!(subjects, vec!["20", "40", "10", "30"]);
}

#[test]
fn cancelled_rows_never_count() {
    // IDs 5 and 5, but one is cancelled: no duplicate remains.
    let df = DataFrame::new(vec![
        Column::new("SBJNUM".into(), vec![1i64, 2, 3]),
        Column::new("ID".into(), vec![5i64, 5, 7]),
        Column::new(
            "STATUS".into(),
            vec!["Completa", "Cancelada", "Completa"],
        ),
    ])
    .unwrap();

    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::proceed();
    let report = find_duplicate_ids(
        &df,
        &subset(),
        &CheckOptions::default(),
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    assert_eq!(report.height(), 0);
    assert!(diags.with_code("no-duplicates").next().is_some());
}

#[test]
fn empty_report_is_success() {
    let df = DataFrame::new(vec![
        Column::new("SBJNUM".into(), vec![1i64, 2, 3]),
        Column::new("ID".into(), vec![5i64, 7, 9]),
        Column::new("STATUS".into(), vec!["Completa"; 3]),
    ])
    .unwrap();

    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::proceed();
    let report = find_duplicate_ids(
        &df,
        &subset(),
        &CheckOptions::default(),
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    assert_eq!(report.height(), 0);
    assert!(!diags.has_errors());
}

#[test]
fn subject_column_leads_the_report() {
    let df = DataFrame::new(vec![
        Column::new("ID".into(), vec![5i64, 5]),
        Column::new("STATUS".into(), vec!["Completa"; 2]),
        Column::new("SBJNUM".into(), vec![1i64, 2]),
    ])
    .unwrap();

    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::proceed();
    let report = find_duplicate_ids(
        &df,
        &subset(),
        &CheckOptions::default(),
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    let first = report.get_column_names_owned()[0].to_string();
    assert_eq!(first, "SBJNUM");
    assert_eq!(report.height(), 2);
}

#[test]
fn missing_status_column_skips_filter_with_diagnostic() {
    let df = DataFrame::new(vec![
        Column::new("SBJNUM".into(), vec![1i64, 2]),
        Column::new("ID".into(), vec![5i64, 5]),
    ])
    .unwrap();

    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::proceed();
    let report = find_duplicate_ids(
        &df,
        &subset(),
        &CheckOptions::default(),
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    // Filter skipped: both rows survive and are reported.
    assert_eq!(report.height(), 2);
    assert!(
        diags
            .iter()
            .any(|diag| diag.column.as_deref() == Some("STATUS"))
    );
}

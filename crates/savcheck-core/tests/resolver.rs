//! Tests for missing-column resolution.

use polars::prelude::{Column, DataFrame};
use savcheck_core::{ScriptedResolver, parse_column_list, resolve_subset};
use savcheck_model::{CheckError, Diagnostics};

fn frame() -> DataFrame {
    DataFrame::new(vec![
        Column::new("SBJNUM".into(), vec![1i64, 2, 3]),
        Column::new("ID".into(), vec![5i64, 7, 5]),
        Column::new("STATUS".into(), vec!["Completa", "Completa", "Cancelada"]),
    ])
    .unwrap()
}

#[test]
fn parses_replacement_lists() {
    assert_eq!(parse_column_list("A, b"), vec!["A", "B"]);
    assert_eq!(
        parse_column_list("  sbjnum ,ID,  status "),
        vec!["SBJNUM", "ID", "STATUS"]
    );
    assert_eq!(parse_column_list("a,A, b ,B"), vec!["A", "B"]);
    assert!(parse_column_list("").is_empty());
    assert!(parse_column_list(" , ,, ").is_empty());
}

#[test]
fn complete_subset_passes_through() {
    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::replace_with_nothing();
    let subset = resolve_subset(
        &frame(),
        &["sbjnum".to_string(), "Id".to_string()],
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    // Case-normalized, resolver never consulted.
    assert_eq!(subset, vec!["SBJNUM", "ID"]);
    assert!(diags.is_empty());
}

#[test]
fn proceed_drops_missing_columns() {
    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::proceed();
    let subset = resolve_subset(
        &frame(),
        &[
            "SBJNUM".to_string(),
            "ID".to_string(),
            "NOME".to_string(),
        ],
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    assert_eq!(subset, vec!["SBJNUM", "ID"]);
    assert_eq!(diags.with_code("missing-columns").count(), 1);
    assert_eq!(diags.with_code("subset-reduced").count(), 1);
}

#[test]
fn replacement_list_becomes_new_subset() {
    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::replace("A, b");
    let subset = resolve_subset(
        &frame(),
        &["NOME".to_string()],
        &mut resolver,
        &mut diags,
    )
    .unwrap();

    assert_eq!(subset, vec!["A", "B"]);
}

#[test]
fn empty_replacement_is_fatal() {
    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::replace_with_nothing();
    let err = resolve_subset(
        &frame(),
        &["NOME".to_string()],
        &mut resolver,
        &mut diags,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CheckError>(),
        Some(CheckError::NoColumnsProvided)
    ));
}

#[test]
fn blank_replacement_is_fatal_too() {
    let mut diags = Diagnostics::new();
    let mut resolver = ScriptedResolver::replace(" , , ");
    let err = resolve_subset(
        &frame(),
        &["NOME".to_string()],
        &mut resolver,
        &mut diags,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CheckError>(),
        Some(CheckError::NoColumnsProvided)
    ));
}

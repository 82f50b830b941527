//! Tests for table normalization.

use polars::prelude::{AnyValue, Column, DataFrame, DataType};
use savcheck_core::{any_to_string, normalize_frame};
use savcheck_model::{DiagnosticSeverity, Diagnostics};

fn sample_frame() -> DataFrame {
    DataFrame::new(vec![
        Column::new("sbjnum".into(), vec![Some(101.0f64), Some(102.0), Some(103.0)]),
        Column::new("Id".into(), vec![Some(5.0f64), Some(7.0), Some(5.0)]),
        Column::new(
            "Nome".into(),
            vec![Some("maria"), Some("joao"), None],
        ),
    ])
    .unwrap()
}

#[test]
fn uppercases_column_names_and_values() {
    let mut diags = Diagnostics::new();
    let df = normalize_frame(
        sample_frame(),
        &["nome".to_string()],
        &[],
        &mut diags,
    )
    .unwrap();

    let names: Vec<String> = df
        .get_column_names_owned()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["SBJNUM", "ID", "NOME"]);

    let nome = df.column("NOME").unwrap();
    assert_eq!(any_to_string(nome.get(0).unwrap()), "MARIA");
    // Nulls stay null.
    assert!(matches!(nome.get(2).unwrap(), AnyValue::Null));
    assert!(diags.is_empty());
}

#[test]
fn coerces_int_columns() {
    let mut diags = Diagnostics::new();
    let df = normalize_frame(
        sample_frame(),
        &[],
        &["sbjnum".to_string(), "id".to_string()],
        &mut diags,
    )
    .unwrap();

    assert_eq!(df.column("SBJNUM").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("ID").unwrap().dtype(), &DataType::Int64);
    assert!(diags.is_empty());
}

#[test]
fn fractional_floats_truncate_toward_zero() {
    let df = DataFrame::new(vec![Column::new(
        "ID".into(),
        vec![Some(5.7f64), Some(7.0), Some(-2.9)],
    )])
    .unwrap();

    let mut diags = Diagnostics::new();
    let out = normalize_frame(df, &[], &["ID".to_string()], &mut diags).unwrap();

    let id = out.column("ID").unwrap();
    assert_eq!(id.dtype(), &DataType::Int64);
    assert_eq!(any_to_string(id.get(0).unwrap()), "5");
    assert_eq!(any_to_string(id.get(2).unwrap()), "-2");
    assert!(diags.is_empty());
}

#[test]
fn normalization_is_idempotent() {
    let upper = vec!["NOME".to_string()];
    let ints = vec!["SBJNUM".to_string(), "ID".to_string()];

    let mut diags = Diagnostics::new();
    let once = normalize_frame(sample_frame(), &upper, &ints, &mut diags).unwrap();
    let twice = normalize_frame(once.clone(), &upper, &ints, &mut diags).unwrap();

    assert!(once.equals_missing(&twice));
    assert!(diags.is_empty());
}

#[test]
fn missing_upper_column_warns_and_continues() {
    let mut diags = Diagnostics::new();
    let df = normalize_frame(
        sample_frame(),
        &["ENDERECO".to_string()],
        &[],
        &mut diags,
    )
    .unwrap();

    assert_eq!(df.width(), 3);
    assert_eq!(diags.warning_count(), 1);
    let warning = diags.with_code("missing-column").next().unwrap();
    assert_eq!(warning.severity, DiagnosticSeverity::Warning);
    assert_eq!(warning.column.as_deref(), Some("ENDERECO"));
}

#[test]
fn failed_coercion_is_reported_not_fatal() {
    let df = DataFrame::new(vec![
        Column::new("ID".into(), vec![Some("5"), Some("x7"), Some("9")]),
        Column::new("SBJNUM".into(), vec![Some(1.0f64), Some(2.0), Some(3.0)]),
    ])
    .unwrap();

    let mut diags = Diagnostics::new();
    let out = normalize_frame(
        df,
        &[],
        &["ID".to_string(), "SBJNUM".to_string()],
        &mut diags,
    )
    .unwrap();

    // The whole batch aborts: neither column was converted.
    assert_eq!(out.column("ID").unwrap().dtype(), &DataType::String);
    assert_eq!(out.column("SBJNUM").unwrap().dtype(), &DataType::Float64);
    assert_eq!(diags.error_count(), 1);
    assert!(diags.with_code("conversion").next().is_some());
}

#[test]
fn missing_int_column_aborts_batch() {
    let mut diags = Diagnostics::new();
    let out = normalize_frame(
        sample_frame(),
        &[],
        &["ID".to_string(), "MISSING".to_string()],
        &mut diags,
    )
    .unwrap();

    assert_eq!(out.column("ID").unwrap().dtype(), &DataType::Float64);
    assert_eq!(diags.error_count(), 1);
}

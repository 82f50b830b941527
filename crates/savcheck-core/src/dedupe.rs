//! Duplicate identifier detection.
//!
//! Restricts the table to the resolved column subset, sorts by the
//! identifier, drops cancelled records, and reports every row whose
//! identifier occurs more than once among the remainder. All occurrences are
//! kept, not just the second and later ones.

use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::{DataFrame, UInt32Chunked};
use tracing::info;

use savcheck_model::{CheckOptions, Diagnostics};

use crate::data_utils::{any_to_f64, cell, display_value, filter_rows, has_column};
use crate::resolver::{ColumnResolver, resolve_subset};

/// Find duplicated identifiers among non-cancelled records.
///
/// The returned frame keeps the subject column first (the report index) and
/// the identifier sort order. An empty frame is a valid result meaning no
/// duplicates exist.
pub fn find_duplicate_ids(
    df: &DataFrame,
    required: &[String],
    options: &CheckOptions,
    resolver: &mut dyn ColumnResolver,
    diags: &mut Diagnostics,
) -> Result<DataFrame> {
    let subset = resolve_subset(df, required, resolver, diags)?;
    let mut report = select_subset(df, &subset, options, diags)?;

    let id_column = options.id_column.to_uppercase();
    let status_column = options.status_column.to_uppercase();

    if has_column(&report, &id_column) {
        sort_by_identifier(&mut report, &id_column)?;
    } else {
        diags.warning(
            "missing-column",
            format!("identifier column {id_column} absent, sort skipped"),
            Some(&id_column),
        );
    }

    if has_column(&report, &status_column) {
        let keep: Vec<bool> = (0..report.height())
            .map(|idx| {
                display_value(cell(&report, &status_column, idx)) != options.cancelled_status
            })
            .collect();
        filter_rows(&mut report, &keep)?;
    } else {
        diags.warning(
            "missing-column",
            format!("status column {status_column} absent, cancelled filter skipped"),
            Some(&status_column),
        );
    }

    if !has_column(&report, &id_column) {
        diags.error(
            "missing-column",
            format!("identifier column {id_column} absent, cannot group duplicates"),
            Some(&id_column),
        );
        return Ok(report.head(Some(0)));
    }

    keep_duplicated(&mut report, &id_column)?;

    if report.height() == 0 {
        diags.info("no-duplicates", "no duplicated identifier found", Some(&id_column));
    } else {
        info!(rows = report.height(), "duplicated identifiers found");
    }
    Ok(report)
}

/// Restrict to the subset columns, subject column first when present.
fn select_subset(
    df: &DataFrame,
    subset: &[String],
    options: &CheckOptions,
    diags: &mut Diagnostics,
) -> Result<DataFrame> {
    let subject = options.subject_column.to_uppercase();
    let mut ordered: Vec<&String> = Vec::with_capacity(subset.len());
    if let Some(first) = subset.iter().find(|name| **name == subject) {
        ordered.push(first);
    } else {
        diags.warning(
            "missing-column",
            format!("subject column {subject} not in subset, report index skipped"),
            Some(&subject),
        );
    }
    ordered.extend(subset.iter().filter(|name| **name != subject));

    let mut columns = Vec::with_capacity(ordered.len());
    for name in ordered {
        match df.column(name) {
            Ok(column) => columns.push(column.clone()),
            Err(_) => diags.warning(
                "missing-column",
                format!("column {name} absent from table, dropped from report"),
                Some(name),
            ),
        }
    }
    Ok(DataFrame::new(columns)?)
}

/// Stable ascending sort by the identifier column.
///
/// Keys compare numerically when both sides parse as numbers, textually
/// otherwise; equal identifiers keep their prior relative order.
fn sort_by_identifier(df: &mut DataFrame, id_column: &str) -> Result<()> {
    let keys: Vec<(Option<f64>, String)> = (0..df.height())
        .map(|idx| {
            let value = cell(df, id_column, idx);
            (any_to_f64(value.clone()), display_value(value))
        })
        .collect();
    let mut indices: Vec<u32> = (0..df.height()).map(|idx| idx as u32).collect();
    indices.sort_by(|a, b| {
        let left = &keys[*a as usize];
        let right = &keys[*b as usize];
        match (left.0, right.0) {
            (Some(l), Some(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
            _ => left.1.cmp(&right.1),
        }
    });
    let idx = UInt32Chunked::from_vec("idx".into(), indices);
    *df = df.take(&idx)?;
    Ok(())
}

/// Keep every row whose identifier occurs two or more times. Rows with a
/// null identifier never count as duplicated.
fn keep_duplicated(df: &mut DataFrame, id_column: &str) -> Result<()> {
    let keys: Vec<Option<String>> = (0..df.height())
        .map(|idx| {
            let value = cell(df, id_column, idx);
            if matches!(value, polars::prelude::AnyValue::Null) {
                None
            } else {
                Some(display_value(value))
            }
        })
        .collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys.iter().flatten() {
        *counts.entry(key.as_str()).or_insert(0) += 1;
    }
    let keep: Vec<bool> = keys
        .iter()
        .map(|key| {
            key.as_deref()
                .is_some_and(|key| counts.get(key).copied().unwrap_or(0) >= 2)
        })
        .collect();
    filter_rows(df, &keep)
}

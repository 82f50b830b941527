//! Table normalization.
//!
//! Column names are upper-cased, configured text columns are upper-cased in
//! value, and configured columns are bulk-coerced to integer. The whole step
//! is idempotent and never fatal: a failed coercion is reported through the
//! diagnostics stream and the table flows on unconverted.

use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};
use tracing::debug;

use savcheck_model::Diagnostics;

use crate::data_utils::{any_to_i64, has_column, optional_string_column};

/// Normalize a record table.
///
/// `upper_columns` and `int_columns` are matched case-insensitively against
/// the (already upper-cased) table columns.
pub fn normalize_frame(
    mut df: DataFrame,
    upper_columns: &[String],
    int_columns: &[String],
    diags: &mut Diagnostics,
) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names_owned()
        .iter()
        .map(|name| name.to_uppercase())
        .collect();
    df.set_column_names(names)?;

    for column in upper_columns {
        let column = column.trim().to_uppercase();
        if !has_column(&df, &column) {
            diags.warning(
                "missing-column",
                format!("column {column} does not exist in the table"),
                Some(&column),
            );
            continue;
        }
        let values: Vec<Option<String>> = optional_string_column(&df, &column)?
            .into_iter()
            .map(|value| value.map(|text| text.to_uppercase()))
            .collect();
        df.with_column(Series::new(column.as_str().into(), values))?;
    }

    coerce_int_columns(&mut df, int_columns, diags)?;
    debug!(height = df.height(), "normalized table");
    Ok(df)
}

/// Bulk integer coercion, all-or-nothing per call.
///
/// A missing column or a non-numeric value aborts the batch with an error
/// diagnostic; the table keeps its unconverted values.
fn coerce_int_columns(
    df: &mut DataFrame,
    int_columns: &[String],
    diags: &mut Diagnostics,
) -> Result<()> {
    if int_columns.is_empty() {
        return Ok(());
    }

    let targets: Vec<String> = int_columns
        .iter()
        .map(|name| name.trim().to_uppercase())
        .collect();
    let missing: Vec<&String> = targets
        .iter()
        .filter(|name| !has_column(df, name))
        .collect();
    if !missing.is_empty() {
        diags.error(
            "conversion",
            format!("cannot convert to integer, columns absent: {missing:?}"),
            None,
        );
        return Ok(());
    }

    let mut converted: Vec<(String, Vec<Option<i64>>)> = Vec::with_capacity(targets.len());
    for name in &targets {
        let series = df.column(name)?;
        let mut values = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let value = series.get(idx).unwrap_or(AnyValue::Null);
            if matches!(value, AnyValue::Null) {
                values.push(None);
                continue;
            }
            match any_to_i64(value) {
                Some(number) => values.push(Some(number)),
                None => {
                    diags.error(
                        "conversion",
                        format!("non-numeric value in column {name}, check the data"),
                        Some(name),
                    );
                    return Ok(());
                }
            }
        }
        converted.push((name.clone(), values));
    }

    for (name, values) in converted {
        df.with_column(Series::new(name.as_str().into(), values))?;
    }
    Ok(())
}

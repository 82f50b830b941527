//! Categorical value labelling.
//!
//! Replaces coded values with the labels declared in the file's dictionary.
//! Not every designated column is guaranteed categorical in every input, so
//! a target without a dictionary is skipped with a warning, never an error.

use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

use savcheck_model::{Diagnostics, SurveyMeta};

use crate::data_utils::{any_to_i64, has_column};

/// Replace coded values in `targets` with their dictionary labels.
///
/// Codes with no matching dictionary entry become null rather than erroring.
pub fn apply_value_labels(
    mut df: DataFrame,
    meta: &SurveyMeta,
    targets: &[String],
    diags: &mut Diagnostics,
) -> Result<DataFrame> {
    for target in targets {
        let column = target.trim().to_uppercase();
        if !has_column(&df, &column) {
            diags.warning(
                "missing-column",
                format!("column {column} does not exist in the table"),
                Some(&column),
            );
            continue;
        }
        let Some(labels) = meta.value_labels_for(&column) else {
            diags.warning(
                "not-categorical",
                format!("variable {column} has no categorical metadata"),
                Some(&column),
            );
            continue;
        };

        let series = df.column(&column)?;
        let mut values: Vec<Option<String>> = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let value = series.get(idx).unwrap_or(AnyValue::Null);
            let label = any_to_i64(value).and_then(|code| labels.get(&code).cloned());
            values.push(label);
        }
        df.with_column(Series::new(column.as_str().into(), values))?;
        diags.info(
            "labels-applied",
            format!("labels applied to variable {column}"),
            Some(&column),
        );
    }
    Ok(df)
}

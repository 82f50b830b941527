//! Survey file loading.
//!
//! Bridges the .sav codec into a polars DataFrame plus a [`SurveyMeta`]
//! dictionary. A load either yields a complete table or a fatal error; there
//! is no partial result.

use std::path::Path;

use polars::prelude::{Column, DataFrame};
use tracing::info;

use savcheck_model::{CheckError, SurveyMeta};
use savcheck_sav::{SavDataset, SavError, SavValue, read_sav};

/// Load a .sav file as a record table plus its dictionary metadata.
///
/// `FileAccess` covers an unreadable path, `Parse` everything the codec
/// rejects (bad magic, truncation, unsupported encodings).
pub fn load_survey(path: &Path) -> Result<(DataFrame, SurveyMeta), CheckError> {
    let dataset = read_sav(path).map_err(|error| match error {
        SavError::FileNotFound { .. } | SavError::Io(_) => CheckError::FileAccess {
            path: path.to_path_buf(),
            message: error.to_string(),
        },
        other => CheckError::Parse {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let meta = build_meta(&dataset);
    let df = build_frame(&dataset).map_err(|error| CheckError::Parse {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;

    info!(
        columns = meta.column_count(),
        rows = meta.row_count,
        "loaded survey file"
    );
    Ok((df, meta))
}

fn build_meta(dataset: &SavDataset) -> SurveyMeta {
    let names: Vec<String> = dataset
        .columns
        .iter()
        .map(|column| column.name.clone())
        .collect();
    let mut meta = SurveyMeta::new(dataset.file_label.clone(), names, dataset.num_rows());
    for column in &dataset.columns {
        if let Some(label) = &column.label {
            meta.set_variable_label(&column.name, label.clone());
        }
    }
    for (name, labels) in &dataset.value_labels {
        meta.set_value_labels(name, labels.clone());
    }
    meta
}

fn build_frame(dataset: &SavDataset) -> anyhow::Result<DataFrame> {
    let mut columns = Vec::with_capacity(dataset.columns.len());
    for (idx, column) in dataset.columns.iter().enumerate() {
        if column.is_numeric() {
            let values: Vec<Option<f64>> = dataset
                .rows
                .iter()
                .map(|row| row.get(idx).and_then(SavValue::as_f64))
                .collect();
            columns.push(Column::new(column.name.as_str().into(), values));
        } else {
            let values: Vec<Option<String>> = dataset
                .rows
                .iter()
                .map(|row| {
                    row.get(idx)
                        .and_then(SavValue::as_str)
                        .map(ToString::to_string)
                })
                .collect();
            columns.push(Column::new(column.name.as_str().into(), values));
        }
    }
    Ok(DataFrame::new(columns)?)
}

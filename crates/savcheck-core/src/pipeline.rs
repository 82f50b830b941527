//! End-to-end duplicate-check pipeline.
//!
//! Load → normalize → label → deduplicate, strictly sequential. Each stage
//! hands the table forward by value; a second run starts from a fresh load.

use std::path::Path;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::info;

use savcheck_model::{Diagnostics, PipelineConfig, SurveyMeta};

use crate::dedupe::find_duplicate_ids;
use crate::labels::apply_value_labels;
use crate::loader::load_survey;
use crate::normalize::normalize_frame;
use crate::resolver::ColumnResolver;

/// Result of a pipeline run.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Duplicated rows, subject column first, identifier sort order kept.
    /// Empty means no duplicates, which is success.
    pub report: DataFrame,
    /// Dictionary metadata of the loaded file.
    pub meta: SurveyMeta,
    /// Everything non-fatal the stages reported.
    pub diagnostics: Diagnostics,
}

impl CheckOutcome {
    pub fn has_duplicates(&self) -> bool {
        self.report.height() > 0
    }
}

/// Run the full check over one survey file.
pub fn run_check(
    path: &Path,
    config: &PipelineConfig,
    resolver: &mut dyn ColumnResolver,
) -> Result<CheckOutcome> {
    let mut diagnostics = Diagnostics::new();

    info!(path = %path.display(), "loading survey file");
    let (df, meta) = load_survey(path)?;

    let df = normalize_frame(df, &config.upper_columns, &config.int_columns, &mut diagnostics)?;

    let df = if config.label_columns.is_empty() {
        df
    } else {
        apply_value_labels(df, &meta, &config.label_columns, &mut diagnostics)?
    };

    let report = find_duplicate_ids(
        &df,
        &config.required_subset,
        &config.check,
        resolver,
        &mut diagnostics,
    )?;

    info!(
        duplicates = report.height(),
        diagnostics = diagnostics.len(),
        "check finished"
    );
    Ok(CheckOutcome {
        report,
        meta,
        diagnostics,
    })
}

//! Configuration for a duplicate-check run.
//!
//! All knobs are fixed at call time; nothing here is discovered at runtime.

use serde::{Deserialize, Serialize};

/// Columns and values steering the duplicate detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOptions {
    /// Column holding the record status.
    pub status_column: String,
    /// Status value that excludes a record from duplicate grouping.
    pub cancelled_status: String,
    /// Identifier column compared for duplicates.
    pub id_column: String,
    /// Subject-number column used as the report's row index.
    pub subject_column: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            status_column: "STATUS".to_string(),
            cancelled_status: "Cancelada".to_string(),
            id_column: "ID".to_string(),
            subject_column: "SBJNUM".to_string(),
        }
    }
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status_column(mut self, name: impl Into<String>) -> Self {
        self.status_column = name.into();
        self
    }

    #[must_use]
    pub fn with_cancelled_status(mut self, value: impl Into<String>) -> Self {
        self.cancelled_status = value.into();
        self
    }

    #[must_use]
    pub fn with_id_column(mut self, name: impl Into<String>) -> Self {
        self.id_column = name.into();
        self
    }

    #[must_use]
    pub fn with_subject_column(mut self, name: impl Into<String>) -> Self {
        self.subject_column = name.into();
        self
    }
}

/// Full pipeline configuration: normalization, labelling, and detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Text columns whose values are upper-cased during normalization.
    pub upper_columns: Vec<String>,
    /// Columns bulk-coerced to integer during normalization.
    pub int_columns: Vec<String>,
    /// Columns whose coded values are replaced with dictionary labels.
    pub label_columns: Vec<String>,
    /// Columns the duplicate detector requires.
    pub required_subset: Vec<String>,
    /// Detector options.
    pub check: CheckOptions,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_upper_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.upper_columns = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_int_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.int_columns = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_label_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_columns = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_required_subset<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_subset = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_check(mut self, check: CheckOptions) -> Self {
        self.check = check;
        self
    }
}

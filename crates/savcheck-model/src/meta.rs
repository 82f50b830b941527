//! Survey dictionary metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only companion to a loaded record table.
///
/// Captures the variable dictionary of the source file: ordered column names,
/// case count, variable labels, and per-variable value→label mappings for
/// categorical variables. Lookup keys are upper-cased at construction so all
/// access is case-normalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyMeta {
    /// File label from the header record, if any.
    pub file_label: Option<String>,
    /// Column names in file order, original casing.
    pub column_names: Vec<String>,
    /// Number of cases in the file.
    pub row_count: usize,
    /// Variable label per column, keyed by upper-cased name.
    variable_labels: BTreeMap<String, String>,
    /// Value→label dictionary per categorical column, keyed by upper-cased name.
    value_labels: BTreeMap<String, BTreeMap<i64, String>>,
}

impl SurveyMeta {
    pub fn new(file_label: Option<String>, column_names: Vec<String>, row_count: usize) -> Self {
        Self {
            file_label,
            column_names,
            row_count,
            variable_labels: BTreeMap::new(),
            value_labels: BTreeMap::new(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    pub fn set_variable_label(&mut self, column: &str, label: impl Into<String>) {
        self.variable_labels
            .insert(column.to_ascii_uppercase(), label.into());
    }

    pub fn variable_label(&self, column: &str) -> Option<&str> {
        self.variable_labels
            .get(&column.to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn set_value_labels(&mut self, column: &str, labels: BTreeMap<i64, String>) {
        self.value_labels
            .insert(column.to_ascii_uppercase(), labels);
    }

    /// Value→label dictionary for a column, if the column is categorical.
    pub fn value_labels_for(&self, column: &str) -> Option<&BTreeMap<i64, String>> {
        self.value_labels.get(&column.to_ascii_uppercase())
    }

    pub fn has_value_labels(&self, column: &str) -> bool {
        self.value_labels_for(column).is_some()
    }

    /// Columns that carry a value-label dictionary, in sorted order.
    pub fn labelled_columns(&self) -> impl Iterator<Item = &str> {
        self.value_labels.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::SurveyMeta;
    use std::collections::BTreeMap;

    #[test]
    fn value_label_lookup_is_case_normalized() {
        let mut meta = SurveyMeta::new(None, vec!["supervisor".to_string()], 0);
        let mut labels = BTreeMap::new();
        labels.insert(1, "Ana".to_string());
        meta.set_value_labels("supervisor", labels);

        assert!(meta.has_value_labels("SUPERVISOR"));
        assert_eq!(
            meta.value_labels_for("Supervisor").and_then(|m| m.get(&1)),
            Some(&"Ana".to_string())
        );
        assert!(!meta.has_value_labels("STATUS"));
    }
}

//! Core types for .sav file handling.

use std::collections::BTreeMap;

/// Variable type in a .sav dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavVarType {
    /// 8-byte floating point.
    Numeric,
    /// Fixed-width text, `width` bytes in the case record.
    Text { width: u8 },
}

impl SavVarType {
    /// Number of 8-byte case elements this variable occupies.
    pub fn element_count(self) -> usize {
        match self {
            Self::Numeric => 1,
            Self::Text { width } => (width as usize).div_ceil(8),
        }
    }
}

/// A variable (column) in a .sav dictionary.
#[derive(Debug, Clone)]
pub struct SavColumn {
    /// Variable name, at most 8 bytes.
    pub name: String,
    /// Optional variable label.
    pub label: Option<String>,
    /// Variable type.
    pub var_type: SavVarType,
}

impl SavColumn {
    /// Create a numeric variable.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            var_type: SavVarType::Numeric,
        }
    }

    /// Create a text variable of the given byte width.
    pub fn text(name: impl Into<String>, width: u8) -> Self {
        Self {
            name: name.into(),
            label: None,
            var_type: SavVarType::Text { width },
        }
    }

    /// Attach a variable label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.var_type == SavVarType::Numeric
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum SavValue {
    Number(f64),
    Text(String),
    /// System-missing numeric value or blank string.
    Missing,
}

impl SavValue {
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// An in-memory .sav dataset: dictionary plus case grid.
#[derive(Debug, Clone, Default)]
pub struct SavDataset {
    /// File label from the header record.
    pub file_label: Option<String>,
    /// Variables in dictionary order.
    pub columns: Vec<SavColumn>,
    /// Value→label dictionaries keyed by variable name (integral codes only).
    pub value_labels: BTreeMap<String, BTreeMap<i64, String>>,
    /// Case data; each row has one value per column.
    pub rows: Vec<Vec<SavValue>>,
}

impl SavDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(columns: Vec<SavColumn>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Set the file label.
    #[must_use]
    pub fn with_file_label(mut self, label: impl Into<String>) -> Self {
        self.file_label = Some(label.into());
        self
    }

    pub fn add_row(&mut self, row: Vec<SavValue>) {
        self.rows.push(row);
    }

    /// Attach a value-label dictionary to a variable.
    pub fn set_value_labels(&mut self, column: impl Into<String>, labels: BTreeMap<i64, String>) {
        self.value_labels.insert(column.into(), labels);
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by exact name.
    pub fn find_column(&self, name: &str) -> Option<&SavColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Total 8-byte elements per case record.
    pub fn case_size(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.var_type.element_count())
            .sum()
    }
}

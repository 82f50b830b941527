//! .sav file writer.
//!
//! Writes the same uncompressed little-endian subset the reader accepts, so
//! written files round-trip.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::error::{Result, SavError};
use crate::header::{
    COMPRESSION_BIAS, LAYOUT_CODE, MAGIC, REC_DICT_END, REC_VALUE_LABEL_VARS, REC_VALUE_LABELS,
    REC_VARIABLE, SYSMIS, align_up, pad_field,
};
use crate::types::{SavColumn, SavDataset, SavValue, SavVarType};

const PRODUCT_NAME: &str = "@(#) SPSS DATA FILE savcheck";

/// .sav file writer.
pub struct SavWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> SavWriter<W> {
    /// Create a new writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write a dataset.
    pub fn write_dataset(mut self, dataset: &SavDataset) -> Result<()> {
        validate_dataset(dataset)?;

        self.writer.write_all(&build_header(dataset))?;
        for column in &dataset.columns {
            self.writer.write_all(&build_variable_records(column))?;
        }
        for (name, labels) in &dataset.value_labels {
            let element = first_element_index(dataset, name).ok_or_else(|| {
                SavError::invalid_dataset(format!("value labels for unknown column {name}"))
            })?;
            self.writer
                .write_all(&build_value_label_records(labels, element)?)?;
        }

        // Dictionary terminator.
        self.writer.write_all(&REC_DICT_END.to_le_bytes())?;
        self.writer.write_all(&0i32.to_le_bytes())?;

        for row in &dataset.rows {
            self.writer.write_all(&build_case(dataset, row))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl SavWriter<File> {
    /// Create a .sav file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

/// Write a dataset to a path.
pub fn write_sav(path: &Path, dataset: &SavDataset) -> Result<()> {
    SavWriter::create(path)?.write_dataset(dataset)
}

fn validate_dataset(dataset: &SavDataset) -> Result<()> {
    if dataset.columns.is_empty() {
        return Err(SavError::invalid_dataset("no variables"));
    }
    let mut seen = BTreeSet::new();
    for column in &dataset.columns {
        if column.name.is_empty() {
            return Err(SavError::invalid_dataset("empty variable name"));
        }
        if column.name.len() > 8 {
            return Err(SavError::invalid_dataset(format!(
                "variable name {} longer than 8 bytes",
                column.name
            )));
        }
        if !seen.insert(column.name.to_ascii_uppercase()) {
            return Err(SavError::invalid_dataset(format!(
                "duplicate variable name {}",
                column.name
            )));
        }
        if let SavVarType::Text { width: 0 } = column.var_type {
            return Err(SavError::invalid_dataset(format!(
                "text variable {} has zero width",
                column.name
            )));
        }
    }
    for (idx, row) in dataset.rows.iter().enumerate() {
        if row.len() != dataset.columns.len() {
            return Err(SavError::invalid_dataset(format!(
                "row {idx} has {} values, expected {}",
                row.len(),
                dataset.columns.len()
            )));
        }
        for (column, value) in dataset.columns.iter().zip(row) {
            if let (SavVarType::Text { width }, SavValue::Text(text)) = (column.var_type, value)
                && text.len() > width as usize
            {
                return Err(SavError::invalid_dataset(format!(
                    "value in row {idx} exceeds width {width} of column {}",
                    column.name
                )));
            }
        }
    }
    for (name, labels) in &dataset.value_labels {
        let column = dataset.find_column(name).ok_or_else(|| {
            SavError::invalid_dataset(format!("value labels for unknown column {name}"))
        })?;
        if !column.is_numeric() {
            return Err(SavError::invalid_dataset(format!(
                "value labels on non-numeric column {name}"
            )));
        }
        for label in labels.values() {
            if label.len() > 255 {
                return Err(SavError::invalid_dataset(format!(
                    "value label longer than 255 bytes on column {name}"
                )));
            }
        }
    }
    Ok(())
}

fn build_header(dataset: &SavDataset) -> Vec<u8> {
    let now = Local::now();
    let mut header = Vec::with_capacity(176);
    header.extend_from_slice(MAGIC);
    header.extend_from_slice(&pad_field(PRODUCT_NAME, 60));
    header.extend_from_slice(&LAYOUT_CODE.to_le_bytes());
    header.extend_from_slice(&(dataset.case_size() as i32).to_le_bytes());
    header.extend_from_slice(&0i32.to_le_bytes()); // compression: none
    header.extend_from_slice(&0i32.to_le_bytes()); // weight: none
    header.extend_from_slice(&(dataset.num_rows() as i32).to_le_bytes());
    header.extend_from_slice(&COMPRESSION_BIAS.to_le_bytes());
    header.extend_from_slice(&pad_field(&now.format("%d %b %y").to_string(), 9));
    header.extend_from_slice(&pad_field(&now.format("%H:%M:%S").to_string(), 8));
    header.extend_from_slice(&pad_field(
        dataset.file_label.as_deref().unwrap_or(""),
        64,
    ));
    header.extend_from_slice(&pad_field("", 3));
    header
}

/// Build the type-2 record for a variable, plus continuation records for
/// strings wider than one 8-byte element.
fn build_variable_records(column: &SavColumn) -> Vec<u8> {
    let (type_code, print_format) = match column.var_type {
        SavVarType::Numeric => (0i32, format_code(5, 8, 2)),
        SavVarType::Text { width } => (width as i32, format_code(1, width as i32, 0)),
    };

    let mut record = Vec::new();
    record.extend_from_slice(&REC_VARIABLE.to_le_bytes());
    record.extend_from_slice(&type_code.to_le_bytes());
    record.extend_from_slice(&i32::from(column.label.is_some()).to_le_bytes());
    record.extend_from_slice(&0i32.to_le_bytes()); // no missing-value definitions
    record.extend_from_slice(&print_format.to_le_bytes());
    record.extend_from_slice(&print_format.to_le_bytes());
    record.extend_from_slice(&pad_field(&column.name, 8));
    if let Some(label) = &column.label {
        record.extend_from_slice(&(label.len() as i32).to_le_bytes());
        record.extend_from_slice(&pad_field(label, align_up(label.len(), 4)));
    }

    let extra_elements = column.var_type.element_count() - 1;
    for _ in 0..extra_elements {
        record.extend_from_slice(&REC_VARIABLE.to_le_bytes());
        record.extend_from_slice(&(-1i32).to_le_bytes());
        record.extend_from_slice(&0i32.to_le_bytes());
        record.extend_from_slice(&0i32.to_le_bytes());
        record.extend_from_slice(&0i32.to_le_bytes());
        record.extend_from_slice(&0i32.to_le_bytes());
        record.extend_from_slice(&pad_field("", 8));
    }
    record
}

/// SPSS print/write format packed as type/width/decimals bytes.
fn format_code(format_type: i32, width: i32, decimals: i32) -> i32 {
    (format_type << 16) | (width << 8) | decimals
}

fn build_value_label_records(
    labels: &std::collections::BTreeMap<i64, String>,
    element: usize,
) -> Result<Vec<u8>> {
    let mut record = Vec::new();
    record.extend_from_slice(&REC_VALUE_LABELS.to_le_bytes());
    record.extend_from_slice(&(labels.len() as i32).to_le_bytes());
    for (value, label) in labels {
        record.extend_from_slice(&(*value as f64).to_le_bytes());
        let padded = align_up(label.len() + 1, 8);
        record.push(label.len() as u8);
        record.extend_from_slice(&pad_field(label, padded - 1));
    }
    record.extend_from_slice(&REC_VALUE_LABEL_VARS.to_le_bytes());
    record.extend_from_slice(&1i32.to_le_bytes());
    record.extend_from_slice(&(element as i32).to_le_bytes());
    Ok(record)
}

/// 1-based dictionary element index of a column's first element.
fn first_element_index(dataset: &SavDataset, name: &str) -> Option<usize> {
    let mut element = 1usize;
    for column in &dataset.columns {
        if column.name == name {
            return Some(element);
        }
        element += column.var_type.element_count();
    }
    None
}

fn build_case(dataset: &SavDataset, row: &[SavValue]) -> Vec<u8> {
    let mut case = Vec::with_capacity(dataset.case_size() * 8);
    for (column, value) in dataset.columns.iter().zip(row) {
        match column.var_type {
            SavVarType::Numeric => {
                let number = match value {
                    SavValue::Number(number) => *number,
                    _ => SYSMIS,
                };
                case.extend_from_slice(&number.to_le_bytes());
            }
            SavVarType::Text { width } => {
                let text = match value {
                    SavValue::Text(text) => text.as_str(),
                    _ => "",
                };
                let elements = (width as usize).div_ceil(8);
                case.extend_from_slice(&pad_field(text, elements * 8));
            }
        }
    }
    case
}

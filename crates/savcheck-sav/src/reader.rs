//! .sav file reader.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Result, SavError};
use crate::header::{
    HEADER_LEN, LAYOUT_CODE, MAGIC, REC_DICT_END, REC_DOCUMENT, REC_EXTENSION, REC_VALUE_LABEL_VARS,
    REC_VALUE_LABELS, REC_VARIABLE, SYSMIS, align_up, read_bytes, read_f64, read_i32,
    read_padded_string,
};
use crate::types::{SavColumn, SavDataset, SavValue, SavVarType};

/// .sav file reader.
///
/// Reads uncompressed little-endian system files.
pub struct SavReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> SavReader<R> {
    /// Create a new reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read the entire file into memory and parse it.
    pub fn read_dataset(mut self) -> Result<SavDataset> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        parse_sav_data(&data)
    }
}

impl SavReader<File> {
    /// Open a .sav file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SavError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SavError::Io(e)
            }
        })?;
        Ok(Self::new(file))
    }
}

/// Read a .sav file from a path.
pub fn read_sav(path: &Path) -> Result<SavDataset> {
    SavReader::open(path)?.read_dataset()
}

/// Header fields the parser needs downstream.
struct HeaderInfo {
    case_size: usize,
    ncases: i64,
    file_label: Option<String>,
}

/// Parse .sav data from bytes.
fn parse_sav_data(data: &[u8]) -> Result<SavDataset> {
    let info = parse_header(data)?;
    let mut offset = HEADER_LEN;

    let mut columns: Vec<SavColumn> = Vec::new();
    // 1-based dictionary element index of each column's first element;
    // value-label variable records refer to these.
    let mut element_of_column: Vec<usize> = Vec::new();
    let mut element_index = 0usize;
    let mut value_labels: BTreeMap<String, BTreeMap<i64, String>> = BTreeMap::new();

    loop {
        let rec_type = read_i32(data, offset)?;
        offset += 4;
        match rec_type {
            REC_VARIABLE => {
                element_index += 1;
                offset = parse_variable_record(
                    data,
                    offset,
                    &mut columns,
                    &mut element_of_column,
                    element_index,
                )?;
            }
            REC_VALUE_LABELS => {
                offset = parse_value_labels(
                    data,
                    offset,
                    &columns,
                    &element_of_column,
                    &mut value_labels,
                )?;
            }
            REC_DOCUMENT => {
                let lines = read_i32(data, offset)?;
                if lines < 0 {
                    return Err(SavError::invalid_format("negative document line count"));
                }
                offset += 4 + lines as usize * 80;
            }
            REC_EXTENSION => {
                let _subtype = read_i32(data, offset)?;
                let size = read_i32(data, offset + 4)?;
                let count = read_i32(data, offset + 8)?;
                if size < 0 || count < 0 {
                    return Err(SavError::invalid_format("negative extension record size"));
                }
                offset += 12 + size as usize * count as usize;
            }
            REC_DICT_END => {
                // Terminator carries one filler int.
                read_i32(data, offset)?;
                offset += 4;
                break;
            }
            other => {
                return Err(SavError::invalid_format(format!(
                    "unknown dictionary record type {other}"
                )));
            }
        }
    }

    if element_index != info.case_size {
        return Err(SavError::invalid_format(format!(
            "dictionary declares {element_index} case elements, header says {}",
            info.case_size
        )));
    }

    let rows = parse_case_data(data, offset, &columns, &info)?;

    Ok(SavDataset {
        file_label: info.file_label,
        columns,
        value_labels,
        rows,
    })
}

fn parse_header(data: &[u8]) -> Result<HeaderInfo> {
    if data.len() < HEADER_LEN {
        return Err(SavError::invalid_format("file too small for header record"));
    }
    if &data[0..4] != MAGIC {
        return Err(SavError::invalid_format("bad magic, not a sav file"));
    }

    let layout_code = read_i32(data, 64)?;
    if layout_code != LAYOUT_CODE && layout_code != 3 {
        if layout_code.swap_bytes() == LAYOUT_CODE || layout_code.swap_bytes() == 3 {
            return Err(SavError::unsupported("big-endian (byte-swapped) file"));
        }
        return Err(SavError::invalid_format(format!(
            "bad layout code {layout_code}"
        )));
    }

    let case_size = read_i32(data, 68)?;
    if case_size <= 0 {
        return Err(SavError::invalid_format("non-positive case size"));
    }

    let compression = read_i32(data, 72)?;
    if compression != 0 {
        return Err(SavError::unsupported(format!(
            "compressed data (compression code {compression})"
        )));
    }

    let ncases = read_i32(data, 80)?;
    if ncases < -1 {
        return Err(SavError::invalid_format("bad case count"));
    }

    let file_label = read_padded_string(data, 109, 64)?;

    Ok(HeaderInfo {
        case_size: case_size as usize,
        ncases: ncases as i64,
        file_label: if file_label.is_empty() {
            None
        } else {
            Some(file_label)
        },
    })
}

/// Parse one type-2 record. Returns the offset past the record.
fn parse_variable_record(
    data: &[u8],
    mut offset: usize,
    columns: &mut Vec<SavColumn>,
    element_of_column: &mut Vec<usize>,
    element_index: usize,
) -> Result<usize> {
    let index = columns.len();
    let type_code = read_i32(data, offset)?;
    let has_label = read_i32(data, offset + 4)?;
    let n_missing = read_i32(data, offset + 8)?;
    // print format, write format
    offset += 20;
    let name = read_padded_string(data, offset, 8)?;
    offset += 8;

    let mut label = None;
    if has_label == 1 {
        let len = read_i32(data, offset)?;
        if len < 0 {
            return Err(SavError::InvalidVariable {
                index,
                message: "negative label length".to_string(),
            });
        }
        offset += 4;
        let bytes = read_bytes(data, offset, align_up(len as usize, 4))?;
        label = Some(
            String::from_utf8_lossy(&bytes[..len as usize])
                .trim_end()
                .to_string(),
        );
        offset += align_up(len as usize, 4);
    } else if has_label != 0 {
        return Err(SavError::InvalidVariable {
            index,
            message: format!("bad has_label flag {has_label}"),
        });
    }

    // Missing-value definitions are read past but not modelled.
    let missing_count = n_missing.unsigned_abs() as usize;
    if missing_count > 3 {
        return Err(SavError::InvalidVariable {
            index,
            message: format!("bad missing value count {n_missing}"),
        });
    }
    offset += missing_count * 8;

    match type_code {
        -1 => {
            // Continuation of the preceding long string; no new column.
            Ok(offset)
        }
        0 => {
            if name.is_empty() {
                return Err(SavError::InvalidVariable {
                    index,
                    message: "empty variable name".to_string(),
                });
            }
            let mut column = SavColumn::numeric(name);
            column.label = label;
            columns.push(column);
            element_of_column.push(element_index);
            Ok(offset)
        }
        width @ 1..=255 => {
            if name.is_empty() {
                return Err(SavError::InvalidVariable {
                    index,
                    message: "empty variable name".to_string(),
                });
            }
            let mut column = SavColumn::text(name, width as u8);
            column.label = label;
            columns.push(column);
            element_of_column.push(element_index);
            Ok(offset)
        }
        other => Err(SavError::InvalidVariable {
            index,
            message: format!("bad variable type code {other}"),
        }),
    }
}

/// Parse a type-3 value-labels record plus its type-4 variable list.
/// Returns the offset past both records.
fn parse_value_labels(
    data: &[u8],
    mut offset: usize,
    columns: &[SavColumn],
    element_of_column: &[usize],
    value_labels: &mut BTreeMap<String, BTreeMap<i64, String>>,
) -> Result<usize> {
    let count = read_i32(data, offset)?;
    if count < 0 {
        return Err(SavError::invalid_format("negative value label count"));
    }
    offset += 4;

    let mut labels: BTreeMap<i64, String> = BTreeMap::new();
    for _ in 0..count {
        let value = read_f64(data, offset)?;
        offset += 8;
        let len = read_bytes(data, offset, 1)?[0] as usize;
        let padded = align_up(len + 1, 8);
        let bytes = read_bytes(data, offset + 1, padded - 1)?;
        let label = String::from_utf8_lossy(&bytes[..len]).trim_end().to_string();
        offset += padded;
        // Only integral codes are modelled; others are carried in the file
        // but have no lookup key here.
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            labels.insert(value as i64, label);
        }
    }

    let rec_type = read_i32(data, offset)?;
    if rec_type != REC_VALUE_LABEL_VARS {
        return Err(SavError::invalid_format(
            "value labels not followed by a variable index record",
        ));
    }
    let var_count = read_i32(data, offset + 4)?;
    if var_count <= 0 {
        return Err(SavError::invalid_format("empty value label variable list"));
    }
    offset += 8;

    for _ in 0..var_count {
        let element = read_i32(data, offset)? as usize;
        offset += 4;
        let column = element_of_column
            .iter()
            .position(|first| *first == element)
            .and_then(|idx| columns.get(idx))
            .ok_or_else(|| {
                SavError::invalid_format(format!("value labels refer to unknown element {element}"))
            })?;
        value_labels.insert(column.name.clone(), labels.clone());
    }

    Ok(offset)
}

fn parse_case_data(
    data: &[u8],
    mut offset: usize,
    columns: &[SavColumn],
    info: &HeaderInfo,
) -> Result<Vec<Vec<SavValue>>> {
    let case_bytes = info.case_size * 8;
    let remaining = data.len().saturating_sub(offset);
    let ncases = if info.ncases >= 0 {
        info.ncases as usize
    } else {
        if case_bytes == 0 {
            return Ok(Vec::new());
        }
        remaining / case_bytes
    };
    if remaining < ncases * case_bytes {
        return Err(SavError::invalid_format("truncated case data"));
    }

    let mut rows = Vec::with_capacity(ncases);
    for _ in 0..ncases {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            match column.var_type {
                SavVarType::Numeric => {
                    let value = read_f64(data, offset)?;
                    offset += 8;
                    if value == SYSMIS {
                        row.push(SavValue::Missing);
                    } else {
                        row.push(SavValue::Number(value));
                    }
                }
                SavVarType::Text { width } => {
                    let elements = (width as usize).div_ceil(8);
                    let bytes = read_bytes(data, offset, elements * 8)?;
                    offset += elements * 8;
                    let text = String::from_utf8_lossy(&bytes[..width as usize])
                        .trim_end()
                        .to_string();
                    if text.is_empty() {
                        row.push(SavValue::Missing);
                    } else {
                        row.push(SavValue::Text(text));
                    }
                }
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

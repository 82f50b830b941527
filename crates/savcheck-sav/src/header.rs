//! Record layouts and byte-level primitives for the .sav format.
//!
//! A system file is a header record followed by dictionary records and then
//! the case data. All integers are 4-byte little-endian, all floats 8-byte
//! IEEE little-endian in the supported subset.
//!
//! # Header Record (176 bytes)
//!
//! | Offset  | Field             | Type     | Description                      |
//! |---------|-------------------|----------|----------------------------------|
//! | 0-3     | rec_type          | char[4]  | Magic `$FL2`                     |
//! | 4-63    | prod_name         | char[60] | Producing software               |
//! | 64-67   | layout_code       | int      | 2 (or 3); byte-order sentinel    |
//! | 68-71   | nominal_case_size | int      | 8-byte elements per case         |
//! | 72-75   | compression       | int      | 0 = none, 1 = bytecode           |
//! | 76-79   | weight_index      | int      | 0 = unweighted                   |
//! | 80-83   | ncases            | int      | Case count, -1 = unknown         |
//! | 84-91   | bias              | flt64    | Compression bias (100.0)         |
//! | 92-100  | creation_date     | char[9]  | `dd mmm yy`                      |
//! | 101-108 | creation_time     | char[8]  | `hh:mm:ss`                       |
//! | 109-172 | file_label        | char[64] | File label                       |
//! | 173-175 | padding           | char[3]  |                                  |
//!
//! # Dictionary record types
//!
//! - `2` — variable record (type code 0 = numeric, 1-255 = string width,
//!   -1 = continuation of a long string)
//! - `3` — value labels, followed by a type `4` variable-index record
//! - `6` — document record (skipped)
//! - `7` — extension subrecord (skipped)
//! - `999` — dictionary terminator; case data follows

use crate::error::{Result, SavError};

/// Magic bytes opening every system file.
pub const MAGIC: &[u8; 4] = b"$FL2";

/// Header record length in bytes.
pub const HEADER_LEN: usize = 176;

/// System-missing value for numeric variables.
pub const SYSMIS: f64 = -f64::MAX;

/// Compression bias written to the header.
pub const COMPRESSION_BIAS: f64 = 100.0;

/// Layout code for native byte order.
pub const LAYOUT_CODE: i32 = 2;

/// Record type tags.
pub const REC_VARIABLE: i32 = 2;
pub const REC_VALUE_LABELS: i32 = 3;
pub const REC_VALUE_LABEL_VARS: i32 = 4;
pub const REC_DOCUMENT: i32 = 6;
pub const REC_EXTENSION: i32 = 7;
pub const REC_DICT_END: i32 = 999;

/// Read a little-endian i32 at `offset`, failing on truncation.
pub fn read_i32(data: &[u8], offset: usize) -> Result<i32> {
    let end = offset
        .checked_add(4)
        .ok_or_else(|| SavError::invalid_format("offset overflow"))?;
    let bytes = data
        .get(offset..end)
        .ok_or_else(|| SavError::invalid_format("unexpected end of file"))?;
    Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a little-endian f64 at `offset`, failing on truncation.
pub fn read_f64(data: &[u8], offset: usize) -> Result<f64> {
    let end = offset
        .checked_add(8)
        .ok_or_else(|| SavError::invalid_format("offset overflow"))?;
    let bytes = data
        .get(offset..end)
        .ok_or_else(|| SavError::invalid_format("unexpected end of file"))?;
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    Ok(f64::from_le_bytes(raw))
}

/// Read `len` raw bytes at `offset`, failing on truncation.
pub fn read_bytes<'a>(data: &'a [u8], offset: usize, len: usize) -> Result<&'a [u8]> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| SavError::invalid_format("offset overflow"))?;
    data.get(offset..end)
        .ok_or_else(|| SavError::invalid_format("unexpected end of file"))
}

/// Decode a space-padded byte field into a trimmed string.
pub fn read_padded_string(data: &[u8], offset: usize, len: usize) -> Result<String> {
    let bytes = read_bytes(data, offset, len)?;
    Ok(String::from_utf8_lossy(bytes)
        .trim_end_matches([' ', '\0'])
        .to_string())
}

/// Space-pad `value` into a fixed-width field, truncating if needed.
pub fn pad_field(value: &str, len: usize) -> Vec<u8> {
    let mut field = vec![b' '; len];
    let bytes = value.as_bytes();
    let take = bytes.len().min(len);
    field[..take].copy_from_slice(&bytes[..take]);
    field
}

/// Round `len` up to the next multiple of `align`.
pub fn align_up(len: usize, align: usize) -> usize {
    len.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::{align_up, pad_field, read_i32, read_padded_string};

    #[test]
    fn reads_little_endian_i32() {
        let data = [2u8, 0, 0, 0, 0xff];
        assert_eq!(read_i32(&data, 0).unwrap(), 2);
        assert!(read_i32(&data, 2).is_err());
    }

    #[test]
    fn pads_and_trims_fields() {
        let field = pad_field("ID", 8);
        assert_eq!(&field, b"ID      ");
        assert_eq!(read_padded_string(&field, 0, 8).unwrap(), "ID");
    }

    #[test]
    fn aligns_up() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(9, 4), 12);
    }
}

//! CSV export of the duplicate report.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use savcheck_core::data_utils::cell;
use savcheck_core::display_value;

/// Write the report to `path` as CSV, one record per row.
///
/// Values are rendered the way the pipeline compares them, so an
/// identifier that read as `5.0` is written as `5`.
pub fn write_report_csv(report: &DataFrame, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let names = report.get_column_names_owned();
    writer.write_record(names.iter().map(|name| name.as_str()))?;
    for idx in 0..report.height() {
        let mut record = Vec::with_capacity(names.len());
        for name in &names {
            record.push(display_value(cell(report, name.as_str(), idx)));
        }
        writer.write_record(&record)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_report_csv;
    use polars::prelude::{Column, DataFrame};

    #[test]
    fn writes_header_and_rendered_values() {
        let df = DataFrame::new(vec![
            Column::new("SBJNUM".into(), vec![Some(101i64), Some(103)]),
            Column::new("ID".into(), vec![Some(5.0f64), Some(5.0)]),
            Column::new("NOME".into(), vec![Some("ANA"), None]),
        ])
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_report_csv(&df, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("SBJNUM,ID,NOME"));
        assert_eq!(lines.next(), Some("101,5,ANA"));
        assert_eq!(lines.next(), Some("103,5,"));
    }
}

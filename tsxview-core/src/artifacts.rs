//! CSV dataset artifacts.
//!
//! Two files per dataset directory: the wide table and the tidy frame.
//! Writes are atomic (write to .tmp, rename into place) so a crash
//! never leaves a half-written dataset behind. The wide file reads back
//! into a `PriceTable`, which lets the viewer and the `pages` command
//! work offline.

use crate::data::DataError;
use crate::table::{PriceColumn, PriceTable, TidyFrame};
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Wide artifact file name: `Date,<T1>,<T2>,...`, empty cell for a gap.
pub const WIDE_CSV: &str = "tsx_adj_close_wide.csv";

/// Tidy artifact file name: `Date,Ticker,Adj Close`.
pub const TIDY_CSV: &str = "tsx_adj_close_tidy.csv";

/// Paths of a written dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub wide: PathBuf,
    pub tidy: PathBuf,
}

/// Write both artifacts into `dir`, creating it if needed.
pub fn write_dataset(
    table: &PriceTable,
    frame: &TidyFrame,
    dir: &Path,
) -> Result<DatasetPaths, DataError> {
    Ok(DatasetPaths {
        wide: write_wide_csv(table, dir)?,
        tidy: write_tidy_csv(frame, dir)?,
    })
}

/// Write the wide table as CSV; returns the final path.
pub fn write_wide_csv(table: &PriceTable, dir: &Path) -> Result<PathBuf, DataError> {
    let path = dir.join(WIDE_CSV);
    write_atomic(&path, |file| {
        let header: Vec<&str> = std::iter::once("Date")
            .chain(table.columns.iter().map(|c| c.ticker.as_str()))
            .collect();
        writeln!(file, "{}", header.join(","))?;

        for (i, date) in table.dates.iter().enumerate() {
            let mut line = date.to_string();
            for col in &table.columns {
                line.push(',');
                if let Some(price) = col.values[i] {
                    line.push_str(&price.to_string());
                }
            }
            writeln!(file, "{line}")?;
        }
        Ok(())
    })?;
    Ok(path)
}

/// Write the tidy frame as CSV; returns the final path.
pub fn write_tidy_csv(frame: &TidyFrame, dir: &Path) -> Result<PathBuf, DataError> {
    let path = dir.join(TIDY_CSV);
    write_atomic(&path, |file| {
        writeln!(file, "Date,Ticker,Adj Close")?;
        for row in &frame.rows {
            writeln!(file, "{},{},{}", row.date, row.ticker, row.price)?;
        }
        Ok(())
    })?;
    Ok(path)
}

/// Read a wide artifact back into a table.
pub fn read_wide_csv(path: &Path) -> Result<PriceTable, DataError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DataError::ArtifactError(format!("open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::ArtifactError(format!("read header of {}: {e}", path.display())))?
        .clone();

    if headers.get(0) != Some("Date") {
        return Err(DataError::ArtifactError(format!(
            "{} does not start with a Date column",
            path.display()
        )));
    }

    let tickers: Vec<String> = headers.iter().skip(1).map(String::from).collect();
    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); tickers.len()];

    for record in reader.records() {
        let record = record
            .map_err(|e| DataError::ArtifactError(format!("read {}: {e}", path.display())))?;

        let date_cell = record.get(0).unwrap_or("");
        let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|e| {
            DataError::ArtifactError(format!("bad date {date_cell:?} in {}: {e}", path.display()))
        })?;
        dates.push(date);

        for (j, column) in values.iter_mut().enumerate() {
            let cell = record.get(j + 1).unwrap_or("");
            if cell.is_empty() {
                column.push(None);
            } else {
                let price = cell.parse::<f64>().map_err(|e| {
                    DataError::ArtifactError(format!(
                        "bad price {cell:?} in {}: {e}",
                        path.display()
                    ))
                })?;
                column.push(Some(price));
            }
        }
    }

    let columns = tickers
        .into_iter()
        .zip(values)
        .map(|(ticker, values)| PriceColumn { ticker, values })
        .collect();

    Ok(PriceTable { dates, columns })
}

/// Write a file through a .tmp sibling and rename it into place.
fn write_atomic<F>(path: &Path, write_body: F) -> Result<(), DataError>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| DataError::ArtifactError(format!("create {}: {e}", dir.display())))?;
    }

    let tmp_path = path.with_extension("csv.tmp");
    let mut file = File::create(&tmp_path)
        .map_err(|e| DataError::ArtifactError(format!("create {}: {e}", tmp_path.display())))?;

    write_body(&mut file)
        .map_err(|e| DataError::ArtifactError(format!("write {}: {e}", tmp_path.display())))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::ArtifactError(format!("rename into {}: {e}", path.display()))
    })?;

    Ok(())
}

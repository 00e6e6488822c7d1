//! Ticker universe loading.
//!
//! The universe is a flat CSV with a `Ticker` or `Symbol` column
//! (matched case-insensitively). A missing or unreadable file falls back
//! to a small built-in bank list; a readable file without a recognized
//! column falls back too, but with a user-visible warning so the typo
//! does not go unnoticed.

use crate::symbols;
use std::path::{Path, PathBuf};

/// Default ticker file looked up in the working directory.
pub const DEFAULT_TICKER_FILE: &str = "tsx_tickers_extracted.csv";

/// Built-in fallback: the six large Canadian banks.
pub const FALLBACK_TICKERS: [&str; 6] = ["RY.TO", "TD.TO", "BNS.TO", "BMO.TO", "CM.TO", "NA.TO"];

const TICKER_COLUMNS: [&str; 2] = ["ticker", "symbol"];

/// Where a universe came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniverseSource {
    CsvFile(PathBuf),
    Fallback,
}

/// The normalized, sorted, deduplicated ticker set plus its provenance.
#[derive(Debug, Clone)]
pub struct Universe {
    pub tickers: Vec<String>,
    pub source: UniverseSource,
    /// Set when the loader fell back because the CSV had no ticker column.
    pub warning: Option<String>,
}

impl Universe {
    /// The built-in fallback universe.
    pub fn fallback() -> Self {
        Self {
            tickers: symbols::normalize_all(&FALLBACK_TICKERS),
            source: UniverseSource::Fallback,
            warning: None,
        }
    }

    /// Load a universe from a CSV file, or the fallback set when `path`
    /// is `None` or the file cannot be read.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::fallback();
        };

        let mut reader = match csv::Reader::from_path(path) {
            Ok(r) => r,
            Err(_) => return Self::fallback(),
        };

        let headers = match reader.headers() {
            Ok(h) => h.clone(),
            Err(_) => return Self::fallback(),
        };

        let Some(col) = ticker_column(&headers) else {
            let mut universe = Self::fallback();
            universe.warning = Some(format!(
                "no Ticker/Symbol column in {}; using the built-in bank list",
                path.display()
            ));
            return universe;
        };

        let mut raw: Vec<String> = Vec::new();
        for record in reader.records() {
            let Ok(record) = record else {
                return Self::fallback();
            };
            if let Some(cell) = record.get(col) {
                raw.push(cell.to_string());
            }
        }

        Self {
            tickers: symbols::normalize_all(&raw),
            source: UniverseSource::CsvFile(path.to_path_buf()),
            warning: None,
        }
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Short human-readable provenance for status lines.
    pub fn source_label(&self) -> String {
        match &self.source {
            UniverseSource::CsvFile(path) => path.display().to_string(),
            UniverseSource::Fallback => "built-in bank list".to_string(),
        }
    }
}

fn ticker_column(headers: &csv::StringRecord) -> Option<usize> {
    headers
        .iter()
        .position(|h| TICKER_COLUMNS.contains(&h.trim().to_lowercase().as_str()))
}

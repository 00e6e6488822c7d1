//! Viewer configuration.
//!
//! Defaults match the tool's out-of-the-box behavior: a 15-year window,
//! a $1000 price ceiling, CNR.TO pinned, ten tickers per page. An
//! optional `tsxview.toml` overrides any field; front ends layer their
//! own overrides (CLI flags, persisted TUI state) on top.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tsxview.toml";

/// Interactive adjustment ranges for the history window, in years.
pub const YEARS_MIN: u32 = 5;
pub const YEARS_MAX: u32 = 20;

/// Interactive adjustment ranges for the page size.
pub const PAGE_SIZE_MIN: usize = 5;
pub const PAGE_SIZE_MAX: usize = 25;

/// Viewer configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Ticker list CSV; `None` means the default file if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker_csv: Option<PathBuf>,

    /// Years of history to download.
    pub years: u32,

    /// Tickers whose max observed price exceeds this are filtered out.
    pub max_price: f64,

    /// The pinned ticker granted a slot on every page.
    pub keep: String,

    /// Tickers per page, including the pinned slot.
    pub page_size: usize,

    /// Tickers per display row.
    pub tickers_per_row: usize,

    /// Directory the CSV artifacts are written to.
    pub dataset_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ticker_csv: None,
            years: 15,
            max_price: 1000.0,
            keep: "CNR.TO".to_string(),
            page_size: 10,
            tickers_per_row: 8,
            dataset_dir: PathBuf::from("dataset"),
        }
    }
}

impl ViewerConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read config file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str::<Self>(content)
            .map(Self::normalized)
            .map_err(|e| format!("parse config TOML: {e}"))
    }

    /// Load the default config file when present, defaults otherwise.
    pub fn load_default() -> Self {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::from_file(path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Clamp degenerate values so downstream arithmetic stays finite.
    pub fn normalized(mut self) -> Self {
        self.years = self.years.max(1);
        self.page_size = self.page_size.max(1);
        self.tickers_per_row = self.tickers_per_row.max(1);
        self
    }

    /// The download window ending at `today`: `years * 365` days back.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = today - Duration::days(i64::from(self.years) * 365);
        (start, today)
    }

    /// The ticker CSV to load: the configured path, or the default file
    /// when it exists in the working directory.
    pub fn ticker_csv_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.ticker_csv {
            return Some(path.clone());
        }
        let default = PathBuf::from(crate::universe::DEFAULT_TICKER_FILE);
        default.exists().then_some(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_documented_ones() {
        let config = ViewerConfig::default();
        assert_eq!(config.years, 15);
        assert_eq!(config.max_price, 1000.0);
        assert_eq!(config.keep, "CNR.TO");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.tickers_per_row, 8);
        assert_eq!(config.dataset_dir, PathBuf::from("dataset"));
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config = ViewerConfig::from_toml("years = 10\nkeep = \"RY.TO\"\n").unwrap();
        assert_eq!(config.years, 10);
        assert_eq!(config.keep, "RY.TO");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn toml_roundtrip() {
        let config = ViewerConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = ViewerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(ViewerConfig::from_toml("years = \"many\"").is_err());
    }

    #[test]
    fn normalized_clamps_zeroes() {
        let config = ViewerConfig::from_toml("page_size = 0\nyears = 0\n").unwrap();
        assert_eq!(config.page_size, 1);
        assert_eq!(config.years, 1);
    }

    #[test]
    fn window_spans_years_back_from_today() {
        let config = ViewerConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let (start, end) = config.window(today);
        assert_eq!(end, today);
        assert_eq!(end - start, Duration::days(15 * 365));
    }
}

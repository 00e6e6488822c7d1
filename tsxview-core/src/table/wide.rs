//! The wide price table: one date axis, one column per ticker.
//!
//! Built from per-symbol series by unioning the date axes, aligning
//! each series to the union, and forward-filling gaps. A cell before a
//! ticker's first observation stays empty; a ticker with no
//! observations at all contributes no column.

use crate::data::PriceSeries;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One ticker's column, aligned to the table's date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceColumn {
    pub ticker: String,
    /// Same length as the date axis; `None` before the first observation.
    pub values: Vec<Option<f64>>,
}

/// Date-indexed adjusted closes, one column per ticker.
///
/// Invariants: dates strictly ascending, columns sorted by ticker, every
/// column as long as the date axis, columns forward-filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<PriceColumn>,
}

impl PriceTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the table from per-symbol series.
    pub fn from_series(series: Vec<PriceSeries>) -> Self {
        // Collect the union of all dates
        let mut all_dates = BTreeSet::new();
        for s in &series {
            for p in &s.points {
                all_dates.insert(p.date);
            }
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

        let mut columns: Vec<PriceColumn> = Vec::new();
        for s in series {
            if s.points.is_empty() {
                continue;
            }

            let mut by_date: HashMap<NaiveDate, f64> = HashMap::new();
            for p in &s.points {
                by_date.insert(p.date, p.adj_close);
            }

            // Align to the axis and forward-fill in one pass
            let mut values: Vec<Option<f64>> = Vec::with_capacity(dates.len());
            let mut last: Option<f64> = None;
            for date in &dates {
                if let Some(&price) = by_date.get(date) {
                    last = Some(price);
                }
                values.push(last);
            }

            columns.push(PriceColumn {
                ticker: s.symbol,
                values,
            });
        }

        columns.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        columns.dedup_by(|a, b| a.ticker == b.ticker);

        Self { dates, columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of tickers.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of dates.
    pub fn height(&self) -> usize {
        self.dates.len()
    }

    /// Column tickers, in table (sorted) order.
    pub fn tickers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.ticker.clone()).collect()
    }

    pub fn column(&self, ticker: &str) -> Option<&PriceColumn> {
        self.columns.iter().find(|c| c.ticker == ticker)
    }

    /// Maximum observed price per ticker, in table order.
    pub fn max_by_ticker(&self) -> BTreeMap<String, f64> {
        let mut out = BTreeMap::new();
        for col in &self.columns {
            let max = col
                .values
                .iter()
                .flatten()
                .fold(f64::MIN, |acc, &v| acc.max(v));
            if max > f64::MIN {
                out.insert(col.ticker.clone(), max);
            }
        }
        out
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

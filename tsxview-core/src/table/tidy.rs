//! The tidy (long-form) frame: one row per observed price point.

use super::wide::PriceTable;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One observed price point.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRow {
    pub date: NaiveDate,
    pub ticker: String,
    pub price: f64,
}

/// Long-form price data, ticker-major: rows grouped by ticker in table
/// order, dates ascending within a ticker. Cells the wide table left
/// empty do not appear here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TidyFrame {
    pub rows: Vec<TidyRow>,
}

impl TidyFrame {
    /// Reshape a wide table into tidy rows.
    pub fn from_wide(table: &PriceTable) -> Self {
        let mut rows = Vec::new();
        for col in &table.columns {
            for (i, value) in col.values.iter().enumerate() {
                if let Some(price) = value {
                    rows.push(TidyRow {
                        date: table.dates[i],
                        ticker: col.ticker.clone(),
                        price: *price,
                    });
                }
            }
        }
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unique tickers, sorted.
    pub fn tickers(&self) -> Vec<String> {
        let mut out: Vec<String> = self.rows.iter().map(|r| r.ticker.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Maximum observed price per ticker.
    pub fn max_by_ticker(&self) -> BTreeMap<String, f64> {
        let mut out: BTreeMap<String, f64> = BTreeMap::new();
        for row in &self.rows {
            out.entry(row.ticker.clone())
                .and_modify(|max| *max = max.max(row.price))
                .or_insert(row.price);
        }
        out
    }

    /// Sort ticker-major and drop duplicate (ticker, date) rows. The
    /// frames this crate produces are already in this form, so applying
    /// it to them is the identity.
    pub fn normalized(mut self) -> Self {
        self.rows
            .sort_by(|a, b| a.ticker.cmp(&b.ticker).then(a.date.cmp(&b.date)));
        self.rows
            .dedup_by(|a, b| a.ticker == b.ticker && a.date == b.date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PricePoint, PriceSeries};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_table() -> PriceTable {
        PriceTable::from_series(vec![
            PriceSeries {
                symbol: "TD.TO".to_string(),
                points: vec![PricePoint {
                    date: date("2024-01-03"),
                    adj_close: 80.0,
                }],
            },
            PriceSeries {
                symbol: "RY.TO".to_string(),
                points: vec![
                    PricePoint {
                        date: date("2024-01-02"),
                        adj_close: 100.0,
                    },
                    PricePoint {
                        date: date("2024-01-03"),
                        adj_close: 101.0,
                    },
                ],
            },
        ])
    }

    #[test]
    fn contains_exactly_the_observed_cells() {
        let frame = TidyFrame::from_wide(&sample_table());

        // TD.TO has a leading gap on 2024-01-02, which must not appear
        assert_eq!(frame.len(), 3);
        assert!(frame
            .rows
            .iter()
            .all(|r| !(r.ticker == "TD.TO" && r.date == date("2024-01-02"))));
    }

    #[test]
    fn order_is_ticker_major() {
        let frame = TidyFrame::from_wide(&sample_table());
        let keys: Vec<(String, NaiveDate)> = frame
            .rows
            .iter()
            .map(|r| (r.ticker.clone(), r.date))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("RY.TO".to_string(), date("2024-01-02")),
                ("RY.TO".to_string(), date("2024-01-03")),
                ("TD.TO".to_string(), date("2024-01-03")),
            ]
        );
    }

    #[test]
    fn from_wide_output_is_already_normal() {
        let frame = TidyFrame::from_wide(&sample_table());
        assert_eq!(frame.clone().normalized(), frame);
    }

    #[test]
    fn max_by_ticker_matches_wide() {
        let table = sample_table();
        let frame = TidyFrame::from_wide(&table);
        assert_eq!(frame.max_by_ticker(), table.max_by_ticker());
    }

    #[test]
    fn empty_table_is_an_empty_frame() {
        let frame = TidyFrame::from_wide(&PriceTable::empty());
        assert!(frame.is_empty());
        assert!(frame.tickers().is_empty());
    }
}

//! Download orchestrator — coordinates multi-symbol downloads with
//! progress reporting and assembles the wide table.

use super::provider::{DataError, DownloadProgress, PriceProvider, PriceSeries};
use crate::table::PriceTable;
use chrono::NaiveDate;

/// Download adjusted closes for many symbols and build the wide table.
///
/// Symbols are fetched one at a time in input order. A failed symbol
/// contributes no column and one report entry; the batch keeps going.
/// An empty symbol list yields an empty table.
pub fn download_prices(
    provider: &dyn PriceProvider,
    symbols: &[String],
    start: NaiveDate,
    end: NaiveDate,
    progress: &dyn DownloadProgress,
) -> (PriceTable, FetchReport) {
    let total = symbols.len();
    let mut series: Vec<PriceSeries> = Vec::new();
    let mut errors: Vec<(String, DataError)> = Vec::new();

    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, total);

        match provider.fetch_adj_close(symbol, start, end) {
            Ok(s) => {
                progress.on_complete(symbol, i, total, &Ok(()));
                series.push(s);
            }
            Err(e) => {
                let failed: Result<(), DataError> = Err(e);
                progress.on_complete(symbol, i, total, &failed);
                if let Err(e) = failed {
                    errors.push((symbol.clone(), e));
                }
            }
        }
    }

    let succeeded = series.len();
    let failed = errors.len();
    progress.on_batch_complete(succeeded, failed, total);

    let table = PriceTable::from_series(series);
    let report = FetchReport {
        total,
        succeeded,
        failed,
        errors,
    };

    (table, report)
}

/// Per-symbol outcome of a batch download.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(String, DataError)>,
}

impl FetchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// One display line per failed symbol.
    pub fn failure_lines(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|(symbol, error)| format!("{symbol}: {error}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{PricePoint, SilentProgress};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyProvider {
        calls: AtomicUsize,
    }

    impl PriceProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        fn fetch_adj_close(
            &self,
            symbol: &str,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<PriceSeries, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if symbol.starts_with("BAD") {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                });
            }
            Ok(PriceSeries {
                symbol: symbol.to_string(),
                points: vec![PricePoint {
                    date: start,
                    adj_close: 100.0,
                }],
            })
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn failures_are_reported_not_fatal() {
        let provider = FlakyProvider {
            calls: AtomicUsize::new(0),
        };
        let symbols = vec![
            "RY.TO".to_string(),
            "BAD.TO".to_string(),
            "TD.TO".to_string(),
        ];

        let (table, report) =
            download_prices(&provider, &symbols, date("2024-01-01"), date("2024-01-31"), &SilentProgress);

        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errors[0].0, "BAD.TO");
        assert_eq!(table.tickers(), vec!["RY.TO", "TD.TO"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn empty_symbol_list_is_an_empty_table() {
        let provider = FlakyProvider {
            calls: AtomicUsize::new(0),
        };
        let (table, report) =
            download_prices(&provider, &[], date("2024-01-01"), date("2024-01-31"), &SilentProgress);

        assert!(table.is_empty());
        assert_eq!(report.total, 0);
        assert!(report.all_succeeded());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failure_lines_name_the_symbol() {
        let report = FetchReport {
            total: 1,
            succeeded: 0,
            failed: 1,
            errors: vec![(
                "BAD.TO".to_string(),
                DataError::SymbolNotFound {
                    symbol: "BAD.TO".to_string(),
                },
            )],
        };
        let lines = report.failure_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("BAD.TO: "));
    }
}

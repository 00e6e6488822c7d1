//! Session-scoped memoization of the expensive pipeline steps.
//!
//! The interaction loop re-runs the pipeline front to back; these memo
//! tables make the expensive steps (universe load, price download)
//! no-ops when the request is identical. Keys are content-addressed:
//! a BLAKE3 hash of the serialized request. Entries live for the life
//! of the process; there is no eviction.

use crate::data::{download_prices, DownloadProgress, FetchReport, PriceProvider};
use crate::table::PriceTable;
use crate::universe::Universe;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Content hash of a memoized request.
pub type MemoKey = String;

fn memo_key<T: Serialize>(request: &T) -> MemoKey {
    let json = serde_json::to_string(request).expect("memo request serialization failed");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

#[derive(Serialize)]
struct UniverseRequest<'a> {
    path: Option<&'a Path>,
}

#[derive(Serialize)]
struct PriceRequest<'a> {
    provider: &'a str,
    symbols: &'a [String],
    start: NaiveDate,
    end: NaiveDate,
}

/// A completed download: the wide table plus its per-symbol report.
#[derive(Debug)]
pub struct FetchOutcome {
    pub table: PriceTable,
    pub report: FetchReport,
}

/// The explicit session state: memo tables for universe loads and
/// price downloads. One per process, owned by whoever drives the
/// pipeline (the CLI run, the TUI worker thread).
#[derive(Default)]
pub struct Session {
    universe_memo: HashMap<MemoKey, Universe>,
    price_memo: HashMap<MemoKey, Arc<FetchOutcome>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized universe load.
    pub fn load_universe(&mut self, path: Option<&Path>) -> Universe {
        let key = memo_key(&UniverseRequest { path });
        if let Some(hit) = self.universe_memo.get(&key) {
            return hit.clone();
        }

        let universe = Universe::load(path);
        self.universe_memo.insert(key, universe.clone());
        universe
    }

    /// Memoized price download. A repeated identical request returns the
    /// stored outcome (report included) without touching the provider.
    /// The boolean is true on a memo hit.
    pub fn fetch_prices(
        &mut self,
        provider: &dyn PriceProvider,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
        progress: &dyn DownloadProgress,
    ) -> (Arc<FetchOutcome>, bool) {
        let key = memo_key(&PriceRequest {
            provider: provider.name(),
            symbols,
            start,
            end,
        });
        if let Some(hit) = self.price_memo.get(&key) {
            return (Arc::clone(hit), true);
        }

        let (table, report) = download_prices(provider, symbols, start, end, progress);
        let outcome = Arc::new(FetchOutcome { table, report });
        self.price_memo.insert(key, Arc::clone(&outcome));
        (outcome, false)
    }

    /// Number of memoized downloads, for status display.
    pub fn cached_downloads(&self) -> usize {
        self.price_memo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataError, PricePoint, PriceSeries, SilentProgress};
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PriceProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch_adj_close(
            &self,
            symbol: &str,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<PriceSeries, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PriceSeries {
                symbol: symbol.to_string(),
                points: vec![PricePoint {
                    date: start,
                    adj_close: 42.0,
                }],
            })
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn identical_download_hits_the_memo() {
        let mut session = Session::new();
        let provider = CountingProvider::new();
        let symbols = vec!["RY.TO".to_string(), "TD.TO".to_string()];

        let (first, cached) = session.fetch_prices(
            &provider,
            &symbols,
            date("2024-01-01"),
            date("2024-02-01"),
            &SilentProgress,
        );
        assert!(!cached);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        let (second, cached) = session.fetch_prices(
            &provider,
            &symbols,
            date("2024-01-01"),
            date("2024-02-01"),
            &SilentProgress,
        );
        assert!(cached);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(first.table, second.table);
    }

    #[test]
    fn different_window_misses_the_memo() {
        let mut session = Session::new();
        let provider = CountingProvider::new();
        let symbols = vec!["RY.TO".to_string()];

        session.fetch_prices(
            &provider,
            &symbols,
            date("2024-01-01"),
            date("2024-02-01"),
            &SilentProgress,
        );
        session.fetch_prices(
            &provider,
            &symbols,
            date("2024-01-01"),
            date("2024-03-01"),
            &SilentProgress,
        );

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.cached_downloads(), 2);
    }

    #[test]
    fn different_symbol_order_is_a_different_request() {
        let mut session = Session::new();
        let provider = CountingProvider::new();
        let ab = vec!["A.TO".to_string(), "B.TO".to_string()];
        let ba = vec!["B.TO".to_string(), "A.TO".to_string()];

        session.fetch_prices(&provider, &ab, date("2024-01-01"), date("2024-02-01"), &SilentProgress);
        session.fetch_prices(&provider, &ba, date("2024-01-01"), date("2024-02-01"), &SilentProgress);

        // universes are sorted upstream, so this only happens with
        // hand-built symbol lists; they memoize independently
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn universe_load_hits_the_memo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "Ticker\nry\n").unwrap();
        drop(file);

        let mut session = Session::new();
        let first = session.load_universe(Some(&path));
        assert_eq!(first.tickers, vec!["RY.TO"]);

        // delete the file; a memo hit never re-reads it
        std::fs::remove_file(&path).unwrap();
        let second = session.load_universe(Some(&path));
        assert_eq!(second.tickers, vec!["RY.TO"]);
    }
}

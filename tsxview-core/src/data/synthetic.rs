//! Deterministic synthetic price provider.
//!
//! Generates a random-walk adjusted-close series seeded from the symbol
//! name, so the same symbol always produces the same series. Used for
//! offline demos and tests; weekends are skipped to mimic trading days.

use super::provider::{DataError, PricePoint, PriceProvider, PriceSeries};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic random-walk price provider.
pub struct SyntheticProvider;

impl SyntheticProvider {
    fn series(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<PricePoint> {
        // Deterministic seed from symbol name
        let seed_bytes = blake3::hash(symbol.as_bytes());
        let seed: [u8; 32] = *seed_bytes.as_bytes();
        let mut rng = StdRng::from_seed(seed);

        // Spread starting prices out so filtering has something to bite on
        let mut price = 20.0 + (seed[0] as f64) * 5.0;
        let mut points = Vec::new();
        let mut current = start;

        while current <= end {
            // Skip weekends (simple heuristic)
            let weekday = current.weekday();
            if weekday == Weekday::Sat || weekday == Weekday::Sun {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            price *= 1.0 + daily_return;

            points.push(PricePoint {
                date: current,
                adj_close: price,
            });
            current += chrono::Duration::days(1);
        }

        points
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_adj_close(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let points = Self::series(symbol, start, end);
        if points.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(PriceSeries {
            symbol: symbol.to_string(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn same_symbol_same_series() {
        let provider = SyntheticProvider;
        let a = provider
            .fetch_adj_close("RY.TO", date("2024-01-01"), date("2024-03-01"))
            .unwrap();
        let b = provider
            .fetch_adj_close("RY.TO", date("2024-01-01"), date("2024-03-01"))
            .unwrap();
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn different_symbols_differ() {
        let provider = SyntheticProvider;
        let a = provider
            .fetch_adj_close("RY.TO", date("2024-01-01"), date("2024-03-01"))
            .unwrap();
        let b = provider
            .fetch_adj_close("TD.TO", date("2024-01-01"), date("2024-03-01"))
            .unwrap();
        assert_ne!(a.points[0].adj_close, b.points[0].adj_close);
    }

    #[test]
    fn weekends_are_skipped() {
        let provider = SyntheticProvider;
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday
        let series = provider
            .fetch_adj_close("RY.TO", date("2024-01-05"), date("2024-01-08"))
            .unwrap();
        let dates: Vec<NaiveDate> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date("2024-01-05"), date("2024-01-08")]);
    }

    #[test]
    fn weekend_only_window_is_not_found() {
        let provider = SyntheticProvider;
        let result = provider.fetch_adj_close("RY.TO", date("2024-01-06"), date("2024-01-07"));
        assert!(matches!(result, Err(DataError::SymbolNotFound { .. })));
    }

    #[test]
    fn prices_stay_positive() {
        let provider = SyntheticProvider;
        let series = provider
            .fetch_adj_close("BNS.TO", date("2020-01-01"), date("2024-01-01"))
            .unwrap();
        assert!(series.points.iter().all(|p| p.adj_close > 0.0));
    }
}

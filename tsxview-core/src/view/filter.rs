//! Max-price ceiling filter over the universe.

use crate::table::TidyFrame;

/// Result of applying the price ceiling: both lists sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub kept: Vec<String>,
    pub removed: Vec<String>,
}

/// Remove exactly the tickers whose maximum observed price is strictly
/// greater than `ceiling`. A ticker whose max equals the ceiling stays.
pub fn apply_price_ceiling(frame: &TidyFrame, ceiling: f64) -> FilterOutcome {
    let mut kept = Vec::new();
    let mut removed = Vec::new();

    for (ticker, max) in frame.max_by_ticker() {
        if max > ceiling {
            removed.push(ticker);
        } else {
            kept.push(ticker);
        }
    }

    FilterOutcome { kept, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TidyRow;
    use chrono::NaiveDate;

    fn frame(rows: &[(&str, f64)]) -> TidyFrame {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        TidyFrame {
            rows: rows
                .iter()
                .map(|&(ticker, price)| TidyRow {
                    date,
                    ticker: ticker.to_string(),
                    price,
                })
                .collect(),
        }
    }

    #[test]
    fn removes_exactly_the_exceeding_tickers() {
        let frame = frame(&[("RY.TO", 100.0), ("EXP.TO", 1500.0), ("TD.TO", 80.0)]);
        let outcome = apply_price_ceiling(&frame, 1000.0);

        assert_eq!(outcome.kept, vec!["RY.TO", "TD.TO"]);
        assert_eq!(outcome.removed, vec!["EXP.TO"]);
    }

    #[test]
    fn boundary_equality_keeps() {
        let frame = frame(&[("RY.TO", 1000.0)]);
        let outcome = apply_price_ceiling(&frame, 1000.0);

        assert_eq!(outcome.kept, vec!["RY.TO"]);
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn max_over_the_series_decides() {
        // one early spike above the ceiling removes the ticker even if
        // it later trades below it
        let date2 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let mut f = frame(&[("SPIKE.TO", 1200.0)]);
        f.rows.push(TidyRow {
            date: date2,
            ticker: "SPIKE.TO".to_string(),
            price: 50.0,
        });

        let outcome = apply_price_ceiling(&f, 1000.0);
        assert_eq!(outcome.removed, vec!["SPIKE.TO"]);
    }

    #[test]
    fn empty_frame_keeps_nothing() {
        let outcome = apply_price_ceiling(&TidyFrame::default(), 1000.0);
        assert!(outcome.kept.is_empty());
        assert!(outcome.removed.is_empty());
    }
}

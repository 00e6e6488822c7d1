//! Filtering, pagination, and display grouping.

pub mod filter;
pub mod layout;
pub mod pager;

pub use filter::{apply_price_ceiling, FilterOutcome};
pub use layout::format_ticker_rows;
pub use pager::Paginator;

use crate::table::TidyFrame;

/// One rendered page of the filtered universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Clamped 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    /// Tickers shown on this page, sorted, pinned included.
    pub selected: Vec<String>,
    /// Tickers the price ceiling removed, sorted.
    pub removed: Vec<String>,
}

/// The cheap tail of the pipeline: filter, paginate, select. Re-run on
/// every interaction over the in-memory frame.
pub fn build_page_view(
    frame: &TidyFrame,
    max_price: f64,
    keep: Option<&str>,
    page_size: usize,
    page: usize,
) -> PageView {
    let outcome = apply_price_ceiling(frame, max_price);
    let pager = Paginator::new(&outcome.kept, keep, page_size);
    let page = pager.clamp(page);

    PageView {
        page,
        total_pages: pager.total_pages(),
        selected: pager.select(page),
        removed: outcome.removed,
    }
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
    fn filter_and_page_compose() {
        let f = frame(&[
            ("A.TO", 10.0),
            ("B.TO", 2000.0),
            ("C.TO", 20.0),
            ("D.TO", 30.0),
        ]);

        let view = build_page_view(&f, 1000.0, Some("A.TO"), 2, 1);
        assert_eq!(view.removed, vec!["B.TO"]);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.selected, vec!["A.TO", "C.TO"]);

        let view = build_page_view(&f, 1000.0, Some("A.TO"), 2, 2);
        assert_eq!(view.selected, vec!["A.TO", "D.TO"]);
    }

    #[test]
    fn page_is_clamped_into_view() {
        let f = frame(&[("A.TO", 10.0), ("B.TO", 20.0)]);
        let view = build_page_view(&f, 1000.0, None, 10, 42);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn filtered_out_pinned_does_not_reserve() {
        let f = frame(&[("A.TO", 5000.0), ("B.TO", 20.0), ("C.TO", 30.0)]);
        let view = build_page_view(&f, 1000.0, Some("A.TO"), 2, 1);

        // the pinned ticker was removed by the ceiling, so pages are full
        assert_eq!(view.removed, vec!["A.TO"]);
        assert_eq!(view.selected, vec!["B.TO", "C.TO"]);
    }
}

//! Pinned-ticker pagination.
//!
//! When the pinned ticker survives filtering it takes one slot on every
//! page, so a page of size N shows the pinned ticker plus N-1 others.
//! Page numbers are 1-based and always clamped into range.

/// Paginates a sorted ticker list with an optional pinned ticker.
#[derive(Debug, Clone)]
pub struct Paginator {
    others: Vec<String>,
    pinned: Option<String>,
    per_page: usize,
}

impl Paginator {
    /// `tickers` must be sorted. `pinned` participates only when it is
    /// present in `tickers`. `per_page` stays at least 1 so the page
    /// count is finite even for degenerate page sizes.
    pub fn new(tickers: &[String], pinned: Option<&str>, page_size: usize) -> Self {
        let pinned = pinned
            .filter(|p| tickers.iter().any(|t| t == p))
            .map(str::to_string);

        let others: Vec<String> = match &pinned {
            Some(p) => tickers.iter().filter(|t| *t != p).cloned().collect(),
            None => tickers.to_vec(),
        };

        let reserved = usize::from(pinned.is_some());
        let per_page = page_size.saturating_sub(reserved).max(1);

        Self {
            others,
            pinned,
            per_page,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.others.len().div_ceil(self.per_page).max(1)
    }

    /// Clamp a 1-based page number into `[1, total_pages]`.
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages())
    }

    /// The tickers shown on a page: the page's window of the others plus
    /// the pinned ticker, sorted.
    pub fn select(&self, page: usize) -> Vec<String> {
        let page = self.clamp(page);
        let start = (page - 1) * self.per_page;
        let end = (start + self.per_page).min(self.others.len());

        let mut out: Vec<String> = self.others[start..end].to_vec();
        if let Some(p) = &self.pinned {
            out.push(p.clone());
        }
        out.sort();
        out
    }

    pub fn next(&self, page: usize) -> usize {
        self.clamp(page.saturating_add(1))
    }

    pub fn prev(&self, page: usize) -> usize {
        self.clamp(page.saturating_sub(1))
    }

    /// The pinned ticker, when it participates.
    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pinned_takes_a_slot_on_every_page() {
        let list = tickers(&["A", "B", "C", "D", "E"]);
        let pager = Paginator::new(&list, Some("A"), 3);

        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.select(1), tickers(&["A", "B", "C"]));
        assert_eq!(pager.select(2), tickers(&["A", "D", "E"]));
    }

    #[test]
    fn without_pinned_full_pages() {
        let list = tickers(&["A", "B", "C", "D", "E"]);
        let pager = Paginator::new(&list, None, 3);

        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.select(1), tickers(&["A", "B", "C"]));
        assert_eq!(pager.select(2), tickers(&["D", "E"]));
    }

    #[test]
    fn absent_pinned_does_not_participate() {
        let list = tickers(&["B", "C", "D"]);
        let pager = Paginator::new(&list, Some("A"), 2);

        assert_eq!(pager.pinned(), None);
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.select(1), tickers(&["B", "C"]));
    }

    #[test]
    fn page_count_formula() {
        // ceil(others / (page_size - 1)) with the pinned slot reserved
        let list: Vec<String> = (0..21).map(|i| format!("T{i:02}")).collect();
        let mut with_pin = list.clone();
        with_pin.push("PIN".to_string());
        with_pin.sort();

        let pager = Paginator::new(&with_pin, Some("PIN"), 10);
        assert_eq!(pager.total_pages(), 3); // ceil(21 / 9)
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let list = tickers(&["A", "B", "C"]);
        let pager = Paginator::new(&list, None, 2);

        assert_eq!(pager.clamp(0), 1);
        assert_eq!(pager.clamp(99), 2);
        assert_eq!(pager.select(99), tickers(&["C"]));
    }

    #[test]
    fn next_and_prev_clamp_at_the_ends() {
        let list = tickers(&["A", "B", "C", "D"]);
        let pager = Paginator::new(&list, None, 2);

        assert_eq!(pager.prev(1), 1);
        assert_eq!(pager.next(1), 2);
        assert_eq!(pager.next(2), 2);
        assert_eq!(pager.prev(2), 1);
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let pager = Paginator::new(&[], Some("A"), 10);
        assert_eq!(pager.total_pages(), 1);
        assert!(pager.select(1).is_empty());
    }

    #[test]
    fn only_the_pinned_ticker() {
        let list = tickers(&["A"]);
        let pager = Paginator::new(&list, Some("A"), 10);
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.select(1), tickers(&["A"]));
    }

    #[test]
    fn degenerate_page_size_still_terminates() {
        let list = tickers(&["A", "B", "C"]);
        let pager = Paginator::new(&list, Some("A"), 1);

        // per_page clamps to 1: two pages of one other each, pinned on both
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.select(1), tickers(&["A", "B"]));
        assert_eq!(pager.select(2), tickers(&["A", "C"]));
    }
}

//! Display grouping of ticker symbols.

/// Group symbols into fixed-size display rows, preserving order.
pub fn format_ticker_rows(symbols: &[String], per_row: usize) -> Vec<String> {
    let per_row = per_row.max(1);
    symbols
        .chunks(per_row)
        .map(|chunk| chunk.join("  "))
        .collect()
}

//! TsxView Core — adjusted-close datasets for TSX tickers.
//!
//! This crate contains everything the front ends share:
//! - Symbol normalization to the provider's suffix convention
//! - Ticker universe loading (CSV with a built-in fallback set)
//! - Price providers (Yahoo Finance, deterministic synthetic data)
//! - Wide and tidy price tables with forward-fill semantics
//! - Max-price filtering and pinned-ticker pagination
//! - CSV dataset artifacts (wide + tidy)
//! - Session-scoped memoization of universe loads and downloads

pub mod artifacts;
pub mod config;
pub mod data;
pub mod session;
pub mod symbols;
pub mod table;
pub mod universe;
pub mod view;

pub use config::ViewerConfig;
pub use session::Session;
pub use table::{PriceTable, TidyFrame};
pub use universe::Universe;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types that cross the TUI worker channel
    /// are Send. If any of them stops being Send, the build breaks here
    /// instead of inside the worker plumbing.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<table::PriceTable>();
        require_sync::<table::PriceTable>();
        require_send::<table::TidyFrame>();
        require_sync::<table::TidyFrame>();
        require_send::<universe::Universe>();
        require_sync::<universe::Universe>();
        require_send::<data::PriceSeries>();
        require_sync::<data::PriceSeries>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::FetchReport>();
        require_sync::<data::FetchReport>();
        require_send::<session::Session>();
        require_send::<config::ViewerConfig>();
        require_sync::<config::ViewerConfig>();
    }
}

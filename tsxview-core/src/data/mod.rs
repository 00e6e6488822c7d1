//! Price providers and download orchestration.

pub mod download;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use download::{download_prices, FetchReport};
pub use provider::{
    DataError, DownloadProgress, PricePoint, PriceProvider, PriceSeries, SilentProgress,
    StdoutProgress,
};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;

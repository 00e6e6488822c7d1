//! Wide and tidy price tables.

pub mod tidy;
pub mod wide;

pub use tidy::{TidyFrame, TidyRow};
pub use wide::{PriceColumn, PriceTable};

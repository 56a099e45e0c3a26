//! Earnings reaction statistics.
//!
//! Given a daily [`PriceSeries`](series::PriceSeries) and a list of earnings
//! announcement dates, [`aggregate::build`] produces one
//! [`ReactionRecord`](aggregate::ReactionRecord) per usable announcement and
//! the summary statistics the report is built from.
//!
//! Everything here is synchronous and stateless apart from the two async
//! loaders, which are one-shot calls into a
//! [`DataProvider`](market_data_ingestor::providers::DataProvider) or
//! [`EarningsProvider`](market_data_ingestor::providers::EarningsProvider).
//! Caching belongs to the caller.

#![deny(missing_docs)]

pub mod aggregate;
pub mod announcements;
pub mod errors;
pub mod series;
pub mod stats;
pub mod summary;

pub use aggregate::{AggregateResult, ExpectedRange, Horizon, ReactionRecord};
pub use errors::ReactionError;
pub use series::PriceSeries;
pub use summary::{HorizonSummary, ReactionReport};

//! Alpaca Market Data v2 REST provider for daily stock bars.

pub mod params;
pub mod provider;
pub mod response;

pub use params::{Adjustment, AlpacaBarsParams, Feed};
pub use provider::AlpacaProvider;

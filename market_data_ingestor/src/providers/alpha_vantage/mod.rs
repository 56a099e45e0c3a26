//! Alpha Vantage REST provider for historical earnings announcement dates.

pub mod provider;
pub mod response;

pub use provider::AlphaVantageProvider;

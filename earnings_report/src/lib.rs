//! Presentation layer for the earnings reaction report.
//!
//! Owns everything the core deliberately does not: configuration, provider
//! construction, the short-lived fetch cache, and rendering.

pub mod cache;
pub mod chart;
pub mod config;
pub mod providers;
pub mod render;
pub mod service;
pub mod session;

//! Vendor-agnostic daily market data and earnings calendar ingestion.
//!
//! The [`providers`] module defines the traits the rest of the workspace codes
//! against; [`models`] holds the canonical in-memory shapes every provider
//! converts its payloads into.

pub mod models;
pub mod providers;

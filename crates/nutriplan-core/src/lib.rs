//! # nutriplan-core
//!
//! Foundation crate for the nutrition planning engine.
//! Defines the region and intervention data model, the reference-data provider
//! trait, error enums, configuration, tracing setup, and shared constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

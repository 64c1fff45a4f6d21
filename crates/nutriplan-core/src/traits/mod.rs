//! Seams where callers inject their own data sources.

pub mod reference_data;

pub use reference_data::{ReferenceData, ReferenceSet, StaticReferenceData};

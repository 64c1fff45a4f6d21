//! Financial projection: multi-year cash flows, NPV, approximate IRR,
//! payback, benefit-cost ratio, and the dual (social and fiscal) ROI.

pub mod npv;
pub mod projector;
pub mod roi;
pub mod types;

pub use npv::{npv, npv_even_stream};
pub use projector::FinancialProjector;
pub use roi::dual_roi;
pub use types::*;

//! NutriplanErrorCode trait for stable error codes at the API boundary.

/// Every error enum implements this to provide a structured error code
/// string that callers can match on without parsing messages.
pub trait NutriplanErrorCode {
    /// Returns the error code string (e.g., "VALIDATION_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const MIX_INVALID: &str = "MIX_INVALID";
pub const BUDGET_BELOW_FLOOR: &str = "BUDGET_BELOW_FLOOR";
pub const UNSOLVABLE_ALLOCATION: &str = "UNSOLVABLE_ALLOCATION";
pub const NO_ELIGIBLE_REGIONS: &str = "NO_ELIGIBLE_REGIONS";
pub const INSUFFICIENT_TRAINING_DATA: &str = "INSUFFICIENT_TRAINING_DATA";
pub const TRAINING_ERROR: &str = "TRAINING_ERROR";
pub const DATA_QUALITY: &str = "DATA_QUALITY";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

//! Discounting helpers.

/// Net present value of `cash_flows`, the first flow at t = 0.
pub fn npv(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Present value of `annual` received every year for `years` years,
/// starting at t = 0.
pub fn npv_even_stream(annual: f64, years: u32, rate: f64) -> f64 {
    (0..years).map(|t| annual / (1.0 + rate).powi(t as i32)).sum()
}

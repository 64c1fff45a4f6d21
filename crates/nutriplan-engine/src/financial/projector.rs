//! FinancialProjector: turns an outcome projection into multi-year cash flows.

use nutriplan_core::config::FinancialConfig;
use nutriplan_core::errors::ValidationError;
use tracing::debug;

use super::npv::npv;
use super::roi::dual_roi;
use super::types::FinancialProjection;
use crate::outcomes::OutcomeProjection;

#[derive(Debug, Clone, Default)]
pub struct FinancialProjector {
    config: FinancialConfig,
}

impl FinancialProjector {
    pub fn new(config: &FinancialConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Project `outcome` over `horizon_years`, with the budget disbursed
    /// evenly over the first `spend_years` (clamped to `1..=horizon`).
    pub fn project(
        &self,
        outcome: &OutcomeProjection,
        budget: f64,
        horizon_years: u32,
        discount_rate: f64,
        spend_years: u32,
    ) -> Result<FinancialProjection, ValidationError> {
        if horizon_years == 0 {
            return Err(ValidationError::invalid("horizon_years", "must be at least 1"));
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(ValidationError::invalid("budget", "must be a non-negative number"));
        }
        if !discount_rate.is_finite() || discount_rate <= -1.0 {
            return Err(ValidationError::invalid("discount_rate", "must be greater than -1"));
        }

        let growth = self.config.effective_benefit_growth();
        let decay = self.config.effective_effectiveness_decay();
        let base_benefit = outcome.economic_benefit.value;
        let spend_years = spend_years.clamp(1, horizon_years);
        let annual_spend = budget / spend_years as f64;

        let mut annual_benefits = Vec::with_capacity(horizon_years as usize);
        let mut annual_costs = Vec::with_capacity(horizon_years as usize);
        let mut annual_effectiveness = Vec::with_capacity(horizon_years as usize);
        for t in 0..horizon_years {
            let t_i = t as i32;
            annual_benefits.push(base_benefit * (1.0 + growth).powi(t_i));
            annual_effectiveness.push(outcome.effectiveness * (1.0 - decay).powi(t_i));
            annual_costs.push(if t < spend_years { annual_spend } else { 0.0 });
        }

        let net: Vec<f64> = annual_benefits
            .iter()
            .zip(&annual_costs)
            .map(|(b, c)| b - c)
            .collect();
        let npv_benefits = npv(&annual_benefits, discount_rate);
        let net_npv = npv(&net, discount_rate);

        let (irr_floor, irr_cap, irr_scale) = self.config.effective_irr_bounds();
        let irr = if budget > 0.0 {
            (discount_rate + net_npv / budget * irr_scale).clamp(irr_floor, irr_cap)
        } else {
            irr_floor
        };

        let payback_years = net
            .iter()
            .scan(0.0, |cumulative, v| {
                *cumulative += v;
                Some(*cumulative)
            })
            .position(|c| c > 0.0)
            .map(|i| i as u32 + 1)
            .unwrap_or(horizon_years + 1);

        let total_benefit: f64 = annual_benefits.iter().sum();
        let total_cost: f64 = annual_costs.iter().sum();
        let benefit_cost_ratio = if total_cost > 0.0 {
            total_benefit / total_cost
        } else {
            0.0
        };

        let roi = dual_roi(outcome, budget, horizon_years, discount_rate, &self.config.values);

        debug!(npv_benefits, net_npv, irr, payback_years, "projected cash flows");

        Ok(FinancialProjection {
            budget,
            horizon_years,
            discount_rate,
            annual_benefits,
            annual_costs,
            annual_effectiveness,
            npv_benefits,
            net_npv,
            irr,
            payback_years,
            benefit_cost_ratio,
            roi,
        })
    }
}

//! Dual ROI: society-wide value and direct fiscal returns.

use nutriplan_core::config::financial_config::RoiUnitValues;

use super::npv::npv_even_stream;
use super::types::{DualRoi, RoiComponent, RoiComponentKind, RoiRecommendation, RoiSide};
use crate::outcomes::OutcomeProjection;

/// Monetize an outcome both ways. Each side's total is treated as an even
/// annual stream over the horizon.
pub fn dual_roi(
    outcome: &OutcomeProjection,
    budget: f64,
    horizon_years: u32,
    discount_rate: f64,
    values: &RoiUnitValues,
) -> DualRoi {
    let years = horizon_years.max(1);
    let h = years as f64;
    let lives = outcome.lives_saved.value;
    let dalys = outcome.dalys_averted.value;
    let stunting = outcome.stunting_prevented.value;
    let anemia = outcome.anemia_reduced.value;
    let reached = outcome.people_reached as f64;

    use RoiComponentKind::*;
    let social = side(
        vec![
            (LivesSaved, lives * values.value_per_life()),
            (DalysAverted, dalys * values.value_per_daly()),
            (StuntingPrevented, stunting * values.value_per_stunting_case()),
            (
                HealthcareSavings,
                (stunting + anemia) * values.social_healthcare_per_case(),
            ),
            (EducationalGains, stunting * values.education_per_stunting_case()),
            (
                ProductivityGains,
                anemia * values.productivity_per_anemia_case() * h,
            ),
        ],
        budget,
        years,
        discount_rate,
    );

    let financial = side(
        vec![
            (
                TaxRevenue,
                values.productivity_increase()
                    * reached
                    * values.taxable_income_per_person()
                    * values.tax_rate()
                    * h,
            ),
            (
                HealthcareBudgetSavings,
                (stunting + anemia) * values.fiscal_healthcare_per_case(),
            ),
            (
                AvoidedEmergencyPrograms,
                reached * values.emergency_need_rate() * values.emergency_cost_per_person() * h,
            ),
            (
                AgriculturalProductivity,
                anemia * values.agricultural_share() * values.agricultural_value() * h,
            ),
        ],
        budget,
        years,
        discount_rate,
    );

    let combined_ratio = if budget > 0.0 {
        (social.npv + financial.npv) / budget
    } else {
        0.0
    };
    let social_to_financial = (financial.ratio > 0.0).then(|| social.ratio / financial.ratio);
    let recommendation = RoiRecommendation::from_sroi(social.roi);

    DualRoi {
        social,
        financial,
        combined_ratio,
        social_to_financial,
        recommendation,
    }
}

fn side(
    components: Vec<(RoiComponentKind, f64)>,
    budget: f64,
    years: u32,
    discount_rate: f64,
) -> RoiSide {
    let components: Vec<RoiComponent> = components
        .into_iter()
        .map(|(kind, total)| RoiComponent { kind, total })
        .collect();
    let total_value: f64 = components.iter().map(|c| c.total).sum();
    let annual_value = total_value / years as f64;
    let npv = npv_even_stream(annual_value, years, discount_rate);
    let ratio = if budget > 0.0 { npv / budget } else { 0.0 };
    RoiSide {
        components,
        total_value,
        annual_value,
        npv,
        ratio,
        roi: if budget > 0.0 { ratio - 1.0 } else { 0.0 },
        breakeven_years: (annual_value > 0.0).then(|| budget / annual_value),
    }
}

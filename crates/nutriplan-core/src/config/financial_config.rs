//! Financial projection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BENEFIT_GROWTH, DEFAULT_EFFECTIVENESS_DECAY, DEFAULT_IRR_CAP, DEFAULT_IRR_FLOOR,
    DEFAULT_IRR_SCALE,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FinancialConfig {
    /// Annual benefit growth. Default: 0.03.
    pub benefit_growth: Option<f64>,
    /// Annual effectiveness decay. Default: 0.05.
    pub effectiveness_decay: Option<f64>,
    /// Default: 0.05.
    pub irr_floor: Option<f64>,
    /// Default: 0.30.
    pub irr_cap: Option<f64>,
    /// IRR points added per unit of NPV/budget. Default: 0.05.
    pub irr_scale: Option<f64>,
    /// Social and fiscal unit values. Unset fields use the built-in values.
    pub values: RoiUnitValues,
}

impl FinancialConfig {
    pub fn effective_benefit_growth(&self) -> f64 {
        self.benefit_growth.unwrap_or(DEFAULT_BENEFIT_GROWTH)
    }

    pub fn effective_effectiveness_decay(&self) -> f64 {
        self.effectiveness_decay.unwrap_or(DEFAULT_EFFECTIVENESS_DECAY)
    }

    /// IRR approximation bounds as (floor, cap, scale).
    pub fn effective_irr_bounds(&self) -> (f64, f64, f64) {
        (
            self.irr_floor.unwrap_or(DEFAULT_IRR_FLOOR),
            self.irr_cap.unwrap_or(DEFAULT_IRR_CAP),
            self.irr_scale.unwrap_or(DEFAULT_IRR_SCALE),
        )
    }
}

/// Per-unit values used to monetize outcomes for the dual ROI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoiUnitValues {
    /// Default: 50000.
    pub value_per_life: Option<f64>,
    /// Default: 1000.
    pub value_per_daly: Option<f64>,
    /// Default: 3000.
    pub value_per_stunting_case: Option<f64>,
    /// Social healthcare saving per prevented case. Default: 50.
    pub social_healthcare_per_case: Option<f64>,
    /// Education gain per prevented stunting case. Default: 500.
    pub education_per_stunting_case: Option<f64>,
    /// Annual productivity gain per anemia case reduced. Default: 200.
    pub productivity_per_anemia_case: Option<f64>,
    /// Income increase among people reached. Default: 0.05.
    pub productivity_increase: Option<f64>,
    /// Annual taxable income per person reached. Default: 100.
    pub taxable_income_per_person: Option<f64>,
    /// Default: 0.1.
    pub tax_rate: Option<f64>,
    /// Public healthcare budget saving per prevented case. Default: 30.
    pub fiscal_healthcare_per_case: Option<f64>,
    /// Share of people reached who would need emergency programs. Default: 0.001.
    pub emergency_need_rate: Option<f64>,
    /// Annual emergency program cost per person in need. Default: 5.
    pub emergency_cost_per_person: Option<f64>,
    /// Share of anemia cases reduced with an agricultural gain. Default: 0.2.
    pub agricultural_share: Option<f64>,
    /// Annual agricultural gain per such case. Default: 50.
    pub agricultural_value: Option<f64>,
}

impl RoiUnitValues {
    pub fn value_per_life(&self) -> f64 {
        self.value_per_life.unwrap_or(50_000.0)
    }

    pub fn value_per_daly(&self) -> f64 {
        self.value_per_daly.unwrap_or(1_000.0)
    }

    pub fn value_per_stunting_case(&self) -> f64 {
        self.value_per_stunting_case.unwrap_or(3_000.0)
    }

    pub fn social_healthcare_per_case(&self) -> f64 {
        self.social_healthcare_per_case.unwrap_or(50.0)
    }

    pub fn education_per_stunting_case(&self) -> f64 {
        self.education_per_stunting_case.unwrap_or(500.0)
    }

    pub fn productivity_per_anemia_case(&self) -> f64 {
        self.productivity_per_anemia_case.unwrap_or(200.0)
    }

    pub fn productivity_increase(&self) -> f64 {
        self.productivity_increase.unwrap_or(0.05)
    }

    pub fn taxable_income_per_person(&self) -> f64 {
        self.taxable_income_per_person.unwrap_or(100.0)
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate.unwrap_or(0.1)
    }

    pub fn fiscal_healthcare_per_case(&self) -> f64 {
        self.fiscal_healthcare_per_case.unwrap_or(30.0)
    }

    pub fn emergency_need_rate(&self) -> f64 {
        self.emergency_need_rate.unwrap_or(0.001)
    }

    pub fn emergency_cost_per_person(&self) -> f64 {
        self.emergency_cost_per_person.unwrap_or(5.0)
    }

    pub fn agricultural_share(&self) -> f64 {
        self.agricultural_share.unwrap_or(0.2)
    }

    pub fn agricultural_value(&self) -> f64 {
        self.agricultural_value.unwrap_or(50.0)
    }
}

//! Financial projection types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Year-by-year cash flows and the summary measures derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProjection {
    pub budget: f64,
    pub horizon_years: u32,
    pub discount_rate: f64,
    /// Economic benefit per year, growing annually.
    pub annual_benefits: Vec<f64>,
    /// Budget disbursed per year.
    pub annual_costs: Vec<f64>,
    /// Program effectiveness per year, decaying annually.
    pub annual_effectiveness: Vec<f64>,
    /// Present value of benefits.
    pub npv_benefits: f64,
    /// Present value of benefits net of costs.
    pub net_npv: f64,
    /// Approximate internal rate of return.
    pub irr: f64,
    /// First 1-based year with positive cumulative net value; horizon + 1 if none.
    pub payback_years: u32,
    pub benefit_cost_ratio: f64,
    pub roi: DualRoi,
}

impl FinancialProjection {
    /// Simple ROI in percent on undiscounted totals.
    pub fn simple_roi_percent(&self) -> f64 {
        let benefits: f64 = self.annual_benefits.iter().sum();
        if self.budget > 0.0 {
            (benefits - self.budget) / self.budget * 100.0
        } else {
            0.0
        }
    }

    pub fn pays_back(&self) -> bool {
        self.payback_years <= self.horizon_years
    }
}

/// Monetized benefit streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiComponentKind {
    LivesSaved,
    DalysAverted,
    StuntingPrevented,
    HealthcareSavings,
    EducationalGains,
    ProductivityGains,
    TaxRevenue,
    HealthcareBudgetSavings,
    AvoidedEmergencyPrograms,
    AgriculturalProductivity,
}

impl RoiComponentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LivesSaved => "lives_saved",
            Self::DalysAverted => "dalys_averted",
            Self::StuntingPrevented => "stunting_prevented",
            Self::HealthcareSavings => "healthcare_savings",
            Self::EducationalGains => "educational_gains",
            Self::ProductivityGains => "productivity_gains",
            Self::TaxRevenue => "tax_revenue",
            Self::HealthcareBudgetSavings => "healthcare_budget_savings",
            Self::AvoidedEmergencyPrograms => "avoided_emergency_programs",
            Self::AgriculturalProductivity => "agricultural_productivity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiComponent {
    pub kind: RoiComponentKind,
    /// Value over the whole horizon.
    pub total: f64,
}

/// One side of the dual ROI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiSide {
    pub components: Vec<RoiComponent>,
    pub total_value: f64,
    /// `total_value` spread evenly over the horizon.
    pub annual_value: f64,
    pub npv: f64,
    /// NPV per unit of budget.
    pub ratio: f64,
    /// `ratio - 1`.
    pub roi: f64,
    /// Years of annual value needed to recover the budget; `None` when
    /// the side yields nothing.
    pub breakeven_years: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiRecommendation {
    HighlyRecommended,
    Recommended,
    ConsiderAlternatives,
}

impl RoiRecommendation {
    /// Classify a social return on investment.
    pub fn from_sroi(sroi: f64) -> Self {
        if sroi > 2.0 {
            Self::HighlyRecommended
        } else if sroi > 0.5 {
            Self::Recommended
        } else {
            Self::ConsiderAlternatives
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::HighlyRecommended => "highly recommended",
            Self::Recommended => "recommended",
            Self::ConsiderAlternatives => "consider alternatives",
        }
    }
}

impl fmt::Display for RoiRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualRoi {
    pub social: RoiSide,
    pub financial: RoiSide,
    /// Combined NPV per unit of budget.
    pub combined_ratio: f64,
    /// Social ratio over financial ratio; `None` when the fiscal side is zero.
    pub social_to_financial: Option<f64>,
    pub recommendation: RoiRecommendation,
}

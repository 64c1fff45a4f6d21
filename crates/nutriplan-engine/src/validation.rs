//! Plan parameter validation: fatal errors and advisory warnings.

use std::fmt;

use nutriplan_core::config::ValidationConfig;
use nutriplan_core::constants::{IRON, MAX_SENSITIVITY, MIN_SENSITIVITY, VITAMIN_A, VITAMIN_C, ZINC};
use nutriplan_core::errors::ValidationError;
use nutriplan_core::types::{InterventionCatalog, PlanParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coverage above which a modest budget draws a warning.
const HIGH_COVERAGE: f64 = 0.8;

/// Non-fatal advice about a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    LimitedBudget { budget: f64, threshold: f64 },
    HighCoverageLowBudget { coverage: f64, budget: f64 },
    HighFortificationShare { share: f64 },
    HighSupplementationShare { share: f64 },
    TooManyNutrients { count: usize, max: usize },
    VitaminAWithoutZinc,
    IronWithoutVitaminC,
    /// Even the cheapest intervention cannot reach the requested coverage.
    TargetUnaffordable { requested: f64, affordable: f64 },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitedBudget { budget, .. } => write!(
                f,
                "limited budget ({budget:.0}): consider focusing on fewer high-impact interventions"
            ),
            Self::HighCoverageLowBudget { coverage, .. } => write!(
                f,
                "coverage target of {:.0}% with a limited budget may affect quality",
                coverage * 100.0
            ),
            Self::HighFortificationShare { share } => write!(
                f,
                "fortification at {share:.0}%: ensure infrastructure supports it"
            ),
            Self::HighSupplementationShare { share } => write!(
                f,
                "supplementation at {share:.0}%: consider sustainability"
            ),
            Self::TooManyNutrients { count, .. } => {
                write!(f, "{count} nutrients selected: consider focusing on top priorities")
            }
            Self::VitaminAWithoutZinc => {
                f.write_str("consider adding zinc: it works synergistically with vitamin A")
            }
            Self::IronWithoutVitaminC => {
                f.write_str("consider adding vitamin C: it enhances iron absorption")
            }
            Self::TargetUnaffordable {
                requested,
                affordable,
            } => write!(
                f,
                "requested coverage {:.1}% exceeds the {:.1}% the budget can buy",
                requested * 100.0,
                affordable * 100.0
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validate `params`. The first fatal problem is returned as an error;
/// everything advisory is collected into the report.
pub fn validate_plan(
    params: &PlanParameters,
    catalog: &InterventionCatalog,
    config: &ValidationConfig,
) -> Result<ValidationReport, ValidationError> {
    check_fatal(params, catalog, config)?;

    let mut warnings = Vec::new();
    let budget = params.budget;

    let limited = config.effective_limited_budget();
    if budget < limited {
        warnings.push(ValidationWarning::LimitedBudget {
            budget,
            threshold: limited,
        });
    }
    if params.coverage_target > HIGH_COVERAGE && budget < config.effective_high_coverage_budget() {
        warnings.push(ValidationWarning::HighCoverageLowBudget {
            coverage: params.coverage_target,
            budget,
        });
    }

    let fortification = params.mix.share("fortification");
    if fortification > config.effective_max_fortification_share() {
        warnings.push(ValidationWarning::HighFortificationShare {
            share: fortification,
        });
    }
    let supplementation = params.mix.share("supplementation");
    if supplementation > config.effective_max_supplementation_share() {
        warnings.push(ValidationWarning::HighSupplementationShare {
            share: supplementation,
        });
    }

    let max_nutrients = config.effective_max_nutrients();
    if params.nutrients.len() > max_nutrients {
        warnings.push(ValidationWarning::TooManyNutrients {
            count: params.nutrients.len(),
            max: max_nutrients,
        });
    }
    let selected = |n: &str| params.nutrients.iter().any(|s| s == n);
    if selected(VITAMIN_A) && !selected(ZINC) {
        warnings.push(ValidationWarning::VitaminAWithoutZinc);
    }
    if selected(IRON) && !selected(VITAMIN_C) {
        warnings.push(ValidationWarning::IronWithoutVitaminC);
    }

    if let Some(cheapest) = catalog.cheapest_unit_cost().filter(|c| *c > 0.0) {
        let affordable = budget / (cheapest * params.population as f64);
        if affordable < params.coverage_target {
            warnings.push(ValidationWarning::TargetUnaffordable {
                requested: params.coverage_target,
                affordable,
            });
        }
    }

    debug!(warnings = warnings.len(), "validated plan parameters");
    Ok(ValidationReport { warnings })
}

fn check_fatal(
    params: &PlanParameters,
    catalog: &InterventionCatalog,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    if !params.budget.is_finite() {
        return Err(ValidationError::invalid("budget", "must be a finite number"));
    }
    let floor = config.effective_budget_floor();
    if params.budget < floor {
        return Err(ValidationError::BudgetBelowFloor {
            budget: params.budget,
            floor,
        });
    }
    params.mix.validate(catalog)?;
    if params.nutrients.is_empty() {
        return Err(ValidationError::NoNutrientsSelected);
    }
    if params.population == 0 {
        return Err(ValidationError::invalid("population", "must be positive"));
    }
    if !(0.0..=1.0).contains(&params.coverage_target) {
        return Err(ValidationError::invalid("coverage_target", "must be within 0.0-1.0"));
    }
    if !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&params.sensitivity) {
        return Err(ValidationError::invalid(
            "sensitivity",
            format!("must be within {MIN_SENSITIVITY}-{MAX_SENSITIVITY}"),
        ));
    }
    if !(params.confidence_level > 0.0 && params.confidence_level < 100.0) {
        return Err(ValidationError::invalid(
            "confidence_level",
            "must be strictly between 0 and 100",
        ));
    }
    if params.horizon_years == 0 {
        return Err(ValidationError::invalid("horizon_years", "must be at least 1"));
    }
    if !params.discount_rate.is_finite() || params.discount_rate <= -1.0 {
        return Err(ValidationError::invalid("discount_rate", "must be greater than -1"));
    }
    if params
        .under5_population
        .is_some_and(|u5| u5 > params.population)
    {
        return Err(ValidationError::invalid(
            "under5_population",
            "cannot exceed the population",
        ));
    }
    if params
        .rural_fraction
        .is_some_and(|r| !(0.0..=1.0).contains(&r))
    {
        return Err(ValidationError::invalid("rural_fraction", "must be within 0.0-1.0"));
    }
    Ok(())
}

//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AllocationConfig, CoverageConfig, FinancialConfig, GapConfig, OutcomeConfig, RiskConfig,
    ValidationConfig,
};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Configuration aggregating every component's settings.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`NUTRIPLAN_*`)
/// 3. Project config (`nutriplan.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub risk: RiskConfig,
    pub coverage: CoverageConfig,
    pub gaps: GapConfig,
    pub allocation: AllocationConfig,
    pub outcomes: OutcomeConfig,
    pub financial: FinancialConfig,
    pub validation: ValidationConfig,
}

/// Overrides a host application applies on top of file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub budget_floor: Option<f64>,
    pub cross_region: Option<bool>,
    pub emergency_top_n: Option<usize>,
    pub min_training_samples: Option<usize>,
}

/// Copy every `Some` field of `$other` onto `$base`.
macro_rules! merge_fields {
    ($base:expr, $other:expr, [$($field:ident),* $(,)?]) => {
        $(
            if $other.$field.is_some() {
                $base.$field = $other.$field.clone();
            }
        )*
    };
}

impl EngineConfig {
    /// Load configuration for a project rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            ::tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        let risk = &config.risk;
        let (critical, high, medium) = (
            risk.effective_critical_threshold(),
            risk.effective_high_threshold(),
            risk.effective_medium_threshold(),
        );
        if !(0.0 < medium && medium < high && high < critical && critical <= 100.0) {
            return Err(failed(
                "risk.thresholds",
                "must satisfy 0 < medium < high < critical <= 100",
            ));
        }
        if risk.effective_min_training_samples() == 0 {
            return Err(failed("risk.min_training_samples", "must be greater than 0"));
        }

        let coverage = &config.coverage;
        for (field, cap) in [
            ("coverage.urban_cap", coverage.effective_urban_cap()),
            ("coverage.rural_cap", coverage.effective_rural_cap()),
        ] {
            if !(cap > 0.0 && cap <= 1.0) {
                return Err(failed(field, "must be in (0.0, 1.0]"));
            }
        }
        for (field, width) in [
            ("coverage.rule_interval_width", coverage.effective_rule_interval_width()),
            ("coverage.fitted_interval_width", coverage.effective_fitted_interval_width()),
        ] {
            if !(0.0..1.0).contains(&width) {
                return Err(failed(field, "must be in [0.0, 1.0)"));
            }
        }
        if coverage.effective_full_budget_per_capita() <= 0.0 {
            return Err(failed(
                "coverage.full_budget_per_capita",
                "must be greater than 0",
            ));
        }

        let allocation = &config.allocation;
        let share = allocation.effective_greedy_share();
        if !(share > 0.0 && share <= 1.0) {
            return Err(failed("allocation.greedy_share", "must be in (0.0, 1.0]"));
        }
        let (lower, upper) = allocation.effective_prevention_band();
        if lower >= upper {
            return Err(failed(
                "allocation.prevention_lower",
                "must be below allocation.prevention_upper",
            ));
        }
        if !(0.0..=1.0).contains(&allocation.effective_min_disbursement()) {
            return Err(failed("allocation.min_disbursement", "must be in [0.0, 1.0]"));
        }
        if allocation.effective_facilities_for_full_infrastructure() <= 0.0 {
            return Err(failed(
                "allocation.facilities_for_full_infrastructure",
                "must be greater than 0",
            ));
        }

        let outcomes = &config.outcomes;
        if outcomes.effective_stderr_fraction() < 0.0 {
            return Err(failed("outcomes.stderr_fraction", "must not be negative"));
        }
        let weights = outcomes.effective_budget_criteria_weights();
        if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0))
            || weights.iter().sum::<f64>() <= 0.0
        {
            return Err(failed(
                "outcomes.efficiency_weight",
                "budget criterion weights must be non-negative with a positive sum",
            ));
        }
        if outcomes.annual_capacity.is_some_and(|c| !(c.is_finite() && c > 0.0)) {
            return Err(failed("outcomes.annual_capacity", "must be greater than 0"));
        }

        let gaps = &config.gaps;
        if gaps.effective_min_training_samples() == 0 {
            return Err(failed("gaps.min_training_samples", "must be greater than 0"));
        }
        if !(0.0..=100.0).contains(&gaps.effective_observed_confidence()) {
            return Err(failed("gaps.observed_confidence", "must be in [0, 100]"));
        }
        if gaps.effective_confidence_loss_per_rmse() < 0.0 {
            return Err(failed("gaps.confidence_loss_per_rmse", "must not be negative"));
        }
        let (floor, cap, _) = config.financial.effective_irr_bounds();
        if floor > cap {
            return Err(failed("financial.irr_floor", "must not exceed financial.irr_cap"));
        }
        if config.validation.effective_budget_floor() < 0.0 {
            return Err(failed("validation.budget_floor", "must not be negative"));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    fn merge_toml_file(config: &mut EngineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut EngineConfig, other: &EngineConfig) {
        merge_fields!(base.risk, other.risk, [
            critical_threshold,
            high_threshold,
            medium_threshold,
            min_training_samples,
            learning_rate,
            training_epochs,
            l2_penalty,
        ]);
        merge_fields!(base.coverage, other.coverage, [
            urban_cap,
            rural_cap,
            full_budget_per_capita,
            rule_interval_width,
            fitted_interval_width,
            min_training_samples,
            ridge_penalty,
        ]);
        merge_fields!(base.allocation, other.allocation, [
            emergency_top_n,
            balanced_top_k,
            prevention_lower,
            prevention_upper,
            greedy_share,
            critical_adequacy,
            facilities_for_full_infrastructure,
            min_infrastructure_score,
            cross_region,
            min_disbursement,
            max_iterations,
        ]);
        merge_fields!(base.outcomes, other.outcomes, [
            under5_share,
            u5_mortality_per_1000,
            stunting_prevalence,
            anemia_prevalence,
            mortality_reduction_rate,
            mortality_reduction_cap,
            stunting_reduction_rate,
            stunting_reduction_cap,
            anemia_reduction_rate,
            anemia_reduction_cap,
            dalys_per_life,
            dalys_per_stunting_case,
            dalys_per_anemia_case,
            healthcare_saving_per_person,
            productivity_gain_per_child,
            agricultural_gain_per_person,
            agricultural_uptake,
            include_agricultural_benefit,
            stderr_fraction,
            marginal_benefit_threshold,
            max_cost_per_life,
            efficiency_weight,
            marginal_weight,
            cost_effectiveness_weight,
            coverage_weight,
            annual_capacity,
        ]);
        merge_fields!(base.gaps, other.gaps, [
            min_training_samples,
            ridge_penalty,
            observed_confidence,
            confidence_loss_per_rmse,
        ]);
        merge_fields!(base.financial, other.financial, [
            benefit_growth,
            effectiveness_decay,
            irr_floor,
            irr_cap,
            irr_scale,
        ]);
        merge_fields!(base.financial.values, other.financial.values, [
            value_per_life,
            value_per_daly,
            value_per_stunting_case,
            social_healthcare_per_case,
            education_per_stunting_case,
            productivity_per_anemia_case,
            productivity_increase,
            taxable_income_per_person,
            tax_rate,
            fiscal_healthcare_per_case,
            emergency_need_rate,
            emergency_cost_per_person,
            agricultural_share,
            agricultural_value,
        ]);
        merge_fields!(base.validation, other.validation, [
            budget_floor,
            limited_budget,
            high_coverage_budget,
            max_nutrients,
            max_fortification_share,
            max_supplementation_share,
        ]);
    }

    fn apply_env_overrides(config: &mut EngineConfig) {
        if let Some(v) = env_parse::<usize>("NUTRIPLAN_RISK_MIN_TRAINING_SAMPLES") {
            config.risk.min_training_samples = Some(v);
        }
        if let Some(v) = env_parse::<f64>("NUTRIPLAN_COVERAGE_URBAN_CAP") {
            config.coverage.urban_cap = Some(v);
        }
        if let Some(v) = env_parse::<f64>("NUTRIPLAN_COVERAGE_RURAL_CAP") {
            config.coverage.rural_cap = Some(v);
        }
        if let Some(v) = env_parse::<usize>("NUTRIPLAN_ALLOCATION_EMERGENCY_TOP_N") {
            config.allocation.emergency_top_n = Some(v);
        }
        if let Some(v) = env_parse::<bool>("NUTRIPLAN_ALLOCATION_CROSS_REGION") {
            config.allocation.cross_region = Some(v);
        }
        if let Some(v) = env_parse::<f64>("NUTRIPLAN_OUTCOMES_STDERR_FRACTION") {
            config.outcomes.stderr_fraction = Some(v);
        }
        if let Some(v) = env_parse::<f64>("NUTRIPLAN_VALIDATION_BUDGET_FLOOR") {
            config.validation.budget_floor = Some(v);
        }
    }

    fn apply_overrides(config: &mut EngineConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.budget_floor {
            config.validation.budget_floor = Some(v);
        }
        if let Some(v) = overrides.cross_region {
            config.allocation.cross_region = Some(v);
        }
        if let Some(v) = overrides.emergency_top_n {
            config.allocation.emergency_top_n = Some(v);
        }
        if let Some(v) = overrides.min_training_samples {
            config.risk.min_training_samples = Some(v);
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse().ok())
}

fn failed(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

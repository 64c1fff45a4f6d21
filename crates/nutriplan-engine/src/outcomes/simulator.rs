//! OutcomeSimulator: coverage, cases averted, DALYs, and economic benefit.

use nutriplan_core::config::OutcomeConfig;
use nutriplan_core::constants::{MAX_SENSITIVITY, MIN_SENSITIVITY};
use nutriplan_core::errors::ValidationError;
use nutriplan_core::types::InterventionCatalog;
use tracing::{debug, info};

use super::intervals::{estimate, z_score};
use super::types::{OutcomeProjection, SimulationInput};
use crate::synergy::SynergyTable;

/// Share of the population whose averted cases map to a health impact of 100.
const FULL_IMPACT_CASE_SHARE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct OutcomeSimulator {
    config: OutcomeConfig,
    catalog: InterventionCatalog,
    synergy: SynergyTable,
}

impl OutcomeSimulator {
    pub fn new(config: &OutcomeConfig, catalog: InterventionCatalog, synergy: SynergyTable) -> Self {
        Self {
            config: config.clone(),
            catalog,
            synergy,
        }
    }

    pub fn config(&self) -> &OutcomeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &InterventionCatalog {
        &self.catalog
    }

    pub fn synergy(&self) -> &SynergyTable {
        &self.synergy
    }

    /// Per-person (effectiveness, cost) of a mix, weighted by share.
    pub fn weighted_mix(&self, input: &SimulationInput) -> (f64, f64) {
        input
            .mix
            .iter()
            .filter_map(|(id, share)| self.catalog.get(id).map(|i| (i, share / 100.0)))
            .fold((0.0, 0.0), |(eff, cost), (i, w)| {
                (eff + w * i.effectiveness, cost + w * i.unit_cost)
            })
    }

    pub fn simulate(&self, input: &SimulationInput) -> Result<OutcomeProjection, ValidationError> {
        self.check_input(input)?;
        let cfg = &self.config;

        let population = input.population as f64;
        let under5_population = input
            .under5_population
            .unwrap_or_else(|| (population * cfg.effective_under5_share()).floor() as u64);
        let under5 = under5_population as f64;

        let (weighted_effectiveness, weighted_cost) = self.weighted_mix(input);
        let synergy_factor = self.synergy.factor(&input.nutrients);
        let eff = weighted_effectiveness * synergy_factor;

        let requested = input.coverage;
        let (coverage, budget_limited) = match input.budget {
            Some(budget) if weighted_cost > 0.0 => {
                let affordable = budget / (weighted_cost * population);
                (requested.min(affordable), affordable < requested)
            }
            _ => (requested, false),
        };
        if budget_limited {
            info!(
                requested,
                actual_coverage = coverage,
                budget_limited,
                "coverage limited by budget"
            );
        }

        let (mortality_rate, mortality_cap) = cfg.effective_mortality_reduction();
        let (stunting_rate, stunting_cap) = cfg.effective_stunting_reduction();
        let (anemia_rate, anemia_cap) = cfg.effective_anemia_reduction();
        let reached_children = coverage * under5;

        let s = input.sensitivity;
        let scaled = |raw: f64| (raw.floor() * s).floor();
        let lives = scaled(
            reached_children
                * (cfg.effective_u5_mortality_per_1000() / 1000.0)
                * mortality_cap.min(eff * mortality_rate),
        );
        let stunting = scaled(
            reached_children
                * cfg.effective_stunting_prevalence()
                * stunting_cap.min(eff * stunting_rate),
        );
        let anemia = scaled(
            reached_children * cfg.effective_anemia_prevalence() * anemia_cap.min(eff * anemia_rate),
        );

        let (daly_life, daly_stunting, daly_anemia) = cfg.effective_daly_weights();
        let dalys = lives * daly_life + stunting * daly_stunting + anemia * daly_anemia;

        let healthcare = coverage * population * eff * cfg.effective_healthcare_saving_per_person();
        let productivity = coverage * under5 * eff * cfg.effective_productivity_gain_per_child();
        let agricultural = match input.rural_fraction {
            Some(rural) if cfg.effective_include_agricultural_benefit() => {
                coverage
                    * population
                    * rural
                    * cfg.effective_agricultural_uptake()
                    * eff
                    * cfg.effective_agricultural_gain_per_person()
            }
            _ => 0.0,
        };
        let economic_benefit = (healthcare + productivity + agricultural) * s;

        let health_impact =
            ((lives + stunting + anemia) / (FULL_IMPACT_CASE_SHARE * population) * 100.0).min(100.0);

        let total_cost = coverage * population * weighted_cost;
        let per_unit = |n: f64| (n > 0.0).then(|| total_cost / n);

        let z = z_score(input.confidence_level);
        let se = cfg.effective_stderr_fraction();

        debug!(
            actual_coverage = coverage,
            weighted_cost,
            synergy_factor,
            lives,
            dalys,
            "simulated outcomes"
        );

        Ok(OutcomeProjection {
            requested_coverage: requested,
            actual_coverage: coverage,
            budget_limited,
            weighted_effectiveness,
            weighted_cost,
            synergy_factor,
            effectiveness: eff,
            population: input.population,
            under5_population,
            people_reached: (coverage * population).floor() as u64,
            lives_saved: estimate(lives, z, se),
            stunting_prevented: estimate(stunting, z, se),
            anemia_reduced: estimate(anemia, z, se),
            dalys_averted: estimate(dalys, z, se),
            economic_benefit: estimate(economic_benefit, z, se),
            health_impact,
            total_cost,
            cost_per_daly: per_unit(dalys),
            cost_per_life: per_unit(lives),
            confidence_level: input.confidence_level,
        })
    }

    fn check_input(&self, input: &SimulationInput) -> Result<(), ValidationError> {
        input.mix.validate(&self.catalog)?;
        if input.nutrients.is_empty() {
            return Err(ValidationError::NoNutrientsSelected);
        }
        if input.population == 0 {
            return Err(ValidationError::invalid("population", "must be positive"));
        }
        if !(0.0..=1.0).contains(&input.coverage) {
            return Err(ValidationError::invalid("coverage", "must be within 0.0-1.0"));
        }
        if !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&input.sensitivity) {
            return Err(ValidationError::invalid(
                "sensitivity",
                format!("must be within {MIN_SENSITIVITY}-{MAX_SENSITIVITY}"),
            ));
        }
        if !(input.confidence_level > 0.0 && input.confidence_level < 100.0) {
            return Err(ValidationError::invalid(
                "confidence_level",
                "must be strictly between 0 and 100",
            ));
        }
        if input.budget.is_some_and(|b| !b.is_finite() || b < 0.0) {
            return Err(ValidationError::invalid("budget", "must be a non-negative number"));
        }
        if input
            .rural_fraction
            .is_some_and(|r| !(0.0..=1.0).contains(&r))
        {
            return Err(ValidationError::invalid("rural_fraction", "must be within 0.0-1.0"));
        }
        Ok(())
    }
}

//! Shared constants for the nutrition planning engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "nutriplan.toml";

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "NUTRIPLAN_LOG";

// ---- Reference nutrient identifiers ----

pub const CALCIUM: &str = "calcium";
pub const FOLATE: &str = "folate";
pub const IRON: &str = "iron";
pub const NIACIN: &str = "niacin";
pub const PROTEIN: &str = "protein";
pub const RIBOFLAVIN: &str = "riboflavin";
pub const THIAMIN: &str = "thiamin";
pub const VITAMIN_A: &str = "vitamin_a";
pub const VITAMIN_B6: &str = "vitamin_b6";
pub const VITAMIN_B12: &str = "vitamin_b12";
pub const VITAMIN_C: &str = "vitamin_c";
pub const ZINC: &str = "zinc";

/// Nutrients tracked by the default reference data.
pub const TRACKED_NUTRIENTS: &[&str] = &[
    CALCIUM, FOLATE, IRON, NIACIN, PROTEIN, RIBOFLAVIN, THIAMIN, VITAMIN_A, VITAMIN_B6,
    VITAMIN_B12, VITAMIN_C, ZINC,
];

// ---- Intervention mix ----

/// Allowed deviation of an intervention mix total from 100%.
pub const MIX_SUM_TOLERANCE: f64 = 0.01;

// ---- Risk scoring ----

pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 70.0;
pub const DEFAULT_HIGH_THRESHOLD: f64 = 50.0;
pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 30.0;

/// Minimum usable samples before a fitted model replaces the rules.
pub const DEFAULT_MIN_TRAINING_SAMPLES: usize = 10;

/// Adequacy used for a nutrient column with no usable value anywhere.
pub const DEFAULT_MISSING_ADEQUACY: f64 = 50.0;

// ---- Nutrient gaps ----

/// Confidence (0-100) of a gap read directly from observed adequacy.
pub const DEFAULT_OBSERVED_GAP_CONFIDENCE: f64 = 75.0;
/// Confidence points lost per unit of fitted-model RMSE.
pub const DEFAULT_GAP_CONFIDENCE_LOSS_PER_RMSE: f64 = 2.0;
/// Forecast confidence when no component reports one.
pub const DEFAULT_FORECAST_CONFIDENCE: f64 = 70.0;
/// Floor for the coverage component of forecast confidence.
pub const MIN_COVERAGE_CONFIDENCE: f64 = 50.0;

// ---- Coverage ----

pub const DEFAULT_URBAN_COVERAGE_CAP: f64 = 0.95;
pub const DEFAULT_RURAL_COVERAGE_CAP: f64 = 0.85;

/// Budget per capita at which coverage is no longer budget-limited.
pub const DEFAULT_FULL_BUDGET_PER_CAPITA: f64 = 10.0;

pub const DEFAULT_RULE_INTERVAL_WIDTH: f64 = 0.20;
pub const DEFAULT_FITTED_INTERVAL_WIDTH: f64 = 0.15;

/// Area assumed for regions that carry no area, in km².
pub const DEFAULT_REGION_AREA_KM2: f64 = 1000.0;

// ---- Allocation ----

pub const DEFAULT_EMERGENCY_TOP_N: usize = 15;
pub const DEFAULT_BALANCED_TOP_K: usize = 45;
pub const DEFAULT_PREVENTION_LOWER: f64 = 40.0;
pub const DEFAULT_PREVENTION_UPPER: f64 = 60.0;

/// Share of the remaining regional budget handed to each eligible intervention.
pub const DEFAULT_GREEDY_SHARE: f64 = 0.4;

/// Facilities at which a region's infrastructure score saturates.
pub const DEFAULT_FACILITIES_FOR_FULL_INFRASTRUCTURE: f64 = 10.0;

pub const DEFAULT_MIN_INFRASTRUCTURE_SCORE: f64 = 0.5;

/// Nutrients below this adequacy are critical for allocation.
pub const DEFAULT_CRITICAL_ADEQUACY: f64 = 50.0;

pub const DEFAULT_SIMPLEX_MAX_ITERATIONS: usize = 10_000;

// ---- Outcomes ----

pub const DEFAULT_UNDER5_SHARE: f64 = 0.15;
pub const DEFAULT_U5_MORTALITY_PER_1000: f64 = 43.0;
pub const DEFAULT_STUNTING_PREVALENCE: f64 = 0.29;
pub const DEFAULT_ANEMIA_PREVALENCE: f64 = 0.28;

pub const DEFAULT_MORTALITY_REDUCTION_RATE: f64 = 0.20;
pub const DEFAULT_MORTALITY_REDUCTION_CAP: f64 = 0.25;
pub const DEFAULT_STUNTING_REDUCTION_RATE: f64 = 0.25;
pub const DEFAULT_STUNTING_REDUCTION_CAP: f64 = 0.30;
pub const DEFAULT_ANEMIA_REDUCTION_RATE: f64 = 0.35;
pub const DEFAULT_ANEMIA_REDUCTION_CAP: f64 = 0.40;

pub const DEFAULT_DALYS_PER_LIFE: f64 = 33.0;
pub const DEFAULT_DALYS_PER_STUNTING_CASE: f64 = 4.6;
pub const DEFAULT_DALYS_PER_ANEMIA_CASE: f64 = 0.8;

pub const DEFAULT_HEALTHCARE_SAVING_PER_PERSON: f64 = 178_000.0;
pub const DEFAULT_PRODUCTIVITY_GAIN_PER_CHILD: f64 = 712_000.0;
pub const DEFAULT_AGRICULTURAL_GAIN_PER_PERSON: f64 = 21_360.0;
pub const DEFAULT_AGRICULTURAL_UPTAKE: f64 = 0.1;

/// Relative standard error applied to every outcome.
pub const DEFAULT_STDERR_FRACTION: f64 = 0.15;

pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 95.0;

// ---- Budget recommendation ----

/// Benefit per extra unit of budget below which spending more is not worthwhile.
pub const DEFAULT_MARGINAL_BENEFIT_THRESHOLD: f64 = 1.5;
/// Highest acceptable cost per life saved, in budget currency.
pub const DEFAULT_MAX_COST_PER_LIFE: f64 = 500_000.0;
/// Weights of the efficiency, marginal-return, cost-effectiveness, and
/// coverage criteria in the recommended budget.
pub const DEFAULT_BUDGET_CRITERIA_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.2, 0.2];
pub const MIN_SENSITIVITY: f64 = 0.5;
pub const MAX_SENSITIVITY: f64 = 1.5;

// ---- Financial ----

pub const DEFAULT_DISCOUNT_RATE: f64 = 0.05;
pub const DEFAULT_TIME_HORIZON_YEARS: u32 = 5;
pub const DEFAULT_BENEFIT_GROWTH: f64 = 0.03;
pub const DEFAULT_EFFECTIVENESS_DECAY: f64 = 0.05;
pub const DEFAULT_IRR_FLOOR: f64 = 0.05;
pub const DEFAULT_IRR_CAP: f64 = 0.30;
pub const DEFAULT_IRR_SCALE: f64 = 0.05;

// ---- Validation ----

pub const DEFAULT_BUDGET_FLOOR: f64 = 100_000.0;
pub const DEFAULT_LIMITED_BUDGET: f64 = 500_000.0;
pub const DEFAULT_HIGH_COVERAGE_BUDGET: f64 = 5_000_000.0;
pub const DEFAULT_MAX_NUTRIENTS: usize = 7;

//! Data model behaviour: mix validation, region derivations, parameter bag.

use nutriplan_core::errors::ValidationError;
use nutriplan_core::types::*;

fn catalog() -> InterventionCatalog {
    InterventionCatalog::static_defaults()
}

#[test]
fn test_mix_at_tolerance_boundary_is_valid() {
    let mix = InterventionMix::new()
        .with_share("supplementation", 59.99)
        .with_share("fortification", 40.0);
    assert!(mix.validate(&catalog()).is_ok());
}

#[test]
fn test_mix_totaling_90_is_rejected() {
    let mix = InterventionMix::new()
        .with_share("supplementation", 50.0)
        .with_share("fortification", 40.0);
    match mix.validate(&catalog()) {
        Err(ValidationError::MixSumInvalid { total }) => assert!((total - 90.0).abs() < 1e-9),
        other => panic!("expected MixSumInvalid, got {other:?}"),
    }
}

#[test]
fn test_mix_with_unknown_intervention_is_rejected() {
    let mix = InterventionMix::new().with_share("cash_transfer", 100.0);
    assert_eq!(
        mix.validate(&catalog()),
        Err(ValidationError::UnknownIntervention {
            id: "cash_transfer".into()
        })
    );
}

#[test]
fn test_catalog_defaults_and_cheapest() {
    let catalog = catalog();
    let ids: Vec<&str> = catalog.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(
        ids,
        ["fortification", "supplementation", "biofortification", "education"]
    );
    assert_eq!(catalog.cheapest_unit_cost(), Some(1_850.0));
    let fortification = catalog.get("fortification").unwrap();
    assert!(fortification.addresses_nutrient("iron"));
    assert!(!fortification.addresses_nutrient("vitamin_c"));
    assert!(catalog.get("education").unwrap().addresses_nutrient("vitamin_c"));
}

#[test]
fn test_channel_coverage_factors() {
    assert_eq!(DeliveryChannel::Supplementation.coverage_factor(), 1.2);
    assert_eq!(DeliveryChannel::Fortification.coverage_factor(), 0.9);
    assert_eq!(DeliveryChannel::Education.coverage_factor(), 0.8);
    assert_eq!(DeliveryChannel::Mixed.coverage_factor(), 1.0);
    assert_eq!(DeliveryChannel::ALL.len(), 5);
}

#[test]
fn test_region_derivations() {
    let region = Region::new("east", 200_000, 36_000)
        .with_facilities(10)
        .with_area(500.0)
        .with_roads(40.0)
        .with_rural_fraction(0.7);
    assert!((region.facilities_per_10k() - 0.5).abs() < 1e-12);
    assert!((region.under5_proportion() - 0.18).abs() < 1e-12);
    assert!((region.population_density() - 400.0).abs() < 1e-12);
    assert_eq!(region.road_density(), Some(0.08));
    assert!(!region.is_urban());

    let empty = Region::new("empty", 0, 0);
    assert_eq!(empty.facilities_per_10k(), 0.0);
    assert_eq!(empty.road_density(), None);
}

#[test]
fn test_parameter_derived_values() {
    let params = PlanParameters::default()
        .with_budget(1_200_000.0)
        .with_population(50_000)
        .with_coverage_target(0.5);
    assert_eq!(params.people_reached(), 25_000);
    assert!((params.monthly_budget() - 100_000.0).abs() < 1e-9);
    assert!((params.budget_per_capita() - 24.0).abs() < 1e-9);
    assert_eq!(params.effective_under5_population(), 7_500);
    assert_eq!(params.spend_years(), 1);
}

#[test]
fn test_parameter_clone_is_independent() {
    let original = PlanParameters::default();
    let mut copy = original.clone();
    copy.nutrients.push("vitamin_c".into());
    assert_eq!(original.nutrients.len(), 4);
    assert_eq!(copy.nutrients.len(), 5);
}

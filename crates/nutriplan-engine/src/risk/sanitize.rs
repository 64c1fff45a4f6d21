//! Adequacy sanitization.
//!
//! Source data mixes units and carries gaps. Every value is brought into
//! [0, 100] and every correction is reported; sanitization never fails.

use std::collections::{BTreeMap, BTreeSet};

use nutriplan_core::constants::DEFAULT_MISSING_ADEQUACY;
use nutriplan_core::errors::{Checked, DataQualityIssue};
use nutriplan_core::types::{Region, SanitizedRegion};
use statrs::statistics::{Data, Median};
use tracing::{debug, info};

/// Values above this are treated as entered in the wrong unit.
const UNIT_ENTRY_THRESHOLD: f64 = 1000.0;
const UNIT_ENTRY_DIVISOR: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    UnitEntry,
    AboveRange,
    Negative,
}

/// Clean one finite adequacy value. Values already in [0, 100] pass through.
pub fn clean_adequacy(raw: f64) -> (f64, Option<Correction>) {
    if raw > UNIT_ENTRY_THRESHOLD {
        ((raw / UNIT_ENTRY_DIVISOR).min(100.0), Some(Correction::UnitEntry))
    } else if raw > 100.0 {
        (100.0, Some(Correction::AboveRange))
    } else if raw < 0.0 {
        (0.0, Some(Correction::Negative))
    } else {
        (raw, None)
    }
}

/// Sanitize a dataset. Every nutrient seen in any region becomes a column;
/// gaps are filled with the column median of the corrected values.
pub fn sanitize_regions(regions: &[Region]) -> Checked<Vec<SanitizedRegion>> {
    let columns: BTreeSet<&str> = regions
        .iter()
        .flat_map(|r| r.nutrient_adequacy.keys().map(String::as_str))
        .collect();

    let mut result = Checked::new(Vec::with_capacity(regions.len()));
    let mut partial: Vec<BTreeMap<String, Option<f64>>> = Vec::with_capacity(regions.len());

    for region in regions {
        let mut cleaned = BTreeMap::new();
        for nutrient in &columns {
            let raw = region
                .nutrient_adequacy
                .get(*nutrient)
                .copied()
                .flatten()
                .filter(|v| v.is_finite());
            let value = raw.map(|raw| {
                let (value, correction) = clean_adequacy(raw);
                if let Some(correction) = correction {
                    result.add_issue(describe(correction, &region.id, nutrient, raw, value));
                }
                value
            });
            cleaned.insert(nutrient.to_string(), value);
        }
        partial.push(cleaned);
    }

    let medians: BTreeMap<&str, f64> = columns
        .iter()
        .map(|nutrient| {
            let present: Vec<f64> = partial
                .iter()
                .filter_map(|row| row.get(*nutrient).copied().flatten())
                .collect();
            let median = if present.is_empty() {
                DEFAULT_MISSING_ADEQUACY
            } else {
                Data::new(present).median()
            };
            (*nutrient, median)
        })
        .collect();

    for (region, row) in regions.iter().zip(partial) {
        let mut adequacy = BTreeMap::new();
        for (nutrient, value) in row {
            let value = match value {
                Some(v) => v,
                None => {
                    let filled = medians
                        .get(nutrient.as_str())
                        .copied()
                        .unwrap_or(DEFAULT_MISSING_ADEQUACY);
                    result.add_issue(DataQualityIssue::Missing {
                        region: region.id.clone(),
                        nutrient: nutrient.clone(),
                        filled,
                    });
                    filled
                }
            };
            adequacy.insert(nutrient, value);
        }
        if adequacy.is_empty() {
            result.add_issue(DataQualityIssue::NoAdequacyData {
                region: region.id.clone(),
                filled: DEFAULT_MISSING_ADEQUACY,
            });
        }
        result.data.push(SanitizedRegion {
            region: region.clone(),
            adequacy,
        });
    }

    if result.is_clean() {
        debug!(region_count = regions.len(), "adequacy data needed no corrections");
    } else {
        info!(
            region_count = regions.len(),
            corrections_applied = result.issue_count(),
            "sanitized adequacy data"
        );
    }
    result
}

fn describe(
    correction: Correction,
    region: &str,
    nutrient: &str,
    original: f64,
    corrected: f64,
) -> DataQualityIssue {
    let region = region.to_string();
    let nutrient = nutrient.to_string();
    match correction {
        Correction::UnitEntry => DataQualityIssue::UnitEntry {
            region,
            nutrient,
            original,
            corrected,
        },
        Correction::AboveRange => DataQualityIssue::AboveRange {
            region,
            nutrient,
            original,
        },
        Correction::Negative => DataQualityIssue::Negative {
            region,
            nutrient,
            original,
        },
    }
}

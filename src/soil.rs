//! Rule-based soil nutrient analysis
//!
//! Pure rule engine: a static table of optimal ranges for six tracked
//! nutrients, plus per-nutrient advice strings. Classification is
//! deterministic and synchronous with no failure path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Optimal range and advice strings for a single tracked nutrient.
///
/// Bounds are inclusive: a value exactly at `low` or `high` is OPTIMAL.
pub struct NutrientRule {
    pub name: &'static str,
    pub low: f64,
    pub high: f64,
    advice_low: &'static str,
    advice_high: &'static str,
    advice_optimal: &'static str,
}

const NITROGEN: NutrientRule = NutrientRule {
    name: "nitrogen",
    low: 80.0,
    high: 160.0,
    advice_low: "Nitrogen is low. Apply around 50 kg urea per acre or composted manure before the next irrigation.",
    advice_high: "Nitrogen is high. Hold off on nitrogen fertilizer and consider a nitrogen-hungry cover crop.",
    advice_optimal: "Nitrogen is in the optimal range. Maintain the current fertilization schedule.",
};

const PHOSPHORUS: NutrientRule = NutrientRule {
    name: "phosphorus",
    low: 20.0,
    high: 40.0,
    advice_low: "Phosphorus is low. Incorporate single super phosphate or bone meal before sowing.",
    advice_high: "Phosphorus is high. Skip phosphate fertilizer this season; excess phosphorus locks out zinc and iron.",
    advice_optimal: "Phosphorus is adequate. No amendment needed.",
};

const POTASSIUM: NutrientRule = NutrientRule {
    name: "potassium",
    low: 100.0,
    high: 250.0,
    advice_low: "Potassium is low. Apply muriate of potash or wood ash to restore levels.",
    advice_high: "Potassium is high. Withhold potash; surplus potassium interferes with magnesium uptake.",
    advice_optimal: "Potassium is in balance. Retain crop residues to keep it there.",
};

const SULFUR: NutrientRule = NutrientRule {
    name: "sulfur",
    low: 10.0,
    high: 30.0,
    advice_low: "Sulfur is deficient. Add gypsum or elemental sulfur to correct it.",
    advice_high: "Sulfur is high. Avoid sulfate fertilizers and improve drainage to leach the surplus.",
    advice_optimal: "Sulfur levels are fine for most crops.",
};

const ORGANIC_MATTER: NutrientRule = NutrientRule {
    name: "organic_matter",
    low: 1.5,
    high: 4.0,
    advice_low: "Organic matter is low. Work in farmyard manure, compost or a green manure crop.",
    advice_high: "Organic matter is unusually high. Ensure residues are fully decomposed before sowing.",
    advice_optimal: "Organic matter is healthy. Continue residue recycling.",
};

const PH: NutrientRule = NutrientRule {
    name: "ph",
    low: 6.0,
    high: 7.5,
    advice_low: "Soil is acidic. Apply agricultural lime to raise pH.",
    advice_high: "Soil is alkaline. Apply gypsum or elemental sulfur to lower pH.",
    advice_optimal: "pH suits most field crops. No correction required.",
};

/// The six tracked nutrients, in report order.
pub const RULES: [&NutrientRule; 6] = [
    &NITROGEN,
    &PHOSPHORUS,
    &POTASSIUM,
    &SULFUR,
    &ORGANIC_MATTER,
    &PH,
];

/// Incoming soil sample. `crop` and `soil_type` are passed through
/// unvalidated; nutrient readings arrive as arbitrary JSON values and
/// are coerced to numbers during analysis.
#[derive(Debug, Default, Deserialize)]
pub struct SoilSample {
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub soil_type: String,
    #[serde(flatten)]
    pub readings: HashMap<String, Value>,
}

/// Per-nutrient classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NutrientStatus {
    Low,
    High,
    Optimal,
}

/// Classification plus advice for one nutrient.
///
/// A non-numeric reading coerces to NaN, which serializes as JSON null.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub status: NutrientStatus,
    pub value: f64,
    pub suggestion: &'static str,
}

/// Diagnoses for the six tracked nutrients, in rule-table order.
/// Always exactly these six keys, regardless of the input shape.
#[derive(Debug, Serialize)]
pub struct NutrientReport {
    pub nitrogen: Diagnosis,
    pub phosphorus: Diagnosis,
    pub potassium: Diagnosis,
    pub sulfur: Diagnosis,
    pub organic_matter: Diagnosis,
    pub ph: Diagnosis,
}

/// Full soil analysis report.
#[derive(Debug, Serialize)]
pub struct SoilReport {
    pub crop: String,
    pub soil_type: String,
    pub nutrients: NutrientReport,
}

/// Analyze a soil sample against the static rule table.
pub fn analyze(sample: &SoilSample) -> SoilReport {
    SoilReport {
        crop: sample.crop.clone(),
        soil_type: sample.soil_type.clone(),
        nutrients: NutrientReport {
            nitrogen: diagnose(&NITROGEN, reading(sample, NITROGEN.name)),
            phosphorus: diagnose(&PHOSPHORUS, reading(sample, PHOSPHORUS.name)),
            potassium: diagnose(&POTASSIUM, reading(sample, POTASSIUM.name)),
            sulfur: diagnose(&SULFUR, reading(sample, SULFUR.name)),
            organic_matter: diagnose(&ORGANIC_MATTER, reading(sample, ORGANIC_MATTER.name)),
            ph: diagnose(&PH, reading(sample, PH.name)),
        },
    }
}

/// Coerce a nutrient reading to a number.
///
/// Accepts JSON numbers and numeric strings; anything else becomes NaN.
fn reading(sample: &SoilSample, name: &str) -> f64 {
    match sample.readings.get(name) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Classify a value against a rule's inclusive optimal range.
///
/// NaN fails both comparisons and falls through to OPTIMAL: a garbage
/// reading still gets classified rather than erroring, and the report
/// always carries all six nutrients.
fn diagnose(rule: &NutrientRule, value: f64) -> Diagnosis {
    let (status, suggestion) = if value < rule.low {
        (NutrientStatus::Low, rule.advice_low)
    } else if value > rule.high {
        (NutrientStatus::High, rule.advice_high)
    } else {
        (NutrientStatus::Optimal, rule.advice_optimal)
    };

    Diagnosis {
        status,
        value,
        suggestion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_with(readings: Value) -> SoilSample {
        serde_json::from_value(readings).expect("sample should deserialize")
    }

    #[test]
    fn boundaries_are_inclusive_for_all_nutrients() {
        for rule in RULES {
            assert_eq!(
                diagnose(rule, rule.low).status,
                NutrientStatus::Optimal,
                "{} at lower bound",
                rule.name
            );
            assert_eq!(
                diagnose(rule, rule.high).status,
                NutrientStatus::Optimal,
                "{} at upper bound",
                rule.name
            );
        }
    }

    #[test]
    fn classification_and_advice_for_all_nutrients() {
        for rule in RULES {
            let low = diagnose(rule, rule.low - 0.1);
            assert_eq!(low.status, NutrientStatus::Low, "{} below range", rule.name);
            assert_eq!(low.suggestion, rule.advice_low);

            let high = diagnose(rule, rule.high + 0.1);
            assert_eq!(high.status, NutrientStatus::High, "{} above range", rule.name);
            assert_eq!(high.suggestion, rule.advice_high);

            let mid = diagnose(rule, (rule.low + rule.high) / 2.0);
            assert_eq!(mid.status, NutrientStatus::Optimal, "{} inside range", rule.name);
            assert_eq!(mid.suggestion, rule.advice_optimal);
        }
    }

    #[test]
    fn report_always_has_exactly_six_nutrient_keys() {
        // Extra and missing fields in the input must not change the output shape.
        let sample = sample_with(json!({
            "crop": "maize",
            "nitrogen": 100,
            "iron": 5,
            "moisture": 33
        }));
        let report = analyze(&sample);

        let expected = ["nitrogen", "phosphorus", "potassium", "sulfur", "organic_matter", "ph"];

        let value = serde_json::to_value(&report).expect("report should serialize");
        let nutrients = value["nutrients"].as_object().expect("nutrients object");
        assert_eq!(nutrients.len(), expected.len());
        for key in expected {
            assert!(nutrients.contains_key(key), "missing nutrient {}", key);
        }

        // Wire order follows the rule table (struct declaration order).
        let text = serde_json::to_string(&report).expect("report should serialize");
        let positions: Vec<usize> = expected
            .iter()
            .map(|k| text.find(&format!("\"{}\"", k)).expect("key present in output"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let sample = sample_with(json!({ "nitrogen": "60" }));
        let report = analyze(&sample);
        assert_eq!(report.nutrients.nitrogen.status, NutrientStatus::Low);
        assert_eq!(report.nutrients.nitrogen.value, 60.0);
    }

    #[test]
    fn non_numeric_reading_falls_through_to_optimal() {
        // Compatibility behavior: NaN fails both bound comparisons, so a
        // garbage reading classifies OPTIMAL with a null value in JSON.
        let sample = sample_with(json!({ "nitrogen": "plenty" }));
        let report = analyze(&sample);
        assert_eq!(report.nutrients.nitrogen.status, NutrientStatus::Optimal);
        assert!(report.nutrients.nitrogen.value.is_nan());

        let value = serde_json::to_value(&report).expect("report should serialize");
        assert!(value["nutrients"]["nitrogen"]["value"].is_null());
    }

    #[test]
    fn wheat_loam_end_to_end_vector() {
        let sample = sample_with(json!({
            "crop": "wheat",
            "soil_type": "loam",
            "nitrogen": 60,
            "phosphorus": 30,
            "potassium": 120,
            "sulfur": 15,
            "organic_matter": 2.0,
            "ph": 6.8
        }));
        let report = analyze(&sample);

        assert_eq!(report.crop, "wheat");
        assert_eq!(report.soil_type, "loam");
        assert_eq!(report.nutrients.nitrogen.status, NutrientStatus::Low);
        assert_eq!(report.nutrients.phosphorus.status, NutrientStatus::Optimal);
        assert_eq!(report.nutrients.potassium.status, NutrientStatus::Optimal);
        assert_eq!(report.nutrients.sulfur.status, NutrientStatus::Optimal);
        assert_eq!(report.nutrients.organic_matter.status, NutrientStatus::Optimal);
        assert_eq!(report.nutrients.ph.status, NutrientStatus::Optimal);
    }
}

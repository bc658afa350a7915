//! Body Mass Index calculator and health-record BMI derivation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use wardsafe_contracts::error::{WardError, WardResult};

/// Lower and upper BMI bounds of the healthy range, used for the ideal
/// weight window.
const HEALTHY_BMI_MIN: f64 = 18.5;
const HEALTHY_BMI_MAX: f64 = 24.9;

/// Weight classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// BMI below 18.5.
    Underweight,
    /// 18.5 up to (not including) 25.
    Normal,
    /// 25 up to (not including) 30.
    Overweight,
    /// 30 and above.
    Obese,
}

impl BmiCategory {
    /// Classify an unrounded BMI value.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn recommendations(&self) -> [&'static str; 4] {
        match self {
            BmiCategory::Underweight => [
                "Consider consulting a nutritionist",
                "Focus on healthy weight gain",
                "Include protein-rich foods in your diet",
                "Regular strength training exercises",
            ],
            BmiCategory::Normal => [
                "Maintain your current healthy lifestyle",
                "Continue regular exercise",
                "Eat a balanced diet",
                "Monitor your weight regularly",
            ],
            BmiCategory::Overweight => [
                "Consider a balanced diet plan",
                "Increase physical activity",
                "Consult a healthcare provider",
                "Focus on gradual weight loss",
            ],
            BmiCategory::Obese => [
                "Consult a healthcare professional",
                "Consider a structured weight loss program",
                "Focus on lifestyle changes",
                "Regular medical monitoring",
            ],
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.write_str(label)
    }
}

/// Healthy weight window for a given height, in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

/// Result of a BMI self-assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiAssessment {
    /// BMI rounded to one decimal.
    pub bmi: f64,
    /// Band of the unrounded BMI.
    pub category: BmiCategory,
    pub recommendations: Vec<String>,
    pub ideal_weight: WeightRange,
}

/// Compute BMI from weight in kilograms and height in centimetres.
///
/// # Errors
///
/// `InvalidMeasurement` when either input is zero, negative or not finite.
pub fn assess_bmi(weight_kg: f64, height_cm: f64) -> WardResult<BmiAssessment> {
    require_positive("weight", weight_kg)?;
    require_positive("height", height_cm)?;

    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    let category = BmiCategory::from_bmi(raw);

    debug!(bmi = raw, category = %category, "assessed BMI");

    Ok(BmiAssessment {
        bmi: round1(raw),
        category,
        recommendations: category.recommendations().iter().map(|r| r.to_string()).collect(),
        ideal_weight: WeightRange {
            min_kg: round1(HEALTHY_BMI_MIN * height_m * height_m),
            max_kg: round1(HEALTHY_BMI_MAX * height_m * height_m),
        },
    })
}

fn require_positive(name: &str, value: f64) -> WardResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WardError::InvalidMeasurement {
            reason: format!("{} must be a positive number, got {}", name, value),
        })
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ── Health records ────────────────────────────────────────────────────────────

/// Vital-sign readings as submitted. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub heart_rate: Option<u32>,
    pub blood_pressure: Option<String>,
    pub temperature: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    /// Centimetres.
    pub height: Option<f64>,
}

/// A stored vitals snapshot with its derived BMI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub vitals: Vitals,
    /// Present only when both weight and height were recorded.
    pub bmi: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl HealthRecord {
    pub fn new(user_id: impl Into<String>, vitals: Vitals) -> Self {
        let bmi = match (vitals.weight, vitals.height) {
            (Some(weight), Some(height)) if weight > 0.0 && height > 0.0 => {
                let height_m = height / 100.0;
                Some(round1(weight / (height_m * height_m)))
            }
            _ => None,
        };

        Self {
            user_id: user_id.into(),
            vitals,
            bmi,
            recorded_at: Utc::now(),
        }
    }
}

/// Most records returned by [`recent_health_records`].
pub const RECENT_RECORD_LIMIT: usize = 10;

/// `user_id`'s records, newest `recorded_at` first, at most
/// [`RECENT_RECORD_LIMIT`] of them.
pub fn recent_health_records(records: &[HealthRecord], user_id: &str) -> Vec<HealthRecord> {
    let mut own: Vec<HealthRecord> = records
        .iter()
        .filter(|record| record.user_id == user_id)
        .cloned()
        .collect();
    own.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    own.truncate(RECENT_RECORD_LIMIT);
    debug!(user_id, returned = own.len(), "recent health records listed");
    own
}

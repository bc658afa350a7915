//! Scenario 3: Self-Assessments
//!
//! Runs the BMI calculator for a few sample measurements (one per band),
//! records vitals snapshots with derived BMI, lists one patient's recent
//! records, and scores two completed
//! mental-health questionnaires.

use wardsafe_assess::{
    assess_bmi, recent_health_records, score_questionnaire, HealthRecord, Vitals, QUESTIONS,
};
use wardsafe_contracts::error::WardResult;

/// `(label, weight kg, height cm)` samples covering every BMI band.
pub const BMI_SAMPLES: [(&str, f64, f64); 4] = [
    ("light", 50.0, 175.0),
    ("typical", 70.0, 175.0),
    ("heavy", 85.0, 175.0),
    ("very heavy", 110.0, 175.0),
];

/// Two completed questionnaires: a low and a high scorer.
pub const QUESTIONNAIRE_SAMPLES: [(&str, [u8; 10]); 2] = [
    ("routine check-in", [0, 1, 0, 1, 1, 0, 0, 1, 0, 0]),
    ("referred by GP", [3, 2, 2, 2, 3, 2, 1, 2, 2, 0]),
];

/// Run Scenario 3.
pub fn run_scenario() -> WardResult<()> {
    println!("=== Scenario 3: Self-Assessments ===");
    println!();

    // ── BMI ───────────────────────────────────────────────────────────────────

    for (label, weight, height) in BMI_SAMPLES {
        let result = assess_bmi(weight, height)?;
        println!(
            "  BMI {:<11} {:>5.1} kg / {:>5.1} cm -> {:>4.1} {:<14} ideal {:.1}-{:.1} kg",
            label,
            weight,
            height,
            result.bmi,
            result.category.to_string(),
            result.ideal_weight.min_kg,
            result.ideal_weight.max_kg
        );
        if let Some(first) = result.recommendations.first() {
            println!("      e.g. {}", first);
        }
    }
    println!();

    let record = HealthRecord::new(
        "P2",
        Vitals {
            heart_rate: Some(88),
            blood_pressure: Some("142/90".to_string()),
            weight: Some(92.0),
            height: Some(180.0),
            ..Vitals::default()
        },
    );
    println!(
        "  Vitals for {}: derived BMI {}",
        record.user_id,
        record.bmi.map(|b| b.to_string()).unwrap_or_else(|| "n/a".to_string())
    );
    let records = vec![
        record,
        HealthRecord::new("P3", Vitals { heart_rate: Some(64), ..Vitals::default() }),
        HealthRecord::new("P2", Vitals { heart_rate: Some(81), ..Vitals::default() }),
    ];
    let recent = recent_health_records(&records, "P2");
    println!("  Recent records for P2:  {} of {} stored", recent.len(), records.len());
    println!();

    // ── Questionnaire ─────────────────────────────────────────────────────────

    println!("  Questionnaire: {} questions, answers 0-3", QUESTIONS.len());
    for (label, answers) in QUESTIONNAIRE_SAMPLES {
        let result = score_questionnaire(&answers)?;
        println!(
            "  {:<17} score {:>2}/30  {:<18} urgency {}",
            label,
            result.score,
            result.severity.to_string(),
            result.urgency
        );
        for rec in &result.recommendations {
            println!("      - {}", rec);
        }
    }

    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wardsafe_assess::{BmiCategory, MentalHealthSeverity};

    #[test]
    fn test_bmi_samples_cover_every_band() {
        let categories: Vec<BmiCategory> = BMI_SAMPLES
            .iter()
            .map(|(_, w, h)| assess_bmi(*w, *h).unwrap().category)
            .collect();
        assert_eq!(
            categories,
            vec![
                BmiCategory::Underweight,
                BmiCategory::Normal,
                BmiCategory::Overweight,
                BmiCategory::Obese
            ]
        );
    }

    #[test]
    fn test_questionnaire_samples() {
        let low = score_questionnaire(&QUESTIONNAIRE_SAMPLES[0].1).unwrap();
        assert_eq!(low.score, 4);
        assert_eq!(low.severity, MentalHealthSeverity::Minimal);

        let high = score_questionnaire(&QUESTIONNAIRE_SAMPLES[1].1).unwrap();
        assert_eq!(high.score, 19);
        assert_eq!(high.severity, MentalHealthSeverity::ModeratelySevere);
    }

    #[test]
    fn test_scenario_runs() {
        run_scenario().unwrap();
    }
}

//! # wardsafe-assess
//!
//! Self-assessment calculators: BMI with ideal weight range, health-record
//! BMI derivation and recent-record listing, and the ten-item mental-health questionnaire.
//!
//! Both calculators are pure functions; they only fail on malformed input.

pub mod bmi;
pub mod questionnaire;

pub use bmi::{
    assess_bmi, recent_health_records, BmiAssessment, BmiCategory, HealthRecord, Vitals,
    WeightRange, RECENT_RECORD_LIMIT,
};
pub use questionnaire::{
    score_questionnaire, MentalHealthAssessment, MentalHealthSeverity, Urgency, ANSWER_OPTIONS,
    QUESTIONS,
};

// ── Tests ─────────────────────────────────────────────────────────────────────

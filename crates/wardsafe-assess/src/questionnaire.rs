//! Ten-item mental-health screening questionnaire.
//!
//! Each answer is scored 0..=3 and the total (0..=30) falls into one of five
//! severity bands, each carrying an urgency and a fixed set of
//! recommendations. This is a screening aid, not a diagnosis.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use wardsafe_contracts::error::{WardError, WardResult};

/// The screening questions, in the order answers are expected.
pub const QUESTIONS: [&str; 10] = [
    "Over the last 2 weeks, how often have you felt down, depressed, or hopeless?",
    "How often have you had little interest or pleasure in doing things?",
    "How often have you felt nervous, anxious, or on edge?",
    "How often have you been unable to stop or control worrying?",
    "How often have you had trouble falling or staying asleep?",
    "How often have you felt tired or had little energy?",
    "How often have you had poor appetite or overeating?",
    "How often have you had trouble concentrating on things?",
    "How often have you felt bad about yourself or that you're a failure?",
    "How often have you had thoughts of hurting yourself?",
];

/// Answer labels indexed by score.
pub const ANSWER_OPTIONS: [&str; 4] = [
    "Not at all",
    "Several days",
    "More than half the days",
    "Nearly every day",
];

pub const MAX_ANSWER: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentalHealthSeverity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Urgent,
}

impl MentalHealthSeverity {
    /// Band a total score.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=4 => MentalHealthSeverity::Minimal,
            5..=9 => MentalHealthSeverity::Mild,
            10..=14 => MentalHealthSeverity::Moderate,
            15..=19 => MentalHealthSeverity::ModeratelySevere,
            _ => MentalHealthSeverity::Severe,
        }
    }

    pub fn urgency(&self) -> Urgency {
        match self {
            MentalHealthSeverity::Minimal | MentalHealthSeverity::Mild => Urgency::Low,
            MentalHealthSeverity::Moderate => Urgency::Medium,
            MentalHealthSeverity::ModeratelySevere => Urgency::High,
            MentalHealthSeverity::Severe => Urgency::Urgent,
        }
    }

    pub fn recommendations(&self) -> [&'static str; 4] {
        match self {
            MentalHealthSeverity::Minimal => [
                "Continue maintaining good mental health habits",
                "Regular exercise and healthy sleep schedule",
                "Stay connected with friends and family",
                "Practice mindfulness or meditation",
            ],
            MentalHealthSeverity::Mild => [
                "Consider stress management techniques",
                "Maintain regular sleep and exercise routines",
                "Talk to trusted friends or family",
                "Consider counseling if symptoms persist",
            ],
            MentalHealthSeverity::Moderate => [
                "Strongly consider professional counseling",
                "Speak with your primary care doctor",
                "Implement stress reduction strategies",
                "Avoid alcohol and substance use",
            ],
            MentalHealthSeverity::ModeratelySevere => [
                "Seek professional help immediately",
                "Contact a mental health professional",
                "Consider medication evaluation",
                "Reach out to support systems",
            ],
            MentalHealthSeverity::Severe => [
                "Seek immediate professional help",
                "Contact emergency services if needed",
                "Reach out to crisis hotlines",
                "Don't wait - get help today",
            ],
        }
    }
}

impl fmt::Display for MentalHealthSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MentalHealthSeverity::Minimal => "Minimal",
            MentalHealthSeverity::Mild => "Mild",
            MentalHealthSeverity::Moderate => "Moderate",
            MentalHealthSeverity::ModeratelySevere => "Moderately Severe",
            MentalHealthSeverity::Severe => "Severe",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalHealthAssessment {
    /// Sum of all answers, 0..=30.
    pub score: u8,
    pub severity: MentalHealthSeverity,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
}

/// Score a completed questionnaire.
///
/// # Errors
///
/// `InvalidAnswer` unless exactly one answer per question is given and every
/// answer is within 0..=3.
pub fn score_questionnaire(answers: &[u8]) -> WardResult<MentalHealthAssessment> {
    if answers.len() != QUESTIONS.len() {
        return Err(WardError::InvalidAnswer {
            reason: format!(
                "expected {} answers, got {}",
                QUESTIONS.len(),
                answers.len()
            ),
        });
    }
    if let Some((index, value)) = answers
        .iter()
        .enumerate()
        .find(|(_, value)| **value > MAX_ANSWER)
    {
        return Err(WardError::InvalidAnswer {
            reason: format!(
                "answer {} is {}; answers range from 0 to {}",
                index + 1,
                value,
                MAX_ANSWER
            ),
        });
    }

    let score: u8 = answers.iter().sum();
    let severity = MentalHealthSeverity::from_score(score);

    debug!(score, severity = %severity, "scored questionnaire");

    Ok(MentalHealthAssessment {
        score,
        severity,
        urgency: severity.urgency(),
        recommendations: severity.recommendations().iter().map(|r| r.to_string()).collect(),
    })
}

//! Ward patient, medication and symptom types.
//!
//! These are the inputs to the adverse event checkers. They carry more
//! clinical detail than the checkers read; only `Medication::name`,
//! `Medication::status` and `Symptom::description` drive rule matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a prescribed medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationStatus {
    Active,
    Discontinued,
    Pending,
}

/// One medication on a patient's chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    /// Free-text name as charted, e.g. "Furosemide 40mg".
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub route: String,
    pub status: MedicationStatus,
}

impl Medication {
    /// Only active medications participate in rule matching.
    pub fn is_active(&self) -> bool {
        self.status == MedicationStatus::Active
    }
}

/// A symptom recorded against a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    /// Free-text description, e.g. "Skin rash on forearms".
    pub description: String,
    /// Clinician-assigned severity score.
    pub severity: u8,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A ward patient as seen by the adverse event monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
}

impl Patient {
    /// Iterate over the medications that are currently active.
    pub fn active_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter().filter(|m| m.is_active())
    }
}

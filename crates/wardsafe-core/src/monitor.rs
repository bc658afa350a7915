//! The adverse event monitor.
//!
//! Runs whenever a patient's chart changes:
//!
//!   Patient → active medications → Detector (interactions, then reactions) → AlertSink
//!
//! The detector stays pure; the only side effect of a scan is one
//! `AlertSink::notify` call per detected event.

use std::sync::Arc;

use tracing::{debug, info};

use wardsafe_contracts::{alert::AdverseEvent, error::WardResult, patient::Patient};

use crate::traits::{AdverseEventDetector, AlertSink};

/// Scans patients against a shared rule engine and forwards every match.
pub struct AdverseEventMonitor {
    detector: Arc<dyn AdverseEventDetector>,
    sink: Box<dyn AlertSink>,
}

impl AdverseEventMonitor {
    pub fn new(detector: Arc<dyn AdverseEventDetector>, sink: Box<dyn AlertSink>) -> Self {
        Self { detector, sink }
    }

    /// Run both checkers over `patient` and notify the sink once per event.
    ///
    /// Discontinued and pending medications are ignored. Interaction matches
    /// come first (rule table order), then reaction matches. Returns the
    /// events in delivery order.
    ///
    /// # Errors
    ///
    /// Propagates the first `AlertSink::notify` failure; events after it are
    /// not delivered.
    pub fn scan(&self, patient: &Patient) -> WardResult<Vec<AdverseEvent>> {
        let medications: Vec<&str> = patient
            .active_medications()
            .map(|m| m.name.as_str())
            .collect();
        let symptoms: Vec<&str> = patient
            .symptoms
            .iter()
            .map(|s| s.description.as_str())
            .collect();

        debug!(
            patient_id = %patient.id,
            active_medications = medications.len(),
            symptoms = symptoms.len(),
            "scanning patient for adverse events"
        );

        let events: Vec<AdverseEvent> = self
            .detector
            .interactions(&medications)
            .into_iter()
            .map(AdverseEvent::from)
            .chain(
                self.detector
                    .reactions(&medications, &symptoms)
                    .into_iter()
                    .map(AdverseEvent::from),
            )
            .collect();

        for event in &events {
            self.sink.notify(&patient.id, event)?;
        }

        if !events.is_empty() {
            info!(
                patient_id = %patient.id,
                event_count = events.len(),
                "adverse events raised"
            );
        }

        Ok(events)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

//! Scenario 1: Ward Adverse Event Scan
//!
//! Runs the adverse event monitor over every patient on the mock ward and
//! prints the interaction and reaction alerts it raises.
//!
//! Walk-through for the demo run:
//!   1. Rule table is loaded (built-in, or a `--rules` override)
//!   2. Each patient's active medications are checked pairwise by rule
//!   3. Each active medication is checked against each recorded symptom
//!   4. Every match is logged, collected and printed

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use wardsafe_contracts::{alert::AdverseEvent, error::WardResult};
use wardsafe_core::{
    sink::{FanOutAlertSink, InMemoryAlertSink, TracingAlertSink},
    traits::AlertSink,
    AdverseEventMonitor,
};
use wardsafe_rules::RuleTable;

use crate::mock_data::ward_patients;

/// Events raised for one ward patient.
#[derive(Debug, Clone, Serialize)]
pub struct PatientScan {
    pub patient_id: String,
    pub patient_name: String,
    pub events: Vec<AdverseEvent>,
}

/// Scan every mock ward patient, delivering alerts to `sink`.
pub fn scan_ward(table: Arc<RuleTable>, sink: Box<dyn AlertSink>) -> WardResult<Vec<PatientScan>> {
    let monitor = AdverseEventMonitor::new(table, sink);

    ward_patients()?
        .into_iter()
        .map(|patient| {
            let events = monitor.scan(&patient)?;
            info!(patient_id = %patient.id, alerts = events.len(), "ward patient scanned");
            Ok(PatientScan {
                patient_id: patient.id,
                patient_name: patient.name,
                events,
            })
        })
        .collect()
}

/// Run Scenario 1 against `table`.
pub fn run_scenario(table: Arc<RuleTable>) -> WardResult<()> {
    println!("=== Scenario 1: Ward Adverse Event Scan ===");
    println!();
    println!(
        "  Rule table: {} interaction rule(s), {} reaction rule(s), match mode {:?}",
        table.interaction_rules().len(),
        table.reaction_rules().len(),
        table.match_mode()
    );
    println!();

    // Alerts go to the log and to a buffer we keep a handle on for counting.
    let sink = InMemoryAlertSink::new();
    let fan_out = FanOutAlertSink::default()
        .with(Box::new(TracingAlertSink))
        .with(Box::new(sink.clone()));
    let scans = scan_ward(table, Box::new(fan_out))?;

    for scan in &scans {
        println!("  Patient {} ({})", scan.patient_id, scan.patient_name);
        if scan.events.is_empty() {
            println!("    no alerts");
        }
        for event in &scan.events {
            println!(
                "    [{:<6}] {}: {}",
                event.severity().to_string().to_uppercase(),
                event.title(),
                event.description()
            );
        }
    }

    println!();
    println!("  Alerts delivered:       {}", sink.len()?);
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wardsafe_contracts::alert::Severity;

    fn scan_builtin() -> (Vec<PatientScan>, InMemoryAlertSink) {
        let sink = InMemoryAlertSink::new();
        let scans = scan_ward(Arc::new(RuleTable::builtin().unwrap()), Box::new(sink.clone())).unwrap();
        (scans, sink)
    }

    fn rule_ids(scan: &PatientScan) -> Vec<&str> {
        scan.events.iter().map(|e| e.rule_id()).collect()
    }

    #[test]
    fn test_mock_ward_parses() {
        let patients = ward_patients().unwrap();
        assert_eq!(patients.len(), 5);
        assert_eq!(patients[3].active_medications().count(), 1);
    }

    #[test]
    fn test_ward_scan_raises_expected_alerts() {
        let (scans, sink) = scan_builtin();

        assert_eq!(rule_ids(&scans[0]), vec!["amoxicillin-paracetamol"]);
        assert_eq!(rule_ids(&scans[1]), vec!["furosemide-lisinopril"]);
        assert_eq!(rule_ids(&scans[2]), vec!["tramadol-cefazolin", "tramadol-nausea"]);
        assert!(scans[3].events.is_empty());
        assert_eq!(rule_ids(&scans[4]), vec!["amoxicillin-rash"]);

        assert_eq!(scans[1].events[0].severity(), Severity::High);
        assert_eq!(sink.len().unwrap(), 5);
    }

    #[test]
    fn test_alerts_are_attributed_to_patients() {
        let (_, sink) = scan_builtin();
        let raised = sink.raised().unwrap();

        assert!(raised.iter().all(|alert| !alert.patient_id.is_empty()));
        assert_eq!(raised.last().map(|a| a.patient_id.as_str()), Some("5"));
    }

    #[test]
    fn test_scenario_runs_with_builtin_table() {
        run_scenario(Arc::new(RuleTable::builtin().unwrap())).unwrap();
    }
}

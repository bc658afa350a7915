//! Reference `AlertSink` implementations.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use wardsafe_contracts::{
    alert::AdverseEvent,
    error::{WardError, WardResult},
};

use crate::traits::AlertSink;

/// Emits one structured `warn!` per adverse event.
#[derive(Debug, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn notify(&self, patient_id: &str, event: &AdverseEvent) -> WardResult<()> {
        warn!(
            patient_id = %patient_id,
            rule_id = %event.rule_id(),
            severity = %event.severity(),
            title = event.title(),
            "{}",
            event.description()
        );
        Ok(())
    }
}

/// One event as delivered to an `InMemoryAlertSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaisedAlert {
    pub patient_id: String,
    pub event: AdverseEvent,
}

/// Collects delivered alerts in memory, in delivery order.
///
/// Cloning shares the underlying buffer, so a test or demo can keep a handle
/// after boxing the sink into a monitor.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAlertSink {
    raised: Arc<Mutex<Vec<RaisedAlert>>>,
}

impl InMemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every alert delivered so far.
    pub fn raised(&self) -> WardResult<Vec<RaisedAlert>> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> WardResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> WardResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> WardResult<MutexGuard<'_, Vec<RaisedAlert>>> {
        self.raised.lock().map_err(|e| WardError::AlertDeliveryFailed {
            reason: format!("alert buffer lock poisoned: {}", e),
        })
    }
}

impl AlertSink for InMemoryAlertSink {
    fn notify(&self, patient_id: &str, event: &AdverseEvent) -> WardResult<()> {
        self.lock()?.push(RaisedAlert {
            patient_id: patient_id.to_string(),
            event: event.clone(),
        });
        Ok(())
    }
}

/// Delivers every event to each inner sink in order.
///
/// Stops at the first sink that fails; later sinks do not see that event.
#[derive(Default)]
pub struct FanOutAlertSink {
    sinks: Vec<Box<dyn AlertSink>>,
}

impl FanOutAlertSink {
    pub fn new(sinks: Vec<Box<dyn AlertSink>>) -> Self {
        Self { sinks }
    }

    pub fn with(mut self, sink: Box<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl AlertSink for FanOutAlertSink {
    fn notify(&self, patient_id: &str, event: &AdverseEvent) -> WardResult<()> {
        self.sinks
            .iter()
            .try_for_each(|sink| sink.notify(patient_id, event))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use wardsafe_contracts::alert::{InteractionMatch, ReactionMatch, Severity};

    use super::*;

    fn interaction() -> AdverseEvent {
        AdverseEvent::Interaction(InteractionMatch {
            rule_id: "furosemide-lisinopril".to_string(),
            drugs: vec!["furosemide".to_string(), "lisinopril".to_string()],
            severity: Severity::High,
            description: "May cause excessive blood pressure reduction".to_string(),
        })
    }

    fn reaction() -> AdverseEvent {
        AdverseEvent::Reaction(ReactionMatch {
            rule_id: "tramadol-nausea".to_string(),
            medication: "Tramadol".to_string(),
            symptom: "Nausea".to_string(),
            severity: Severity::Medium,
            description: "Tramadol may cause Nausea: Common side effect".to_string(),
        })
    }

    struct FailingSink;

    impl AlertSink for FailingSink {
        fn notify(&self, _patient_id: &str, _event: &AdverseEvent) -> WardResult<()> {
            Err(WardError::AlertDeliveryFailed {
                reason: "pager offline".to_string(),
            })
        }
    }

    // ── 1. tracing sink ──────────────────────────────────────────────────────

    #[test]
    fn test_tracing_sink_accepts_both_event_kinds() {
        let sink = TracingAlertSink;
        assert!(sink.notify("3", &interaction()).is_ok());
        assert!(sink.notify("3", &reaction()).is_ok());
    }

    // ── 2. in-memory sink ────────────────────────────────────────────────────

    #[test]
    fn test_in_memory_sink_records_in_order() {
        let sink = InMemoryAlertSink::new();
        assert!(sink.is_empty().unwrap());

        sink.notify("1", &interaction()).unwrap();
        sink.notify("2", &reaction()).unwrap();

        let raised = sink.raised().unwrap();
        assert_eq!(sink.len().unwrap(), 2);
        assert_eq!(raised[0].patient_id, "1");
        assert_eq!(raised[1].event, reaction());
    }

    #[test]
    fn test_poisoned_buffer_is_reported() {
        let sink = InMemoryAlertSink::new();
        let handle = sink.clone();
        let _ = std::thread::spawn(move || {
            let _guard = handle.raised.lock().unwrap();
            panic!("poison the alert buffer");
        })
        .join();

        assert!(matches!(sink.len(), Err(WardError::AlertDeliveryFailed { .. })));
        assert!(matches!(sink.raised(), Err(WardError::AlertDeliveryFailed { .. })));
        assert!(sink.notify("1", &interaction()).is_err());
    }

    // ── 3. fan-out ───────────────────────────────────────────────────────────

    #[test]
    fn test_fan_out_delivers_to_every_sink() {
        let first = InMemoryAlertSink::new();
        let second = InMemoryAlertSink::new();
        let fan_out = FanOutAlertSink::default()
            .with(Box::new(TracingAlertSink))
            .with(Box::new(first.clone()))
            .with(Box::new(second.clone()));

        fan_out.notify("2", &interaction()).unwrap();

        assert_eq!(first.len().unwrap(), 1);
        assert_eq!(second.len().unwrap(), 1);
    }

    #[test]
    fn test_fan_out_stops_at_first_failure() {
        let after = InMemoryAlertSink::new();
        let fan_out = FanOutAlertSink::default()
            .with(Box::new(FailingSink))
            .with(Box::new(after.clone()));

        assert!(matches!(
            fan_out.notify("2", &interaction()),
            Err(WardError::AlertDeliveryFailed { .. })
        ));
        assert!(after.is_empty().unwrap());
    }
}

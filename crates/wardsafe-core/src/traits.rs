//! Core trait definitions for WardSafe.
//!
//! These three traits are the seams between the pure clinical logic and the
//! collaborators around it:
//!
//! - `AdverseEventDetector`: the rule engine (pure, no side effects)
//! - `AlertSink`: where detected events are surfaced to clinicians
//! - `AppointmentStore`: persistence for bookings
//!
//! The monitor and the booking service depend only on these traits, never
//! on a concrete rule table or store.

use wardsafe_contracts::{
    alert::{AdverseEvent, InteractionMatch, ReactionMatch},
    appointment::{Appointment, AppointmentId, AppointmentQuery, AppointmentStatus},
    error::WardResult,
};

/// A rule engine that flags adverse drug events for one patient.
///
/// Implementations must be pure: the same inputs always yield the same
/// matches in the same order, and nothing is cached between calls.
pub trait AdverseEventDetector: Send + Sync {
    /// Flag drug-drug interactions among the given active medication names.
    fn interactions(&self, medications: &[&str]) -> Vec<InteractionMatch>;

    /// Flag drug-symptom reactions over every (medication, symptom) pair.
    fn reactions(&self, medications: &[&str], symptoms: &[&str]) -> Vec<ReactionMatch>;
}

/// Receives every adverse event the monitor detects.
pub trait AlertSink: Send + Sync {
    /// Surface one event raised for `patient_id`.
    ///
    /// A failure aborts the scan that produced the event.
    fn notify(&self, patient_id: &str, event: &AdverseEvent) -> WardResult<()>;
}

/// Appointment persistence.
///
/// Implementations must make `insert_if_free` and `set_status` atomic with
/// respect to the uniqueness invariant: at most one `Scheduled` appointment
/// per (doctor, date, time). Two concurrent bookings of the same slot must
/// produce exactly one success.
pub trait AppointmentStore: Send + Sync {
    /// Return every appointment matching `query`, in storage order.
    fn find(&self, query: &AppointmentQuery) -> WardResult<Vec<Appointment>>;

    /// Fetch one appointment by id.
    fn get(&self, id: AppointmentId) -> WardResult<Option<Appointment>>;

    /// Insert `appointment` unless another scheduled appointment already
    /// holds its (doctor, date, time). Returns `SlotUnavailable` on conflict.
    fn insert_if_free(&self, appointment: Appointment) -> WardResult<Appointment>;

    /// Change the status of an existing appointment and return the updated
    /// record. Moving to `Scheduled` re-checks the slot atomically.
    fn set_status(&self, id: AppointmentId, status: AppointmentStatus) -> WardResult<Appointment>;
}

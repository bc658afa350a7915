//! Clinic reference runtime demo scenarios.
//!
//! Each scenario wires real WardSafe components (rule table, monitor,
//! booking service, calculators) to the fictional data in `mock_data`.

pub mod adverse_events;
pub mod assessments;
pub mod booking;

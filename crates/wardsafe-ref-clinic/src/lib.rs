//! # wardsafe-ref-clinic
//!
//! Clinic reference runtime for WardSafe.
//!
//! Demonstrates three scenarios using mock data:
//!
//! 1. **Ward Adverse Event Scan**: the monitor runs every ward patient
//!    through the rule table and delivers interaction and reaction alerts.
//! 2. **Appointment Booking**: slot listing, a contended booking, a refused
//!    status change and a cancellation that frees the slot.
//! 3. **Self-Assessments**: BMI bands and questionnaire scoring.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod mock_data;
pub mod scenarios;

//! # wardsafe-core
//!
//! Seam traits and orchestration for the WardSafe clinical core.
//!
//! This crate provides:
//! - The three seam traits (`AdverseEventDetector`, `AlertSink`, `AppointmentStore`)
//! - The `AdverseEventMonitor` that wires a detector to an alert sink
//! - Reference sinks (`TracingAlertSink`, `InMemoryAlertSink`) and a
//!   `FanOutAlertSink` that delivers to several at once
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wardsafe_core::{AdverseEventMonitor, sink::TracingAlertSink};
//!
//! let monitor = AdverseEventMonitor::new(Arc::new(rule_table), Box::new(TracingAlertSink));
//! let events = monitor.scan(&patient)?;
//! ```

pub mod monitor;
pub mod sink;
pub mod traits;

pub use monitor::AdverseEventMonitor;

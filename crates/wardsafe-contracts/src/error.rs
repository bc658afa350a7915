//! Error types for the WardSafe core.
//!
//! The rule checkers and the slot allocator are infallible. Everything that
//! wraps them (booking, configuration loading, alert delivery, assessment
//! input validation) returns `WardResult<T>`.

use thiserror::Error;

/// The unified error type for the WardSafe crates.
#[derive(Debug, Error)]
pub enum WardError {
    /// A caller omitted a field the operation cannot run without.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A time label was not a valid zero-padded `HH:MM` string.
    #[error("invalid time label '{label}': expected HH:MM")]
    InvalidTimeLabel { label: String },

    /// Another scheduled appointment already holds this (doctor, date, time).
    #[error("time slot {time} on {date} is not available for doctor '{doctor_id}'")]
    SlotUnavailable {
        doctor_id: String,
        date: String,
        time: String,
    },

    /// A requested time is a valid label but not on the clinic's slot grid.
    #[error("time {time} is not on the appointment slot grid")]
    SlotOutsideGrid { time: String },

    /// A status string was not one of scheduled, completed or cancelled.
    #[error("invalid appointment status '{status}'")]
    InvalidStatus { status: String },

    /// No appointment exists with the given id.
    #[error("appointment '{id}' not found")]
    AppointmentNotFound { id: String },

    /// The actor is neither an admin nor a participant of the appointment.
    #[error("user '{user_id}' is not authorized to {action}")]
    NotAuthorized { user_id: String, action: String },

    /// A body measurement was zero, negative, or not a finite number.
    #[error("invalid measurement: {reason}")]
    InvalidMeasurement { reason: String },

    /// A questionnaire answer set had the wrong length or an out-of-range value.
    #[error("invalid questionnaire answer: {reason}")]
    InvalidAnswer { reason: String },

    /// A rule table or schedule configuration is missing or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The appointment store could not complete a read or write.
    #[error("appointment store failure: {reason}")]
    StoreFailed { reason: String },

    /// An alert sink rejected a detected adverse event.
    #[error("alert delivery failed: {reason}")]
    AlertDeliveryFailed { reason: String },

    /// A result could not be rendered for output.
    #[error("serialization failed: {reason}")]
    SerializationFailed { reason: String },
}

/// Convenience alias used throughout the WardSafe crates.
pub type WardResult<T> = Result<T, WardError>;

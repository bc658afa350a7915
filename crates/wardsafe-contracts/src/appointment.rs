//! Appointment, time slot and booking actor types.
//!
//! Uniqueness invariant: at most one `Scheduled` appointment exists per
//! (doctor, date, time). Stores enforce it at write time; the slot allocator
//! only reads it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WardError, WardResult};

/// Identifier of a doctor (the clinician whose calendar is booked).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoctorId(pub String);

impl DoctorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Identifier of the patient an appointment is booked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

/// Unique identifier of a persisted appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentId(pub uuid::Uuid);

impl AppointmentId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A bookable grid label, always rendered as zero-padded `HH:MM`.
///
/// Serialized as the label string so it round-trips through JSON and TOML
/// exactly as the REST surface exposed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Build a slot from a wall-clock time. Seconds are discarded.
    pub fn from_time(time: NaiveTime) -> Self {
        let minute_only = time.with_second(0).and_then(|t| t.with_nanosecond(0));
        Self(minute_only.unwrap_or(time))
    }

    /// Parse a strict `HH:MM` label. `9:30` and `09:30:00` are rejected.
    pub fn parse(label: &str) -> WardResult<Self> {
        let bytes = label.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(WardError::InvalidTimeLabel {
                label: label.to_string(),
            });
        }
        NaiveTime::parse_from_str(label, "%H:%M")
            .map(Self)
            .map_err(|_| WardError::InvalidTimeLabel {
                label: label.to_string(),
            })
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn label(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for TimeSlot {
    type Err = WardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = WardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.label()
    }
}

/// Where an appointment takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentKind {
    #[default]
    Virtual,
    InPerson,
}

impl fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentKind::Virtual => f.write_str("virtual"),
            AppointmentKind::InPerson => f.write_str("in-person"),
        }
    }
}

/// Appointment lifecycle. Only `Scheduled` blocks a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

impl FromStr for AppointmentStatus {
    type Err = WardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(WardError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// A persisted appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// True when this appointment blocks `time` on `date` for `doctor`.
    pub fn occupies(&self, doctor: &DoctorId, date: NaiveDate, time: TimeSlot) -> bool {
        self.status == AppointmentStatus::Scheduled
            && &self.doctor_id == doctor
            && self.date == date
            && self.time == time
    }
}

/// A booking request as received from a caller, before validation.
///
/// `date` and `time` are optional so that a request missing either is
/// rejected with `MissingField` rather than failing to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    pub doctor_id: String,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    #[serde(default)]
    pub kind: AppointmentKind,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

/// An already-authenticated caller of a booking operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn patient(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), role: Role::Patient }
    }

    pub fn doctor(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), role: Role::Doctor }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), role: Role::Admin }
    }

    /// Admins, the booked patient and the booked doctor may change an appointment.
    pub fn may_modify(&self, appointment: &Appointment) -> bool {
        self.role == Role::Admin
            || appointment.patient_id.0 == self.user_id
            || appointment.doctor_id.0 == self.user_id
    }
}

/// Caller-facing listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

/// Store-facing query: a filter plus the participant scope of the caller.
#[derive(Debug, Clone, Default)]
pub struct AppointmentQuery {
    pub patient_id: Option<PatientId>,
    pub doctor_id: Option<DoctorId>,
    /// Inclusive range; ignored unless both ends are set.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentQuery {
    /// All appointments a doctor holds on one day, any status.
    pub fn doctor_day(doctor: &DoctorId, date: NaiveDate) -> Self {
        Self {
            doctor_id: Some(doctor.clone()),
            date_range: Some((date, date)),
            ..Self::default()
        }
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(patient) = &self.patient_id {
            if &appointment.patient_id != patient {
                return false;
            }
        }
        if let Some(doctor) = &self.doctor_id {
            if &appointment.doctor_id != doctor {
                return false;
            }
        }
        if let Some((from, to)) = self.date_range {
            if appointment.date < from || appointment.date > to {
                return false;
            }
        }
        if let Some(status) = self.status {
            if appointment.status != status {
                return false;
            }
        }
        true
    }
}

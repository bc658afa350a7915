//! Simulated ward and clinic data for the WardSafe reference runtime.
//!
//! All data in this module is hardcoded and fictional. It stands in for the
//! patient chart and appointment database of a real deployment.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

use wardsafe_contracts::{
    appointment::{Appointment, AppointmentId, AppointmentKind, AppointmentStatus, DoctorId, PatientId, TimeSlot},
    error::{WardError, WardResult},
    patient::Patient,
};

/// The clinic day every mock appointment falls on.
pub fn clinic_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 11).unwrap_or_default()
}

// ── Ward patients (mock) ──────────────────────────────────────────────────────

/// Raw ward chart as JSON, the shape an EHR export would hand us.
///
/// - Ward 1: amoxicillin + paracetamol, respiratory symptoms
/// - Ward 2: furosemide + lisinopril, heart-failure symptoms
/// - Ward 3: cefazolin + tramadol post-op, with nausea
/// - Ward 4: insulin (discontinued) + metformin, fatigue
/// - Ward 5: amoxicillin with a new skin rash
pub fn ward_chart() -> Value {
    json!([
        {
            "id": "1",
            "name": "A. Moreno",
            "medications": [
                { "id": "m1", "name": "Amoxicillin", "dosage": "500mg", "frequency": "TID", "route": "Oral", "status": "active" },
                { "id": "m2", "name": "Paracetamol", "dosage": "1g", "frequency": "PRN", "route": "Oral", "status": "active" }
            ],
            "symptoms": [
                { "id": "s1", "description": "Cough", "severity": 3, "recorded_at": "2025-04-11T08:00:00Z" },
                { "id": "s2", "description": "Chest pain", "severity": 2, "recorded_at": "2025-04-11T08:00:00Z" }
            ]
        },
        {
            "id": "2",
            "name": "B. Okafor",
            "medications": [
                { "id": "m3", "name": "Furosemide", "dosage": "40mg", "frequency": "BID", "route": "Oral", "status": "active" },
                { "id": "m4", "name": "Lisinopril", "dosage": "10mg", "frequency": "Daily", "route": "Oral", "status": "active" }
            ],
            "symptoms": [
                { "id": "s3", "description": "Shortness of breath", "severity": 2, "recorded_at": "2025-04-11T09:00:00Z" },
                { "id": "s4", "description": "Leg edema", "severity": 2, "recorded_at": "2025-04-11T09:00:00Z" }
            ]
        },
        {
            "id": "3",
            "name": "C. Lindqvist",
            "medications": [
                { "id": "m5", "name": "Cefazolin", "dosage": "1g", "frequency": "TID", "route": "IV", "status": "active" },
                { "id": "m6", "name": "Tramadol", "dosage": "50mg", "frequency": "Q6H PRN", "route": "Oral", "status": "active" }
            ],
            "symptoms": [
                { "id": "s5", "description": "Incisional pain", "severity": 4, "recorded_at": "2025-04-11T09:30:00Z" },
                { "id": "s6", "description": "Nausea", "severity": 1, "recorded_at": "2025-04-11T09:30:00Z", "notes": "After morning dose" }
            ]
        },
        {
            "id": "4",
            "name": "D. Haddad",
            "medications": [
                { "id": "m7", "name": "Regular Insulin", "dosage": "Per protocol", "frequency": "Continuous infusion", "route": "IV", "status": "discontinued" },
                { "id": "m8", "name": "Metformin", "dosage": "1000mg", "frequency": "BID", "route": "Oral", "status": "active" }
            ],
            "symptoms": [
                { "id": "s7", "description": "Fatigue", "severity": 2, "recorded_at": "2025-04-11T10:00:00Z" }
            ]
        },
        {
            "id": "5",
            "name": "E. Tanaka",
            "medications": [
                { "id": "m9", "name": "Amoxicillin 500mg", "dosage": "500mg", "frequency": "TID", "route": "Oral", "status": "active" }
            ],
            "symptoms": [
                { "id": "s8", "description": "Skin rash on forearms", "severity": 2, "recorded_at": "2025-04-11T10:30:00Z" }
            ]
        }
    ])
}

/// Parse [`ward_chart`] into typed patients.
pub fn ward_patients() -> WardResult<Vec<Patient>> {
    serde_json::from_value(ward_chart()).map_err(|e| WardError::ConfigError {
        reason: format!("failed to parse mock ward chart: {}", e),
    })
}

// ── Clinic calendar (mock) ────────────────────────────────────────────────────

/// Doctors on the clinic roster as `(id, display name)`.
pub const DOCTORS: [(&str, &str); 2] = [("D1", "Dr. R. Iyer"), ("D2", "Dr. S. Brandt")];

/// Appointments already on the calendar for [`clinic_day`].
///
/// D1 holds 09:30 (scheduled) and 11:00 (cancelled, so free again); D2 holds
/// 14:00.
pub fn booked_appointments() -> WardResult<Vec<Appointment>> {
    let seed = [
        ("P1", "D1", "09:30", AppointmentStatus::Scheduled, AppointmentKind::InPerson),
        ("P2", "D1", "11:00", AppointmentStatus::Cancelled, AppointmentKind::Virtual),
        ("P3", "D2", "14:00", AppointmentStatus::Scheduled, AppointmentKind::Virtual),
    ];
    let created_at: DateTime<Utc> = clinic_day()
        .and_hms_opt(7, 0, 0)
        .unwrap_or_default()
        .and_utc();

    seed.into_iter()
        .map(|(patient, doctor, time, status, kind)| {
            Ok(Appointment {
                id: AppointmentId::new(),
                patient_id: PatientId(patient.to_string()),
                doctor_id: DoctorId::new(doctor),
                date: clinic_day(),
                time: TimeSlot::parse(time)?,
                kind,
                status,
                symptoms: None,
                notes: None,
                created_at,
            })
        })
        .collect()
}

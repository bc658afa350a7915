//! Scenario 2: Appointment Booking
//!
//! Walks the booking service through the clinic day seeded in `mock_data`:
//!   1. List D1's open slots (09:30 is taken, the cancelled 11:00 is free)
//!   2. A patient books D1's first open slot, then a second patient tries it
//!   3. A stranger tries to cancel the booking and is refused
//!   4. The patient cancels; the slot reappears
//!   5. The admin view lists the day in (date, time) order

use wardsafe_contracts::{
    appointment::{Actor, AppointmentFilter, AppointmentKind, AppointmentStatus, BookingRequest},
    error::{WardError, WardResult},
};
use wardsafe_schedule::{BookingService, InMemoryAppointmentStore, SlotGrid};

use crate::mock_data::{booked_appointments, clinic_day, DOCTORS};

/// A booking service over the mock calendar and the given grid.
pub fn clinic_service(grid: SlotGrid) -> WardResult<BookingService> {
    let store = InMemoryAppointmentStore::with_appointments(booked_appointments()?);
    Ok(BookingService::new(Box::new(store), grid))
}

fn slot_line(service: &BookingService, doctor_id: &str) -> WardResult<String> {
    let open = service.available_slots(doctor_id, Some(clinic_day()))?;
    Ok(format!(
        "{} open: {}",
        open.len(),
        open.iter().map(|s| s.label()).collect::<Vec<_>>().join(" ")
    ))
}

/// Run Scenario 2 on `grid`.
pub fn run_scenario(grid: SlotGrid) -> WardResult<()> {
    println!("=== Scenario 2: Appointment Booking ===");
    println!();

    let service = clinic_service(grid)?;
    let day = clinic_day();

    println!(
        "  Clinic day: {} (grid {}-{} every {} min)",
        day,
        grid.start(),
        grid.end(),
        grid.interval_minutes()
    );
    for (id, name) in DOCTORS {
        println!("  {} {:<14} {}", id, name, slot_line(&service, id)?);
    }
    println!();

    // ── Book and contend ──────────────────────────────────────────────────────

    let target = service
        .available_slots("D1", Some(day))?
        .first()
        .copied()
        .ok_or_else(|| WardError::SlotUnavailable {
            doctor_id: "D1".to_string(),
            date: day.to_string(),
            time: "any".to_string(),
        })?;

    let patient = Actor::patient("P4");
    let request = BookingRequest {
        doctor_id: "D1".to_string(),
        date: Some(day),
        time: Some(target.label()),
        kind: AppointmentKind::InPerson,
        symptoms: Some("Follow-up on blood pressure".to_string()),
        notes: None,
    };

    let booked = service.book(&patient, request.clone())?;
    println!("  P4 books D1 at {}:       OK ({})", target, booked.id);

    match service.book(&Actor::patient("P5"), request) {
        Err(e @ WardError::SlotUnavailable { .. }) => {
            println!("  P5 books D1 at {}:       REFUSED ({})", target, e)
        }
        Err(e) => return Err(e),
        Ok(appt) => {
            return Err(WardError::StoreFailed {
                reason: format!("slot {} on {} was booked twice ({})", target, day, appt.id),
            })
        }
    }

    // ── Authorization and cancellation ────────────────────────────────────────

    match service.update_status(&Actor::patient("P5"), booked.id, AppointmentStatus::Cancelled) {
        Err(e @ WardError::NotAuthorized { .. }) => println!("  P5 cancels P4's booking:    REFUSED ({})", e),
        Err(e) => return Err(e),
        Ok(_) => {
            return Err(WardError::StoreFailed {
                reason: format!("non-participant P5 changed appointment {}", booked.id),
            })
        }
    }

    service.update_status(&patient, booked.id, AppointmentStatus::Cancelled)?;
    println!("  P4 cancels own booking:     OK");
    println!("  D1 after cancellation:      {}", slot_line(&service, "D1")?);
    println!();

    // ── Admin view ────────────────────────────────────────────────────────────

    println!("  Admin view of {}:", day);
    let filter = AppointmentFilter {
        start_date: Some(day),
        end_date: Some(day),
        status: None,
    };
    for appt in service.list(&Actor::admin("clinic-admin"), &filter)? {
        println!(
            "    {} {} {} patient={} {}",
            appt.time, appt.doctor_id.0, appt.status, appt.patient_id.0, appt.kind
        );
    }

    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_calendar_blocks_only_scheduled() {
        let service = clinic_service(SlotGrid::default()).unwrap();

        let d1: Vec<String> = service
            .available_slots("D1", Some(clinic_day()))
            .unwrap()
            .iter()
            .map(|s| s.label())
            .collect();
        assert_eq!(d1.len(), 15);
        assert!(!d1.contains(&"09:30".to_string()));
        assert!(d1.contains(&"11:00".to_string()));

        assert_eq!(service.available_slots("D2", Some(clinic_day())).unwrap().len(), 15);
    }

    #[test]
    fn test_scenario_runs() {
        run_scenario(SlotGrid::default()).unwrap();
    }

    #[test]
    fn test_custom_grid_reaches_the_service() {
        let grid = SlotGrid::from_toml_str(
            r#"
            [schedule]
            start = "09:00"
            end = "10:00"
            interval_minutes = 15
            "#,
        )
        .unwrap();

        let service = clinic_service(grid).unwrap();
        let d1: Vec<String> = service
            .available_slots("D1", Some(clinic_day()))
            .unwrap()
            .iter()
            .map(|s| s.label())
            .collect();
        assert_eq!(d1, vec!["09:00", "09:15", "09:45"]);

        run_scenario(grid).unwrap();
    }

    /// A grid whose only slot is already taken leaves nothing to book.
    #[test]
    fn test_scenario_fails_when_no_slot_is_open() {
        let grid = SlotGrid::from_toml_str(
            "[schedule]\nstart = \"09:30\"\nend = \"10:00\"\ninterval_minutes = 30",
        )
        .unwrap();

        assert!(matches!(
            run_scenario(grid),
            Err(WardError::SlotUnavailable { .. })
        ));
    }
}

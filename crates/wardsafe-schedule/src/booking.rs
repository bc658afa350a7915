//! The booking service.
//!
//! `BookingService` is the write path the slot allocator is advisory to. It
//! validates caller input, scopes reads to the caller's role, and leaves the
//! uniqueness guarantee to the store's atomic operations.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use wardsafe_contracts::{
    appointment::{
        Actor, Appointment, AppointmentFilter, AppointmentId, AppointmentQuery, AppointmentStatus,
        BookingRequest, DoctorId, PatientId, Role, TimeSlot,
    },
    error::{WardError, WardResult},
};
use wardsafe_core::traits::AppointmentStore;

use crate::grid::{available_slots, SlotGrid};

/// Books, lists and transitions appointments against one store and one grid.
pub struct BookingService {
    store: Box<dyn AppointmentStore>,
    grid: SlotGrid,
}

impl BookingService {
    pub fn new(store: Box<dyn AppointmentStore>, grid: SlotGrid) -> Self {
        Self { store, grid }
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Open slots for `doctor_id` on `date`.
    ///
    /// A missing date is a caller error and is rejected before any lookup.
    /// The result is advisory: a slot listed here can still be lost to a
    /// concurrent booking.
    pub fn available_slots(&self, doctor_id: &str, date: Option<NaiveDate>) -> WardResult<Vec<TimeSlot>> {
        let date = date.ok_or_else(|| missing("date"))?;
        let doctor = DoctorId::new(doctor_id);

        let booked = self.store.find(&AppointmentQuery {
            status: Some(AppointmentStatus::Scheduled),
            ..AppointmentQuery::doctor_day(&doctor, date)
        })?;

        Ok(available_slots(&self.grid, &doctor, date, &booked))
    }

    /// Book an appointment for the calling user.
    ///
    /// # Errors
    ///
    /// - `MissingField` for a blank doctor id or an absent date or time
    /// - `InvalidTimeLabel` when the time is not `HH:MM`
    /// - `SlotOutsideGrid` when the time is not one of the grid's labels
    /// - `SlotUnavailable` when a scheduled appointment already holds the slot
    pub fn book(&self, actor: &Actor, request: BookingRequest) -> WardResult<Appointment> {
        if request.doctor_id.trim().is_empty() {
            return Err(missing("doctor_id"));
        }
        let date = request.date.ok_or_else(|| missing("date"))?;
        let label = request.time.as_deref().ok_or_else(|| missing("time"))?;
        let time = TimeSlot::parse(label)?;
        if !self.grid.contains(time) {
            return Err(WardError::SlotOutsideGrid { time: time.label() });
        }

        let appointment = Appointment {
            id: AppointmentId::new(),
            patient_id: PatientId(actor.user_id.clone()),
            doctor_id: DoctorId::new(request.doctor_id),
            date,
            time,
            kind: request.kind,
            status: AppointmentStatus::Scheduled,
            symptoms: request.symptoms,
            notes: request.notes,
            created_at: Utc::now(),
        };

        debug!(
            user_id = %actor.user_id,
            doctor_id = %appointment.doctor_id.0,
            date = %date,
            time = %time,
            "booking appointment"
        );

        self.store.insert_if_free(appointment)
    }

    /// Change an appointment's status on behalf of `actor`.
    ///
    /// Only admins and the appointment's own patient or doctor may do this.
    pub fn update_status(
        &self,
        actor: &Actor,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> WardResult<Appointment> {
        let appointment = self
            .store
            .get(id)?
            .ok_or_else(|| WardError::AppointmentNotFound { id: id.to_string() })?;

        if !actor.may_modify(&appointment) {
            warn!(
                user_id = %actor.user_id,
                appointment_id = %id,
                "status change refused: caller is not a participant"
            );
            return Err(WardError::NotAuthorized {
                user_id: actor.user_id.clone(),
                action: format!("update the status of appointment '{}'", id),
            });
        }

        self.store.set_status(id, status)
    }

    /// List the appointments visible to `actor`, ordered by date then time.
    ///
    /// Patients see their own bookings, doctors their own calendar, admins
    /// everything. The date range applies only when both ends are given.
    pub fn list(&self, actor: &Actor, filter: &AppointmentFilter) -> WardResult<Vec<Appointment>> {
        let mut query = AppointmentQuery {
            status: filter.status,
            date_range: filter.start_date.zip(filter.end_date),
            ..AppointmentQuery::default()
        };
        match actor.role {
            Role::Patient => query.patient_id = Some(PatientId(actor.user_id.clone())),
            Role::Doctor => query.doctor_id = Some(DoctorId::new(actor.user_id.as_str())),
            Role::Admin => {}
        }

        let mut appointments = self.store.find(&query)?;
        appointments.sort_by_key(|a| (a.date, a.time));
        Ok(appointments)
    }
}

fn missing(field: &str) -> WardError {
    WardError::MissingField {
        field: field.to_string(),
    }
}

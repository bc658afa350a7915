//! In-memory implementation of `AppointmentStore`.
//!
//! All appointments live in one `Vec` behind one `Mutex`. Every write takes
//! the lock once and performs its uniqueness check and its mutation under
//! that single guard, which is what makes `insert_if_free` and `set_status`
//! atomic: two threads racing for the same slot cannot both observe it free.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use wardsafe_contracts::{
    appointment::{Appointment, AppointmentId, AppointmentQuery, AppointmentStatus},
    error::{WardError, WardResult},
};
use wardsafe_core::traits::AppointmentStore;

/// An in-memory appointment store.
///
/// Clones share the same underlying appointments, so a demo can keep a
/// handle after boxing the store into a `BookingService`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointmentStore {
    pub(crate) appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing appointments, bypassing the uniqueness
    /// check. Intended for fixtures.
    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Arc::new(Mutex::new(appointments)),
        }
    }

    /// Number of stored appointments, any status.
    pub fn len(&self) -> WardResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> WardResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> WardResult<MutexGuard<'_, Vec<Appointment>>> {
        self.appointments.lock().map_err(|e| WardError::StoreFailed {
            reason: format!("appointment store lock poisoned: {}", e),
        })
    }
}

fn conflict(appointment: &Appointment) -> WardError {
    WardError::SlotUnavailable {
        doctor_id: appointment.doctor_id.0.clone(),
        date: appointment.date.to_string(),
        time: appointment.time.label(),
    }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn find(&self, query: &AppointmentQuery) -> WardResult<Vec<Appointment>> {
        let appointments = self.lock()?;
        Ok(appointments.iter().filter(|a| query.matches(a)).cloned().collect())
    }

    fn get(&self, id: AppointmentId) -> WardResult<Option<Appointment>> {
        let appointments = self.lock()?;
        Ok(appointments.iter().find(|a| a.id == id).cloned())
    }

    fn insert_if_free(&self, appointment: Appointment) -> WardResult<Appointment> {
        let mut appointments = self.lock()?;

        let taken = appointments
            .iter()
            .any(|a| a.occupies(&appointment.doctor_id, appointment.date, appointment.time));
        if taken && appointment.status == AppointmentStatus::Scheduled {
            debug!(
                doctor_id = %appointment.doctor_id.0,
                date = %appointment.date,
                time = %appointment.time,
                "slot already held by a scheduled appointment"
            );
            return Err(conflict(&appointment));
        }

        info!(
            appointment_id = %appointment.id,
            doctor_id = %appointment.doctor_id.0,
            date = %appointment.date,
            time = %appointment.time,
            "appointment stored"
        );
        appointments.push(appointment.clone());
        Ok(appointment)
    }

    fn set_status(&self, id: AppointmentId, status: AppointmentStatus) -> WardResult<Appointment> {
        let mut appointments = self.lock()?;

        let index = appointments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| WardError::AppointmentNotFound { id: id.to_string() })?;

        if status == AppointmentStatus::Scheduled {
            let target = &appointments[index];
            let taken = appointments.iter().any(|other| {
                other.id != id && other.occupies(&target.doctor_id, target.date, target.time)
            });
            if taken {
                return Err(conflict(target));
            }
        }

        let appointment = &mut appointments[index];
        let previous = appointment.status;
        appointment.status = status;

        info!(
            appointment_id = %id,
            from = %previous,
            to = %status,
            "appointment status changed"
        );

        Ok(appointment.clone())
    }
}

//! Slot grid configuration and the Slot Allocator.
//!
//! A `SlotGrid` describes one working day: labels from `start` (inclusive)
//! to `end` (exclusive) every `interval_minutes`. The allocator removes the
//! labels held by scheduled appointments and returns the rest in grid order.

use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use wardsafe_contracts::{
    appointment::{Appointment, DoctorId, TimeSlot},
    error::{WardError, WardResult},
};

/// The fixed bookable grid for a clinician's working day.
///
/// Example in TOML:
/// ```toml
/// [schedule]
/// start = "09:00"
/// end = "17:00"
/// interval_minutes = 30
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotGrid {
    start: TimeSlot,
    end: TimeSlot,
    interval_minutes: u32,
}

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    schedule: ScheduleSection,
}

#[derive(Debug, Deserialize)]
struct ScheduleSection {
    start: TimeSlot,
    end: TimeSlot,
    interval_minutes: u32,
}

impl SlotGrid {
    /// Build a validated grid. The interval must be positive and the window
    /// non-empty.
    pub fn new(start: TimeSlot, end: TimeSlot, interval_minutes: u32) -> WardResult<Self> {
        if interval_minutes == 0 {
            return Err(WardError::ConfigError {
                reason: "slot interval must be at least one minute".to_string(),
            });
        }
        if start >= end {
            return Err(WardError::ConfigError {
                reason: format!("slot window start {} must be before end {}", start, end),
            });
        }
        Ok(Self { start, end, interval_minutes })
    }

    /// Parse the `[schedule]` table of a TOML document.
    pub fn from_toml_str(s: &str) -> WardResult<Self> {
        let file: ScheduleFile = toml::from_str(s).map_err(|e| WardError::ConfigError {
            reason: format!("failed to parse schedule TOML: {}", e),
        })?;
        let grid = file.schedule;
        Self::new(grid.start, grid.end, grid.interval_minutes)
    }

    pub fn from_file(path: &Path) -> WardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardError::ConfigError {
            reason: format!("failed to read schedule file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn start(&self) -> TimeSlot {
        self.start
    }

    pub fn end(&self) -> TimeSlot {
        self.end
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Every label on the grid, ascending.
    pub fn slots(&self) -> Vec<TimeSlot> {
        let step = Duration::minutes(i64::from(self.interval_minutes));
        let end = self.end.time();
        let mut current = self.start.time();
        let mut slots = Vec::new();

        while current < end {
            slots.push(TimeSlot::from_time(current));
            let (next, wrapped) = current.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            current = next;
        }

        slots
    }

    /// True when `slot` is one of the grid's labels.
    pub fn contains(&self, slot: TimeSlot) -> bool {
        if slot < self.start || slot >= self.end {
            return false;
        }
        let offset = (slot.time() - self.start.time()).num_minutes();
        offset % i64::from(self.interval_minutes) == 0
    }
}

impl Default for SlotGrid {
    /// 09:00 to 17:00 every 30 minutes: sixteen slots, 09:00 through 16:30.
    fn default() -> Self {
        // Whole hours below 24 are always valid times.
        let at = |hour: u32| {
            TimeSlot::from_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("hour below 24"))
        };
        Self {
            start: at(9),
            end: at(17),
            interval_minutes: 30,
        }
    }
}

/// Compute the open slots for `doctor` on `date`.
///
/// `appointments` may contain anything; only scheduled appointments for
/// this doctor on this date block a label. Cancelled and completed ones do
/// not. A fully booked day returns an empty list.
pub fn available_slots(
    grid: &SlotGrid,
    doctor: &DoctorId,
    date: NaiveDate,
    appointments: &[Appointment],
) -> Vec<TimeSlot> {
    let open: Vec<TimeSlot> = grid
        .slots()
        .into_iter()
        .filter(|slot| !appointments.iter().any(|a| a.occupies(doctor, date, *slot)))
        .collect();

    debug!(
        doctor_id = %doctor.0,
        date = %date,
        open = open.len(),
        "computed available slots"
    );

    open
}

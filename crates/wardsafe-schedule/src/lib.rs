//! # wardsafe-schedule
//!
//! Appointment slot allocation and booking for WardSafe.
//!
//! ## Overview
//!
//! - [`SlotGrid`]: the working-day grid (default 09:00-17:00 every 30 min)
//! - [`available_slots`]: the Slot Allocator: grid labels minus the ones
//!   held by *scheduled* appointments
//! - [`InMemoryAppointmentStore`]: a `Mutex`-backed
//!   [`AppointmentStore`](wardsafe_core::traits::AppointmentStore) whose
//!   check-and-insert is atomic
//! - [`BookingService`]: validation, role scoping and status transitions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wardsafe_schedule::{BookingService, InMemoryAppointmentStore, SlotGrid};
//!
//! let service = BookingService::new(Box::new(InMemoryAppointmentStore::new()), SlotGrid::default());
//! let open = service.available_slots("D1", Some(date))?;
//! ```

pub mod booking;
pub mod grid;
pub mod memory;

pub use booking::BookingService;
pub use grid::{available_slots, SlotGrid};
pub use memory::InMemoryAppointmentStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

//! # wardsafe-contracts
//!
//! Shared types and error contracts for the WardSafe clinical core.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions, small invariant helpers and the error
//! enum.

pub mod alert;
pub mod appointment;
pub mod error;
pub mod patient;

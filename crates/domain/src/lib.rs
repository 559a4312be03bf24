//! # trigger-domain
//!
//! Pure domain model for the trigger device-record service.
//!
//! ## Responsibilities
//! - Foundational types: opaque record identifiers, error conventions, wall-clock stamps
//! - Define **Device Records** (one document per physical device)
//! - Define **Telemetry** (`currentData`) as an ordered log of stamped samples
//! - Define **Schedules** as an ordered log of on/off entries
//! - Project both logs into the parallel-sequence wire format and back,
//!   rejecting sequences that drifted out of lockstep
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device_record;
pub mod schedule;
pub mod telemetry;

//! # trigger-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRecordRepository`: the device document collection
//!   - `Clock`: the wall clock used to stamp telemetry
//! - Define the **driving/inbound port** as a use-case struct:
//!   - `DeviceRecordService`: list, get, create, toggle, delete, append
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `trigger-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

//! # trigger-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** over device records
//!   (`/items`, `/items/{id}`, `/items/{id}/onStatus`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into JSON bodies of the shape existing clients
//!   expect: `{"items": …}`, `{"item": …}`, `{"success": …}`, `{"error": …}`
//!
//! Domain failures (unknown id, incomplete schedule) are answered with
//! `200 OK` and an `error` body; only store failures produce a `5xx`.
//!
//! ## Dependency rule
//! Depends on `trigger-app` (for port traits and services) and `trigger-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

//! # Fieldbook Core
//!
//! Scheduling and pricing engine for a sports-facility booking platform.
//!
//! This crate implements the computational core that the surrounding booking
//! system (dashboards, approval workflows, booking wizards) calls into. It
//! reconciles a facility's discrete, possibly multi-shift operating hours
//! with peak-hour price escalation windows, lays bookings onto a per-field
//! time grid without overlap, and derives display status for bookings from
//! an injected clock.
//!
//! ## Features
//!
//! - **Time Handling**: Minute-precision wall-clock values ("HH:mm[:ss]")
//!   and 30-minute slot sequence generation across operating shifts
//! - **Pricing**: Base-rate pricing with peak-window surcharges and
//!   additional-service line items
//! - **Grid Layout**: Booking placement onto a time-slot × field grid with
//!   spanning cells and deterministic conflict handling
//! - **Status Derivation**: Pure classification of bookings as
//!   upcoming/in-progress/completed/canceled against an explicit `now`
//! - **Input Parsing**: Deserialization of the facility-provider and
//!   booking-provider JSON payloads
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Consolidated public types (ids, snapshots, DTOs)
//! - [`models`]: Value types ([`models::TimeOfDay`], operating windows) and
//!   provider payload parsing
//! - [`services`]: The pricing engine, slot-grid builder, and status
//!   classification
//! - [`error`]: The core error taxonomy
//!
//! ## Purity
//!
//! Every operation is a deterministic function over immutable snapshot
//! inputs: no I/O, no ambient clock, no shared mutable state. Callers pass
//! an atomic, consistent snapshot per invocation and own all persistence.

pub mod api;

pub mod error;
pub mod models;

pub mod services;

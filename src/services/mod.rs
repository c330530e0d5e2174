//! Service layer: the computational core.
//!
//! Pure functions over snapshot inputs. Pricing, grid layout, and status
//! derivation share the same time semantics and never perform I/O.

pub mod pricing;

pub mod slot_grid;

pub mod status;

pub use pricing::{compute_field_price, compute_service_price, compute_total_price, quote};
pub use slot_grid::{build_time_slot_sequence, place_bookings};
pub use status::{classify, classify_slot};

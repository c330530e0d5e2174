//! Public API surface for the booking core.
//!
//! This file consolidates the snapshot types supplied by the surrounding
//! system (facility configuration, fields, bookings, services) and re-exports
//! the result types produced by the service layer. All types derive
//! Serialize/Deserialize for JSON serialization and are plain immutable
//! value snapshots: the core never mutates them in place.

pub use crate::error::{CoreError, CoreResult};
pub use crate::models::{OperatingWindow, TimeOfDay};
pub use crate::services::pricing::PriceQuote;
pub use crate::services::slot_grid::{PlacementOutcome, SlotGrid, SlotGridCell};
pub use crate::services::status::{DisplayStatus, StatusCache};

use serde::{Deserialize, Serialize};

/// Field identifier (one bookable pitch/court within a field group).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub i64);

/// Booking identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingId(pub i64);

/// Additional-service identifier (equipment rental, referee, ...).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(pub i64);

impl FieldId {
    pub fn new(value: i64) -> Self {
        FieldId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl BookingId {
    pub fn new(value: i64) -> Self {
        BookingId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ServiceId {
    pub fn new(value: i64) -> Self {
        ServiceId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operational status of a single field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// Open for booking.
    Active,
    /// Temporarily unavailable for maintenance.
    Maintenance,
    /// Closed / retired.
    Closed,
}

/// One bookable field (column of the slot grid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub status: FieldStatus,
}

impl Field {
    pub fn new(id: FieldId, name: impl Into<String>, status: FieldStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
        }
    }

    /// Whether new bookings may target this field.
    pub fn is_bookable(&self) -> bool {
        self.status == FieldStatus::Active
    }
}

/// A configured peak-hour window with its flat hourly price increase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Amount added to the base hourly rate, in the facility's currency unit.
    pub price_increase: f64,
}

impl PeakWindow {
    /// Create a new peak window. Returns `None` unless `start_time` is
    /// strictly before `end_time`.
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay, price_increase: f64) -> Option<Self> {
        if start_time < end_time {
            Some(Self {
                start_time,
                end_time,
                price_increase,
            })
        } else {
            None
        }
    }

    /// Whether a requested interval lies fully inside this window.
    ///
    /// This is the containment test the pricing model is built on: the
    /// increase applies to the whole request or not at all. A request that
    /// merely overlaps the window is not surcharged.
    pub fn contains_interval(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        start >= self.start_time && end <= self.end_time
    }
}

/// Pricing and field inventory for one group of interchangeable fields.
///
/// Snapshot of the facility owner's configuration: a base hourly rate, up
/// to three peak windows, and the group's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGroup {
    /// Base price per hour, in the facility's currency unit.
    pub base_price: f64,
    /// Peak-hour windows, at most three, evaluated independently.
    #[serde(default)]
    pub peak_windows: Vec<PeakWindow>,
    /// Fields in this group, in display (column) order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FieldGroup {
    pub fn new(base_price: f64, peak_windows: Vec<PeakWindow>, fields: Vec<Field>) -> Self {
        Self {
            base_price,
            peak_windows,
            fields,
        }
    }
}

/// Persisted status of a booking slot, as stored by the booking provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Confirmed, interval not yet elapsed.
    Upcoming,
    /// Interval elapsed.
    Done,
    /// Canceled before or during the interval.
    Canceled,
}

/// One concrete occupied interval on a field for a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSlot {
    pub booking_id: BookingId,
    pub field_id: FieldId,
    pub date: chrono::NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: BookingStatus,
    /// Display name of the occupant shown on the grid cell.
    #[serde(default)]
    pub occupant_name: String,
}

impl BookingSlot {
    /// Start instant anchored to the slot's date.
    pub fn starts_at(&self) -> chrono::NaiveDateTime {
        self.start_time.at_date(self.date)
    }

    /// End instant anchored to the slot's date.
    pub fn ends_at(&self) -> chrono::NaiveDateTime {
        self.end_time.at_date(self.date)
    }

    /// Booked duration in fractional hours.
    pub fn duration(&self) -> qtty::Hours {
        self.start_time.hours_until(self.end_time)
    }
}

/// One bookable additional service from the facility's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    /// Price per unit, in the facility's currency unit.
    pub price: f64,
}

/// A quantity of one service chosen on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSelection {
    pub service_id: ServiceId,
    pub quantity: u32,
}

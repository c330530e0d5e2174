//! Slot-grid construction.
//!
//! Lays a date's bookings onto the facility's time grid: one row per
//! 30-minute slot mark, one column per field. A booking spanning several
//! rows is rendered as a single cell with a row span; the covered rows
//! beneath it are suppressed so the renderer never draws the same booking
//! twice.
//!
//! Placement is deterministic for any input. When two bookings for the same
//! field overlap (which upstream conflict validation should have prevented),
//! the first-registered booking wins and the later one is reported as
//! suppressed, leaving unrelated cells untouched.

use crate::api::{BookingId, BookingSlot, BookingStatus, Field, FieldId};
use crate::models::{OperatingWindow, TimeOfDay};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Grid granularity in minutes.
pub const SLOT_STEP_MINUTES: u16 = 30;

/// Build the ordered slot-mark sequence for a facility's operating windows.
///
/// Each window contributes marks from `open_time` to `close_time`
/// inclusive, stepping by 30 minutes; windows are concatenated in the order
/// given. No sorting or de-duplication happens here: owners reviewing their
/// shift configuration see exactly what they configured, so callers supply
/// windows chronologically and filter unwanted degenerate windows upstream.
/// A window with `open_time == close_time` contributes exactly one mark.
pub fn build_time_slot_sequence(windows: &[OperatingWindow]) -> Vec<TimeOfDay> {
    let mut marks = Vec::new();
    for window in windows {
        let mut mark = window.open_time;
        while mark <= window.close_time {
            marks.push(mark);
            match mark.checked_add_minutes(SLOT_STEP_MINUTES) {
                Some(next) => mark = next,
                None => break,
            }
        }
    }
    marks
}

/// One rendered, occupied grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotGridCell {
    /// Row index into the slot-mark sequence.
    pub time_index: usize,
    /// Column.
    pub field_id: FieldId,
    /// The booking occupying this cell.
    pub booking: BookingSlot,
    /// Number of rows the cell spans, at least 1.
    pub row_span: usize,
}

/// Per-booking placement result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// Rendered as a cell at `start_index` spanning `row_span` rows.
    Placed {
        booking_id: BookingId,
        start_index: usize,
        row_span: usize,
    },
    /// Overlapped an earlier booking on the same field and was not
    /// rendered. First-registered-wins.
    SuppressedDueToConflict {
        booking_id: BookingId,
        winner: BookingId,
    },
    /// The booking's times do not resolve against the slot sequence (or its
    /// field is not a displayed column). Not an error: the booking may be
    /// valid data outside the displayed window.
    OutsideGrid { booking_id: BookingId },
    /// Canceled bookings never occupy the grid.
    SkippedCanceled { booking_id: BookingId },
}

/// The laid-out grid for one field group and date.
///
/// Produced by [`place_bookings`]; a pure value with lookup accessors for
/// the renderer and for click inspection.
#[derive(Debug, Clone, Serialize)]
pub struct SlotGrid {
    time_slots: Vec<TimeOfDay>,
    fields: Vec<FieldId>,
    cells: Vec<SlotGridCell>,
    outcomes: Vec<PlacementOutcome>,
    /// (time_index, field) -> index into `cells`, covering every row of each
    /// placed booking's half-open span.
    #[serde(skip)]
    occupancy: HashMap<(usize, FieldId), usize>,
    #[serde(skip)]
    suppressed: HashSet<(usize, FieldId)>,
}

impl SlotGrid {
    /// The slot-mark sequence the grid was built against.
    pub fn time_slots(&self) -> &[TimeOfDay] {
        &self.time_slots
    }

    /// Column order.
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    /// All rendered (occupied) cells.
    pub fn cells(&self) -> &[SlotGridCell] {
        &self.cells
    }

    /// Placement outcome per input booking, in input order.
    pub fn outcomes(&self) -> &[PlacementOutcome] {
        &self.outcomes
    }

    /// The rendered cell starting at exactly `(time_index, field_id)`.
    pub fn cell_at(&self, time_index: usize, field_id: FieldId) -> Option<&SlotGridCell> {
        self.cells
            .iter()
            .find(|cell| cell.time_index == time_index && cell.field_id == field_id)
    }

    /// Whether `(time_index, field_id)` is covered by a spanning cell above
    /// it and must not be rendered as an independent cell.
    pub fn is_suppressed(&self, time_index: usize, field_id: FieldId) -> bool {
        self.suppressed.contains(&(time_index, field_id))
    }

    /// The booking whose half-open `[start_index, end_index)` span covers
    /// `(time_index, field_id)`, if any.
    pub fn booking_at_index(&self, time_index: usize, field_id: FieldId) -> Option<&BookingSlot> {
        self.occupancy
            .get(&(time_index, field_id))
            .map(|&cell_idx| &self.cells[cell_idx].booking)
    }

    /// Locate the booking under a clicked slot mark, if any.
    ///
    /// Resolves `time` to its slot index by exact match and tests span
    /// membership with the same half-open semantics used at placement, so a
    /// click anywhere inside a spanning cell finds its booking.
    pub fn find_slot_at(&self, time: TimeOfDay, field_id: FieldId) -> Option<&BookingSlot> {
        let time_index = self.time_slots.iter().position(|&mark| mark == time)?;
        self.booking_at_index(time_index, field_id)
    }
}

/// Resolve a booking's start/end indices against the slot sequence.
///
/// The start must match a mark exactly. The end matches exactly when it can;
/// otherwise the nearest preceding mark at or after the start is used, which
/// tolerates bookings whose end does not land on a 30-minute boundary of the
/// currently configured grid.
fn resolve_span(time_slots: &[TimeOfDay], booking: &BookingSlot) -> Option<(usize, usize)> {
    let start_index = time_slots.iter().position(|&m| m == booking.start_time)?;

    let mut end_index = None;
    for (i, &mark) in time_slots.iter().enumerate().skip(start_index) {
        if mark == booking.end_time {
            end_index = Some(i);
            break;
        }
        if mark > booking.end_time {
            break;
        }
        // Nearest preceding mark so far.
        end_index = Some(i);
    }

    end_index.map(|end| (start_index, end))
}

/// Lay a date's bookings onto the slot grid.
///
/// Every placed booking yields one cell at its start row carrying
/// `row_span = max(1, end_index - start_index)`; the interior rows of the
/// span are suppressed. Canceled bookings are skipped, bookings outside the
/// sequence (or referring to a field that is not a column) are skipped, and
/// same-field overlaps resolve first-registered-wins. The function is pure:
/// identical inputs produce identical grids.
pub fn place_bookings(
    fields: &[Field],
    bookings: &[BookingSlot],
    time_slots: &[TimeOfDay],
) -> SlotGrid {
    let columns: Vec<FieldId> = fields.iter().map(|f| f.id).collect();
    let column_set: HashSet<FieldId> = columns.iter().copied().collect();

    let mut cells: Vec<SlotGridCell> = Vec::new();
    let mut outcomes: Vec<PlacementOutcome> = Vec::with_capacity(bookings.len());
    let mut occupancy: HashMap<(usize, FieldId), usize> = HashMap::new();
    let mut suppressed: HashSet<(usize, FieldId)> = HashSet::new();

    for booking in bookings {
        let booking_id = booking.booking_id;

        if booking.status == BookingStatus::Canceled {
            outcomes.push(PlacementOutcome::SkippedCanceled { booking_id });
            continue;
        }

        if !column_set.contains(&booking.field_id) {
            debug!("Booking {booking_id} targets a field outside the grid, skipping");
            outcomes.push(PlacementOutcome::OutsideGrid { booking_id });
            continue;
        }

        let Some((start_index, end_index)) = resolve_span(time_slots, booking) else {
            debug!("Booking {booking_id} lies outside the slot sequence, skipping");
            outcomes.push(PlacementOutcome::OutsideGrid { booking_id });
            continue;
        };

        let row_span = (end_index - start_index).max(1);
        let covered = start_index..start_index + row_span;

        // First-registered-wins: a later overlapping booking is reported,
        // never allowed to corrupt already-placed cells.
        if let Some(&winner_cell) = covered
            .clone()
            .find_map(|i| occupancy.get(&(i, booking.field_id)))
        {
            outcomes.push(PlacementOutcome::SuppressedDueToConflict {
                booking_id,
                winner: cells[winner_cell].booking.booking_id,
            });
            continue;
        }

        let cell_index = cells.len();
        cells.push(SlotGridCell {
            time_index: start_index,
            field_id: booking.field_id,
            booking: booking.clone(),
            row_span,
        });
        for i in covered {
            occupancy.insert((i, booking.field_id), cell_index);
            if i > start_index {
                suppressed.insert((i, booking.field_id));
            }
        }
        outcomes.push(PlacementOutcome::Placed {
            booking_id,
            start_index,
            row_span,
        });
    }

    SlotGrid {
        time_slots: time_slots.to_vec(),
        fields: columns,
        cells,
        outcomes,
        occupancy,
        suppressed,
    }
}

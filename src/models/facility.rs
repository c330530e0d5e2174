// ============================================================================
// Provider Payload Parsing
// ============================================================================
//
// The facility/config provider and the booking provider hand the core flat
// JSON blobs (operating hours as openTime1..closeTime3, peak windows as
// peakStartTime1..priceIncrease3, bookings as a list). These functions
// deserialize those shapes into the snapshot types the services consume.

use crate::api::{BookingId, BookingSlot, BookingStatus, FieldId, PeakWindow};
use crate::models::{OperatingWindow, TimeOfDay};
use anyhow::{bail, Context, Result};

/// Maximum number of operating windows (shifts) a facility may configure.
pub const MAX_OPERATING_WINDOWS: usize = 3;

/// Maximum number of peak windows a field group may configure.
pub const MAX_PEAK_WINDOWS: usize = 3;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperatingHoursInput {
    open_time1: Option<String>,
    close_time1: Option<String>,
    open_time2: Option<String>,
    close_time2: Option<String>,
    open_time3: Option<String>,
    close_time3: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeakConfigInput {
    peak_start_time1: Option<String>,
    peak_end_time1: Option<String>,
    price_increase1: Option<f64>,
    peak_start_time2: Option<String>,
    peak_end_time2: Option<String>,
    price_increase2: Option<f64>,
    peak_start_time3: Option<String>,
    peak_end_time3: Option<String>,
    price_increase3: Option<f64>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingInput {
    booking_id: i64,
    field_id: i64,
    date: chrono::NaiveDate,
    start_time: String,
    end_time: String,
    status: BookingStatus,
    #[serde(default)]
    customer_name: String,
}

fn parse_time(value: &str, label: &str) -> Result<TimeOfDay> {
    value
        .parse::<TimeOfDay>()
        .with_context(|| format!("Failed to parse {label}"))
}

/// Parse a facility's operating-hours configuration.
///
/// The provider supplies up to three shifts as independently optional
/// `openTimeN`/`closeTimeN` "HH:mm:ss" pairs. A shift's pair must be
/// jointly present; a half-configured shift is rejected rather than
/// guessed at. Shifts are returned in configuration order (N = 1, 2, 3),
/// which callers rely on being preserved downstream.
pub fn parse_operating_hours_json(config_json: &str) -> Result<Vec<OperatingWindow>> {
    let input: OperatingHoursInput =
        serde_json::from_str(config_json).context("Invalid operating-hours JSON")?;

    let pairs = [
        (1, input.open_time1, input.close_time1),
        (2, input.open_time2, input.close_time2),
        (3, input.open_time3, input.close_time3),
    ];

    let mut windows = Vec::with_capacity(MAX_OPERATING_WINDOWS);
    for (n, open, close) in pairs {
        match (open, close) {
            (Some(open), Some(close)) => {
                let open = parse_time(&open, &format!("openTime{n}"))?;
                let close = parse_time(&close, &format!("closeTime{n}"))?;
                let window = match OperatingWindow::new(open, close) {
                    Some(window) => window,
                    None => bail!("Shift {n} closes at {close} before it opens at {open}"),
                };
                windows.push(window);
            }
            (None, None) => {}
            (Some(_), None) => bail!("Shift {n} has openTime{n} but no closeTime{n}"),
            (None, Some(_)) => bail!("Shift {n} has closeTime{n} but no openTime{n}"),
        }
    }

    Ok(windows)
}

/// Parse a field group's peak-window configuration.
///
/// Each of the three slots is independently present or absent: a slot
/// counts only when its start, end, and increase are all supplied.
/// A partially supplied slot is rejected.
pub fn parse_peak_windows_json(config_json: &str) -> Result<Vec<PeakWindow>> {
    let input: PeakConfigInput =
        serde_json::from_str(config_json).context("Invalid peak-window JSON")?;

    let slots = [
        (1, input.peak_start_time1, input.peak_end_time1, input.price_increase1),
        (2, input.peak_start_time2, input.peak_end_time2, input.price_increase2),
        (3, input.peak_start_time3, input.peak_end_time3, input.price_increase3),
    ];

    let mut windows = Vec::with_capacity(MAX_PEAK_WINDOWS);
    for (n, start, end, increase) in slots {
        match (start, end, increase) {
            (Some(start), Some(end), Some(increase)) => {
                let start = parse_time(&start, &format!("peakStartTime{n}"))?;
                let end = parse_time(&end, &format!("peakEndTime{n}"))?;
                if increase < 0.0 {
                    bail!("Peak window {n} has a negative price increase");
                }
                let window = match PeakWindow::new(start, end, increase) {
                    Some(window) => window,
                    None => bail!("Peak window {n} must start at {start} before it ends at {end}"),
                };
                windows.push(window);
            }
            (None, None, None) => {}
            _ => bail!("Peak window {n} is only partially configured"),
        }
    }

    Ok(windows)
}

/// Parse the booking provider's per-date booking list.
///
/// A malformed time string fails the whole parse with context naming the
/// offending booking; the caller decides whether to skip that payload or
/// abort the batch.
pub fn parse_bookings_json(bookings_json: &str) -> Result<Vec<BookingSlot>> {
    let inputs: Vec<BookingInput> =
        serde_json::from_str(bookings_json).context("Invalid bookings JSON")?;

    let mut bookings = Vec::with_capacity(inputs.len());
    for input in inputs {
        let start_time = parse_time(&input.start_time, "startTime")
            .with_context(|| format!("Booking {}", input.booking_id))?;
        let end_time = parse_time(&input.end_time, "endTime")
            .with_context(|| format!("Booking {}", input.booking_id))?;
        bookings.push(BookingSlot {
            booking_id: BookingId::new(input.booking_id),
            field_id: FieldId::new(input.field_id),
            date: input.date,
            start_time,
            end_time,
            status: input.status,
            occupant_name: input.customer_name,
        });
    }

    Ok(bookings)
}

// ============================================================================
// Tests
// ============================================================================

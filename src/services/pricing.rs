//! Field and service pricing.
//!
//! Prices a requested time range against a field group's base hourly rate
//! and its configured peak-hour windows, plus any additional services
//! selected on the booking.
//!
//! The peak model is containment-only: a window's price increase applies to
//! the entire requested duration if and only if the request lies fully
//! inside that window. There is no pro-rating for partial overlap, and when
//! several windows fully contain the request their increases are summed
//! with no cap. Both behaviors are load-bearing business semantics and must
//! not be changed here without product sign-off.

use crate::api::{FieldGroup, PeakWindow, Service, ServiceSelection};
use crate::error::{CoreError, CoreResult};
use crate::models::TimeOfDay;
use log::debug;
use serde::{Deserialize, Serialize};

/// Price breakdown for one booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Requested duration in fractional hours.
    pub duration: qtty::Hours,
    /// Effective hourly rate (base plus applied peak increases).
    pub hourly_rate: f64,
    /// Base-rate portion of the field price.
    pub base_amount: f64,
    /// Peak-surcharge portion of the field price.
    pub peak_surcharge: f64,
    /// Additional-services portion.
    pub service_amount: f64,
    /// Grand total.
    pub total: f64,
    /// Peak windows that fully contained the request and were applied.
    pub applied_peak_windows: Vec<PeakWindow>,
}

fn validate_interval(start: TimeOfDay, end: TimeOfDay) -> CoreResult<qtty::Hours> {
    if end <= start {
        return Err(CoreError::invalid_interval(start, end));
    }
    Ok(start.hours_until(end))
}

fn applied_peaks(group: &FieldGroup, start: TimeOfDay, end: TimeOfDay) -> Vec<PeakWindow> {
    group
        .peak_windows
        .iter()
        .filter(|peak| peak.contains_interval(start, end))
        .copied()
        .collect()
}

/// Compute the field price for a requested time range.
///
/// `(base_price + sum of fully-containing peak increases) * duration`,
/// with sub-hour precision (a 90-minute request is 1.5 hours). A request
/// whose end does not lie after its start is rejected: silently computing
/// a zero or negative price would mis-price the booking.
pub fn compute_field_price(
    group: &FieldGroup,
    request_start: TimeOfDay,
    request_end: TimeOfDay,
) -> CoreResult<f64> {
    let duration = validate_interval(request_start, request_end)?;
    let surcharge: f64 = applied_peaks(group, request_start, request_end)
        .iter()
        .map(|peak| peak.price_increase)
        .sum();
    Ok((group.base_price + surcharge) * duration.value())
}

/// Compute the total price of the selected additional services.
///
/// A selection whose service id no longer resolves in the catalog
/// contributes zero: the service was removed after the booking was drafted,
/// which is a legitimate state rather than an error.
pub fn compute_service_price(selections: &[ServiceSelection], catalog: &[Service]) -> f64 {
    selections
        .iter()
        .map(|selection| {
            match catalog.iter().find(|s| s.id == selection.service_id) {
                Some(service) => service.price * selection.quantity as f64,
                None => {
                    debug!(
                        "Service {} not in catalog, contributing zero",
                        selection.service_id
                    );
                    0.0
                }
            }
        })
        .sum()
}

/// Compute the grand total for a booking request: field price plus
/// additional services. Discounts and vouchers are applied by the
/// surrounding system, never here.
pub fn compute_total_price(
    group: &FieldGroup,
    request_start: TimeOfDay,
    request_end: TimeOfDay,
    selections: &[ServiceSelection],
    catalog: &[Service],
) -> CoreResult<f64> {
    let field_price = compute_field_price(group, request_start, request_end)?;
    Ok(field_price + compute_service_price(selections, catalog))
}

/// Compute the full price breakdown shown on the booking confirmation.
pub fn quote(
    group: &FieldGroup,
    request_start: TimeOfDay,
    request_end: TimeOfDay,
    selections: &[ServiceSelection],
    catalog: &[Service],
) -> CoreResult<PriceQuote> {
    let duration = validate_interval(request_start, request_end)?;
    let applied = applied_peaks(group, request_start, request_end);
    let increase: f64 = applied.iter().map(|peak| peak.price_increase).sum();

    let base_amount = group.base_price * duration.value();
    let peak_surcharge = increase * duration.value();
    let service_amount = compute_service_price(selections, catalog);

    Ok(PriceQuote {
        duration,
        hourly_rate: group.base_price + increase,
        base_amount,
        peak_surcharge,
        service_amount,
        total: base_amount + peak_surcharge + service_amount,
        applied_peak_windows: applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ServiceId;
    use std::str::FromStr;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::from_str(s).unwrap()
    }

    fn peak(start: &str, end: &str, increase: f64) -> PeakWindow {
        PeakWindow::new(t(start), t(end), increase).unwrap()
    }

    fn group(base_price: f64, peaks: Vec<PeakWindow>) -> FieldGroup {
        FieldGroup::new(base_price, peaks, vec![])
    }

    fn assert_money(value: f64, expected: f64) {
        assert!(
            (value - expected).abs() < 1e-6,
            "expected {expected}, got {value}"
        );
    }

    #[test]
    fn test_base_price_no_peaks() {
        let group = group(100_000.0, vec![]);
        let price = compute_field_price(&group, t("08:00"), t("10:00")).unwrap();
        assert_money(price, 200_000.0);
    }

    #[test]
    fn test_fractional_duration() {
        let group = group(100_000.0, vec![]);
        let price = compute_field_price(&group, t("08:00"), t("09:30")).unwrap();
        assert_money(price, 150_000.0);
    }

    #[test]
    fn test_fully_contained_request_gets_surcharge() {
        let group = group(100_000.0, vec![peak("17:00", "22:00", 50_000.0)]);
        let price = compute_field_price(&group, t("18:00"), t("20:00")).unwrap();
        assert_money(price, 300_000.0);
    }

    #[test]
    fn test_exact_peak_boundaries_count_as_contained() {
        let group = group(100_000.0, vec![peak("17:00", "22:00", 50_000.0)]);
        let price = compute_field_price(&group, t("17:00"), t("22:00")).unwrap();
        assert_money(price, 5.0 * 150_000.0);
    }

    #[test]
    fn test_partial_overlap_gets_no_surcharge() {
        // 16:30-18:00 straddles the 17:00 peak boundary: 1.5h at the base
        // rate, 150,000 and not 225,000.
        let group = group(100_000.0, vec![peak("17:00", "22:00", 50_000.0)]);
        let price = compute_field_price(&group, t("16:30"), t("18:00")).unwrap();
        assert_money(price, 150_000.0);
    }

    #[test]
    fn test_request_spanning_two_peaks_gets_no_surcharge() {
        let group = group(
            100_000.0,
            vec![peak("09:00", "11:00", 20_000.0), peak("11:00", "13:00", 30_000.0)],
        );
        // Inside the union of both windows but fully inside neither.
        let price = compute_field_price(&group, t("10:00"), t("12:00")).unwrap();
        assert_money(price, 200_000.0);
    }

    #[test]
    fn test_stacked_peak_windows_sum() {
        // Overlapping windows that both contain the request: increases sum
        // with no cap.
        let group = group(
            100_000.0,
            vec![peak("17:00", "22:00", 50_000.0), peak("16:00", "23:00", 25_000.0)],
        );
        let price = compute_field_price(&group, t("18:00"), t("19:00")).unwrap();
        assert_money(price, 175_000.0);
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let group = group(100_000.0, vec![]);
        assert!(matches!(
            compute_field_price(&group, t("10:00"), t("10:00")),
            Err(CoreError::InvalidInterval { .. })
        ));
        assert!(matches!(
            compute_field_price(&group, t("10:00"), t("09:00")),
            Err(CoreError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_zero_base_price() {
        let group = group(0.0, vec![]);
        let price = compute_field_price(&group, t("08:00"), t("10:00")).unwrap();
        assert_money(price, 0.0);
    }

    fn catalog() -> Vec<Service> {
        vec![
            Service {
                id: ServiceId::new(1),
                name: "Ball rental".to_string(),
                price: 20_000.0,
            },
            Service {
                id: ServiceId::new(2),
                name: "Referee".to_string(),
                price: 150_000.0,
            },
        ]
    }

    #[test]
    fn test_service_price_sums_quantities() {
        let selections = vec![
            ServiceSelection {
                service_id: ServiceId::new(1),
                quantity: 2,
            },
            ServiceSelection {
                service_id: ServiceId::new(2),
                quantity: 1,
            },
        ];
        assert_money(compute_service_price(&selections, &catalog()), 190_000.0);
    }

    #[test]
    fn test_unknown_service_contributes_zero() {
        let selections = vec![ServiceSelection {
            service_id: ServiceId::new(999),
            quantity: 4,
        }];
        assert_money(compute_service_price(&selections, &catalog()), 0.0);
    }

    #[test]
    fn test_empty_selections() {
        assert_money(compute_service_price(&[], &catalog()), 0.0);
    }

    #[test]
    fn test_total_price_is_field_plus_services() {
        let group = group(100_000.0, vec![peak("17:00", "22:00", 50_000.0)]);
        let selections = vec![ServiceSelection {
            service_id: ServiceId::new(1),
            quantity: 1,
        }];
        let total =
            compute_total_price(&group, t("18:00"), t("19:30"), &selections, &catalog()).unwrap();
        assert_money(total, 1.5 * 150_000.0 + 20_000.0);
    }

    #[test]
    fn test_total_price_propagates_invalid_interval() {
        let group = group(100_000.0, vec![]);
        assert!(compute_total_price(&group, t("12:00"), t("11:00"), &[], &catalog()).is_err());
    }

    #[test]
    fn test_quote_breakdown() {
        let group = group(100_000.0, vec![peak("17:00", "22:00", 50_000.0)]);
        let selections = vec![ServiceSelection {
            service_id: ServiceId::new(2),
            quantity: 1,
        }];
        let quote = quote(&group, t("18:00"), t("20:00"), &selections, &catalog()).unwrap();

        assert!((quote.duration.value() - 2.0).abs() < 1e-12);
        assert_money(quote.hourly_rate, 150_000.0);
        assert_money(quote.base_amount, 200_000.0);
        assert_money(quote.peak_surcharge, 100_000.0);
        assert_money(quote.service_amount, 150_000.0);
        assert_money(quote.total, 450_000.0);
        assert_eq!(quote.applied_peak_windows.len(), 1);
    }

    #[test]
    fn test_quote_matches_total_price() {
        let group = group(80_000.0, vec![peak("06:00", "09:00", 10_000.0)]);
        let quote = quote(&group, t("06:30"), t("08:00"), &[], &[]).unwrap();
        let total = compute_total_price(&group, t("06:30"), t("08:00"), &[], &[]).unwrap();
        assert_money(quote.total, total);
    }
}

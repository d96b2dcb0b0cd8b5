//! # Form State
//!
//! State holders for the QR and calculator forms, updated only through pure
//! reducers `(state, event) -> state`.
//!
//! ## Timestamp Synchronization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   date field ─┐                                                         │
//! │               ├── DateChanged / TimeChanged ──► utc_timestamp updated   │
//! │   time field ─┘                                                         │
//! │                                                                         │
//! │   utc_timestamp field ── UtcTimestampEdited ──► date + time updated    │
//! │                                                                         │
//! │   Invalid text is kept as typed and reported in `timestamp_error`;     │
//! │   the other side is left untouched until the input becomes valid.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The form works with a fixed UTC offset so that the reducers stay
//! deterministic; the front end supplies the offset of the register.

use chrono::{FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::normalize::{to_utc_iso_timestamp_in, ISO_UTC_FORMAT};
use crate::validation::{parse_invoice_date, parse_invoice_time, DATE_FORMAT, TIME_FORMAT};
use crate::vat::{calculate_from_text, VatBreakdown};

// =============================================================================
// QR Form
// =============================================================================

/// Everything the QR form displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QrFormState {
    pub seller: String,
    pub vat_number: String,
    pub total: String,
    pub vat_amount: String,
    pub date: String,
    pub time: String,

    /// Editable preview of TLV tag 3.
    pub utc_timestamp: String,

    /// Offset of the register's wall clock from UTC, in minutes.
    pub utc_offset_minutes: i32,

    pub timestamp_error: Option<String>,
}

/// User actions on the QR form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum QrFormEvent {
    SellerChanged(String),
    VatNumberChanged(String),
    TotalChanged(String),
    VatAmountChanged(String),
    DateChanged(String),
    TimeChanged(String),
    UtcTimestampEdited(String),
    /// Copies a calculator result into the amount fields.
    BreakdownApplied(VatBreakdown),
}

impl QrFormState {
    /// A fresh form stamped with the register's current wall-clock time.
    pub fn new(now_local: NaiveDateTime, utc_offset_minutes: i32) -> Self {
        let state = QrFormState {
            seller: String::new(),
            vat_number: String::new(),
            total: Money::zero().to_string(),
            vat_amount: Money::zero().to_string(),
            date: now_local.format(DATE_FORMAT).to_string(),
            time: now_local.format(TIME_FORMAT).to_string(),
            utc_timestamp: String::new(),
            utc_offset_minutes,
            timestamp_error: None,
        };
        sync_from_local(state)
    }

    fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }
}

/// Applies one event to the QR form.
pub fn reduce_qr_form(state: QrFormState, event: QrFormEvent) -> QrFormState {
    match event {
        QrFormEvent::SellerChanged(seller) => QrFormState { seller, ..state },
        QrFormEvent::VatNumberChanged(vat_number) => QrFormState { vat_number, ..state },
        QrFormEvent::TotalChanged(total) => QrFormState { total, ..state },
        QrFormEvent::VatAmountChanged(vat_amount) => QrFormState { vat_amount, ..state },
        QrFormEvent::DateChanged(date) => sync_from_local(QrFormState { date, ..state }),
        QrFormEvent::TimeChanged(time) => sync_from_local(QrFormState { time, ..state }),
        QrFormEvent::UtcTimestampEdited(utc_timestamp) => {
            sync_from_utc(QrFormState { utc_timestamp, ..state })
        }
        QrFormEvent::BreakdownApplied(breakdown) => QrFormState {
            total: breakdown.total.to_string(),
            vat_amount: breakdown.vat.to_string(),
            ..state
        },
    }
}

/// Recomputes the UTC preview from the date and time fields.
fn sync_from_local(state: QrFormState) -> QrFormState {
    let parsed = parse_invoice_date(&state.date)
        .and_then(|date| Ok((date, parse_invoice_time(&state.time)?)));

    match (parsed, state.offset()) {
        (Ok((date, time)), Some(offset)) => {
            let utc_timestamp = to_utc_iso_timestamp_in(&offset, date, time).into_value();
            QrFormState {
                utc_timestamp,
                timestamp_error: None,
                ..state
            }
        }
        (Err(err), _) => QrFormState {
            timestamp_error: Some(err.to_string()),
            ..state
        },
        (_, None) => QrFormState {
            timestamp_error: Some("UTC offset out of range".to_string()),
            ..state
        },
    }
}

/// Recomputes the date and time fields from the UTC preview.
fn sync_from_utc(state: QrFormState) -> QrFormState {
    let parsed = NaiveDateTime::parse_from_str(&state.utc_timestamp, ISO_UTC_FORMAT);

    match (parsed, state.offset()) {
        (Ok(utc), Some(offset)) => {
            let local = utc + offset;
            QrFormState {
                date: local.format(DATE_FORMAT).to_string(),
                time: local.format(TIME_FORMAT).to_string(),
                timestamp_error: None,
                ..state
            }
        }
        (Err(_), _) => QrFormState {
            timestamp_error: Some("timestamp must look like YYYY-MM-DDTHH:MM:SSZ".to_string()),
            ..state
        },
        (_, None) => QrFormState {
            timestamp_error: Some("UTC offset out of range".to_string()),
            ..state
        },
    }
}

// =============================================================================
// VAT Calculator Form
// =============================================================================

/// Everything the VAT calculator displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VatCalculatorState {
    pub total: String,
    pub rate_percent: String,
    pub result: Option<VatBreakdown>,
    pub error: Option<String>,
}

impl Default for VatCalculatorState {
    fn default() -> Self {
        VatCalculatorState {
            total: Money::zero().to_string(),
            rate_percent: "15".to_string(),
            result: None,
            error: None,
        }
    }
}

/// User actions on the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum VatCalculatorEvent {
    TotalChanged(String),
    RateChanged(String),
    Calculate,
}

/// Applies one event to the calculator. Editing an input clears the
/// previous result so a stale figure is never shown.
pub fn reduce_vat_calculator(
    state: VatCalculatorState,
    event: VatCalculatorEvent,
) -> VatCalculatorState {
    match event {
        VatCalculatorEvent::TotalChanged(total) => VatCalculatorState {
            total,
            result: None,
            error: None,
            ..state
        },
        VatCalculatorEvent::RateChanged(rate_percent) => VatCalculatorState {
            rate_percent,
            result: None,
            error: None,
            ..state
        },
        VatCalculatorEvent::Calculate => match calculate_from_text(&state.total, &state.rate_percent) {
            Ok(breakdown) => VatCalculatorState {
                result: Some(breakdown),
                error: None,
                ..state
            },
            Err(err) => VatCalculatorState {
                result: None,
                error: Some(err.to_string()),
                ..state
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon_riyadh_form() -> QrFormState {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        QrFormState::new(now, 180)
    }

    #[test]
    fn test_new_form_has_synced_timestamp() {
        let form = noon_riyadh_form();
        assert_eq!(form.date, "2024-01-01");
        assert_eq!(form.time, "12:00:00");
        assert_eq!(form.utc_timestamp, "2024-01-01T09:00:00Z");
        assert_eq!(form.total, "0.00");
        assert!(form.timestamp_error.is_none());
    }

    #[test]
    fn test_time_change_updates_utc() {
        let form = reduce_qr_form(noon_riyadh_form(), QrFormEvent::TimeChanged("01:30:00".into()));
        assert_eq!(form.utc_timestamp, "2023-12-31T22:30:00Z");
    }

    #[test]
    fn test_utc_edit_updates_local_fields() {
        let form = reduce_qr_form(
            noon_riyadh_form(),
            QrFormEvent::UtcTimestampEdited("2024-02-29T22:15:00Z".into()),
        );
        assert_eq!(form.date, "2024-03-01");
        assert_eq!(form.time, "01:15:00");
        assert!(form.timestamp_error.is_none());
    }

    #[test]
    fn test_invalid_date_keeps_previous_timestamp() {
        let form = reduce_qr_form(noon_riyadh_form(), QrFormEvent::DateChanged("2024-13".into()));
        assert_eq!(form.date, "2024-13");
        assert_eq!(form.utc_timestamp, "2024-01-01T09:00:00Z");
        assert!(form.timestamp_error.is_some());

        let fixed = reduce_qr_form(form, QrFormEvent::DateChanged("2024-01-02".into()));
        assert_eq!(fixed.utc_timestamp, "2024-01-02T09:00:00Z");
        assert!(fixed.timestamp_error.is_none());
    }

    #[test]
    fn test_invalid_utc_edit_keeps_local_fields() {
        let form = reduce_qr_form(noon_riyadh_form(), QrFormEvent::UtcTimestampEdited("soon".into()));
        assert_eq!(form.date, "2024-01-01");
        assert_eq!(form.time, "12:00:00");
        assert!(form.timestamp_error.is_some());
    }

    #[test]
    fn test_breakdown_applied_to_amounts() {
        let breakdown = VatBreakdown {
            net: Money::from_cents(10000),
            vat: Money::from_cents(1500),
            total: Money::from_cents(11500),
        };
        let form = reduce_qr_form(noon_riyadh_form(), QrFormEvent::BreakdownApplied(breakdown));
        assert_eq!(form.total, "115.00");
        assert_eq!(form.vat_amount, "15.00");
    }

    #[test]
    fn test_reducer_does_not_touch_unrelated_fields() {
        let before = noon_riyadh_form();
        let after = reduce_qr_form(before.clone(), QrFormEvent::SellerChanged("Acme".into()));
        assert_eq!(after.seller, "Acme");
        assert_eq!(after.utc_timestamp, before.utc_timestamp);
        assert_eq!(after.date, before.date);
    }

    #[test]
    fn test_calculator_flow() {
        let state = VatCalculatorState::default();
        let state = reduce_vat_calculator(state, VatCalculatorEvent::TotalChanged("115".into()));
        let state = reduce_vat_calculator(state, VatCalculatorEvent::Calculate);
        let result = state.result.unwrap();
        assert_eq!(result.net.to_string(), "100.00");
        assert_eq!(result.vat.to_string(), "15.00");

        let state = reduce_vat_calculator(state, VatCalculatorEvent::RateChanged("x".into()));
        assert!(state.result.is_none());
        let state = reduce_vat_calculator(state, VatCalculatorEvent::Calculate);
        assert!(state.error.is_some());
    }
}

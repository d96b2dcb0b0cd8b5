//! `fatoora qr` -- Generate a ZATCA QR payload and image.

use std::path::PathBuf;

use clap::Args;
use fatoora_core::normalize::parse_decimal;
use fatoora_core::payload::{generate_zatca_qr_report_in, QrPayloadReport};
use fatoora_core::validation::{DATE_FORMAT, TIME_FORMAT};
use fatoora_core::vat::split_inclusive;
use fatoora_core::VatRate;
use fatoora_render::{QrRenderConfig, QrRenderer};
use serde_json::json;
use tracing::warn;

use super::write_output;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{print_json, print_kv};

#[derive(Args)]
pub struct QrArgs {
    /// Seller name
    #[arg(long)]
    seller: String,
    /// VAT registration number (non-digits are ignored)
    #[arg(long = "vat-number")]
    vat_number: String,
    /// Invoice total including VAT
    #[arg(long)]
    total: String,
    /// VAT amount; derived from the total at the default rate when omitted
    #[arg(long = "vat-amount")]
    vat_amount: Option<String>,
    /// Invoice date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,
    /// Invoice time as HH:MM:SS (defaults to now)
    #[arg(long)]
    time: Option<String>,
    /// Write the QR image to this PNG file
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Image side in pixels (overrides qr_size_px)
    #[arg(long)]
    size: Option<u32>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: QrArgs, config: &CliConfig) -> Result<(), CliError> {
    let report = build_report(&args, config)?;
    warn_fallbacks(&report);

    if let Some(path) = &args.out {
        let size_px = args.size.unwrap_or(config.qr_size_px);
        let image = QrRenderer::new(QrRenderConfig::with_size(size_px)).render_payload(&report.payload)?;
        write_output(path, &image.png)?;
    }

    if args.json {
        print_json(&json!({
            "base64": report.payload.base64,
            "fields": report.fields,
            "fallbacks": {
                "total": report.total_fallback,
                "vatAmount": report.vat_fallback,
                "timestamp": report.timestamp_fallback,
            },
            "image": args.out.as_ref().map(|p| p.display().to_string()),
        }));
    } else {
        println!("{}", report.payload.base64);
        if let Some(path) = &args.out {
            print_kv("Image:", &path.display().to_string());
        }
    }
    Ok(())
}

fn build_report(args: &QrArgs, config: &CliConfig) -> Result<QrPayloadReport, CliError> {
    let now = config.timezone.now();
    let date = args
        .date
        .clone()
        .unwrap_or_else(|| now.format(DATE_FORMAT).to_string());
    let time = args
        .time
        .clone()
        .unwrap_or_else(|| now.format(TIME_FORMAT).to_string());
    let vat_amount = match &args.vat_amount {
        Some(amount) => amount.clone(),
        None => derive_vat_amount(&args.total, config.default_vat_rate),
    };

    let report = generate_zatca_qr_report_in(
        &config.timezone,
        &args.seller,
        &args.vat_number,
        &args.total,
        &vat_amount,
        &date,
        &time,
    )?;
    Ok(report)
}

/// VAT contained in a VAT-inclusive total. Empty when the total is not a
/// number, which the normalizer then reports as a fallback.
fn derive_vat_amount(total: &str, rate: VatRate) -> String {
    parse_decimal(total)
        .and_then(|total| split_inclusive(total, rate))
        .map(|breakdown| breakdown.vat.to_string())
        .unwrap_or_default()
}

fn warn_fallbacks(report: &QrPayloadReport) {
    if report.total_fallback {
        warn!(field = "total", "Amount is not a number; encoded as 0.00");
    }
    if report.vat_fallback {
        warn!(field = "vat_amount", "Amount is not a number; encoded as 0.00");
    }
    if report.timestamp_fallback {
        warn!(
            timestamp = %report.fields.timestamp,
            "Local time could not be converted to UTC; encoded unconverted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoneSetting;
    use chrono::FixedOffset;

    fn riyadh_config() -> CliConfig {
        CliConfig {
            timezone: ZoneSetting::Fixed(FixedOffset::east_opt(3 * 3600).unwrap()),
            ..CliConfig::default()
        }
    }

    fn args(vat_amount: Option<&str>) -> QrArgs {
        QrArgs {
            seller: "Acme".to_string(),
            vat_number: "123456789012345".to_string(),
            total: "115".to_string(),
            vat_amount: vat_amount.map(str::to_string),
            date: Some("2024-01-01".to_string()),
            time: Some("12:00:00".to_string()),
            out: None,
            size: None,
            json: false,
        }
    }

    #[test]
    fn test_report_uses_configured_zone() {
        let report = build_report(&args(Some("15")), &riyadh_config()).unwrap();
        assert_eq!(report.fields.timestamp, "2024-01-01T09:00:00Z");
        assert_eq!(report.fields.vat_amount, "15.00");
    }

    #[test]
    fn test_vat_amount_derived_from_total() {
        let report = build_report(&args(None), &riyadh_config()).unwrap();
        assert_eq!(report.fields.vat_amount, "15.00");
        assert!(!report.vat_fallback);
    }

    #[test]
    fn test_derive_vat_amount() {
        assert_eq!(derive_vat_amount("100", VatRate::from_bps(1500)), "13.04");
        assert_eq!(derive_vat_amount("abc", VatRate::from_bps(1500)), "");
    }

    #[test]
    fn test_bad_vat_number_is_validation_error() {
        let mut bad = args(Some("15"));
        bad.vat_number = "12345".to_string();
        let err = build_report(&bad, &riyadh_config()).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }
}

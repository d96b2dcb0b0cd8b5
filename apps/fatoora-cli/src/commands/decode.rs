//! `fatoora decode` -- Decode a scanned ZATCA QR payload.

use clap::Args;
use fatoora_core::{InvoiceQrFields, QrPayload};
use serde_json::json;

use crate::error::CliError;
use crate::output::{hex, print_json, print_kv};

#[derive(Args)]
pub struct DecodeArgs {
    /// Base64 text as read from the QR code
    payload: String,
    /// Also print the raw TLV bytes
    #[arg(long)]
    raw: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: DecodeArgs) -> Result<(), CliError> {
    let (payload, fields) = decode(&args.payload)?;

    if args.json {
        print_json(&json!({
            "fields": fields,
            "tlvHex": args.raw.then(|| hex(&payload.bytes)),
        }));
    } else {
        for (tag, value) in fields.tagged_values() {
            print_kv(&format!("{} ({}):", tag.label(), tag.code()), value);
        }
        if args.raw {
            print_kv("TLV:", &hex(&payload.bytes));
        }
    }
    Ok(())
}

fn decode(text: &str) -> Result<(QrPayload, InvoiceQrFields), CliError> {
    let payload = QrPayload::from_base64(text)?;
    let fields = payload.decode_fields()?;
    Ok((payload, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use fatoora_core::payload::generate_zatca_qr_payload_in;

    #[test]
    fn test_decode_generated_payload() {
        let payload = generate_zatca_qr_payload_in(
            &Utc,
            "Acme",
            "123456789012345",
            "115",
            "15",
            "2024-01-01",
            "12:00:00",
        )
        .unwrap();

        let (decoded, fields) = decode(&payload.base64).unwrap();
        assert_eq!(decoded.bytes, payload.bytes);
        assert_eq!(fields.seller_name, "Acme");
        assert_eq!(fields.total, "115.00");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("%%%").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPayload);

        // Valid base64 of a single tag-1 field
        let err = decode("AQRBY21l").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPayload);
    }
}

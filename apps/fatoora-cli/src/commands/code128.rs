//! `fatoora code128` -- Render a Code128 label.

use std::path::PathBuf;

use clap::Args;
use fatoora_core::barcode::BarcodeText;
use fatoora_render::render_code128;
use serde_json::json;

use super::write_output;
use crate::error::CliError;
use crate::output::{print_json, print_kv};

#[derive(Args)]
pub struct Code128Args {
    /// Text to encode; Arabic-Indic digits are transliterated
    text: String,
    /// PNG file to write
    #[arg(short, long)]
    out: PathBuf,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: Code128Args) -> Result<(), CliError> {
    let text = sanitize(&args.text)?;
    let image = render_code128(&text)?;
    write_output(&args.out, &image.png)?;

    if args.json {
        print_json(&json!({
            "text": text,
            "width": image.width,
            "height": image.height,
            "image": args.out.display().to_string(),
        }));
    } else {
        print_kv("Encoded:", text.as_str());
        print_kv("Image:", &args.out.display().to_string());
    }
    Ok(())
}

fn sanitize(raw: &str) -> Result<BarcodeText, CliError> {
    BarcodeText::sanitize(raw)
        .ok_or_else(|| CliError::validation("nothing left to encode after removing non-ASCII text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("\u{200f}١٢٣").unwrap().as_str(), "123");
        assert!(sanitize("مرحبا").is_err());
    }
}

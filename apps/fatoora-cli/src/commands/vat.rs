//! `fatoora vat` -- Split or add VAT.

use clap::Args;
use serde::Serialize;
use fatoora_core::normalize::parse_decimal;
use fatoora_core::vat::{add_exclusive, parse_vat_rate, split_inclusive, VatBreakdown};
use fatoora_core::{Money, VatRate};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{print_json, print_kv};

#[derive(Args)]
pub struct VatArgs {
    /// Amount; VAT-inclusive unless --exclusive is given
    amount: String,
    /// VAT rate in percent (defaults to default_vat_rate)
    #[arg(short, long)]
    rate: Option<String>,
    /// Treat the amount as net and add VAT on top
    #[arg(long)]
    exclusive: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON view of a breakdown, amounts as two-decimal text.
#[derive(Serialize)]
struct BreakdownJson {
    net: String,
    vat: String,
    total: String,
}

impl From<&VatBreakdown> for BreakdownJson {
    fn from(b: &VatBreakdown) -> Self {
        BreakdownJson {
            net: b.net.to_string(),
            vat: b.vat.to_string(),
            total: b.total.to_string(),
        }
    }
}

pub fn run(args: VatArgs, config: &CliConfig) -> Result<(), CliError> {
    let breakdown = calculate(&args, config.default_vat_rate)?;

    if args.json {
        print_json(&BreakdownJson::from(&breakdown));
    } else {
        print_kv("Net:", &breakdown.net.to_string());
        print_kv("VAT:", &breakdown.vat.to_string());
        print_kv("Total:", &breakdown.total.to_string());
    }
    Ok(())
}

fn calculate(args: &VatArgs, default_rate: VatRate) -> Result<VatBreakdown, CliError> {
    let rate = match &args.rate {
        Some(text) => parse_vat_rate(text)?,
        None => default_rate,
    };
    let amount = parse_decimal(&args.amount)
        .ok_or_else(|| CliError::validation(format!("amount '{}' is not a number", args.amount)))?;
    let out_of_range = || CliError::validation(format!("amount '{}' is out of range", args.amount));

    if args.exclusive {
        let net = Money::from_decimal_half_up(amount).ok_or_else(out_of_range)?;
        Ok(add_exclusive(net, rate))
    } else {
        split_inclusive(amount, rate).ok_or_else(out_of_range)
    }
}

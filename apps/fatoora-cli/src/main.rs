//! # fatoora
//!
//! Command line front end for the Fatoora Toolkit.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        fatoora CLI                                      │
//! │                                                                         │
//! │  args ──► config (defaults → fatoora.toml → FATOORA_*) ──► logging     │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │        qr │ decode │ vat │ code128 │ pdf-meta read|write                │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │              stdout (text or --json), files, exit status                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, ConfigError};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "fatoora", version, about = "ZATCA QR codes, VAT and invoice PDF tools")]
struct Cli {
    /// Configuration file (defaults to ./fatoora.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" (overrides log_level; RUST_LOG wins over both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Report failures as JSON on stderr
    #[arg(long = "json-errors", global = true)]
    json_errors: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a ZATCA QR payload (and optionally its image)
    Qr(commands::qr::QrArgs),
    /// Decode a scanned ZATCA QR payload
    Decode(commands::decode::DecodeArgs),
    /// Split a VAT-inclusive amount or add VAT to a net amount
    Vat(commands::vat::VatArgs),
    /// Render a Code128 label
    Code128(commands::code128::Code128Args),
    /// Read or replace PDF document metadata
    PdfMeta(commands::pdf_meta::PdfMetaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, json_errors);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));
    debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Qr(args) => commands::qr::run(args, &config),
        Commands::Decode(args) => commands::decode::run(args),
        Commands::Vat(args) => commands::vat::run(args, &config),
        Commands::Code128(args) => commands::code128::run(args),
        Commands::PdfMeta(args) => commands::pdf_meta::run(args),
    };
    result.map_err(anyhow::Error::from)
}

/// Initializes the logging system.
///
/// `RUST_LOG` takes precedence; otherwise `level` is used. Logs go to
/// stderr so stdout stays clean for payloads and JSON.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(err: &anyhow::Error, json: bool) {
    let cli_error = if let Some(cli_error) = err.downcast_ref::<CliError>() {
        cli_error.clone()
    } else if let Some(config_error) = err.downcast_ref::<ConfigError>() {
        CliError::from(config_error)
    } else {
        CliError::internal(format!("{:#}", err))
    };

    if json {
        eprintln!(
            "{}",
            serde_json::to_string(&cli_error).unwrap_or_else(|_| cli_error.message.clone())
        );
    } else {
        eprintln!("error[{}]: {}", cli_error.code, cli_error.message);
    }
}

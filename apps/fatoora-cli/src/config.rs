//! CLI configuration module.
//!
//! Settings are layered, later sources winning:
//!
//! ```text
//! built-in defaults ──► fatoora.toml (or --config <file>) ──► FATOORA_* env vars
//! ```
//!
//! | Key                | Default | Env var                    |
//! |--------------------|---------|----------------------------|
//! | `timezone`         | `local` | `FATOORA_TIMEZONE`         |
//! | `default_vat_rate` | `15`    | `FATOORA_DEFAULT_VAT_RATE` |
//! | `qr_size_px`       | `640`   | `FATOORA_QR_SIZE_PX`       |
//! | `log_level`        | `warn`  | `FATOORA_LOG_LEVEL`        |

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use fatoora_core::normalize::LocalZone;
use fatoora_core::validation::validate_vat_rate_bps;
use fatoora_core::vat::parse_vat_rate;
use fatoora_core::VatRate;
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "fatoora";

/// Where invoice dates and times are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSetting {
    /// The system local zone, with its DST rules.
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl ZoneSetting {
    /// Current wall-clock reading in this zone.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            ZoneSetting::Local => Local::now().naive_local(),
            ZoneSetting::Fixed(offset) => Utc::now().with_timezone(offset).naive_local(),
        }
    }
}

impl LocalZone for ZoneSetting {
    fn resolve_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            ZoneSetting::Local => Local.resolve_utc(local),
            ZoneSetting::Fixed(offset) => offset.resolve_utc(local),
        }
    }
}

impl FromStr for ZoneSetting {
    type Err = ConfigError;

    /// Accepts `local`, `utc`, `Z`, `+03:00`, `-0530` or `+03`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue(format!("timezone '{}'", s));
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(ZoneSetting::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return FixedOffset::east_opt(0).map(ZoneSetting::Fixed).ok_or_else(invalid);
        }

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if !digits.bytes().all(|b| b.is_ascii_digit()) || !(digits.len() == 2 || digits.len() == 4) {
            return Err(invalid());
        }

        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = match digits.get(2..4) {
            Some(m) => m.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(ZoneSetting::Fixed)
            .ok_or_else(invalid)
    }
}

/// Settings as they appear in files and the environment.
#[derive(Debug, Deserialize)]
struct RawConfig {
    timezone: String,
    default_vat_rate: String,
    qr_size_px: u32,
    log_level: String,
}

/// Validated CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub timezone: ZoneSetting,
    pub default_vat_rate: VatRate,
    pub qr_size_px: u32,
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            timezone: ZoneSetting::Local,
            default_vat_rate: VatRate::default(),
            qr_size_px: 640,
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads defaults, then the config file, then `FATOORA_*` variables.
    ///
    /// An explicit `path` must exist; the default `fatoora.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = CliConfig::default();
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let raw: RawConfig = config::Config::builder()
            .set_default("timezone", "local")?
            .set_default("default_vat_rate", "15")?
            .set_default("qr_size_px", i64::from(defaults.qr_size_px))?
            .set_default("log_level", defaults.log_level.as_str())?
            .add_source(file)
            .add_source(config::Environment::with_prefix("FATOORA"))
            .build()?
            .try_deserialize()?;

        CliConfig::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let timezone = raw.timezone.parse()?;
        let default_vat_rate = parse_vat_rate(&raw.default_vat_rate)
            .and_then(|rate| validate_vat_rate_bps(i64::from(rate.bps())).map(VatRate::from_bps))
            .map_err(|e| {
                ConfigError::InvalidValue(format!("default_vat_rate '{}': {}", raw.default_vat_rate, e))
            })?;

        // Below this a version 14 symbol has less than one pixel per module
        if raw.qr_size_px < 81 {
            return Err(ConfigError::InvalidValue(format!(
                "qr_size_px {} is smaller than the 81-module symbol",
                raw.qr_size_px
            )));
        }

        Ok(CliConfig {
            timezone,
            default_vat_rate,
            qr_size_px: raw.qr_size_px,
            log_level: raw.log_level,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

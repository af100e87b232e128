//! User settings for ledgerlens
//!
//! Persisted as `config.json` in the base directory. Every field has a
//! default so older or hand-written files keep loading.

use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::paths::LensPaths;
use crate::analytics::NetSeriesTransfers;
use crate::error::LensError;
use crate::models::{BoundaryMode, DateRange};

/// Range applied when the command line gives none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefaultRange {
    /// No filtering
    #[default]
    All,
    /// January 1st to December 31st of the current year
    CurrentYear,
}

impl DefaultRange {
    /// Resolve to a concrete selection for today
    pub fn resolve(&self) -> Option<DateRange> {
        match self {
            Self::All => None,
            Self::CurrentYear => DateRange::calendar_year(chrono::Local::now().year()),
        }
    }
}

/// Keys accepted by `Settings::set`
pub const SETTING_KEYS: &[&str] = &[
    "currency_symbol",
    "boundary_mode",
    "net_series_transfers",
    "transfer_match_window_days",
    "default_range",
    "comparison_label",
];

/// User settings for ledgerlens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How range bounds match transaction dates
    #[serde(default)]
    pub boundary_mode: BoundaryMode,

    /// Whether transfer legs count toward the monthly net series
    #[serde(default)]
    pub net_series_transfers: NetSeriesTransfers,

    /// Max days between the two legs of a transfer candidate
    #[serde(default = "default_transfer_window")]
    pub transfer_match_window_days: i64,

    /// Range used when none is given
    #[serde(default)]
    pub default_range: DefaultRange,

    /// Label of the expense comparison reference window
    #[serde(default = "default_comparison_label")]
    pub comparison_label: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_transfer_window() -> i64 {
    3
}

fn default_comparison_label() -> String {
    "previous period".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            boundary_mode: BoundaryMode::default(),
            net_series_transfers: NetSeriesTransfers::default(),
            transfer_match_window_days: default_transfer_window(),
            default_range: DefaultRange::default(),
            comparison_label: default_comparison_label(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LensPaths) -> Result<Self, LensError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            tracing::debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LensError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LensError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LensPaths) -> Result<(), LensError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LensError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LensError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Update one setting from its textual form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LensError> {
        let value = value.trim();
        let invalid = |expected: &str| {
            LensError::Validation(format!(
                "Invalid value '{}' for {}: expected {}",
                value, key, expected
            ))
        };

        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "boundary_mode" => {
                self.boundary_mode =
                    parse_choice(value).ok_or_else(|| invalid("inclusive_days or exclusive"))?
            }
            "net_series_transfers" => {
                self.net_series_transfers =
                    parse_choice(value).ok_or_else(|| invalid("exclude or include"))?
            }
            "transfer_match_window_days" => {
                self.transfer_match_window_days = value
                    .parse()
                    .map_err(|_| invalid("a whole number of days"))?
            }
            "default_range" => {
                self.default_range =
                    parse_choice(value).ok_or_else(|| invalid("all or current_year"))?
            }
            "comparison_label" if !value.is_empty() => self.comparison_label = value.to_string(),
            "comparison_label" => return Err(invalid("a non-empty label")),
            other => {
                return Err(LensError::Validation(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    other,
                    SETTING_KEYS.join(", ")
                )))
            }
        }

        self.validate()
    }

    /// Reject values the analytics cannot use
    pub fn validate(&self) -> Result<(), LensError> {
        if self.transfer_match_window_days < 0 {
            return Err(LensError::Config(format!(
                "transfer_match_window_days must not be negative (got {})",
                self.transfer_match_window_days
            )));
        }
        Ok(())
    }
}

/// Parse a snake_case enum value the same way the settings file does
fn parse_choice<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.boundary_mode, BoundaryMode::InclusiveDays);
        assert_eq!(settings.net_series_transfers, NetSeriesTransfers::Exclude);
        assert_eq!(settings.transfer_match_window_days, 3);
        assert_eq!(settings.default_range, DefaultRange::All);
        assert_eq!(settings.currency_symbol, "€");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.boundary_mode = BoundaryMode::Exclusive;
        settings.default_range = DefaultRange::CurrentYear;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.boundary_mode, BoundaryMode::Exclusive);
        assert_eq!(loaded.default_range, DefaultRange::CurrentYear);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{ "net_series_transfers": "include", "currency_symbol": "$" }"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.net_series_transfers, NetSeriesTransfers::Include);
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.transfer_match_window_days, 3);
    }

    #[test]
    fn test_negative_window_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LensPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{ "transfer_match_window_days": -1 }"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LensError::Config(_))
        ));
    }

    #[test]
    fn test_default_range_resolution() {
        assert_eq!(DefaultRange::All.resolve(), None);
        let year = DefaultRange::CurrentYear.resolve().unwrap();
        assert_eq!(year.start().year(), chrono::Local::now().year());
        assert!(year.span_days() >= 364);
    }

    #[test]
    fn test_set_values() {
        let mut settings = Settings::default();
        settings.set("boundary_mode", "exclusive").unwrap();
        settings.set("net_series_transfers", " include ").unwrap();
        settings.set("transfer_match_window_days", "5").unwrap();
        settings.set("default_range", "current_year").unwrap();
        settings.set("currency_symbol", "$").unwrap();

        assert_eq!(settings.boundary_mode, BoundaryMode::Exclusive);
        assert_eq!(settings.net_series_transfers, NetSeriesTransfers::Include);
        assert_eq!(settings.transfer_match_window_days, 5);
        assert_eq!(settings.default_range, DefaultRange::CurrentYear);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(settings.set("boundary_mode", "sideways").unwrap_err().is_validation());
        assert!(settings.set("transfer_match_window_days", "three").is_err());
        assert!(settings.set("transfer_match_window_days", "-2").is_err());
        assert!(settings.set("comparison_label", "  ").is_err());

        let err = settings.set("colour", "blue").unwrap_err();
        assert!(err.to_string().contains("currency_symbol"));
    }
}

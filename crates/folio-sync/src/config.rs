//! # Sync Configuration
//!
//! Settings for the catalog sync engine: settlement currency, fallback
//! exchange rate, sale channel state and the download validity window.
//!
//! ## Persistence
//! Settings load from a TOML file. The default location follows the
//! platform config directory convention; every field has a default so an
//! empty file (or no file at all) yields a working configuration.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;

use folio_core::PriceConverter;

use crate::error::{SyncError, SyncResult};

/// Fallback exchange rate applied when a publication carries none.
const DEFAULT_EXCHANGE_RATE: f64 = 6.96;

/// Currency prices settle in; amounts already in it are never converted.
const DEFAULT_SETTLEMENT_CURRENCY: &str = "BOB";

/// Channel state reported to the rights service for every sale.
const DEFAULT_SALE_STATE: &str = "test";

/// Seconds a sale token stays exchangeable for a download URL.
const DEFAULT_DOWNLOAD_WINDOW_SECS: i64 = 300;

/// Sync engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Fallback exchange rate for publications without a recorded one.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,

    /// Settlement currency; prices listed in it pass through unconverted.
    #[serde(default = "default_settlement_currency")]
    pub settlement_currency: String,

    /// Sale channel state forwarded to the rights service.
    #[serde(default = "default_sale_state")]
    pub sale_state: String,

    /// Download validity window in seconds, counted from sale creation.
    #[serde(default = "default_download_window_secs")]
    pub download_window_secs: i64,
}

fn default_exchange_rate() -> f64 {
    DEFAULT_EXCHANGE_RATE
}

fn default_settlement_currency() -> String {
    DEFAULT_SETTLEMENT_CURRENCY.to_string()
}

fn default_sale_state() -> String {
    DEFAULT_SALE_STATE.to_string()
}

fn default_download_window_secs() -> i64 {
    DEFAULT_DOWNLOAD_WINDOW_SECS
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            exchange_rate: default_exchange_rate(),
            settlement_currency: default_settlement_currency(),
            sale_state: default_sale_state(),
            download_window_secs: default_download_window_secs(),
        }
    }
}

impl SyncSettings {
    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> SyncResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(SyncSettings::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let settings: SyncSettings = toml::from_str(&raw)?;
        settings.validate()?;
        info!(path = %path.display(), "loaded sync configuration");
        Ok(settings)
    }

    /// Save settings to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> SyncResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        Ok(())
    }

    /// Platform-conventional config file location.
    pub fn default_path() -> SyncResult<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "folio", "folio").ok_or_else(|| {
            SyncError::ConfigLoadFailed("could not determine config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("sync.toml"))
    }

    /// Reject settings that cannot drive a sync run.
    pub fn validate(&self) -> SyncResult<()> {
        if self.exchange_rate <= 0.0 || !self.exchange_rate.is_finite() {
            return Err(SyncError::InvalidConfig(format!(
                "exchange_rate must be a positive number, got {}",
                self.exchange_rate
            )));
        }
        if self.settlement_currency.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "settlement_currency must not be empty".to_string(),
            ));
        }
        if self.download_window_secs <= 0 {
            return Err(SyncError::InvalidConfig(format!(
                "download_window_secs must be positive, got {}",
                self.download_window_secs
            )));
        }
        Ok(())
    }

    /// Price converter derived from these settings.
    pub fn converter(&self) -> PriceConverter {
        PriceConverter::new(self.exchange_rate, &self.settlement_currency)
    }

    /// Download validity window as a duration.
    pub fn download_window(&self) -> Duration {
        Duration::seconds(self.download_window_secs)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.exchange_rate, 6.96);
        assert_eq!(settings.settlement_currency, "BOB");
        assert_eq!(settings.sale_state, "test");
        assert_eq!(settings.download_window_secs, 300);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = SyncSettings::load(Path::new("/nonexistent/sync.toml")).unwrap();
        assert_eq!(settings.settlement_currency, "BOB");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let settings: SyncSettings = toml::from_str("exchange_rate = 7.1").unwrap();
        assert_eq!(settings.exchange_rate, 7.1);
        assert_eq!(settings.sale_state, "test");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sync.toml");

        let mut settings = SyncSettings::default();
        settings.exchange_rate = 6.86;
        settings.save(&path).unwrap();

        let reloaded = SyncSettings::load(&path).unwrap();
        assert_eq!(reloaded.exchange_rate, 6.86);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = SyncSettings::default();
        settings.exchange_rate = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = SyncSettings::default();
        settings.settlement_currency = "  ".to_string();
        assert!(settings.validate().is_err());

        let mut settings = SyncSettings::default();
        settings.download_window_secs = 0;
        assert!(settings.validate().is_err());
    }
}

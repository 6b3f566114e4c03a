//! Configuration types for the zonesync system
//!
//! This module defines the configuration structure shared by the daemon
//! and the library crates.

use serde::{Deserialize, Serialize};

/// Main zonesync configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Log level name (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Interval expression between reconciliation cycles
    ///
    /// Either a bare number of seconds ("300") or a number with an
    /// `s`, `m`, or `h` suffix ("30s", "5m", "2h"). The expression is
    /// parsed by the scheduler, not here, so a malformed value only
    /// surfaces when the schedule starts.
    pub interval: String,

    /// Name of the DNS zone whose records are managed
    pub zone_name: String,

    /// Cloudflare API token
    pub api_token: String,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("log_level", &self.log_level)
            .field("interval", &self.interval)
            .field("zone_name", &self.zone_name)
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl SyncConfig {
    /// Validate the configuration
    ///
    /// Only the log level is validated up front. The zone name is passed
    /// through as-is (an unknown zone simply never matches), the API token
    /// is checked by the provider when it is constructed, and the interval
    /// expression is checked by the scheduler.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(crate::Error::config(format!(
                "invalid log level: {:?} (valid: trace, debug, info, warn, error)",
                self.log_level
            )));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_level(level: &str) -> SyncConfig {
        SyncConfig {
            log_level: level.to_string(),
            interval: "300".to_string(),
            zone_name: "example.com".to_string(),
            api_token: "token".to_string(),
        }
    }

    #[test]
    fn test_valid_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            assert!(config_with_level(level).validate().is_ok(), "{}", level);
        }
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        assert!(config_with_level("verbose").validate().is_err());
        assert!(config_with_level("").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_token() {
        let config = SyncConfig {
            log_level: "info".to_string(),
            interval: "300".to_string(),
            zone_name: "example.com".to_string(),
            api_token: "secret_token_12345".to_string(),
        };

        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("<REDACTED>"));
        assert!(debug_str.contains("example.com"));
    }

    #[test]
    fn test_deserialize_defaults_log_level() {
        let json = r#"{
            "interval": "5m",
            "zone_name": "example.com",
            "api_token": "token"
        }"#;

        let config: SyncConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.log_level, "info");
    }
}

//! Typed runtime configuration loaded from TOML.

use std::{fs, path::Path};

use platform_host::AssetResolver;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_CONFIG: &str = include_str!("../desktop.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse runtime config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid runtime config: {0}")]
    Invalid(String),
}

/// Shell identity, phase timings, and notification settings.
///
/// Every field is optional in the TOML source; omitted keys keep the values from
/// [`RuntimeConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub app_name: String,
    pub app_version: String,
    pub asset_base_path: String,
    pub boot_dwell_ms: u32,
    pub welcome_dwell_ms: u32,
    pub fade_ms: u32,
    pub toast_show_delay_ms: u32,
    pub toast_auto_close_ms: u32,
    pub toast_reshow_auto_close_ms: u32,
    pub notification_sound: String,
    pub notification_volume: f64,
    pub window_stack_base: u32,
    /// Lasso width/height (pixels) that must be exceeded before it counts as a drag.
    pub drag_threshold_px: i32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            app_name: "PortfolioOS".to_string(),
            app_version: "1.5".to_string(),
            asset_base_path: "/".to_string(),
            boot_dwell_ms: 5_500,
            welcome_dwell_ms: 1_800,
            fade_ms: 350,
            toast_show_delay_ms: 3_000,
            toast_auto_close_ms: 5_000,
            toast_reshow_auto_close_ms: 4_500,
            notification_sound: "/sound/pop.mp3".to_string(),
            notification_volume: 0.45,
            window_stack_base: 21,
            drag_threshold_px: 2,
        }
    }
}

impl RuntimeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Configuration bundled into the binary at build time.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::Invalid("app_name must not be empty".to_string()));
        }
        if self.fade_ms == 0 {
            return Err(ConfigError::Invalid("fade_ms must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.notification_volume) {
            return Err(ConfigError::Invalid(format!(
                "notification_volume must be within 0.0..=1.0, got {}",
                self.notification_volume
            )));
        }
        if self.drag_threshold_px < 0 {
            return Err(ConfigError::Invalid(
                "drag_threshold_px must not be negative".to_string(),
            ));
        }
        if self.window_stack_base == 0 {
            return Err(ConfigError::Invalid(
                "window_stack_base must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn asset_resolver(&self) -> AssetResolver {
        AssetResolver::new(self.asset_base_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_config_matches_defaults() {
        let config = RuntimeConfig::embedded().expect("embedded config");
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn omitted_keys_keep_defaults() {
        let config = RuntimeConfig::from_toml_str("fade_ms = 10\napp_name = \"TestOS\"\n")
            .expect("config");
        assert_eq!(config.fade_ms, 10);
        assert_eq!(config.app_name, "TestOS");
        assert_eq!(config.boot_dwell_ms, 5_500);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RuntimeConfig::from_toml_str("fade = 10\n").expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_volume_is_invalid() {
        let err =
            RuntimeConfig::from_toml_str("notification_volume = 1.5\n").expect_err("volume");
        assert!(err.to_string().contains("notification_volume"));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("portfolio-os-missing-config.toml");
        let err = RuntimeConfig::load(&path).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("portfolio-os-missing-config.toml"));
    }
}

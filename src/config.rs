//! User configuration

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Settings read from the user's config file at startup.
///
/// Everything is optional; a missing or unreadable file means defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Catalog daemon address, overridden by `LINKDECK_CATALOG_ADDRESS`
    pub catalog_address: Option<String>,
    /// Section slug the sidebar starts on
    pub default_section: Option<String>,
    /// Route restored when none is given on the command line
    pub start_route: Option<String>,
}

impl TuiConfig {
    fn path() -> Option<PathBuf> {
        ProjectDirs::from("io", "linkdeck", "linkdeck")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Read the config file. Missing file means defaults; a malformed file
    /// is reported and skipped, never fatal.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!("ignoring malformed config {}: {err}", path.display());
                Self::default()
            }),
            Err(err) => {
                tracing::warn!("could not read config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write the config file, creating the directory on first save
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("no config directory for this platform")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_all_unset() {
        let config = TuiConfig::default();
        assert!(config.catalog_address.is_none());
        assert!(config.default_section.is_none());
        assert!(config.start_route.is_none());
    }

    #[test]
    fn test_round_trip() {
        let config = TuiConfig {
            catalog_address: Some("http://localhost:50161".to_string()),
            default_section: Some("reports".to_string()),
            start_route: Some("view=dashboard".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.catalog_address, config.catalog_address);
        assert_eq!(parsed.default_section, config.default_section);
        assert_eq!(parsed.start_route, config.start_route);
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let parsed: TuiConfig =
            serde_json::from_str(r#"{"default_section": "reports"}"#).unwrap();
        assert_eq!(parsed.default_section, Some("reports".to_string()));
        assert!(parsed.catalog_address.is_none());
        assert!(parsed.start_route.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let parsed: TuiConfig =
            serde_json::from_str(r#"{"start_route": "q=x", "theme": "dark"}"#).unwrap();
        assert_eq!(parsed.start_route, Some("q=x".to_string()));
    }
}

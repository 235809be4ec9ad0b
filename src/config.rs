use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The vendor API key is read only from this variable, never from the
/// config file.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_vendor_timeout_secs")]
    pub vendor_timeout_secs: u64,
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_temperature() -> f64 {
    0.9
}

fn default_vendor_timeout_secs() -> u64 {
    75
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base: default_api_base(),
            model: default_model(),
            temperature: default_temperature(),
            vendor_timeout_secs: default_vendor_timeout_secs(),
            api_key: None,
        }
    }
}

impl Settings {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Loads settings from the given file (or defaults) and the API key from
    /// the environment.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Ok(settings)
    }

    pub fn vendor_timeout(&self) -> Duration {
        Duration::from_secs(self.vendor_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model, "gemini-2.0-flash-exp");
        assert_eq!(settings.temperature, 0.9);
        assert_eq!(settings.vendor_timeout(), Duration::from_secs(75));
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_from_file_overrides_and_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model: gemini-2.5-flash-image").unwrap();
        writeln!(file, "vendor_timeout_secs: 60").unwrap();

        let settings = Settings::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.model, "gemini-2.5-flash-image");
        assert_eq!(settings.vendor_timeout_secs, 60);
        // Unspecified fields keep their defaults
        assert_eq!(settings.api_base, default_api_base());
        assert_eq!(settings.temperature, 0.9);
    }

    #[test]
    fn test_from_file_missing_path_fails() {
        assert!(Settings::from_file("/nonexistent/config.yaml").is_err());
    }

    #[test]
    fn test_api_key_never_comes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: sneaky").unwrap();
        writeln!(file, "model: gemini-2.0-flash-exp").unwrap();

        let settings = Settings::from_file(file.path().to_str().unwrap()).unwrap();
        assert!(settings.api_key.is_none());
    }
}

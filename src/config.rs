use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::greeting::DEFAULT_NAME;
use crate::content::weather::DEFAULT_LOCATION;
use crate::store::DashboardOptions;
use crate::timer::breathing::PATTERNS;
use crate::timer::focus::{DEFAULT_FOCUS_MINUTES, FOCUS_DURATIONS};
use crate::utils::paths::get_config_path;

pub const DEFAULT_API_PORT: u16 = 48373;

pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const HUGGINGFACE_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

/// Credentials and tuning for the optional AI companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub huggingface_api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            huggingface_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_focus_minutes")]
    pub default_focus_minutes: u32,

    #[serde(default = "default_breathing_pattern")]
    pub breathing_pattern: String,

    #[serde(default = "default_api_port")]
    pub api_port: u16,

    #[serde(default)]
    pub ai: AiConfig,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_focus_minutes() -> u32 {
    DEFAULT_FOCUS_MINUTES
}

fn default_breathing_pattern() -> String {
    PATTERNS[0].key.to_string()
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            location: default_location(),
            default_focus_minutes: default_focus_minutes(),
            breathing_pattern: default_breathing_pattern(),
            api_port: default_api_port(),
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    /// Load `~/.daily-companion/config.toml`, then apply env var overrides.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Non-empty API keys from the environment win over the file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(OPENAI_KEY_ENV) {
            self.ai.openai_api_key = Some(key);
        }
        if let Some(key) = non_empty(HUGGINGFACE_KEY_ENV) {
            self.ai.huggingface_api_key = Some(key);
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }

    /// The configured focus length, or the default if it is not one the timer
    /// supports.
    pub fn focus_minutes(&self) -> u32 {
        if FOCUS_DURATIONS.contains(&self.default_focus_minutes) {
            self.default_focus_minutes
        } else {
            DEFAULT_FOCUS_MINUTES
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.name, "Friend");
        assert_eq!(config.location, "Your City");
        assert_eq!(config.default_focus_minutes, 25);
        assert_eq!(config.breathing_pattern, "4-7-8");
        assert_eq!(config.api_port, 48373);
        assert_eq!(config.ai.model, "gpt-3.5-turbo");
        assert_eq!(config.ai.timeout_secs, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("name"));
        assert!(toml_str.contains("[ai]"));
        assert!(!toml_str.contains("openai_api_key"));
    }

    #[test]
    fn test_config_deserialization_fills_defaults() {
        let toml_str = r#"
            name = "Ada"

            [ai]
            openai_api_key = "sk-test"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.name, "Ada");
        assert_eq!(config.location, "Your City");
        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.ai.timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            name: "Sam".to_string(),
            default_focus_minutes: 45,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "name = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides_keys() {
        let env: HashMap<&str, &str> = [
            (OPENAI_KEY_ENV, "sk-env"),
            (HUGGINGFACE_KEY_ENV, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.ai.huggingface_api_key = Some("hf-file".to_string());
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.ai.huggingface_api_key.as_deref(), Some("hf-file"));
    }

    #[test]
    fn test_unsupported_focus_minutes_fall_back() {
        let config = Config {
            default_focus_minutes: 20,
            ..Config::default()
        };
        assert_eq!(config.focus_minutes(), 25);
    }

    #[test]
    #[serial]
    fn test_load_reads_home_config() {
        let home = TempDir::new().unwrap();
        let original_home = std::env::var_os("HOME");
        // SAFETY: serialized with the other HOME-dependent tests.
        unsafe { std::env::set_var("HOME", home.path()) };

        let config = Config {
            location: "Reykjavik".to_string(),
            ..Config::default()
        };
        config.save().unwrap();
        let loaded = Config::load().unwrap();

        match original_home {
            Some(value) => unsafe { std::env::set_var("HOME", value) },
            None => unsafe { std::env::remove_var("HOME") },
        }

        assert_eq!(loaded.location, "Reykjavik");
        assert_eq!(loaded.dashboard_options().location, "Reykjavik");
        assert!(home.path().join(".daily-companion/config.toml").exists());
    }
}

//! Configuration management for srr.
//!
//! Configuration is read from `~/.config/srr/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;

pub use colors::UiConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::reddit::DEFAULT_BASE_URL;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reddit: RedditConfig,
    pub ui: UiConfig,
}

/// Settings for talking to Reddit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
    pub default_topics: Vec<String>,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            page_size: 25,
            default_topics: vec!["news".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/srr/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("srr").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# srr configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB"

[reddit]
# Base URL for Reddit's public JSON endpoints
base_url = "https://www.reddit.com"

# Request timeout in seconds
timeout_secs = 10

# Entries per listing page
page_size = 25

# Topics shown before any are saved
default_topics = ["news"]

[ui]
# Border colors
active_border = "Cyan"
inactive_border = "DarkGray"

# Selection highlight
selection_bg = "Cyan"
selection_fg = "Black"

# Feed section headers
topic_header = "Yellow"

# Post metadata (author, comments, age)
post_meta = "DarkGray"

# Topics already saved to the feed
saved_topic = "Green"

# Post links
link = "Blue"

# Failed query rows
error_fg = "Red"

# Status bar
status_fg = "White"
status_bg = "DarkGray"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.reddit.base_url, "https://www.reddit.com");
        assert_eq!(config.reddit.page_size, 25);
        assert_eq!(config.reddit.default_topics, vec!["news"]);
        assert_eq!(config.ui.active_border, ratatui::style::Color::Cyan);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[reddit]
page_size = 10

[ui]
active_border = "#FF0000"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom values
        assert_eq!(config.reddit.page_size, 10);
        assert_eq!(
            config.ui.active_border,
            ratatui::style::Color::Rgb(255, 0, 0)
        );
        // Default values
        assert_eq!(config.reddit.timeout_secs, 10);
        assert_eq!(config.ui.inactive_border, ratatui::style::Color::DarkGray);
    }

    #[test]
    fn test_empty_config() {
        let content = "";
        let config: Config = toml::from_str(content).expect("Empty config should work");

        assert_eq!(config.reddit.base_url, "https://www.reddit.com");
        assert_eq!(config.reddit.default_topics, vec!["news"]);
    }
}

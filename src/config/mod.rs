//! Configuration management for about-harvest.
//!
//! Configuration is read from `~/.config/about-harvest/config.toml` (or the
//! path given with `--config`). If the default file doesn't exist, a default
//! configuration with comments is created.

use crate::classifier::ClassifierConfig;
use crate::orchestrator::RunConfig;
use crate::scraper::ScraperConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub classifier: ClassifierConfig,
    pub run: RunConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the default config file doesn't exist, creates one with comments.
    /// An explicit path that doesn't exist is an error.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/about-harvest/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("about-harvest").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    ///
    /// Keyword and selector tables are left out; their built-in values apply
    /// unless a list is given here.
    fn default_config_content() -> String {
        r##"# about-harvest configuration
#
# Every key is optional. Lists such as content_selectors, phrases or
# irrelevant_keywords replace the built-in list entirely when given.

[scraper]
# Run Chrome without a visible window
headless = true

# Page load timeout in seconds
page_load_timeout_secs = 20

# How long to wait for the document to finish loading, in seconds
ready_timeout_secs = 15

# Extracted text shorter than this (in characters) triggers about-page discovery
min_content_length = 50

# Characters of page source kept in the debug log after a driver error
page_source_snippet_chars = 500

# Browser UI language
lang = "en-US"

# Path to Chrome/Chromium; autodetected when unset
# chrome_executable = "/usr/bin/chromium"

# CSS selectors to try for about content (in priority order)
# content_selectors = ["section.about", "div#about", "main", "article"]

[classifier]
# Score at or above which text counts as a usable about page
threshold = 2.0

# Character floor for the minimum-length signal
min_content_length = 50

[classifier.weights]
min_content_length_met = 1.5
has_about_section = 1.5
has_about_link = 0.5
phrase_match = 0.7
keyword_match = 0.3
irrelevant_keyword_penalty = -0.5
url_contains_about = 0.7

[run]
# Records per batch
batch_size = 50

# Pause after every scrape attempt, in seconds
request_delay_secs = 5

# Pause between batches, in seconds
batch_delay_secs = 60

# Hard wall-clock limit per attempt, in seconds
process_timeout_secs = 300

# "process" runs each attempt in a child process, "task" in this process
isolation = "process"
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

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

use anyhow::{Context, Result};
use china_holidays_core::sources::statutory::{DEFAULT_FEED_TIMEOUT, DEFAULT_FEED_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional config file, looked up in the working directory
pub const CONFIG_FILE: &str = "holidays.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Where the generated .ics file is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// CSV table of fixed Gregorian holidays
    #[serde(default = "default_fixed_holidays_path")]
    pub fixed_holidays_path: PathBuf,

    /// CSV table of lunar festivals
    #[serde(default = "default_lunar_holidays_path")]
    pub lunar_holidays_path: PathBuf,

    /// Statutory holiday feed URL, with a `{year}` placeholder
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    #[serde(default = "default_feed_timeout_secs")]
    pub feed_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_path: default_output_path(),
            fixed_holidays_path: default_fixed_holidays_path(),
            lunar_holidays_path: default_lunar_holidays_path(),
            feed_url: default_feed_url(),
            feed_timeout_secs: default_feed_timeout_secs(),
        }
    }
}

impl Config {
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("holidays.ics")
}

fn default_fixed_holidays_path() -> PathBuf {
    PathBuf::from("data/fixed_holidays.csv")
}

fn default_lunar_holidays_path() -> PathBuf {
    PathBuf::from("data/lunar_holidays.csv")
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_feed_timeout_secs() -> u64 {
    DEFAULT_FEED_TIMEOUT.as_secs()
}

/// Load config from ./holidays.toml, falling back to defaults if it doesn't exist
pub fn load_config() -> Result<Config> {
    load_config_from(Path::new(CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    if !config.feed_url.contains("{year}") {
        anyhow::bail!(
            "feed_url in {} must contain a {{year}} placeholder, got: {}",
            path.display(),
            config.feed_url
        );
    }

    if config.feed_timeout_secs == 0 {
        anyhow::bail!("feed_timeout_secs in {} must be greater than 0", path.display());
    }

    Ok(config)
}

//! The [`Config`] struct and its builder-style helpers.

use crate::defaults;
use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Explorer configuration, stored as YAML at `~/.config/fontpair/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the font catalog is read from: an `http(s)://` URL or a local JSON file.
    #[serde(default = "defaults::catalog_source")]
    pub catalog_source: String,

    /// Number of fonts appended to a list per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Remaining scroll distance (px) below which the next page is requested
    #[serde(default = "defaults::load_more_distance")]
    pub load_more_distance: f32,

    /// Delay between requesting a page and appending it
    #[serde(default = "defaults::load_more_delay_ms")]
    pub load_more_delay_ms: u64,

    /// Minimum query length before a list switches to cross-category search
    #[serde(default = "defaults::search_min_chars")]
    pub search_min_chars: usize,

    /// Quiet period after the last keystroke before search results load their assets
    #[serde(default = "defaults::search_debounce_ms")]
    pub search_debounce_ms: u64,

    #[serde(default = "defaults::scroll_idle_ms")]
    pub scroll_idle_ms: u64,

    /// Delay before scrolling a restored selection into view
    #[serde(default = "defaults::restore_scroll_delay_ms")]
    pub restore_scroll_delay_ms: u64,

    #[serde(default = "defaults::max_asset_bytes")]
    pub max_asset_bytes: u64,

    #[serde(default = "defaults::max_catalog_bytes")]
    pub max_catalog_bytes: u64,

    /// Verbosity of the debug log file
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_source: defaults::catalog_source(),
            page_size: defaults::page_size(),
            load_more_distance: defaults::load_more_distance(),
            load_more_delay_ms: defaults::load_more_delay_ms(),
            search_min_chars: defaults::search_min_chars(),
            search_debounce_ms: defaults::search_debounce_ms(),
            scroll_idle_ms: defaults::scroll_idle_ms(),
            restore_scroll_delay_ms: defaults::restore_scroll_delay_ms(),
            max_asset_bytes: defaults::max_asset_bytes(),
            max_catalog_bytes: defaults::max_catalog_bytes(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog source (URL or path)
    pub fn with_catalog_source(mut self, source: impl Into<String>) -> Self {
        self.catalog_source = source.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn load_more_delay(&self) -> Duration {
        Duration::from_millis(self.load_more_delay_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn scroll_idle(&self) -> Duration {
        Duration::from_millis(self.scroll_idle_ms)
    }

    pub fn restore_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.restore_scroll_delay_ms)
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Validation(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.catalog_source.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog_source must not be empty".to_string(),
            ));
        }
        if !self.load_more_distance.is_finite() || self.load_more_distance < 0.0 {
            return Err(ConfigError::Validation(format!(
                "load_more_distance must be a non-negative number, got {}",
                self.load_more_distance
            )));
        }
        Ok(())
    }
}

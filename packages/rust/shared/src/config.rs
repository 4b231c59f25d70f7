//! Application configuration for the Congreso normalizers.
//!
//! User config lives at `~/.congreso/congreso.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use scraper::Selector;
use url::Url;

use crate::error::{CongresoError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "congreso.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".congreso";

// ---------------------------------------------------------------------------
// Config structs (matching congreso.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listing payload settings.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Detail page settings.
    #[serde(default)]
    pub detail: DetailConfig,
}

/// `[listing]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Records per listing page, used to derive the page count.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    25
}

/// `[detail]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailConfig {
    /// Base against which relative links in detail pages are resolved.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// CSS selector of the element that scopes one initiative.
    #[serde(default = "default_container_selector")]
    pub container_selector: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            container_selector: default_container_selector(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.congreso.es".into()
}
fn default_container_selector() -> String {
    ".iniciativa".into()
}

// ---------------------------------------------------------------------------
// Extract options (runtime, validated from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime extraction options, validated from the config file.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Records per listing page.
    pub page_size: u32,
    /// Base URL for resolving relative hrefs before reading query parameters.
    pub base_url: Url,
    /// CSS selector of the initiative container.
    pub container_selector: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            base_url: Url::parse(&default_base_url()).expect("default base url"),
            container_selector: default_container_selector(),
        }
    }
}

impl TryFrom<&AppConfig> for ExtractOptions {
    type Error = CongresoError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        if config.listing.page_size == 0 {
            return Err(CongresoError::config("listing.page_size must be at least 1"));
        }
        let base_url = Url::parse(&config.detail.base_url).map_err(|e| {
            CongresoError::config(format!(
                "invalid detail.base_url {:?}: {e}",
                config.detail.base_url
            ))
        })?;
        Selector::parse(&config.detail.container_selector).map_err(|e| {
            CongresoError::config(format!(
                "invalid detail.container_selector {:?}: {e}",
                config.detail.container_selector
            ))
        })?;

        Ok(Self {
            page_size: config.listing.page_size,
            base_url,
            container_selector: config.detail.container_selector.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.congreso/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CongresoError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.congreso/congreso.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CongresoError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CongresoError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_at(&config_file_path()?)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| CongresoError::io(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| CongresoError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| CongresoError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}

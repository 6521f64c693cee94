use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use weistum_core::map::MapView;
use weistum_core::query::QueryLimits;
use weistum_core::zeit::ZeitBounds;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config/wk.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub zeit: ZeitConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_preview_words")]
    pub preview_words: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_words: default_preview_words(),
        }
    }
}

fn default_preview_words() -> usize {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_max_pattern_len")]
    pub max_pattern_len: usize,
    #[serde(default = "default_regex_size_limit")]
    pub regex_size_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_pattern_len: default_max_pattern_len(),
            regex_size_limit: default_regex_size_limit(),
        }
    }
}

fn default_max_pattern_len() -> usize {
    QueryLimits::default().max_pattern_len
}
fn default_regex_size_limit() -> usize {
    QueryLimits::default().regex_size_limit
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZeitConfig {
    #[serde(default = "default_lower_bound")]
    pub lower_bound: u32,
    #[serde(default = "default_upper_bound")]
    pub upper_bound: u32,
}

impl Default for ZeitConfig {
    fn default() -> Self {
        Self {
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
        }
    }
}

fn default_lower_bound() -> u32 {
    ZeitBounds::default().lower
}
fn default_upper_bound() -> u32 {
    ZeitBounds::default().upper
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_export_filename")]
    pub filename: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_export_filename(),
        }
    }
}

fn default_export_filename() -> PathBuf {
    PathBuf::from("weistuemer_export.csv")
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

fn default_center() -> [f64; 2] {
    MapView::default().center
}
fn default_zoom() -> u8 {
    MapView::default().zoom
}

impl Config {
    pub fn zeit_bounds(&self) -> ZeitBounds {
        ZeitBounds {
            lower: self.zeit.lower_bound,
            upper: self.zeit.upper_bound,
        }
    }

    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits {
            max_pattern_len: self.search.max_pattern_len,
            regex_size_limit: self.search.regex_size_limit,
        }
    }

    pub fn map_view(&self) -> MapView {
        MapView {
            center: self.map.center,
            zoom: self.map.zoom,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.display.preview_words == 0 {
            anyhow::bail!("display.preview_words must be > 0");
        }

        if self.search.max_pattern_len == 0 {
            anyhow::bail!("search.max_pattern_len must be > 0");
        }
        if self.search.regex_size_limit == 0 {
            anyhow::bail!("search.regex_size_limit must be > 0");
        }

        if self.zeit.lower_bound >= self.zeit.upper_bound {
            anyhow::bail!(
                "zeit.lower_bound ({}) must be below zeit.upper_bound ({})",
                self.zeit.lower_bound,
                self.zeit.upper_bound
            );
        }

        let [lat, lng] = self.map.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            anyhow::bail!("map.center must be [lat, lng] within [-90, 90] x [-180, 180]");
        }
        if self.map.zoom > 19 {
            anyhow::bail!("map.zoom must be in [0, 19]");
        }

        Ok(())
    }
}

/// Parse and validate a configuration file.
///
/// A relative `dataset.path` is resolved against the directory containing
/// the file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    if config.dataset.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.dataset.path = dir.join(&config.dataset.path);
        }
    }

    Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Load the file the user asked for, or fall back to defaults when no path
/// was given and nothing exists at [`DEFAULT_CONFIG_PATH`].
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                load_config(default)
            } else {
                tracing::debug!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
                Ok(Config::default())
            }
        }
    }
}

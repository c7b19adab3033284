//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.promptfeed/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::SourceKind;
use crate::core::catalog::TagCatalog;
use crate::core::layout::{ChipIcons, TerminalChipMetrics};
use crate::core::selection::FeedMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PromptFeedConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_mode: Option<FeedMode>,
    pub card_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    pub kind: Option<SourceKind>,
    pub path: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub chip_padding: Option<u16>,
    pub chip_gap: Option<u16>,
    pub expand_icon: Option<String>,
    pub shrink_icon: Option<String>,
    pub clear_icon: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CARD_LIMIT: usize = 10;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: SourceKind,
    pub file_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub mode: FeedMode,
    pub card_limit: usize,
    pub metrics: TerminalChipMetrics,
    pub icons: ChipIcons,
    pub catalog: TagCatalog,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source: Option<SourceKind>,
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub mode: Option<FeedMode>,
    pub limit: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.promptfeed/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".promptfeed").join("config.toml"))
}

/// Load config from `~/.promptfeed/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PromptFeedConfig::default()`.
pub fn load_config() -> Result<PromptFeedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(PromptFeedConfig::default())
        }
    }
}

/// Load config from an explicit path, generating a default there if missing.
/// A malformed file returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<PromptFeedConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PromptFeedConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PromptFeedConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# promptfeed configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_mode = "popular"           # "popular" or "new"
# card_limit = 10                    # Prompt cards fetched and shown

# [source]
# kind = "file"                      # "file" or "remote" (PROMPTFEED_SOURCE)
# path = "prompts.json"              # JSON array of prompts; bundled sample if unset (PROMPTFEED_FILE)
# base_url = "http://localhost:8080" # Community service root (PROMPTFEED_URL)

# [layout]
# chip_padding = 1                   # Cells of padding on each side of a tag
# chip_gap = 1                       # Cells between tags
# expand_icon = "+"
# shrink_icon = "-"
# clear_icon = "×"

# [catalog]
# tags = ["writing", "research", "science"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PromptFeedConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with the environment lookup supplied by the caller.
pub fn resolve_with_env<F>(config: &PromptFeedConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Source kind: CLI → env → config → default
    let source = cli
        .source
        .or_else(|| env("PROMPTFEED_SOURCE").and_then(|s| parse_enum::<SourceKind>("PROMPTFEED_SOURCE", &s)))
        .or(config.source.kind)
        .unwrap_or_default();

    // Feed file: CLI → env → config (None = bundled sample)
    let file_path = cli
        .file
        .clone()
        .or_else(|| env("PROMPTFEED_FILE").map(PathBuf::from))
        .or_else(|| config.source.path.as_ref().map(PathBuf::from));

    // Service URL: CLI → env → config
    let base_url = cli
        .url
        .clone()
        .or_else(|| env("PROMPTFEED_URL"))
        .or_else(|| config.source.base_url.clone());

    // Mode: CLI → env → config → default
    let mode = cli
        .mode
        .or_else(|| env("PROMPTFEED_MODE").and_then(|s| parse_enum::<FeedMode>("PROMPTFEED_MODE", &s)))
        .or(config.general.default_mode)
        .unwrap_or_default();

    let card_limit = cli
        .limit
        .or(config.general.card_limit)
        .unwrap_or(DEFAULT_CARD_LIMIT)
        .max(1);

    let default_metrics = TerminalChipMetrics::default();
    let metrics = TerminalChipMetrics {
        padding: config.layout.chip_padding.unwrap_or(default_metrics.padding),
        gap: config.layout.chip_gap.unwrap_or(default_metrics.gap),
    };

    let default_icons = ChipIcons::default();
    let icons = ChipIcons {
        expand: config.layout.expand_icon.clone().unwrap_or(default_icons.expand),
        shrink: config.layout.shrink_icon.clone().unwrap_or(default_icons.shrink),
        clear: config.layout.clear_icon.clone().unwrap_or(default_icons.clear),
    };

    let catalog = match &config.catalog.tags {
        Some(tags) => TagCatalog::new(tags.iter().cloned()),
        None => TagCatalog::default(),
    };

    ResolvedConfig {
        source,
        file_path,
        base_url,
        mode,
        card_limit,
        metrics,
        icons,
        catalog,
    }
}

fn parse_enum<T: ValueEnum>(var: &str, value: &str) -> Option<T> {
    match T::from_str(value, true) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring {}={}: {}", var, value, e);
            None
        }
    }
}

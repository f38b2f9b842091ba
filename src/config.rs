use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use figment::{
    Figment,
    providers::{Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::{
    phonetic::{DistanceKind, EncoderKind},
    search::WishlistFormat,
};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub selector: SelectorConfig,
    pub wishlist: WishlistConfig,
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SelectorConfig {
    /// Phonetic encoding applied to queries and variant tags
    pub encoder: EncoderKind,
    /// Distance measured between encoded keys
    pub distance: DistanceKind,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct WishlistConfig {
    pub format: WishlistFormat,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OutputConfig {
    /// Pretty print processed responses
    pub pretty: bool,
}

/// Layers defaults, the config file and `overrides`, later layers winning.
///
/// A missing file is only an error when `path` was given explicitly.
pub fn load_config<T: Serialize>(path: Option<&Path>, overrides: T) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if config_path.exists() {
        log::info!("Config file found: {}", config_path.display());
        figment = match config_path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file(&config_path)),
            Some("json") => figment.merge(Json::file(&config_path)),
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(&config_path)),
            _ => bail!(
                "Cannot identify config file type of {}. Must be .toml, .json or .yaml",
                config_path.display()
            ),
        };
    } else if path.is_some() {
        bail!("Config file not found: {}", config_path.display());
    }

    let config: Config = figment.merge(Serialized::defaults(overrides)).extract()?;
    log::debug!("Loaded config: {:#?}", config);

    Ok(config)
}

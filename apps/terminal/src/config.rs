use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use quiz_core::TileSource;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "quiz.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub tile_url: String,
    pub tile_attribution: String,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let tiles = TileSource::default();
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            tile_url: tiles.url_template,
            tile_attribution: tiles.attribution,
            color: true,
        }
    }
}

impl Settings {
    pub fn tiles(&self) -> TileSource {
        TileSource {
            url_template: self.tile_url.clone(),
            attribution: self.tile_attribution.clone(),
        }
    }

    pub fn server_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.server_url.trim())
            .with_context(|| format!("invalid server url {:?}", self.server_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("server url must be http or https, got {}", url.scheme());
        }
        Ok(url)
    }
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicitly requested file must exist; the default `quiz.toml` is
/// optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match config_path {
        Some(path) => read_settings_file(path)?,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_settings_file(&path)?
            } else {
                Settings::default()
            }
        }
    };
    Ok(apply_env_overrides(settings, |key| std::env::var(key).ok()))
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_settings(&raw).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str(raw)?)
}

fn apply_env_overrides(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    if let Some(v) = lookup("QUIZ_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__TILE_URL") {
        settings.tile_url = v;
    }
    if let Some(v) = lookup("APP__TILE_ATTRIBUTION") {
        settings.tile_attribution = v;
    }

    if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        settings.color = false;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

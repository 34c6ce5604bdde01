// SPDX: CC0-1.0

//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$PLOT_REQUEST_CONFIG` environment variable
//! 2. `~/.config/plot_request/config.toml`
//! 3. Built-in defaults (everything is optional)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "PLOT_REQUEST_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub plot: PlotConfig,
}

/// Chat completion endpoint settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: String,
    pub name: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Where data, script and svg files are written.
    pub output_dir: PathBuf,
    pub resolution: [u32; 2],
    pub gnuplot: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mistral.ai/v1/chat/completions".into(),
            name: "mistral-large-latest".into(),
            api_key_env: "MISTRAL_API_KEY".into(),
            timeout_secs: 60,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            resolution: [1920, 1080],
            gnuplot: "gnuplot".into(),
        }
    }
}

impl ModelConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env)
            .with_context(|| format!("${} is not set", self.api_key_env))?;
        if key.trim().is_empty() {
            bail!("${} is empty", self.api_key_env);
        }
        Ok(key.trim().to_string())
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<Config> {
    if let Some(p) = config_path() {
        if p.exists() {
            let content =
                std::fs::read_to_string(&p).with_context(|| format!("reading {}", p.display()))?;
            return parse_config(&content).with_context(|| format!("parsing {}", p.display()));
        }
    }
    Ok(Config::default())
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join(env!("CARGO_PKG_NAME"))
            .join("config.toml")
    })
}

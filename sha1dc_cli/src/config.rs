//! Layered configuration for the checksum tool.
//!
//! Defaults, then an optional TOML file, then `SHA1DCSUM_`-prefixed
//! environment variables; command-line flags override all of these in
//! `main`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use sha1dc_core::IngestMode;
use std::path::PathBuf;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SHA1DCSUM_CONFIG";

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EngineConfig {
    pub ingest: IngestChoice,
    pub detect_collisions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ingest: IngestChoice::Stable,
            detect_collisions: true,
        }
    }
}

/// Output format for reports.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configurable ingestion strategy, mirroring [`IngestMode`].
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IngestChoice {
    Stable,
    Copy,
}

impl From<IngestChoice> for IngestMode {
    fn from(choice: IngestChoice) -> Self {
        match choice {
            IngestChoice::Stable => IngestMode::Stable,
            IngestChoice::Copy => IngestMode::Copy,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, config file and environment.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        let path = config_path();
        if path.exists() {
            figment = figment.merge(Toml::file(&path));
        }

        figment = figment.merge(Env::prefixed("SHA1DCSUM_").split("__"));

        figment.extract().context("Failed to load configuration")
    }
}

fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("sha1dcsum.toml"))
}

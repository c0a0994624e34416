//! Dataset models and loaders for the delta-v cost map.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const KERBOL_YAML: &str = include_str!("../data/kerbol.yaml");

/// Complete cost dataset: the home body plus every other body.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatasetConfig {
    pub home: HomeConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

/// Home body record. `costs` is `[intercept, ascent, low_to_stable, reserve]`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HomeConfig {
    pub name: String,
    pub costs: Vec<f64>,
}

/// A non-home body. Moons name their parent; top-level bodies leave it unset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub costs: Vec<f64>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a dataset from YAML, or TOML when the path ends in `.toml`.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<DatasetConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Parse a YAML dataset held in memory.
pub fn parse_yaml(contents: &str) -> Result<DatasetConfig, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}

/// The stock Kerbol system shipped with the crate.
pub fn default_dataset() -> Result<DatasetConfig, ConfigError> {
    parse_yaml(KERBOL_YAML)
}

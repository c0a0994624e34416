//! Delta-v map for mission planning.
//!
//! Estimates the minimum delta-v needed to reach any body of a planetary
//! system from a fixed home body. The workspace crates are re-exported here
//! so front-ends only need a single dependency.

pub mod logging;

use std::path::Path;

use thiserror::Error;

pub use dvmap_calculator as calculator;
pub use dvmap_config as config;
pub use dvmap_core::{constants, time, units};
pub use dvmap_export as export;
pub use dvmap_registry as registry;

use dvmap_config::ConfigError;
use dvmap_registry::{BodyCostRegistry, InvalidDataError};

/// Errors surfaced while turning a dataset into a registry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid dataset: {0}")]
    InvalidData(#[from] InvalidDataError),
}

/// Build a registry from `path`, or from the embedded Kerbol dataset when `None`.
pub fn load_registry(path: Option<&Path>) -> Result<BodyCostRegistry, LoadError> {
    let dataset = match path {
        Some(path) => config::load_dataset(path)?,
        None => config::default_dataset()?,
    };
    Ok(BodyCostRegistry::from_config(&dataset)?)
}

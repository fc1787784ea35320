//! Configuration loading and discovery for `stencilgen.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::StencilConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "stencilgen.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse stencilgen.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override masters directory
    pub masters: Option<PathBuf>,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override scale factor
    pub scale: Option<u32>,
    /// Enable strict mode
    pub strict: Option<bool>,
    /// Also write masters
    pub include_masters: Option<bool>,
}

/// Find stencilgen.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find stencilgen.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a stencilgen.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file, falling back to defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<StencilConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(StencilConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<StencilConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: StencilConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    // Relative directories are relative to the config file, not the cwd
    if let Some(base) = path.parent() {
        config.project.masters = base.join(&config.project.masters);
        config.project.out = base.join(&config.project.out);
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut StencilConfig, overrides: &CliOverrides) {
    if let Some(ref masters) = overrides.masters {
        config.project.masters = masters.clone();
    }

    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }

    if let Some(scale) = overrides.scale {
        config.output.scale = scale;
    }

    if let Some(strict) = overrides.strict {
        config.generate.strict = strict;
    }

    if let Some(include_masters) = overrides.include_masters {
        config.output.include_masters = include_masters;
    }
}

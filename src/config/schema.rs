//! Configuration schema types for `stencilgen.toml`
//!
//! Defines the structure and validation rules for generator configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::palette::{unpack, Palette, PaletteError, GAME_PALETTE};

/// Largest accepted output scale factor
pub const MAX_SCALE: u32 = 16;

/// Project metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory holding the master PNGs (`_g.png`, `_f.png`)
    #[serde(default = "default_masters")]
    pub masters: PathBuf,
    /// Output directory for generated PNGs
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            masters: default_masters(),
            out: default_out(),
        }
    }
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_masters() -> PathBuf {
    PathBuf::from("assets")
}

fn default_out() -> PathBuf {
    PathBuf::from("build")
}

/// PNG output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Integer nearest-neighbor scale factor
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Also write the loaded masters
    #[serde(default)]
    pub include_masters: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            include_masters: false,
        }
    }
}

fn default_scale() -> u32 {
    1
}

/// Generation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Treat generation warnings as a failed run
    #[serde(default)]
    pub strict: bool,
}

/// Palette override
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Hex literals replacing the built-in palette, index 0 first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,
}

/// Root configuration structure for `stencilgen.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StencilConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

impl StencilConfig {
    /// Check value ranges, returning a message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.output.scale == 0 || self.output.scale > MAX_SCALE {
            errors.push(format!(
                "output.scale must be between 1 and {}, got {}",
                MAX_SCALE, self.output.scale
            ));
        }

        if let Some(entries) = &self.palette.entries {
            if entries.is_empty() {
                errors.push("palette.entries must not be empty".to_string());
            }
        }

        errors
    }

    /// Unpack the configured palette, or the built-in one.
    ///
    /// Literal errors surface here rather than in [`validate`](Self::validate)
    /// so they stay fatal wherever the palette is consumed.
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        match &self.palette.entries {
            Some(entries) => unpack(entries),
            None => unpack(GAME_PALETTE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StencilConfig = toml::from_str("").unwrap();
        assert_eq!(config, StencilConfig::default());
        assert_eq!(config.project.masters, PathBuf::from("assets"));
        assert_eq!(config.output.scale, 1);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: StencilConfig = toml::from_str(
            r#"
            [project]
            name = "skyward"
            masters = "art"
            out = "dist"

            [output]
            scale = 4
            include_masters = true

            [generate]
            strict = true

            [palette]
            entries = ["00000000", "000000", "ffffff"]
            "#,
        )
        .unwrap();

        assert_eq!(config.project.name, "skyward");
        assert_eq!(config.project.out, PathBuf::from("dist"));
        assert_eq!(config.output.scale, 4);
        assert!(config.output.include_masters);
        assert!(config.generate.strict);
        assert_eq!(config.palette().unwrap().len(), 3);
    }

    #[test]
    fn test_validate_scale_range() {
        let mut config = StencilConfig::default();
        config.output.scale = 0;
        assert_eq!(config.validate().len(), 1);
        config.output.scale = 17;
        assert_eq!(config.validate().len(), 1);
        config.output.scale = 16;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_empty_palette() {
        let mut config = StencilConfig::default();
        config.palette.entries = Some(Vec::new());
        assert_eq!(config.validate(), vec!["palette.entries must not be empty".to_string()]);
    }

    #[test]
    fn test_default_palette_is_builtin() {
        let config = StencilConfig::default();
        assert_eq!(config.palette().unwrap(), Palette::game().unwrap());
    }

    #[test]
    fn test_bad_palette_literal_is_fatal() {
        let mut config = StencilConfig::default();
        config.palette.entries = Some(vec!["00000g".to_string()]);
        assert!(config.palette().is_err());
    }
}

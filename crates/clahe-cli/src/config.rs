//! Configuration resolution for the CLI.
//!
//! Precedence, lowest to highest: built-in defaults, `CLAHE_*` environment
//! variables, TOML config file, command-line flags.

use anyhow::{Context, Result};
use clahe_core::{ClaheConfig, RoundingMode};
use serde::Deserialize;
use std::path::Path;

/// Optional fields from a TOML config file; anything absent falls through
/// to the lower-precedence sources.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub tiles_x: Option<u32>,
    pub tiles_y: Option<u32>,
    pub clip_limit: Option<u32>,
    pub weight_shift: Option<u32>,
    pub weight_mult_x: Option<i64>,
    pub weight_mult_y: Option<i64>,
    pub rounding: Option<RoundingMode>,
}

/// Grid/clip overrides shared by the `enhance` and `tables` subcommands.
#[derive(Debug, Default, Clone, Copy, clap::Args)]
pub struct GridArgs {
    /// Tile columns
    #[arg(long)]
    pub tiles_x: Option<u32>,
    /// Tile rows
    #[arg(long)]
    pub tiles_y: Option<u32>,
    /// Histogram clip limit (counts per bin)
    #[arg(long)]
    pub clip_limit: Option<u32>,
}

/// Build the engine configuration from all sources.
pub fn resolve(config_file: Option<&Path>, args: &GridArgs) -> Result<ClaheConfig> {
    let mut config = ClaheConfig::default();
    apply_env(&mut config);

    if let Some(path) = config_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let file: FileConfig = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        apply_file(&mut config, &file);
    }

    apply_args(&mut config, args);
    Ok(config)
}

fn apply_env(config: &mut ClaheConfig) {
    apply_env_from(config, |key| std::env::var(key).ok());
}

/// Env layer with the variable lookup injected, so the precedence logic is
/// testable without touching process state.
fn apply_env_from(config: &mut ClaheConfig, get: impl Fn(&str) -> Option<String>) {
    config.tiles_x = env_u32(&get, "CLAHE_TILES_X", config.tiles_x);
    config.tiles_y = env_u32(&get, "CLAHE_TILES_Y", config.tiles_y);
    config.clip_limit = env_u32(&get, "CLAHE_CLIP_LIMIT", config.clip_limit);
    config.weight_shift = env_u32(&get, "CLAHE_WEIGHT_SHIFT", config.weight_shift);
}

fn apply_file(config: &mut ClaheConfig, file: &FileConfig) {
    if let Some(v) = file.tiles_x {
        config.tiles_x = v;
    }
    if let Some(v) = file.tiles_y {
        config.tiles_y = v;
    }
    if let Some(v) = file.clip_limit {
        config.clip_limit = v;
    }
    if let Some(v) = file.weight_shift {
        config.weight_shift = v;
    }
    if let Some(v) = file.weight_mult_x {
        config.weight_mult_x = Some(v);
    }
    if let Some(v) = file.weight_mult_y {
        config.weight_mult_y = Some(v);
    }
    if let Some(v) = file.rounding {
        config.rounding = v;
    }
}

fn apply_args(config: &mut ClaheConfig, args: &GridArgs) {
    if let Some(v) = args.tiles_x {
        config.tiles_x = v;
    }
    if let Some(v) = args.tiles_y {
        config.tiles_y = v;
    }
    if let Some(v) = args.clip_limit {
        config.clip_limit = v;
    }
}

fn env_u32(get: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> u32 {
    match get(key) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = raw, "ignoring unparseable environment override");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_overrides_defaults() {
        let file: FileConfig = toml::from_str(
            "tiles_x = 8\ntiles_y = 8\nclip_limit = 3\nrounding = \"round_half\"",
        )
        .unwrap();
        let mut config = ClaheConfig::default();
        apply_file(&mut config, &file);
        assert_eq!(config.tiles_x, 8);
        assert_eq!(config.tiles_y, 8);
        assert_eq!(config.clip_limit, 3);
        assert_eq!(config.rounding, RoundingMode::RoundHalf);
        // Untouched fields keep defaults
        assert_eq!(config.weight_shift, 10);
    }

    #[test]
    fn test_flags_override_file() {
        let file: FileConfig = toml::from_str("tiles_x = 8\nclip_limit = 3").unwrap();
        let mut config = ClaheConfig::default();
        apply_file(&mut config, &file);
        apply_args(
            &mut config,
            &GridArgs { tiles_x: Some(4), tiles_y: None, clip_limit: None },
        );
        assert_eq!(config.tiles_x, 4);
        assert_eq!(config.clip_limit, 3);
    }

    #[test]
    fn test_unknown_file_key_rejected() {
        let err = toml::from_str::<FileConfig>("tile_x = 8");
        assert!(err.is_err());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let mut config = ClaheConfig::default();
        apply_env_from(&mut config, |key| match key {
            "CLAHE_TILES_X" => Some("8".to_string()),
            "CLAHE_CLIP_LIMIT" => Some("3".to_string()),
            _ => None,
        });
        assert_eq!(config.tiles_x, 8);
        assert_eq!(config.clip_limit, 3);
        assert_eq!(config.tiles_y, ClaheConfig::default().tiles_y);
    }

    #[test]
    fn test_malformed_env_value_falls_back_to_default() {
        let mut config = ClaheConfig::default();
        apply_env_from(&mut config, |key| match key {
            "CLAHE_TILES_X" => Some("sixteen".to_string()),
            "CLAHE_TILES_Y" => Some("-2".to_string()),
            _ => None,
        });
        assert_eq!(config.tiles_x, ClaheConfig::default().tiles_x);
        assert_eq!(config.tiles_y, ClaheConfig::default().tiles_y);
    }

    #[test]
    fn test_file_overrides_env() {
        let mut config = ClaheConfig::default();
        apply_env_from(&mut config, |key| {
            (key == "CLAHE_TILES_X").then(|| "16".to_string())
        });
        let file: FileConfig = toml::from_str("tiles_x = 8").unwrap();
        apply_file(&mut config, &file);
        assert_eq!(config.tiles_x, 8);
    }

    #[test]
    fn test_explicit_hardware_constants() {
        let file: FileConfig =
            toml::from_str("weight_mult_x = 819\nweight_mult_y = 1456").unwrap();
        let mut config = ClaheConfig::default();
        apply_file(&mut config, &file);
        assert_eq!(config.weight_mult_x, Some(819));
        assert_eq!(config.weight_mult_y, Some(1456));
    }
}

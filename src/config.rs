use anyhow::{Context, Result};
use serde::Deserialize;
use specgram::render::color::{DEFAULT_GAIN, DEFAULT_HUE_MAX, DEFAULT_HUE_MIN, DEFAULT_RANGE};
use std::path::{Path, PathBuf};

use crate::cli::{DEFAULT_FFT_SIZE, DEFAULT_SLIDE};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub color: ColorConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default = "default_slide")]
    pub slide: usize,
    #[serde(default)]
    pub window: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_gain")]
    pub gain: f64,
    #[serde(default = "default_range")]
    pub range: f64,
    #[serde(default = "default_hue_min")]
    pub hue_min: f64,
    #[serde(default = "default_hue_max")]
    pub hue_max: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
            slide: default_slide(),
            window: None,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            gain: default_gain(),
            range: default_range(),
            hue_min: default_hue_min(),
            hue_max: default_hue_max(),
        }
    }
}

fn default_fft_size() -> usize { DEFAULT_FFT_SIZE }
fn default_slide() -> usize { DEFAULT_SLIDE }
fn default_gain() -> f64 { DEFAULT_GAIN }
fn default_range() -> f64 { DEFAULT_RANGE }
fn default_hue_min() -> f64 { DEFAULT_HUE_MIN }
fn default_hue_max() -> f64 { DEFAULT_HUE_MAX }

/// Explicit path, else ./specgram.toml, else the per-user config file.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("specgram.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("specgram").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("specgram").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.analysis.fft_size, 1024);
        assert_eq!(cfg.analysis.slide, 256);
        assert!(cfg.analysis.window.is_none());
        assert_eq!(cfg.color.gain, -30.0);
        assert_eq!(cfg.color.range, 80.0);
        assert_eq!(cfg.color.hue_min, 2.0 / 3.0);
        assert_eq!(cfg.color.hue_max, 0.0);
    }

    #[test]
    fn partial_sections() {
        let cfg = parse_config(
            r#"
            [analysis]
            fft_size = 2048
            window = "blackman"

            [color]
            range = 100.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.analysis.fft_size, 2048);
        assert_eq!(cfg.analysis.slide, 256);
        assert_eq!(cfg.analysis.window.as_deref(), Some("blackman"));
        assert_eq!(cfg.color.range, 100.0);
        assert_eq!(cfg.color.gain, -30.0);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(parse_config("[analysis]\nfft_size = \"big\"\n").is_err());
    }
}

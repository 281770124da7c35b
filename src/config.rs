// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the application, read from a TOML file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::constant;
use crate::domain::crop::AspectPolicy;
use crate::domain::image::Viewport;

/// Global configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the answering service.
    pub base_url: String,
    /// Path appended to `base_url` for uploads.
    pub upload_path: String,
    /// Request timeout for a submission, in seconds.
    pub request_timeout_secs: u64,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
    /// Device pixel ratio applied when rasterizing the crop.
    pub pixel_ratio: f64,
    /// Fraction of the displayed image covered by the initial crop.
    pub default_crop_fraction: f64,
    /// `native`, `free` or a positive width/height ratio.
    pub aspect: String,
    /// Minimum zoom scale.
    pub min_zoom: f64,
    /// Maximum zoom scale.
    pub max_zoom: f64,
    /// Optional display box the image is fitted into while cropping.
    pub viewport: Option<Viewport>,
    /// JPEG encoder quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            upload_path: "/upload".into(),
            request_timeout_secs: 60,
            max_upload_bytes: constant::MAX_UPLOAD_BYTES,
            pixel_ratio: 1.0,
            default_crop_fraction: constant::DEFAULT_CROP_FRACTION,
            aspect: "native".into(),
            min_zoom: constant::MIN_ZOOM,
            max_zoom: constant::MAX_ZOOM,
            viewport: None,
            jpeg_quality: constant::DEFAULT_JPEG_QUALITY,
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/quizcrop/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constant::CONFIG_DIR).join(constant::CONFIG_FILE))
    }

    /// Load config from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config: {}", path.display()))
    }

    /// Parse config from TOML text.
    pub fn parse(raw: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(raw).context("parsing TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        self.aspect_policy()?;
        ensure!(
            self.pixel_ratio.is_finite()
                && self.pixel_ratio > 0.0
                && self.pixel_ratio <= constant::MAX_PIXEL_RATIO,
            "pixel_ratio must be in (0, {}], got {}",
            constant::MAX_PIXEL_RATIO,
            self.pixel_ratio
        );
        Ok(())
    }

    /// Load from `path` when given, otherwise from the default location if it exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Interpret the `aspect` setting.
    pub fn aspect_policy(&self) -> Result<AspectPolicy> {
        self.aspect
            .parse()
            .with_context(|| format!("invalid aspect setting {:?}", self.aspect))
    }

    /// Full submission URL.
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.upload_path.trim_start_matches('/')
        )
    }
}

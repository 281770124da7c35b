// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/region.rs
//
// Crop region domain model.

use std::fmt;
use std::str::FromStr;

use crate::domain::image::SourceImage;

/// Crop region in displayed pixel coordinates.
///
/// Pure domain model: rectangle, optional aspect lock and zoom. No pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Locked width/height ratio, `None` when unconstrained.
    pub aspect: Option<f64>,
    /// Multiplicative zoom, at least the model's minimum.
    pub zoom: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            aspect: None,
            zoom: 1.0,
        }
    }

    #[must_use]
    pub fn with_aspect(mut self, aspect: Option<f64>) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }

    /// Check if region has a non-empty area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

impl fmt::Display for CropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}x{:.1}+{:.1}+{:.1}",
            self.width, self.height, self.x, self.y
        )
    }
}

/// Displayed extent a region must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBounds {
    pub width: f64,
    pub height: f64,
}

impl CropBounds {
    /// Non-finite or negative extents collapse to zero.
    pub fn new(width: f64, height: f64) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: clean(width),
            height: clean(height),
        }
    }

    /// Natural aspect of the displayed image, if it has an area.
    pub fn aspect(&self) -> Option<f64> {
        (self.width > 0.0 && self.height > 0.0).then(|| self.width / self.height)
    }
}

impl From<&SourceImage> for CropBounds {
    fn from(image: &SourceImage) -> Self {
        Self::new(image.display_width(), image.display_height())
    }
}

/// How the initial region's aspect is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AspectPolicy {
    /// Lock to the image's own aspect ratio.
    #[default]
    Native,
    /// No aspect lock.
    Free,
    /// Lock to the given width/height ratio.
    Fixed(f64),
}

impl AspectPolicy {
    /// Resolve to a concrete lock for an image of the given bounds.
    pub fn resolve(self, bounds: CropBounds) -> Option<f64> {
        match self {
            Self::Native => bounds.aspect(),
            Self::Free => None,
            Self::Fixed(ratio) => valid_aspect(ratio),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAspectError(pub String);

impl fmt::Display for ParseAspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected `native`, `free`, a positive ratio or `W:H`, got {:?}",
            self.0
        )
    }
}

impl std::error::Error for ParseAspectError {}

impl FromStr for AspectPolicy {
    type Err = ParseAspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseAspectError(s.to_string());
        match trimmed.to_ascii_lowercase().as_str() {
            "native" => return Ok(Self::Native),
            "free" | "none" => return Ok(Self::Free),
            _ => {}
        }

        let ratio = match trimmed.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| err())?;
                let h: f64 = h.trim().parse().map_err(|_| err())?;
                w / h
            }
            None => trimmed.parse().map_err(|_| err())?,
        };

        valid_aspect(ratio).map(Self::Fixed).ok_or_else(err)
    }
}

pub(crate) fn valid_aspect(ratio: f64) -> Option<f64> {
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

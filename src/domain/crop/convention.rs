// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/convention.rs
//
// Translation between crop widget coordinate conventions and display pixels.

use super::region::CropRegion;
use crate::domain::image::SourceImage;

/// Coordinate system a crop interaction widget reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CropConvention {
    /// Pixels of the image as rendered on screen.
    #[default]
    DisplayPixels,
    /// Percent (0-100) of the rendered image.
    Percent,
    /// Pixels of the decoded image.
    NaturalPixels,
}

/// A rectangle as reported by a crop widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetCrop {
    pub convention: CropConvention,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WidgetCrop {
    pub fn new(convention: CropConvention, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            convention,
            x,
            y,
            width,
            height,
        }
    }

    /// Convert into a display-pixel region (no aspect lock, zoom 1).
    pub fn to_region(&self, image: &SourceImage) -> CropRegion {
        let (fx, fy) = factors(self.convention, image);
        CropRegion::new(self.x * fx, self.y * fy, self.width * fx, self.height * fy)
    }

    /// Express a display-pixel region in `convention`.
    pub fn from_region(region: &CropRegion, image: &SourceImage, convention: CropConvention) -> Self {
        let (fx, fy) = factors(convention, image);
        let inv = |v: f64, f: f64| if f > 0.0 { v / f } else { 0.0 };
        Self {
            convention,
            x: inv(region.x, fx),
            y: inv(region.y, fy),
            width: inv(region.width, fx),
            height: inv(region.height, fy),
        }
    }
}

/// Multipliers taking `convention` units to display pixels.
fn factors(convention: CropConvention, image: &SourceImage) -> (f64, f64) {
    match convention {
        CropConvention::DisplayPixels => (1.0, 1.0),
        CropConvention::Percent => (image.display_width() / 100.0, image.display_height() / 100.0),
        CropConvention::NaturalPixels => {
            let (sx, sy) = image.scale_factors();
            (1.0 / sx, 1.0 / sy)
        }
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/image/source.rs
//
// Decoded source image with its natural and displayed sizes.

use std::fmt;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

use crate::domain::upload::MediaType;

/// Box the crop dialog renders the image into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded image plus the size it is displayed at.
///
/// The bitmap is reference counted so rasterization can run on a blocking
/// worker while the pipeline keeps ownership. Dropping the last clone releases it.
#[derive(Clone)]
pub struct SourceImage {
    bitmap: Arc<DynamicImage>,
    media_type: MediaType,
    display_width: f64,
    display_height: f64,
}

impl SourceImage {
    /// Wrap a decoded bitmap, displayed at its natural size.
    pub fn new(bitmap: DynamicImage, media_type: MediaType) -> Self {
        let (w, h) = bitmap.dimensions();
        Self {
            bitmap: Arc::new(bitmap),
            media_type,
            display_width: f64::from(w),
            display_height: f64::from(h),
        }
    }

    /// Natural (decoded) width in pixels.
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Natural (decoded) height in pixels.
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn display_width(&self) -> f64 {
        self.display_width
    }

    pub fn display_height(&self) -> f64 {
        self.display_height
    }

    /// Media type of the original upload.
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    pub(crate) fn shared_bitmap(&self) -> Arc<DynamicImage> {
        Arc::clone(&self.bitmap)
    }

    /// Set the rendered size explicitly. Non-finite or negative sizes fall back
    /// to the natural size.
    #[must_use]
    pub fn with_display_size(mut self, width: f64, height: f64) -> Self {
        self.display_width = sanitize_extent(width, self.width());
        self.display_height = sanitize_extent(height, self.height());
        self
    }

    /// "Contain"-fit the natural size into `viewport`, never upscaling.
    #[must_use]
    pub fn fit_to(self, viewport: Viewport) -> Self {
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        if w <= 0.0 || h <= 0.0 || viewport.width == 0 || viewport.height == 0 {
            return self;
        }
        let scale = (f64::from(viewport.width) / w)
            .min(f64::from(viewport.height) / h)
            .min(1.0);
        self.with_display_size(w * scale, h * scale)
    }

    /// Natural-to-display ratios `(naturalWidth / displayWidth, naturalHeight / displayHeight)`.
    ///
    /// A zero display extent maps to a scale of 1 so callers never divide by zero.
    pub fn scale_factors(&self) -> (f64, f64) {
        let sx = if self.display_width > 0.0 {
            f64::from(self.width()) / self.display_width
        } else {
            1.0
        };
        let sy = if self.display_height > 0.0 {
            f64::from(self.height()) / self.display_height
        } else {
            1.0
        };
        (sx, sy)
    }
}

fn sanitize_extent(value: f64, natural: u32) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        f64::from(natural)
    }
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("natural", &(self.width(), self.height()))
            .field("display", &(self.display_width, self.display_height))
            .field("media_type", &self.media_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: u32, h: u32) -> SourceImage {
        SourceImage::new(DynamicImage::new_rgba8(w, h), MediaType::Png)
    }

    #[test]
    fn displayed_at_natural_size_by_default() {
        let img = blank(800, 600);
        assert_eq!(img.display_width(), 800.0);
        assert_eq!(img.scale_factors(), (1.0, 1.0));
    }

    #[test]
    fn fit_to_contains_without_upscaling() {
        let img = blank(1600, 1200).fit_to(Viewport::new(620, 400));
        assert!((img.display_height() - 400.0).abs() < 1e-9);
        assert!((img.display_width() - 1600.0 * 400.0 / 1200.0).abs() < 1e-9);

        let small = blank(100, 50).fit_to(Viewport::new(620, 400));
        assert_eq!((small.display_width(), small.display_height()), (100.0, 50.0));
    }

    #[test]
    fn bogus_display_size_falls_back_to_natural() {
        let img = blank(40, 30).with_display_size(f64::NAN, -3.0);
        assert_eq!((img.display_width(), img.display_height()), (40.0, 30.0));
        let zero = blank(40, 30).with_display_size(0.0, 0.0);
        assert_eq!(zero.scale_factors(), (1.0, 1.0));
    }
}

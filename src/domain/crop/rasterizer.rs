// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/rasterizer.rs
//
// Extract a crop region from the decoded bitmap and encode it as an image blob.

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use super::region::CropRegion;
use crate::constant::{DEFAULT_JPEG_QUALITY, MAX_PIXEL_RATIO};
use crate::domain::image::SourceImage;
use crate::domain::upload::{MediaType, UploadItem};

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("crop produced an empty image")]
    EmptyOutput,
    #[error("failed to encode cropped image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("rasterization was interrupted: {0}")]
    Interrupted(String),
}

/// Rectangle in natural (decoded) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    /// Snap to whole pixels inside a `natural_width` x `natural_height` bitmap.
    ///
    /// Edges are rounded; a positive-area rectangle always covers at least one
    /// pixel. Returns `None` for an empty rectangle.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_pixels(&self, natural_width: u32, natural_height: u32) -> Option<(u32, u32, u32, u32)> {
        if self.width <= 0.0 || self.height <= 0.0 || natural_width == 0 || natural_height == 0 {
            return None;
        }
        let (x0, x1) = snap_span(self.x, self.width, natural_width);
        let (y0, y1) = snap_span(self.y, self.height, natural_height);
        Some((x0, y0, x1 - x0, y1 - y0))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn snap_span(start: f64, len: f64, limit: u32) -> (u32, u32) {
    let lo = (start.round().max(0.0) as u32).min(limit - 1);
    let hi = ((start + len).round().max(0.0) as u32).min(limit);
    (lo, hi.max(lo + 1))
}

/// Map a display-pixel region into source pixels, clamped to the bitmap.
pub fn map_to_source(image: &SourceImage, region: &CropRegion) -> SourceRect {
    let (sx, sy) = image.scale_factors();
    let nw = f64::from(image.width());
    let nh = f64::from(image.height());
    let clean = |v: f64| if v.is_finite() { v } else { 0.0 };

    let x0 = (clean(region.x) * sx).max(0.0).min(nw);
    let y0 = (clean(region.y) * sy).max(0.0).min(nh);
    let x1 = (clean(region.x + region.width) * sx).max(0.0).min(nw);
    let y1 = (clean(region.y + region.height) * sy).max(0.0).min(nh);

    SourceRect {
        x: x0,
        y: y0,
        width: (x1 - x0).max(0.0),
        height: (y1 - y0).max(0.0),
    }
}

/// Output size in device pixels: `round(region.width * ratio)` x `round(region.height * ratio)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn output_size(region: &CropRegion, pixel_ratio: f64) -> (u32, u32) {
    let px = |v: f64| {
        let v = (v * pixel_ratio).round();
        if v.is_finite() && v > 0.0 { v as u32 } else { 0 }
    };
    (px(region.width), px(region.height))
}

/// An encoded crop.
#[derive(Clone, PartialEq, Eq)]
pub struct CroppedBlob {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
    pub width: u32,
    pub height: u32,
}

impl CroppedBlob {
    /// Wrap as an upload carrying the original file name.
    pub fn to_upload(&self, filename: &str) -> UploadItem {
        UploadItem::new(self.bytes.clone(), self.media_type.as_mime(), filename)
    }
}

impl fmt::Debug for CroppedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CroppedBlob")
            .field("media_type", &self.media_type)
            .field("size", &(self.width, self.height))
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Everything needed to produce a blob, detached from the pipeline so it can
/// run on a blocking worker.
#[derive(Clone)]
pub struct RasterPlan {
    bitmap: Arc<DynamicImage>,
    pub source: SourceRect,
    pub output: (u32, u32),
    pub media_type: MediaType,
    jpeg_quality: u8,
}

impl fmt::Debug for RasterPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterPlan")
            .field("source", &self.source)
            .field("output", &self.output)
            .field("media_type", &self.media_type)
            .finish()
    }
}

impl RasterPlan {
    /// Crop, resample (Lanczos3) and encode.
    pub fn execute(self) -> Result<CroppedBlob, RasterizeError> {
        let (out_w, out_h) = self.output;
        if out_w == 0 || out_h == 0 {
            return Err(RasterizeError::EmptyOutput);
        }
        let Some((x, y, w, h)) = self.source.to_pixels(self.bitmap.width(), self.bitmap.height()) else {
            return Err(RasterizeError::EmptyOutput);
        };

        let cropped = self.bitmap.crop_imm(x, y, w, h);
        let scaled = if (w, h) == (out_w, out_h) {
            cropped
        } else {
            cropped.resize_exact(out_w, out_h, FilterType::Lanczos3)
        };

        let mut bytes = Vec::new();
        match self.media_type {
            MediaType::Png => scaled.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?,
            MediaType::Jpeg => {
                let rgb = scaled.to_rgb8();
                JpegEncoder::new_with_quality(&mut bytes, self.jpeg_quality).encode_image(&rgb)?;
            }
        }

        if bytes.is_empty() {
            return Err(RasterizeError::EmptyOutput);
        }

        log::debug!(
            "rasterized {}x{}+{}+{} source px into {}x{} {}",
            w,
            h,
            x,
            y,
            out_w,
            out_h,
            self.media_type
        );

        Ok(CroppedBlob {
            bytes,
            media_type: self.media_type,
            width: out_w,
            height: out_h,
        })
    }
}

/// Produces pixel-exact crops for a given device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRasterizer {
    pixel_ratio: f64,
    jpeg_quality: u8,
}

impl Default for CropRasterizer {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_JPEG_QUALITY)
    }
}

impl CropRasterizer {
    /// A non-finite or non-positive ratio falls back to 1.
    pub fn new(pixel_ratio: f64, jpeg_quality: u8) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self {
            pixel_ratio,
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Compute the source rectangle and output size without touching pixels.
    ///
    /// `output` defaults to the media type of the original upload.
    pub fn plan(&self, image: &SourceImage, region: &CropRegion, output: Option<MediaType>) -> RasterPlan {
        RasterPlan {
            bitmap: image.shared_bitmap(),
            source: map_to_source(image, region),
            output: output_size(region, self.pixel_ratio),
            media_type: output.unwrap_or(image.media_type()),
            jpeg_quality: self.jpeg_quality,
        }
    }

    /// Plan and execute on the current thread.
    pub fn rasterize(
        &self,
        image: &SourceImage,
        region: &CropRegion,
        output: Option<MediaType>,
    ) -> Result<CroppedBlob, RasterizeError> {
        self.plan(image, region, output).execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    /// Left half red, right half blue.
    fn split_image(w: u32, h: u32) -> SourceImage {
        let img = RgbaImage::from_fn(w, h, |x, _| {
            if x < w / 2 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
        });
        SourceImage::new(DynamicImage::ImageRgba8(img), MediaType::Png)
    }

    #[test]
    fn scale_factors_map_display_to_source() {
        let img = split_image(1000, 800).with_display_size(500.0, 200.0);
        let rect = map_to_source(&img, &CropRegion::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(rect, SourceRect { x: 20.0, y: 80.0, width: 200.0, height: 200.0 });
    }

    #[test]
    fn source_rect_is_clamped_to_bitmap() {
        let img = split_image(100, 100).with_display_size(50.0, 50.0);
        let rect = map_to_source(&img, &CropRegion::new(40.0, -10.0, 30.0, 30.0));
        assert_eq!(rect, SourceRect { x: 80.0, y: 0.0, width: 20.0, height: 40.0 });
    }

    #[test]
    fn output_dimensions_follow_pixel_ratio() {
        let img = split_image(400, 300);
        let region = CropRegion::new(10.0, 10.0, 101.0, 51.0);
        for (ratio, expected) in [(1.0, (101, 51)), (2.0, (202, 102)), (1.5, (152, 77))] {
            let blob = CropRasterizer::new(ratio, 92).rasterize(&img, &region, None).unwrap();
            assert_eq!((blob.width, blob.height), expected, "ratio {ratio}");
            let decoded = image::load_from_memory(&blob.bytes).unwrap();
            assert_eq!(decoded.dimensions(), expected);
        }
    }

    #[test]
    fn extracts_the_right_pixels() {
        let img = split_image(200, 100).with_display_size(100.0, 50.0);
        // Right quarter of the display = blue half of the source.
        let blob = CropRasterizer::default()
            .rasterize(&img, &CropRegion::new(60.0, 0.0, 40.0, 50.0), Some(MediaType::Png))
            .unwrap();
        let decoded = image::load_from_memory(&blob.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (40, 50));
        assert_eq!(decoded.get_pixel(20, 25), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn encodes_requested_type() {
        let img = split_image(64, 64);
        let region = CropRegion::new(0.0, 0.0, 32.0, 32.0);
        let jpeg = CropRasterizer::default().rasterize(&img, &region, Some(MediaType::Jpeg)).unwrap();
        assert_eq!(jpeg.media_type, MediaType::Jpeg);
        assert_eq!(image::guess_format(&jpeg.bytes).unwrap(), ImageFormat::Jpeg);

        let same = CropRasterizer::default().rasterize(&img, &region, None).unwrap();
        assert_eq!(image::guess_format(&same.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn zero_area_is_empty_output() {
        let img = split_image(64, 64);
        for region in [
            CropRegion::new(10.0, 10.0, 0.0, 20.0),
            CropRegion::new(10.0, 10.0, 20.0, 0.2),
            CropRegion::new(64.0, 64.0, 20.0, 20.0),
        ] {
            let err = CropRasterizer::default().rasterize(&img, &region, None).unwrap_err();
            assert!(matches!(err, RasterizeError::EmptyOutput), "{region:?}");
        }
    }

    #[test]
    fn tiny_source_span_still_covers_a_pixel() {
        let rect = SourceRect { x: 9.7, y: 0.0, width: 0.2, height: 3.0 };
        assert_eq!(rect.to_pixels(10, 10), Some((9, 0, 1, 3)));
        let edge = SourceRect { x: 10.0, y: 0.0, width: 0.4, height: 1.0 };
        assert_eq!(edge.to_pixels(10, 10), Some((9, 0, 1, 1)));
    }

    #[test]
    fn bogus_pixel_ratio_falls_back_to_one() {
        assert_eq!(CropRasterizer::new(f64::NAN, 92).pixel_ratio(), 1.0);
        assert_eq!(CropRasterizer::new(-2.0, 92).pixel_ratio(), 1.0);
        assert_eq!(CropRasterizer::new(100.0, 92).pixel_ratio(), MAX_PIXEL_RATIO);
    }
}

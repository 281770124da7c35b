// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/image/decoder.rs
//
// Upload acceptance checks and bitmap decoding.

use std::fmt;

use thiserror::Error;

use super::orientation;
use super::source::SourceImage;
use crate::constant;
use crate::domain::upload::{MediaType, UploadItem};

/// Why a file was refused before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedMediaType(String),
    TooLarge { size: u64, limit: u64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMediaType(declared) => {
                write!(f, "unsupported media type {declared:?} (expected image/png or image/jpeg)")
            }
            Self::TooLarge { size, limit } => {
                write!(f, "file is {size} bytes, limit is {limit} bytes")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("file rejected: {0}")]
    Rejected(RejectReason),
    #[error("image could not be decoded: {0}")]
    Corrupt(#[from] image::ImageError),
    #[error("decoding was interrupted: {0}")]
    Interrupted(String),
}

impl DecodeError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Turns an accepted upload into a [`SourceImage`].
#[derive(Debug, Clone, Copy)]
pub struct ImageDecoder {
    max_bytes: u64,
}

impl Default for ImageDecoder {
    fn default() -> Self {
        Self::new(constant::MAX_UPLOAD_BYTES)
    }
}

impl ImageDecoder {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Precondition check: declared type must be PNG/JPEG and the payload within
    /// the size limit. Nothing is decoded here.
    pub fn check(&self, item: &UploadItem) -> Result<MediaType, DecodeError> {
        let media_type: MediaType = item
            .declared_type()
            .parse()
            .map_err(|declared| DecodeError::Rejected(RejectReason::UnsupportedMediaType(declared)))?;

        if item.size() > self.max_bytes {
            return Err(DecodeError::Rejected(RejectReason::TooLarge {
                size: item.size(),
                limit: self.max_bytes,
            }));
        }

        Ok(media_type)
    }

    /// Check and decode in one go (blocking).
    pub fn decode(&self, item: &UploadItem) -> Result<SourceImage, DecodeError> {
        let media_type = self.check(item)?;
        decode_bytes(item.bytes(), media_type)
    }
}

/// Decode `bytes` as `media_type` and apply EXIF orientation.
///
/// The declared type is authoritative: PNG bytes declared as JPEG are corrupt.
pub fn decode_bytes(bytes: &[u8], media_type: MediaType) -> Result<SourceImage, DecodeError> {
    let bitmap = image::load_from_memory_with_format(bytes, media_type.image_format())?;
    let bitmap = match media_type {
        MediaType::Jpeg => orientation::apply_orientation(bitmap, orientation::read_orientation(bytes)),
        MediaType::Png => bitmap,
    };
    log::debug!(
        "decoded {} image {}x{}",
        media_type,
        bitmap.width(),
        bitmap.height()
    );
    Ok(SourceImage::new(bitmap, media_type))
}

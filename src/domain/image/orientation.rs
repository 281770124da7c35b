// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/image/orientation.rs
//
// EXIF orientation handling for camera photos.

use image::DynamicImage;

/// Read the EXIF Orientation tag (0x0112). Returns 1 (normal) when absent.
#[cfg(feature = "exif")]
pub fn read_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = std::io::Cursor::new(bytes);
    let Ok(reader) = exif::Reader::new().read_from_container(&mut cursor) else {
        return 1;
    };

    reader
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1)
}

#[cfg(not(feature = "exif"))]
pub fn read_orientation(_bytes: &[u8]) -> u32 {
    1
}

/// Rotate/flip so the bitmap matches how the photo is meant to be viewed.
///
/// 1 = normal, 2 = mirrored, 3 = 180, 4 = flipped vertically,
/// 5 = mirrored + 90 CW, 6 = 90 CW, 7 = mirrored + 270 CW, 8 = 270 CW.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/upload/mod.rs
//
// Upload domain: accepted file and its media type.

mod item;
mod media;

pub use item::UploadItem;
pub use media::MediaType;

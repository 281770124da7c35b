// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/image/mod.rs
//
// Image domain: decoding and the decoded source bitmap.

mod decoder;
pub mod orientation;
mod source;

pub use decoder::{DecodeError, ImageDecoder, RejectReason, decode_bytes};
pub use source::{SourceImage, Viewport};

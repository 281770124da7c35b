// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/mod.rs
//
// Crop dialog module: overlay geometry and drag state.
// Inspired by cosmic-viewer (https://codeberg.org/bhh by Bryan Hyland

mod overlay;
mod selection;

pub use overlay::{OverlayLayout, OverlayRect};
pub use selection::DragSession;

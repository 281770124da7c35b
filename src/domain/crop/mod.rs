// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/mod.rs
//
// Crop domain: region geometry, widget conventions and rasterization.

mod convention;
mod model;
mod rasterizer;
mod region;

pub use convention::{CropConvention, WidgetCrop};
pub use model::{CropDelta, CropRegionModel, DragHandle};
pub use rasterizer::{
    CropRasterizer, CroppedBlob, RasterPlan, RasterizeError, SourceRect, map_to_source, output_size,
};
pub use region::{AspectPolicy, CropBounds, CropRegion, ParseAspectError};

// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/selection.rs
//
// Pointer drag session over the crop region.
// Inspired by cosmic-viewer (https://codeberg.org/bhh by Bryan Hyland

use crate::domain::crop::{CropBounds, CropDelta, CropRegion, DragHandle};

/// Tracks one drag from press to release.
///
/// Deltas are always measured from the press position against the region as it
/// was at the press, so a long drag does not accumulate clamping error.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    handle: DragHandle,
    start: Option<(f64, f64)>,
    start_region: Option<CropRegion>,
}

impl DragSession {
    pub fn start(&mut self, handle: DragHandle, x: f64, y: f64, region: CropRegion) {
        self.handle = handle;
        self.start = Some((x, y));
        self.start_region = Some(region);
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    pub fn handle(&self) -> DragHandle {
        self.handle
    }

    /// Region at press time and the delta that takes it to the pointer.
    ///
    /// A fresh selection is clipped to `bounds`, so it only covers the swept area.
    pub fn delta_to(&self, x: f64, y: f64, bounds: CropBounds) -> Option<(CropRegion, CropDelta)> {
        let (start_x, start_y) = self.start?;
        let region = self.start_region?;
        let dx = x - start_x;
        let dy = y - start_y;

        let delta = match self.handle {
            DragHandle::None => {
                let min_x = start_x.min(x).max(0.0);
                let min_y = start_y.min(y).max(0.0);
                let max_x = start_x.max(x).min(bounds.width);
                let max_y = start_y.max(y).min(bounds.height);
                CropDelta::Replace {
                    x: min_x,
                    y: min_y,
                    width: (max_x - min_x).max(0.0),
                    height: (max_y - min_y).max(0.0),
                }
            }
            DragHandle::Move => CropDelta::Move { dx, dy },
            handle => CropDelta::Resize { handle, dx, dy },
        };
        Some((region, delta))
    }

    pub fn end(&mut self) {
        self.start = None;
        self.start_region = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

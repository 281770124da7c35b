// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/overlay.rs
//
// Renderer-independent crop overlay geometry: shading, handles, grid, hit testing.
// Inspired by cosmic-viewer (https://codeberg.org/bhh by Bryan Hyland

use crate::constant::HANDLE_HIT_SIZE;
use crate::domain::crop::{CropBounds, CropRegion, DragHandle};

/// Axis-aligned rectangle in display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Grid lines are skipped when the region is this small.
const GRID_MIN_SIZE: f64 = 10.0;

/// What a host renderer needs to draw the crop dialog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    region: CropRegion,
    bounds: CropBounds,
}

impl OverlayLayout {
    pub fn new(region: CropRegion, bounds: CropBounds) -> Self {
        Self { region, bounds }
    }

    /// Dimmed areas around the region: top, bottom, left, right (empty ones omitted).
    pub fn shade(&self) -> Vec<OverlayRect> {
        let (x, y, w, h) = self.region.as_tuple();
        let (bw, bh) = (self.bounds.width, self.bounds.height);
        let bottom = y + h;
        let right = x + w;

        let candidates = [
            OverlayRect { x: 0.0, y: 0.0, width: bw, height: y },
            OverlayRect { x: 0.0, y: bottom, width: bw, height: bh - bottom },
            OverlayRect { x: 0.0, y, width: x, height: h },
            OverlayRect { x: right, y, width: bw - right, height: h },
        ];
        candidates
            .into_iter()
            .filter(|r| r.width > 0.0 && r.height > 0.0)
            .collect()
    }

    /// Handle centres, corners first.
    pub fn handles(&self) -> [(DragHandle, (f64, f64)); 8] {
        let (x, y, w, h) = self.region.as_tuple();
        [
            (DragHandle::TopLeft, (x, y)),
            (DragHandle::TopRight, (x + w, y)),
            (DragHandle::BottomLeft, (x, y + h)),
            (DragHandle::BottomRight, (x + w, y + h)),
            (DragHandle::Top, (x + w / 2.0, y)),
            (DragHandle::Bottom, (x + w / 2.0, y + h)),
            (DragHandle::Left, (x, y + h / 2.0)),
            (DragHandle::Right, (x + w, y + h / 2.0)),
        ]
    }

    /// Rule-of-thirds lines as `(start, end)` pairs.
    pub fn grid_lines(&self) -> Vec<((f64, f64), (f64, f64))> {
        let (x, y, w, h) = self.region.as_tuple();
        if w <= GRID_MIN_SIZE || h <= GRID_MIN_SIZE {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(4);
        for i in 1..3 {
            let lx = x + w * f64::from(i) / 3.0;
            lines.push(((lx, y), (lx, y + h)));
        }
        for i in 1..3 {
            let ly = y + h * f64::from(i) / 3.0;
            lines.push(((x, ly), (x + w, ly)));
        }
        lines
    }

    /// Which handle (if any) a press at `(px, py)` grabs.
    pub fn hit_test(&self, px: f64, py: f64) -> DragHandle {
        let half = HANDLE_HIT_SIZE / 2.0;
        let hit = self
            .handles()
            .into_iter()
            .find(|(_, (cx, cy))| (px - cx).abs() <= half && (py - cy).abs() <= half);
        if let Some((handle, _)) = hit {
            return handle;
        }

        if self.region.contains(px, py) {
            DragHandle::Move
        } else {
            DragHandle::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> OverlayLayout {
        OverlayLayout::new(CropRegion::new(200.0, 150.0, 400.0, 300.0), CropBounds::new(800.0, 600.0))
    }

    #[test]
    fn hit_testing_prefers_handles() {
        let l = layout();
        assert_eq!(l.hit_test(201.0, 149.0), DragHandle::TopLeft);
        assert_eq!(l.hit_test(600.0, 450.0), DragHandle::BottomRight);
        assert_eq!(l.hit_test(400.0, 455.0), DragHandle::Bottom);
        assert_eq!(l.hit_test(400.0, 300.0), DragHandle::Move);
        assert_eq!(l.hit_test(20.0, 20.0), DragHandle::None);
    }

    #[test]
    fn shade_surrounds_region() {
        let shade = layout().shade();
        assert_eq!(shade.len(), 4);
        let area: f64 = shade.iter().map(|r| r.width * r.height).sum();
        assert_eq!(area, 800.0 * 600.0 - 400.0 * 300.0);

        let full = OverlayLayout::new(CropRegion::new(0.0, 0.0, 800.0, 600.0), CropBounds::new(800.0, 600.0));
        assert!(full.shade().is_empty());
    }

    #[test]
    fn grid_only_for_usable_regions() {
        assert_eq!(layout().grid_lines().len(), 4);
        let tiny = OverlayLayout::new(CropRegion::new(0.0, 0.0, 8.0, 80.0), CropBounds::new(100.0, 100.0));
        assert!(tiny.grid_lines().is_empty());
    }
}

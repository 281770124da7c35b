// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/model.rs
//
// Crop region model: default placement, drag/resize/zoom adjustments and clamping.

use super::region::{AspectPolicy, CropBounds, CropRegion, valid_aspect};
use crate::constant::{DEFAULT_CROP_FRACTION, MAX_ZOOM, MIN_CROP_SIZE, MIN_ZOOM};

/// Relative tolerance below which a region already counts as matching its aspect.
const ASPECT_EPSILON: f64 = 1e-9;

/// Which part of the region a pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragHandle {
    /// Not on the region: drawing a fresh rectangle.
    #[default]
    None,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Move,
}

impl DragHandle {
    fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }
}

/// One user adjustment, in displayed pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropDelta {
    /// Translate the region.
    Move { dx: f64, dy: f64 },
    /// Drag `handle` by the given displacement.
    Resize { handle: DragHandle, dx: f64, dy: f64 },
    /// Multiply the zoom by `factor`, scaling the region about its centre.
    Zoom { factor: f64 },
    /// Replace the rectangle (aspect lock and zoom are kept).
    Replace { x: f64, y: f64, width: f64, height: f64 },
}

/// Pure, deterministic crop geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegionModel {
    fraction: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for CropRegionModel {
    fn default() -> Self {
        Self::new(DEFAULT_CROP_FRACTION, MIN_ZOOM, MAX_ZOOM)
    }
}

impl CropRegionModel {
    /// `fraction` outside `(0, 1]` falls back to the default; swapped zoom
    /// limits are reordered.
    pub fn new(fraction: f64, min_zoom: f64, max_zoom: f64) -> Self {
        let fraction = if fraction.is_finite() && fraction > 0.0 && fraction <= 1.0 {
            fraction
        } else {
            DEFAULT_CROP_FRACTION
        };
        let min_zoom = finite_or(min_zoom, MIN_ZOOM).max(f64::MIN_POSITIVE);
        let max_zoom = finite_or(max_zoom, MAX_ZOOM).max(f64::MIN_POSITIVE);
        Self {
            fraction,
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: max_zoom.max(min_zoom),
        }
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Centered default region covering `fraction` of each displayed dimension,
    /// shrunk to the aspect the policy resolves to.
    pub fn initialize(&self, bounds: impl Into<CropBounds>, policy: AspectPolicy) -> CropRegion {
        let bounds = bounds.into();
        let aspect = policy.resolve(bounds);
        let (width, height) = fit_aspect(
            bounds.width * self.fraction,
            bounds.height * self.fraction,
            aspect,
        );
        let region = CropRegion {
            x: (bounds.width - width) / 2.0,
            y: (bounds.height - height) / 2.0,
            width,
            height,
            aspect,
            zoom: self.min_zoom,
        };
        self.clamp(region, bounds)
    }

    /// Apply `delta` to `current` and re-clamp into `bounds`.
    pub fn adjust(&self, current: &CropRegion, delta: CropDelta, bounds: impl Into<CropBounds>) -> CropRegion {
        let bounds = bounds.into();
        let current = self.clamp(*current, bounds);

        let next = match delta {
            CropDelta::Move { dx, dy } => CropRegion {
                x: current.x + finite_or(dx, 0.0),
                y: current.y + finite_or(dy, 0.0),
                ..current
            },
            CropDelta::Resize { handle: DragHandle::Move, dx, dy } => {
                return self.adjust(&current, CropDelta::Move { dx, dy }, bounds);
            }
            CropDelta::Resize { handle: DragHandle::None, .. } => current,
            CropDelta::Resize { handle, dx, dy } => {
                resize(&current, handle, finite_or(dx, 0.0), finite_or(dy, 0.0), bounds)
            }
            CropDelta::Zoom { factor } => self.zoom(&current, factor),
            CropDelta::Replace { x, y, width, height } => CropRegion {
                x,
                y,
                width,
                height,
                ..current
            },
        };

        self.clamp(next, bounds)
    }

    /// Force a region inside `bounds`: non-finite values become zero, extents are
    /// capped, the aspect lock is re-applied by shrinking and the origin is
    /// pushed back inside. Applying it twice changes nothing.
    pub fn clamp(&self, region: CropRegion, bounds: CropBounds) -> CropRegion {
        let aspect = region.aspect.and_then(valid_aspect);
        let width = finite_or(region.width, 0.0).max(0.0).min(bounds.width);
        let height = finite_or(region.height, 0.0).max(0.0).min(bounds.height);
        let (width, height) = fit_aspect(width, height, aspect);

        CropRegion {
            x: finite_or(region.x, 0.0).min(bounds.width - width).max(0.0),
            y: finite_or(region.y, 0.0).min(bounds.height - height).max(0.0),
            width,
            height,
            aspect,
            zoom: self.clamp_zoom(region.zoom),
        }
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        finite_or(zoom, self.min_zoom).max(self.min_zoom).min(self.max_zoom)
    }

    fn zoom(&self, current: &CropRegion, factor: f64) -> CropRegion {
        if !factor.is_finite() || factor <= 0.0 {
            return *current;
        }
        let old = self.clamp_zoom(current.zoom);
        let new = self.clamp_zoom(old * factor);
        let scale = old / new;
        let (cx, cy) = current.center();
        let width = current.width * scale;
        let height = current.height * scale;
        CropRegion {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
            zoom: new,
            ..*current
        }
    }
}

/// Resize by moving the edges `handle` controls, the opposite edges stay put.
fn resize(r: &CropRegion, handle: DragHandle, dx: f64, dy: f64, b: CropBounds) -> CropRegion {
    let min = MIN_CROP_SIZE.min(b.width).min(b.height);
    let (right, bottom) = (r.right(), r.bottom());

    let mut left = r.x;
    let mut top = r.y;
    let mut new_right = right;
    let mut new_bottom = bottom;

    if handle.moves_left() {
        left = (r.x + dx).min(right - min).max(0.0);
    }
    if handle.moves_right() {
        new_right = (right + dx).max(r.x + min).min(b.width);
    }
    if handle.moves_top() {
        top = (r.y + dy).min(bottom - min).max(0.0);
    }
    if handle.moves_bottom() {
        new_bottom = (bottom + dy).max(r.y + min).min(b.height);
    }

    let mut width = new_right - left;
    let mut height = new_bottom - top;

    if let Some(aspect) = r.aspect.and_then(valid_aspect) {
        let horizontal = handle.moves_left() || handle.moves_right();
        let vertical = handle.moves_top() || handle.moves_bottom();
        match (horizontal, vertical) {
            (true, false) => height = width / aspect,
            (false, true) => width = height * aspect,
            _ => (width, height) = fit_aspect(width, height, Some(aspect)),
        }

        // Room available from the anchored edges.
        let max_width = if handle.moves_left() { right } else { b.width - r.x };
        let max_height = if handle.moves_top() { bottom } else { b.height - r.y };
        if width > max_width {
            width = max_width;
            height = width / aspect;
        }
        if height > max_height {
            height = max_height;
            width = height * aspect;
        }

        left = if handle.moves_left() { right - width } else { r.x };
        top = if handle.moves_top() { bottom - height } else { r.y };
    }

    CropRegion {
        x: left,
        y: top,
        width,
        height,
        ..*r
    }
}

/// Shrink one side so `width / height` matches `aspect`.
fn fit_aspect(width: f64, height: f64, aspect: Option<f64>) -> (f64, f64) {
    let Some(aspect) = aspect else {
        return (width, height);
    };
    if width <= 0.0 || height <= 0.0 {
        return (width, height);
    }
    let current = width / height;
    if (current - aspect).abs() <= ASPECT_EPSILON * aspect {
        (width, height)
    } else if current > aspect {
        (height * aspect, height)
    } else {
        (width, width / aspect)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

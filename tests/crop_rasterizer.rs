// SPDX-License-Identifier: GPL-3.0-or-later
// tests/crop_rasterizer.rs
//
// Scale-factor and pixel-ratio properties of the crop path.

mod common;

use image::{GenericImageView, ImageFormat};

use quizcrop::domain::crop::{
    AspectPolicy, CropBounds, CropDelta, CropRasterizer, CropRegion, CropRegionModel, DragHandle,
    RasterizeError, map_to_source,
};
use quizcrop::domain::image::SourceImage;
use quizcrop::domain::upload::MediaType;

use common::split_bitmap;

fn source(natural: (u32, u32), display: (f64, f64)) -> SourceImage {
    SourceImage::new(split_bitmap(natural.0, natural.1), MediaType::Png).with_display_size(display.0, display.1)
}

#[test]
fn output_matches_region_times_pixel_ratio() {
    let cases = [
        ((800, 600), (800.0, 600.0), CropRegion::new(200.0, 150.0, 400.0, 300.0), 1.0),
        ((800, 600), (400.0, 300.0), CropRegion::new(10.0, 20.0, 123.4, 56.6), 2.0),
        ((1024, 768), (640.0, 480.0), CropRegion::new(0.0, 0.0, 640.0, 480.0), 1.5),
        ((300, 900), (100.0, 300.0), CropRegion::new(33.3, 100.0, 33.3, 100.0), 3.0),
    ];
    for (natural, display, region, ratio) in cases {
        let img = source(natural, display);
        let blob = CropRasterizer::new(ratio, 92).rasterize(&img, &region, None).unwrap();
        let expected = (
            (region.width * ratio).round() as u32,
            (region.height * ratio).round() as u32,
        );
        assert_eq!((blob.width, blob.height), expected, "{region:?} @ {ratio}");

        let decoded = image::load_from_memory_with_format(&blob.bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), expected);
    }
}

#[test]
fn source_rect_is_display_rect_scaled_and_clamped() {
    let img = source((1000, 500), (250.0, 250.0));
    let rect = map_to_source(&img, &CropRegion::new(50.0, 25.0, 100.0, 50.0));
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (200.0, 50.0, 400.0, 100.0));

    let past_edge = map_to_source(&img, &CropRegion::new(200.0, 200.0, 100.0, 100.0));
    assert_eq!(
        (past_edge.x, past_edge.y, past_edge.width, past_edge.height),
        (800.0, 400.0, 200.0, 100.0)
    );
}

#[test]
fn crop_takes_pixels_from_scaled_source_position() {
    // Natural 400 wide shown at 100: the right display quarter is pure blue.
    let img = source((400, 100), (100.0, 25.0));
    let blob = CropRasterizer::default()
        .rasterize(&img, &CropRegion::new(75.0, 0.0, 25.0, 25.0), None)
        .unwrap();
    let decoded = image::load_from_memory(&blob.bytes).unwrap().to_rgba8();
    assert!(decoded.pixels().all(|p| p.0 == [0, 0, 255, 255]));

    let left = CropRasterizer::default()
        .rasterize(&img, &CropRegion::new(0.0, 0.0, 25.0, 25.0), None)
        .unwrap();
    let decoded = image::load_from_memory(&left.bytes).unwrap().to_rgba8();
    assert!(decoded.pixels().all(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn output_type_can_differ_from_upload() {
    let img = source((64, 64), (64.0, 64.0));
    let blob = CropRasterizer::default()
        .rasterize(&img, &CropRegion::new(0.0, 0.0, 32.0, 32.0), Some(MediaType::Jpeg))
        .unwrap();
    assert_eq!(blob.media_type, MediaType::Jpeg);
    assert_eq!(&blob.bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn zero_area_region_is_empty_output() {
    let img = source((64, 64), (64.0, 64.0));
    let err = CropRasterizer::default()
        .rasterize(&img, &CropRegion::new(10.0, 10.0, 0.0, 20.0), None)
        .unwrap_err();
    assert!(matches!(err, RasterizeError::EmptyOutput));
}

#[test]
fn adjust_never_leaves_bounds() {
    let model = CropRegionModel::default();
    let bounds = CropBounds::new(640.0, 360.0);
    let handles = [
        DragHandle::TopLeft,
        DragHandle::TopRight,
        DragHandle::BottomLeft,
        DragHandle::BottomRight,
        DragHandle::Top,
        DragHandle::Bottom,
        DragHandle::Left,
        DragHandle::Right,
        DragHandle::Move,
    ];

    for policy in [AspectPolicy::Native, AspectPolicy::Free, AspectPolicy::Fixed(1.0)] {
        let mut region = model.initialize(bounds, policy);
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for step in 0..500 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            let a = ((seed >> 33) % 2001) as f64 - 1000.0;
            let b = ((seed >> 13) % 2001) as f64 - 1000.0;
            let delta = match step % 4 {
                0 => CropDelta::Move { dx: a, dy: b },
                1 => CropDelta::Resize {
                    handle: handles[(seed % handles.len() as u64) as usize],
                    dx: a,
                    dy: b,
                },
                2 => CropDelta::Zoom { factor: 1.0 + a / 2000.0 },
                _ => CropDelta::Replace {
                    x: a,
                    y: b,
                    width: b.abs(),
                    height: a.abs(),
                },
            };
            region = model.adjust(&region, delta, bounds);

            assert!(region.x >= 0.0 && region.y >= 0.0, "{policy:?} {step}: {region:?}");
            assert!(region.right() <= bounds.width + 1e-9, "{policy:?} {step}: {region:?}");
            assert!(region.bottom() <= bounds.height + 1e-9, "{policy:?} {step}: {region:?}");
            let again = model.clamp(region, bounds);
            let (lhs, rhs) = (again.as_tuple(), region.as_tuple());
            assert!((lhs.0 - rhs.0).abs() < 1e-9 && (lhs.1 - rhs.1).abs() < 1e-9);
            assert!((lhs.2 - rhs.2).abs() < 1e-9 && (lhs.3 - rhs.3).abs() < 1e-9);
        }
    }
}

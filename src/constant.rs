// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Upper bound for an accepted upload (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Fraction of the displayed image covered by the initial crop region.
pub const DEFAULT_CROP_FRACTION: f64 = 0.5;

/// Minimum side length of a crop region while resizing (display pixels).
pub const MIN_CROP_SIZE: f64 = 1.0;

/// Zoom lower bound (1.0 = image fills the crop area).
pub const MIN_ZOOM: f64 = 1.0;

/// Zoom upper bound.
pub const MAX_ZOOM: f64 = 3.0;

/// Largest accepted output pixel ratio.
pub const MAX_PIXEL_RATIO: f64 = 8.0;

/// JPEG encoder quality (matches the 0.92 default of browser canvases).
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Config directory name below the platform config dir.
pub const CONFIG_DIR: &str = "quizcrop";

/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Shown by the results view while there is nothing to display.
pub const RESULTS_PLACEHOLDER: &str = "Answers will appear here after clicking \"View Answers\".";

/// Notification titles.
pub const NOTIFY_LOADING_TITLE: &str = "Generating Answers from Questions";
pub const NOTIFY_LOADING_MESSAGE: &str = "Please wait...";
pub const NOTIFY_SUCCESS_TITLE: &str = "Success";
pub const NOTIFY_SUCCESS_MESSAGE: &str = "Answers have been generated successfully!";
pub const NOTIFY_FAILURE_TITLE: &str = "Upload failed";

/// Edge length of the square hit area around each crop handle (display pixels).
pub const HANDLE_HIT_SIZE: f64 = 24.0;

/// Title of the notification shown when encoding the crop fails.
pub const NOTIFY_CROP_FAILURE_TITLE: &str = "Crop failed";

// SPDX-License-Identifier: GPL-3.0-or-later
// tests/config_parse.rs
//
// Config file round trip through the pipeline builder.

use std::io::Write;

use quizcrop::app::UploadPipeline;
use quizcrop::config::AppConfig;
use quizcrop::domain::crop::AspectPolicy;
use quizcrop::domain::image::Viewport;

#[test]
fn parse_config_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
base_url = "http://answers.local:9000"
upload_path = "api/upload"
max_upload_bytes = 1048576
aspect = "16:9"
pixel_ratio = 2.0

[viewport]
width = 640
height = 360
"#
    )
    .expect("write config");

    let cfg = AppConfig::load(file.path()).expect("load config");
    assert_eq!(cfg.upload_url(), "http://answers.local:9000/api/upload");
    assert_eq!(cfg.max_upload_bytes, 1024 * 1024);
    assert_eq!(cfg.viewport, Some(Viewport::new(640, 360)));
    let AspectPolicy::Fixed(ratio) = cfg.aspect_policy().expect("aspect") else {
        panic!("expected fixed aspect");
    };
    assert!((ratio - 16.0 / 9.0).abs() < 1e-12);

    let pipeline = UploadPipeline::from_config(&cfg).expect("pipeline");
    assert_eq!(pipeline.generation(), 0);
}

#[test]
fn unknown_keys_are_ignored_but_bad_values_are_not() {
    assert!(AppConfig::parse("colour = \"blue\"").is_ok());
    assert!(AppConfig::parse("pixel_ratio = \"high\"").is_err());
}

// SPDX-License-Identifier: GPL-3.0-or-later
// src/cli.rs
//
// Command-line host: drop one file, crop it, submit it and print the answers.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::app::{PipelineMessage, PipelineState, Session, UploadPipeline};
use crate::config::AppConfig;
use crate::domain::crop::{CropConvention, WidgetCrop};
use crate::domain::upload::UploadItem;
use crate::remote::HttpSubmitter;

#[derive(Parser, Debug)]
#[command(name = "quizcrop")]
#[command(about = "Crop a quiz screenshot, submit it and print the answers")]
pub struct Args {
    /// Image to upload (PNG or JPEG).
    pub file: PathBuf,

    /// Crop rectangle `X,Y,W,H` in image pixels. Defaults to the centred region.
    #[arg(long, value_parser = parse_crop)]
    pub crop: Option<[f64; 4]>,

    /// Read `--crop` as percentages of the image instead of pixels.
    #[arg(long)]
    pub percent: bool,

    /// Aspect policy: `native`, `free` or a ratio such as `16:9`.
    #[arg(long)]
    pub aspect: Option<String>,

    /// Device pixel ratio for the cropped output.
    #[arg(long)]
    pub pixel_ratio: Option<f64>,

    /// Base URL of the answering service.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to config TOML. If omitted, the platform config dir is used.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the cropped image here.
    #[arg(long)]
    pub save_crop: Option<PathBuf>,

    /// Crop only, do not submit.
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_crop(raw: &str) -> Result<[f64; 4], String> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid crop {raw:?}: {e}"))?;
    match values.as_slice() {
        &[x, y, w, h] if values.iter().all(|v| v.is_finite()) => Ok([x, y, w, h]),
        _ => Err(format!("expected X,Y,W,H, got {raw:?}")),
    }
}

/// Initialize env_logger; `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    match &args.aspect {
        Some(aspect) => config.aspect = aspect.clone(),
        // An explicit rectangle is taken as given.
        None if args.crop.is_some() => config.aspect = "free".into(),
        None => {}
    }
    if let Some(ratio) = args.pixel_ratio {
        config.pixel_ratio = ratio;
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn failure(pipeline: &UploadPipeline, what: &str) -> anyhow::Error {
    match pipeline.last_error() {
        Some(err) => anyhow!("{what}: {err}"),
        None => anyhow!("{what}"),
    }
}

pub async fn dispatch(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;
    let item = UploadItem::from_path(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let pipeline = UploadPipeline::from_config(&config)?;
    let submitter = HttpSubmitter::from_config(&config)?;
    let mut session = Session::new(pipeline, submitter);

    if session.drop_file(item).await != PipelineState::Cropping {
        return Err(failure(session.pipeline(), "could not load image"));
    }

    if let Some([x, y, w, h]) = args.crop {
        let convention = if args.percent {
            CropConvention::Percent
        } else {
            CropConvention::NaturalPixels
        };
        session
            .dispatch(PipelineMessage::CropReplace(WidgetCrop::new(convention, x, y, w, h)))
            .await;
    }
    if let Some(region) = session.pipeline().region() {
        log::info!("crop region {region}");
    }

    if session.confirm_crop().await != PipelineState::Ready {
        return Err(failure(session.pipeline(), "could not crop image"));
    }

    if let Some(path) = &args.save_crop {
        let blob = session
            .pipeline()
            .blob()
            .context("no cropped image available")?;
        std::fs::write(path, &blob.bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("saved crop to {}", path.display());
    }

    if args.dry_run {
        return Ok(());
    }

    log::info!("submitting to {}", session.submitter().url());
    match session.submit().await {
        PipelineState::Completed | PipelineState::Ready => {
            print!("{}", session.pipeline().results());
            Ok(())
        }
        state => Err(failure(session.pipeline(), &format!("submission ended in {state}"))),
    }
}

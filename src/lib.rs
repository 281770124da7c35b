// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Image upload widget core: decode, crop, rasterize, submit, show answers.

pub mod app;
pub mod cli;
pub mod config;
pub mod constant;
pub mod domain;
pub mod remote;

pub use app::{PipelineMessage, PipelineState, Session, UploadPipeline};
pub use config::AppConfig;

// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/error.rs
//
// Errors surfaced by the pipeline. All of them are recoverable UI states.

use thiserror::Error;

use crate::domain::crop::RasterizeError;
use crate::domain::image::DecodeError;
use crate::remote::SubmitError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Rasterize(#[from] RasterizeError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl PipelineError {
    /// Input refused before decoding (wrong type or too large).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Decode(e) if e.is_rejection())
    }
}

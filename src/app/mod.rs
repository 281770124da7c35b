// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Upload pipeline: state, messages, effects and the views it feeds.

mod effect;
mod error;
mod message;
mod model;
mod session;
mod state;
mod update;

pub mod view;

pub use effect::{DecodeJob, Effect, RasterJob, SubmitJob};
pub use error::PipelineError;
pub use message::PipelineMessage;
pub use model::UploadPipeline;
pub use session::Session;
pub use state::{PipelineState, Transition, TransitionCause, TransitionObserver};

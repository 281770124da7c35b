// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/effect.rs
//
// Async work requested by the pipeline and its completion messages.

use std::sync::Arc;

use crate::app::message::PipelineMessage;
use crate::domain::crop::{RasterPlan, RasterizeError};
use crate::domain::image::{DecodeError, decode_bytes};
use crate::domain::upload::{MediaType, UploadItem};
use crate::remote::RemoteSubmitter;

#[derive(Debug)]
pub struct DecodeJob {
    pub generation: u64,
    pub bytes: Arc<[u8]>,
    pub media_type: MediaType,
}

#[derive(Debug)]
pub struct RasterJob {
    pub generation: u64,
    pub plan: RasterPlan,
}

#[derive(Debug)]
pub struct SubmitJob {
    pub generation: u64,
    pub fingerprint: String,
    pub file: UploadItem,
}

/// Work to perform after a transition. Completion is fed back through
/// [`UploadPipeline::update`](crate::app::UploadPipeline::update).
#[derive(Debug)]
pub enum Effect {
    None,
    Decode(DecodeJob),
    Rasterize(RasterJob),
    Submit(SubmitJob),
}

impl Effect {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Perform the work and return the completion message.
    ///
    /// Decoding and rasterizing run on the blocking pool.
    pub async fn run(self, submitter: &dyn RemoteSubmitter) -> Option<PipelineMessage> {
        match self {
            Self::None => None,
            Self::Decode(job) => {
                let DecodeJob { generation, bytes, media_type } = job;
                let result = tokio::task::spawn_blocking(move || decode_bytes(&bytes, media_type))
                    .await
                    .unwrap_or_else(|e| Err(DecodeError::Interrupted(e.to_string())));
                Some(PipelineMessage::Decoded { generation, result })
            }
            Self::Rasterize(job) => {
                let RasterJob { generation, plan } = job;
                let result = tokio::task::spawn_blocking(move || plan.execute())
                    .await
                    .unwrap_or_else(|e| Err(RasterizeError::Interrupted(e.to_string())));
                Some(PipelineMessage::Rasterized { generation, result })
            }
            Self::Submit(job) => {
                log::debug!("submitting {} ({})", job.file.filename(), job.fingerprint);
                let result = submitter.submit(&job.file).await.map(|response| response.data);
                Some(PipelineMessage::Submitted {
                    generation: job.generation,
                    result,
                })
            }
        }
    }
}

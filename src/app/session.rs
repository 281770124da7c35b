// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/session.rs
//
// Drives the pipeline: feeds messages in and runs the effects they request.

use crate::app::message::PipelineMessage;
use crate::app::model::UploadPipeline;
use crate::app::state::PipelineState;
use crate::domain::crop::CropDelta;
use crate::domain::upload::UploadItem;
use crate::remote::RemoteSubmitter;

/// A pipeline bound to the service it submits to.
///
/// Each call runs its effects to completion before returning, so operations
/// never interleave.
pub struct Session<S> {
    pipeline: UploadPipeline,
    submitter: S,
}

impl<S: RemoteSubmitter> Session<S> {
    pub fn new(pipeline: UploadPipeline, submitter: S) -> Self {
        Self { pipeline, submitter }
    }

    pub fn pipeline(&self) -> &UploadPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut UploadPipeline {
        &mut self.pipeline
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn into_parts(self) -> (UploadPipeline, S) {
        (self.pipeline, self.submitter)
    }

    /// Apply `message` and every completion it leads to.
    pub async fn dispatch(&mut self, message: PipelineMessage) -> PipelineState {
        let mut effect = self.pipeline.update(message);
        while let Some(next) = effect.run(&self.submitter).await {
            effect = self.pipeline.update(next);
        }
        self.pipeline.state()
    }

    pub async fn drop_file(&mut self, item: UploadItem) -> PipelineState {
        self.dispatch(PipelineMessage::FileDropped(item)).await
    }

    pub async fn confirm_crop(&mut self) -> PipelineState {
        self.dispatch(PipelineMessage::ConfirmCrop).await
    }

    pub async fn submit(&mut self) -> PipelineState {
        self.dispatch(PipelineMessage::Submit).await
    }

    pub async fn cancel(&mut self) -> PipelineState {
        self.dispatch(PipelineMessage::Cancel).await
    }

    pub async fn cancel_crop(&mut self) -> PipelineState {
        self.dispatch(PipelineMessage::CancelCrop).await
    }

    /// Region edits never start async work.
    pub fn adjust(&mut self, delta: CropDelta) -> PipelineState {
        let effect = self.pipeline.update(PipelineMessage::CropAdjust(delta));
        debug_assert!(effect.is_none());
        self.pipeline.state()
    }
}

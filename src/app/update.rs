// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Message handling for the upload pipeline.

use crate::app::effect::{DecodeJob, Effect, RasterJob, SubmitJob};
use crate::app::message::PipelineMessage;
use crate::app::model::UploadPipeline;
use crate::app::state::{PipelineState, TransitionCause};
use crate::constant::{
    MIN_CROP_SIZE, NOTIFY_CROP_FAILURE_TITLE, NOTIFY_FAILURE_TITLE, NOTIFY_LOADING_MESSAGE,
    NOTIFY_LOADING_TITLE, NOTIFY_SUCCESS_MESSAGE, NOTIFY_SUCCESS_TITLE,
};
use crate::domain::answer::AnswerRecord;
use crate::domain::crop::{CropBounds, CropDelta, CropRegion, CroppedBlob, DragHandle, RasterizeError, WidgetCrop};
use crate::domain::image::{DecodeError, SourceImage};
use crate::domain::upload::UploadItem;
use crate::remote::{Notification, NotificationStatus, SubmitError};

impl UploadPipeline {
    /// Apply one message and return the work it requests.
    pub fn update(&mut self, message: PipelineMessage) -> Effect {
        match message {
            // File boundary.
            PipelineMessage::FileDropped(item) => self.accept_file(item),
            PipelineMessage::FilesDropped(items) => match items.into_iter().next() {
                Some(item) => self.accept_file(item),
                None => Effect::None,
            },
            PipelineMessage::FileRejected(reason) => {
                self.reject(DecodeError::Rejected(reason));
                Effect::None
            }

            // Crop interaction.
            PipelineMessage::CropPointerDown { x, y } => {
                if let Some(layout) = self.overlay() {
                    self.start_drag(layout.hit_test(x, y), x, y);
                }
                Effect::None
            }
            PipelineMessage::CropDragStart { x, y, handle } => {
                self.start_drag(handle, x, y);
                Effect::None
            }
            PipelineMessage::CropDragMove { x, y } => {
                self.drag_to(x, y);
                Effect::None
            }
            PipelineMessage::CropDragEnd => {
                self.drag.end();
                Effect::None
            }
            PipelineMessage::CropZoom(factor) => {
                self.adjust_region(CropDelta::Zoom { factor });
                Effect::None
            }
            PipelineMessage::CropAdjust(delta) => {
                self.adjust_region(delta);
                Effect::None
            }
            PipelineMessage::CropReplace(widget) => {
                self.replace_region(widget);
                Effect::None
            }
            PipelineMessage::DisplayResized { width, height } => {
                self.resize_display(width, height);
                Effect::None
            }
            PipelineMessage::ConfirmCrop => self.confirm_crop(),
            PipelineMessage::CancelCrop => {
                self.cancel_crop();
                Effect::None
            }

            // Submission.
            PipelineMessage::Submit => self.submit(),
            PipelineMessage::Cancel => {
                self.cancel();
                Effect::None
            }

            // Completions.
            PipelineMessage::Decoded { generation, result } => {
                self.on_decoded(generation, result);
                Effect::None
            }
            PipelineMessage::Rasterized { generation, result } => {
                self.on_rasterized(generation, result);
                Effect::None
            }
            PipelineMessage::Submitted { generation, result } => {
                self.on_submitted(generation, result);
                Effect::None
            }
        }
    }

    // =========================================================================
    // File boundary
    // =========================================================================

    fn accept_file(&mut self, item: UploadItem) -> Effect {
        let media_type = match self.decoder.check(&item) {
            Ok(media_type) => media_type,
            Err(err) => {
                self.reject(err);
                return Effect::None;
            }
        };

        self.hide_notification();
        self.bump_generation();
        self.clear_upload();
        self.answers.clear();
        self.clear_error();

        log::info!("accepted {} ({} bytes, {})", item.filename(), item.size(), media_type);
        self.fingerprint = Some(item.fingerprint());
        let bytes = item.shared_bytes();
        self.item = Some(item);
        self.transition(PipelineState::Idle, TransitionCause::FileDropped);

        Effect::Decode(DecodeJob {
            generation: self.generation,
            bytes,
            media_type,
        })
    }

    fn reject(&mut self, err: DecodeError) {
        self.hide_notification();
        self.bump_generation();
        self.clear_upload();
        self.answers.clear();
        self.set_error(err);
        self.transition(PipelineState::Idle, TransitionCause::FileRejected);
    }

    fn on_decoded(&mut self, generation: u64, result: Result<SourceImage, DecodeError>) {
        if generation != self.generation || self.state != PipelineState::Idle || self.item.is_none() {
            log::debug!("discarding stale decode result (generation {generation})");
            return;
        }

        match result {
            Ok(source) => {
                let source = match self.viewport {
                    Some(viewport) => source.fit_to(viewport),
                    None => source,
                };
                let region = self.crop_model.initialize(&source, self.aspect);
                log::debug!("initial crop region {region}");
                self.source = Some(source);
                self.region = Some(region);
                self.transition(PipelineState::Cropping, TransitionCause::FileAccepted);
            }
            Err(err) => {
                self.clear_upload();
                self.set_error(err);
                self.transition(PipelineState::Idle, TransitionCause::DecodeFailed);
            }
        }
    }

    // =========================================================================
    // Crop session
    // =========================================================================

    /// Region edits are only taken while cropping and not encoding.
    fn editable_bounds(&self) -> Option<(CropBounds, CropRegion)> {
        if self.state != PipelineState::Cropping || self.rasterizing {
            return None;
        }
        let bounds = CropBounds::from(self.source.as_ref()?);
        Some((bounds, self.region?))
    }

    fn start_drag(&mut self, handle: DragHandle, x: f64, y: f64) {
        if let Some((_, region)) = self.editable_bounds() {
            self.drag.start(handle, x, y, region);
        }
    }

    fn drag_to(&mut self, x: f64, y: f64) {
        let Some((bounds, _)) = self.editable_bounds() else {
            return;
        };
        let Some((start, delta)) = self.drag.delta_to(x, y, bounds) else {
            return;
        };
        if let CropDelta::Replace { width, height, .. } = delta
            && (width < MIN_CROP_SIZE || height < MIN_CROP_SIZE)
        {
            return;
        }
        self.region = Some(self.crop_model.adjust(&start, delta, bounds));
    }

    fn adjust_region(&mut self, delta: CropDelta) {
        if let Some((bounds, region)) = self.editable_bounds() {
            self.region = Some(self.crop_model.adjust(&region, delta, bounds));
        }
    }

    fn replace_region(&mut self, widget: WidgetCrop) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let r = widget.to_region(source);
        self.adjust_region(CropDelta::Replace {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        });
    }

    /// Rescale the display size and the region with it.
    fn resize_display(&mut self, width: f64, height: f64) {
        let Some(source) = self.source.take() else {
            return;
        };
        let old = CropBounds::from(&source);
        let source = source.with_display_size(width, height);
        let new = CropBounds::from(&source);

        if let Some(region) = self.region {
            let sx = if old.width > 0.0 { new.width / old.width } else { 1.0 };
            let sy = if old.height > 0.0 { new.height / old.height } else { 1.0 };
            let scaled = CropRegion {
                x: region.x * sx,
                y: region.y * sy,
                width: region.width * sx,
                height: region.height * sy,
                ..region
            };
            self.region = Some(self.crop_model.clamp(scaled, new));
        }
        self.drag.end();
        self.source = Some(source);
    }

    fn confirm_crop(&mut self) -> Effect {
        if self.editable_bounds().is_none() {
            return Effect::None;
        }
        let (Some(source), Some(region)) = (self.source.as_ref(), self.region.as_ref()) else {
            return Effect::None;
        };
        let plan = self.rasterizer.plan(source, region, self.output_type);
        log::debug!("rasterizing {region} -> {:?}", plan);
        self.hide_crop_notification();
        self.drag.end();
        self.rasterizing = true;
        Effect::Rasterize(RasterJob {
            generation: self.generation,
            plan,
        })
    }

    fn on_rasterized(&mut self, generation: u64, result: Result<CroppedBlob, RasterizeError>) {
        if generation != self.generation || !self.rasterizing || self.state != PipelineState::Cropping {
            log::debug!("discarding stale rasterize result (generation {generation})");
            return;
        }
        self.rasterizing = false;

        match result {
            Ok(blob) => {
                log::info!("cropped to {}x{} ({} bytes)", blob.width, blob.height, blob.bytes.len());
                self.blob = Some(blob);
                self.clear_error();
                self.transition(PipelineState::Ready, TransitionCause::CropConfirmed);
            }
            Err(err) => {
                self.hide_crop_notification();
                self.crop_notification = Some(self.notifier.show(Notification::new(
                    NotificationStatus::Failure,
                    NOTIFY_CROP_FAILURE_TITLE,
                    err.to_string(),
                )));
                self.set_error(err);
                self.transition(PipelineState::Cropping, TransitionCause::RasterizeFailed);
            }
        }
    }

    /// Crop dialog closed: drop the file, including one still decoding.
    fn cancel_crop(&mut self) {
        let decoding = self.state == PipelineState::Idle && self.item.is_some();
        if self.state == PipelineState::Cropping || decoding {
            self.reset(TransitionCause::CropCancelled);
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    fn submit(&mut self) -> Effect {
        match self.state {
            PipelineState::Ready | PipelineState::Completed | PipelineState::Failed => {}
            PipelineState::Submitting => {
                log::debug!("submit ignored: submission already in flight");
                return Effect::None;
            }
            PipelineState::Idle | PipelineState::Cropping => return Effect::None,
        }
        let (Some(item), Some(blob)) = (self.item.as_ref(), self.blob.as_ref()) else {
            return Effect::None;
        };
        let file = blob.to_upload(item.filename());
        let fingerprint = file.fingerprint();

        self.hide_notification();
        self.clear_error();
        self.notification = Some(self.notifier.show(Notification::new(
            NotificationStatus::Loading,
            NOTIFY_LOADING_TITLE,
            NOTIFY_LOADING_MESSAGE,
        )));
        self.transition(PipelineState::Submitting, TransitionCause::SubmitStarted);

        Effect::Submit(SubmitJob {
            generation: self.generation,
            fingerprint,
            file,
        })
    }

    fn on_submitted(&mut self, generation: u64, result: Result<Vec<AnswerRecord>, SubmitError>) {
        if generation != self.generation || self.state != PipelineState::Submitting {
            log::debug!("discarding stale submit result (generation {generation})");
            return;
        }

        match result {
            Ok(answers) if answers.is_empty() => {
                self.answers.clear();
                self.hide_notification();
                self.transition(PipelineState::Ready, TransitionCause::SubmitEmpty);
            }
            Ok(answers) => {
                log::info!("received {} answers", answers.len());
                self.answers = answers;
                self.notify(Notification::new(
                    NotificationStatus::Success,
                    NOTIFY_SUCCESS_TITLE,
                    NOTIFY_SUCCESS_MESSAGE,
                ));
                self.transition(PipelineState::Completed, TransitionCause::SubmitSucceeded);
            }
            Err(err) => {
                self.notify(Notification::new(
                    NotificationStatus::Failure,
                    NOTIFY_FAILURE_TITLE,
                    err.to_string(),
                ));
                self.answers.clear();
                self.set_error(err);
                self.transition(PipelineState::Failed, TransitionCause::SubmitFailed);
            }
        }
    }

    fn cancel(&mut self) {
        match self.state {
            PipelineState::Ready
            | PipelineState::Completed
            | PipelineState::Failed
            | PipelineState::Submitting => self.reset(TransitionCause::Cancelled),
            PipelineState::Cropping | PipelineState::Idle => self.cancel_crop(),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Update the submission notification, showing it if it is gone.
    fn notify(&mut self, notification: Notification) {
        match self.notification {
            Some(id) => self.notifier.update(id, notification),
            None => self.notification = Some(self.notifier.show(notification)),
        }
    }

    fn reset(&mut self, cause: TransitionCause) {
        self.hide_notification();
        self.bump_generation();
        self.clear_upload();
        self.answers.clear();
        self.clear_error();
        self.transition(PipelineState::Idle, cause);
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Pipeline state: the active upload, crop session, blob and answers.

use anyhow::Result;

use crate::app::error::PipelineError;
use crate::app::state::{PipelineState, Transition, TransitionCause, TransitionObserver};
use crate::app::view::crop::{DragSession, OverlayLayout};
use crate::app::view::results::{ResultsDisplay, ResultsView};
use crate::config::AppConfig;
use crate::domain::answer::AnswerRecord;
use crate::domain::crop::{AspectPolicy, CropBounds, CropRasterizer, CropRegion, CropRegionModel, CroppedBlob};
use crate::domain::image::{ImageDecoder, SourceImage, Viewport};
use crate::domain::upload::{MediaType, UploadItem};
use crate::remote::{LogNotifier, NotificationId, Notifier};

/// Upload, crop and submit state machine.
///
/// All mutation goes through [`UploadPipeline::update`]; slow work is handed
/// back to the caller as an [`Effect`](crate::app::Effect).
pub struct UploadPipeline {
    pub(crate) state: PipelineState,
    /// Bumped whenever in-flight work must be forgotten.
    pub(crate) generation: u64,

    // Active upload.
    pub(crate) item: Option<UploadItem>,
    pub(crate) fingerprint: Option<String>,
    pub(crate) source: Option<SourceImage>,

    // Crop session.
    pub(crate) region: Option<CropRegion>,
    pub(crate) drag: DragSession,
    pub(crate) rasterizing: bool,

    // Outputs.
    pub(crate) blob: Option<CroppedBlob>,
    pub(crate) answers: Vec<AnswerRecord>,
    pub(crate) last_error: Option<PipelineError>,
    pub(crate) notification: Option<NotificationId>,
    pub(crate) crop_notification: Option<NotificationId>,

    // Collaborators and settings.
    pub(crate) decoder: ImageDecoder,
    pub(crate) crop_model: CropRegionModel,
    pub(crate) rasterizer: CropRasterizer,
    pub(crate) aspect: AspectPolicy,
    pub(crate) viewport: Option<Viewport>,
    pub(crate) output_type: Option<MediaType>,
    pub(crate) notifier: Box<dyn Notifier>,
    pub(crate) observer: Option<Box<dyn TransitionObserver>>,
}

impl Default for UploadPipeline {
    fn default() -> Self {
        Self {
            state: PipelineState::Idle,
            generation: 0,
            item: None,
            fingerprint: None,
            source: None,
            region: None,
            drag: DragSession::default(),
            rasterizing: false,
            blob: None,
            answers: Vec::new(),
            last_error: None,
            notification: None,
            crop_notification: None,
            decoder: ImageDecoder::default(),
            crop_model: CropRegionModel::default(),
            rasterizer: CropRasterizer::default(),
            aspect: AspectPolicy::default(),
            viewport: None,
            output_type: None,
            notifier: Box::new(LogNotifier::default()),
            observer: None,
        }
    }
}

impl UploadPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from user configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            decoder: ImageDecoder::new(config.max_upload_bytes),
            crop_model: CropRegionModel::new(config.default_crop_fraction, config.min_zoom, config.max_zoom),
            rasterizer: CropRasterizer::new(config.pixel_ratio, config.jpeg_quality),
            aspect: config.aspect_policy()?,
            viewport: config.viewport,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl TransitionObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    #[must_use]
    pub fn with_aspect(mut self, aspect: AspectPolicy) -> Self {
        self.aspect = aspect;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Option<Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_rasterizer(mut self, rasterizer: CropRasterizer) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    #[must_use]
    pub fn with_decoder(mut self, decoder: ImageDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Force the encoding of the cropped blob instead of reusing the upload's.
    #[must_use]
    pub fn with_output_type(mut self, output_type: Option<MediaType>) -> Self {
        self.output_type = output_type;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn item(&self) -> Option<&UploadItem> {
        self.item.as_ref()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn region(&self) -> Option<&CropRegion> {
        self.region.as_ref()
    }

    pub fn blob(&self) -> Option<&CroppedBlob> {
        self.blob.as_ref()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    /// Decoding, rasterizing or submitting.
    pub fn is_busy(&self) -> bool {
        self.rasterizing
            || self.state == PipelineState::Submitting
            || (self.state == PipelineState::Idle && self.item.is_some())
    }

    pub fn results(&self) -> ResultsDisplay {
        ResultsView::render(&self.answers)
    }

    /// Overlay geometry while cropping.
    pub fn overlay(&self) -> Option<OverlayLayout> {
        if self.state != PipelineState::Cropping {
            return None;
        }
        let source = self.source.as_ref()?;
        let region = self.region?;
        Some(OverlayLayout::new(region, CropBounds::from(source)))
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    pub(crate) fn transition(&mut self, to: PipelineState, cause: TransitionCause) {
        let from = self.state;
        self.state = to;
        log::debug!("{from} -> {to} ({cause})");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_transition(&Transition {
                from,
                to,
                cause,
                generation: self.generation,
                fingerprint: self.fingerprint.clone(),
            });
        }
    }

    pub(crate) fn set_error(&mut self, error: impl Into<PipelineError>) {
        let error = error.into();
        log::warn!("{error}");
        self.last_error = Some(error);
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Forget in-flight work: late completions for older generations are dropped.
    pub(crate) fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Drop the crop session and everything derived from the upload.
    pub(crate) fn clear_upload(&mut self) {
        self.item = None;
        self.fingerprint = None;
        self.source = None;
        self.region = None;
        self.drag.reset();
        self.rasterizing = false;
        self.blob = None;
    }

    /// Hide the upload notification and any crop failure still showing.
    pub(crate) fn hide_notification(&mut self) {
        if let Some(id) = self.notification.take() {
            self.notifier.hide(id);
        }
        self.hide_crop_notification();
    }

    pub(crate) fn hide_crop_notification(&mut self) {
        if let Some(id) = self.crop_notification.take() {
            self.notifier.hide(id);
        }
    }
}

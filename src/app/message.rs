// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Pipeline messages: user actions and effect completions.

use crate::domain::crop::{CropDelta, CroppedBlob, DragHandle, RasterizeError, WidgetCrop};
use crate::domain::answer::AnswerRecord;
use crate::domain::image::{DecodeError, RejectReason, SourceImage};
use crate::domain::upload::UploadItem;
use crate::remote::SubmitError;

#[derive(Debug)]
pub enum PipelineMessage {
    // File boundary.
    FileDropped(UploadItem),
    /// Several files in one drop: the first one wins.
    FilesDropped(Vec<UploadItem>),
    /// The drop zone refused the file itself.
    FileRejected(RejectReason),

    // Crop interaction (display pixels).
    CropPointerDown {
        x: f64,
        y: f64,
    },
    CropDragStart {
        x: f64,
        y: f64,
        handle: DragHandle,
    },
    CropDragMove {
        x: f64,
        y: f64,
    },
    CropDragEnd,
    CropZoom(f64),
    CropAdjust(CropDelta),
    CropReplace(WidgetCrop),
    DisplayResized {
        width: f64,
        height: f64,
    },
    ConfirmCrop,
    CancelCrop,

    // Submission.
    Submit,
    Cancel,

    // Effect completions, tagged with the generation that issued them.
    Decoded {
        generation: u64,
        result: Result<SourceImage, DecodeError>,
    },
    Rasterized {
        generation: u64,
        result: Result<CroppedBlob, RasterizeError>,
    },
    Submitted {
        generation: u64,
        result: Result<Vec<AnswerRecord>, SubmitError>,
    },
}

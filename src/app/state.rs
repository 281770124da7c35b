// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/state.rs
//
// Pipeline states and the transition hook.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// No file, no results (also while a freshly dropped file decodes).
    #[default]
    Idle,
    /// Image decoded, region being adjusted.
    Cropping,
    /// Cropped blob held, waiting for submit.
    Ready,
    /// One submission in flight.
    Submitting,
    /// Answers received.
    Completed,
    /// Last submission failed, file and blob kept for retry.
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Cropping => "Cropping",
            Self::Ready => "Ready",
            Self::Submitting => "Submitting",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// What triggered a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    FileDropped,
    FileRejected,
    FileAccepted,
    DecodeFailed,
    CropConfirmed,
    RasterizeFailed,
    CropCancelled,
    SubmitStarted,
    SubmitSucceeded,
    SubmitEmpty,
    SubmitFailed,
    Cancelled,
}

impl fmt::Display for TransitionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileDropped => "file dropped",
            Self::FileRejected => "file rejected",
            Self::FileAccepted => "file accepted",
            Self::DecodeFailed => "decode failed",
            Self::CropConfirmed => "crop confirmed",
            Self::RasterizeFailed => "rasterize failed",
            Self::CropCancelled => "crop cancelled",
            Self::SubmitStarted => "submit started",
            Self::SubmitSucceeded => "submit succeeded",
            Self::SubmitEmpty => "submit returned no answers",
            Self::SubmitFailed => "submit failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One committed state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: PipelineState,
    pub to: PipelineState,
    pub cause: TransitionCause,
    /// Pipeline generation after the change.
    pub generation: u64,
    /// SHA-256 of the active upload, if any.
    pub fingerprint: Option<String>,
}

/// Structured hook called on every transition.
pub trait TransitionObserver: Send {
    fn on_transition(&mut self, transition: &Transition);
}

impl<F> TransitionObserver for F
where
    F: FnMut(&Transition) + Send,
{
    fn on_transition(&mut self, transition: &Transition) {
        self(transition);
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/mod.rs
//
// Presentation helpers: crop dialog geometry and the results list.

pub mod crop;
pub mod results;

pub use results::{RenderedEntry, ResultsDisplay, ResultsView, Segment, highlight};

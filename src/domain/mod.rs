// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Domain layer: pure data and image operations, no UI or transport concerns.

pub mod answer;
pub mod crop;
pub mod image;
pub mod upload;

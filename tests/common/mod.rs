// SPDX-License-Identifier: GPL-3.0-or-later
// tests/common/mod.rs
//
// Shared fixtures: encoded images and a scripted submitter.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use quizcrop::domain::answer::AnswerRecord;
use quizcrop::domain::upload::UploadItem;
use quizcrop::remote::{RemoteSubmitter, SubmitError, SubmitResponse};

pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode fixture");
    buf.into_inner()
}

pub fn png(width: u32, height: u32) -> UploadItem {
    let img = DynamicImage::new_rgb8(width, height);
    UploadItem::new(encode(&img, ImageFormat::Png), "image/png", "questions.png")
}

pub fn jpeg(width: u32, height: u32) -> UploadItem {
    let img = DynamicImage::new_rgb8(width, height);
    UploadItem::new(encode(&img, ImageFormat::Jpeg), "image/jpeg", "questions.jpg")
}

/// Left half red, right half blue.
pub fn split_bitmap(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
}

pub fn answers(pairs: &[(&str, &str)]) -> Vec<AnswerRecord> {
    pairs.iter().map(|(q, a)| AnswerRecord::new(*q, *a)).collect()
}

/// Replays canned replies in order and records what it was sent.
#[derive(Default)]
pub struct ScriptedSubmitter {
    replies: Mutex<VecDeque<Result<SubmitResponse, SubmitError>>>,
    sent: Mutex<Vec<UploadItem>>,
    calls: AtomicUsize,
}

impl ScriptedSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, result: Result<Vec<AnswerRecord>, SubmitError>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(result.map(|data| SubmitResponse { data }));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<UploadItem> {
        self.sent.lock().unwrap().clone()
    }
}

impl RemoteSubmitter for ScriptedSubmitter {
    fn submit<'a>(&'a self, file: &'a UploadItem) -> BoxFuture<'a, Result<SubmitResponse, SubmitError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(file.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SubmitError::Transport("no scripted reply".into())));
        async move { reply }.boxed()
    }
}

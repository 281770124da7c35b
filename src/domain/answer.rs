// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/answer.rs
//
// Question/answer pairs returned by the answering service.

use serde::{Deserialize, Serialize};

/// One question and its answer, immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
}

impl AnswerRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

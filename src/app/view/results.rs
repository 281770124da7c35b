// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/results.rs
//
// Question/answer list with highlighted answers.

use std::fmt;

use regex::RegexBuilder;

use crate::constant::RESULTS_PLACEHOLDER;
use crate::domain::answer::AnswerRecord;

/// A run of text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// One rendered record. `index` is its position and doubles as the render key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub index: usize,
    pub question: String,
    pub answer: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsDisplay {
    Placeholder(String),
    Entries(Vec<RenderedEntry>),
}

/// Renders answer records for display.
pub struct ResultsView;

impl ResultsView {
    /// Each answer is highlighted using itself as the pattern.
    pub fn render(records: &[AnswerRecord]) -> ResultsDisplay {
        if records.is_empty() {
            return ResultsDisplay::Placeholder(RESULTS_PLACEHOLDER.to_string());
        }
        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| RenderedEntry {
                index,
                question: record.question.clone(),
                answer: highlight(&record.answer, &record.answer),
            })
            .collect();
        ResultsDisplay::Entries(entries)
    }
}

/// Split `text` into segments, marking every case-insensitive occurrence of
/// `pattern` (taken literally, surrounding whitespace ignored).
pub fn highlight(text: &str, pattern: &str) -> Vec<Segment> {
    let needle = pattern.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if needle.is_empty() {
        return vec![Segment::plain(text)];
    }

    let Ok(re) = RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::plain(&text[last..m.start()]));
        }
        segments.push(Segment::marked(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}

impl fmt::Display for ResultsDisplay {
    /// Terminal rendering; highlighted runs are wrapped in `**`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder(text) => writeln!(f, "{text}"),
            Self::Entries(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "{}", entry.question)?;
                    write!(f, "Answer: ")?;
                    for segment in &entry.answer {
                        if segment.highlighted {
                            write!(f, "**{}**", segment.text)?;
                        } else {
                            write!(f, "{}", segment.text)?;
                        }
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

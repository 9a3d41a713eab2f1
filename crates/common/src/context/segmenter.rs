//! Paragraph segmentation
//!
//! Splits extracted document text into blank-line-delimited paragraphs.

use serde::{Deserialize, Serialize};

/// A trimmed, non-empty unit of document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Zero-based position in the source document
    pub position: usize,

    /// Paragraph text, trimmed
    pub text: String,
}

impl Paragraph {
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// Split text on runs of two or more newlines, dropping blank segments.
///
/// Carriage returns are ignored when detecting the runs, so `\r\n\r\n`
/// separates paragraphs too.
pub fn segment(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut run_start = None;
    let mut newlines = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '\n' => {
                run_start.get_or_insert(idx);
                newlines += 1;
            }
            '\r' if run_start.is_some() => {}
            _ => {
                if let Some(run) = run_start.take() {
                    if newlines >= 2 {
                        push_segment(&mut paragraphs, &text[start..run]);
                        start = idx;
                    }
                }
                newlines = 0;
            }
        }
    }

    push_segment(&mut paragraphs, &text[start..]);
    paragraphs
}

fn push_segment(paragraphs: &mut Vec<Paragraph>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        let position = paragraphs.len();
        paragraphs.push(Paragraph::new(position, trimmed));
    }
}

/// Join paragraph texts with a blank line between each
pub fn join_paragraphs(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Borrow at most `max_chars` characters from the start of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

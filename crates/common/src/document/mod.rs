//! Extracted document loading
//!
//! Accepts the output of a PDF-to-text extractor: plain UTF-8 text with
//! pages separated by form feeds (`\x0C`).

use crate::context::PageRecord;
use crate::errors::{AppError, Result};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

const PAGE_BREAK: char = '\u{000C}';

/// Extracted text of one uploaded document and its page map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Full document text, pages joined by a blank line
    pub text: String,

    /// One record per page, numbered from 1
    pub pages: Vec<PageRecord>,
}

impl Document {
    /// Split extracted text into pages at form feeds. A trailing empty page
    /// after a final form feed is dropped; text without form feeds is a
    /// single page.
    pub fn from_extracted_text(extracted: &str) -> Self {
        let mut raw: Vec<&str> = extracted.split(PAGE_BREAK).collect();
        if raw.len() > 1 && raw.last().is_some_and(|p| p.trim().is_empty()) {
            raw.pop();
        }

        let pages: Vec<PageRecord> = raw
            .iter()
            .enumerate()
            .map(|(i, text)| PageRecord::new(i as u32 + 1, *text))
            .collect();

        let text = raw.join("\n\n");

        Self { text, pages }
    }

    /// Read an extracted-text file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let extracted = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::DocumentNotFound {
                path: path.display().to_string(),
            },
            ErrorKind::InvalidData => AppError::InvalidFormat {
                message: format!("{} is not valid UTF-8 text", path.display()),
            },
            _ => AppError::Io(e),
        })?;

        let document = Self::from_extracted_text(&extracted);

        debug!(
            path = %path.display(),
            pages = document.pages.len(),
            chars = document.text.chars().count(),
            "Document loaded"
        );

        Ok(document)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

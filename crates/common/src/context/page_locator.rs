//! Page attribution for selected paragraphs

use super::segmenter::{truncate_chars, Paragraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Verbatim text of one extracted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based page number, strictly increasing across a document
    pub page_number: u32,

    /// Page text as extracted, not paragraph-normalized
    pub text: String,
}

impl PageRecord {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// Map each paragraph to the first page containing its leading
/// `prefix_chars` characters. Returns page numbers ascending, unique.
///
/// A paragraph is bound to at most one page even when its text repeats
/// across pages.
pub fn locate_pages(paragraphs: &[Paragraph], pages: &[PageRecord], prefix_chars: usize) -> Vec<u32> {
    debug_assert!(
        pages.windows(2).all(|w| w[0].page_number < w[1].page_number),
        "page numbers must be strictly increasing"
    );

    let mut found = BTreeSet::new();

    for paragraph in paragraphs {
        let probe = truncate_chars(&paragraph.text, prefix_chars);
        if let Some(page) = pages.iter().find(|p| p.text.contains(probe)) {
            found.insert(page.page_number);
        }
    }

    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PAGE_MATCH_PREFIX_CHARS;

    #[test]
    fn test_first_matching_page_only() {
        let pages = vec![
            PageRecord::new(1, "Intro text about the product."),
            PageRecord::new(2, "Bots: a bot is a program that runs tasks."),
        ];
        let selected = vec![Paragraph::new(0, "Bots: a bot is a program")];

        assert_eq!(locate_pages(&selected, &pages, PAGE_MATCH_PREFIX_CHARS), vec![2]);
    }

    #[test]
    fn test_duplicate_content_binds_to_first_page() {
        let pages = vec![
            PageRecord::new(3, "Header repeated\nBody of three"),
            PageRecord::new(4, "Header repeated\nBody of four"),
        ];
        let selected = vec![Paragraph::new(0, "Header repeated")];

        assert_eq!(locate_pages(&selected, &pages, PAGE_MATCH_PREFIX_CHARS), vec![3]);
    }

    #[test]
    fn test_prefix_tolerates_reflowed_tail() {
        let head = "x".repeat(100);
        let pages = vec![PageRecord::new(7, format!("{}  original   spacing", head))];
        let selected = vec![Paragraph::new(0, format!("{} original spacing", head))];

        assert_eq!(locate_pages(&selected, &pages, PAGE_MATCH_PREFIX_CHARS), vec![7]);
    }

    #[test]
    fn test_results_sorted_and_deduplicated() {
        let pages = vec![
            PageRecord::new(1, "alpha section"),
            PageRecord::new(2, "beta section"),
            PageRecord::new(3, "gamma section"),
        ];
        let selected = vec![
            Paragraph::new(0, "gamma"),
            Paragraph::new(1, "alpha"),
            Paragraph::new(2, "gamma"),
            Paragraph::new(3, "missing"),
        ];

        assert_eq!(locate_pages(&selected, &pages, PAGE_MATCH_PREFIX_CHARS), vec![1, 3]);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let pages = vec![PageRecord::new(1, "BOTS everywhere")];
        let selected = vec![Paragraph::new(0, "bots everywhere")];

        assert!(locate_pages(&selected, &pages, PAGE_MATCH_PREFIX_CHARS).is_empty());
    }

    #[test]
    fn test_no_pages() {
        let selected = vec![Paragraph::new(0, "anything")];
        assert!(locate_pages(&selected, &[], PAGE_MATCH_PREFIX_CHARS).is_empty());
    }
}

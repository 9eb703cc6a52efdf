//! Reading-time estimation

use crate::content::richtext;
use crate::content::ContentSection;

/// Average reading speed used for the estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimate reading time in minutes for a post's content
///
/// Counts whitespace-separated tokens across all headings and body text,
/// rounded up. There is no floor: a post with no content reads in 0
/// minutes.
pub fn estimate_minutes(sections: &[ContentSection]) -> usize {
    let mut words = 0;
    for section in sections {
        words += section.heading.split_whitespace().count();
        words += richtext::as_text(&section.body).split_whitespace().count();
    }
    words.div_ceil(WORDS_PER_MINUTE)
}

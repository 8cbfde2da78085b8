//! Reading time estimation.
//!
//! Words are counted across every block heading and every body paragraph,
//! split on whitespace. Reading time rounds up to whole minutes.

use crate::types::ContentBlock;

/// Total words in a post's content blocks.
pub fn count_words(content: &[ContentBlock]) -> usize {
    content
        .iter()
        .map(|block| {
            let body: usize = block
                .body
                .iter()
                .map(|span| span.text.split_whitespace().count())
                .sum();
            block.heading.split_whitespace().count() + body
        })
        .sum()
}

/// `ceil(words / words_per_minute)`. A zero rate is treated as one word per
/// minute.
pub fn read_time_minutes(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    words.div_ceil(wpm) as u32
}

use log::{debug, warn};

use crate::config::Limits;
use crate::splitter::truncate_chars;

/// Splits a segment into whitespace-delimited words.
///
/// Quotes and other punctuation are ordinary word characters. Words longer than
/// `max_word_length` are cut short and words past `max_words` are dropped.
pub fn tokenize(segment: &str, limits: &Limits) -> Vec<String> {
    let mut cursor = 0;
    let mut words = Vec::new();

    while let Some((bytes_read, word)) = next_word(&segment[cursor..]) {
        cursor += bytes_read;

        if words.len() == limits.max_words {
            warn!(
                "more than {} words in one command, dropping the rest",
                limits.max_words
            );
            break;
        }

        let capped = truncate_chars(word, limits.max_word_length);
        if capped.len() < word.len() {
            warn!(
                "word longer than {} characters, truncating",
                limits.max_word_length
            );
        }
        words.push(capped.to_string());
    }

    debug!("tokenized {:?} into {:?}", segment, words);

    words
}

/// Returns the number of bytes consumed and the next word, if any.
fn next_word(s: &str) -> Option<(usize, &str)> {
    let start = s.find(|c: char| !c.is_whitespace())?;
    let end = s[start..]
        .find(char::is_whitespace)
        .map_or(s.len(), |offset| start + offset);

    Some((end, &s[start..end]))
}

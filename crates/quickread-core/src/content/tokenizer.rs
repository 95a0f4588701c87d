use alloc::vec::Vec;

/// Splits `text` on runs of whitespace, dropping empty pieces.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

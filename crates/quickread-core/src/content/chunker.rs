//! Groups tokens into short reading chunks.
//!
//! Function words ("the", "of", "would", ...) lean on the word after them, so a
//! chunk that ends in one keeps growing until it holds [`MAX_CHUNK_WORDS`]
//! tokens, reaches a content word, or crosses a sentence end.

use alloc::vec::Vec;

use heapless::String;

use super::Chunk;

pub const MAX_CHUNK_WORDS: usize = 3;

/// Longest entry in [`LEADING_WORDS`].
const LEADING_WORD_MAX_BYTES: usize = 7;

/// Articles, prepositions, conjunctions, pronouns, auxiliaries and other short
/// function words. Sorted for binary search.
const LEADING_WORDS: [&str; 108] = [
    "a", "about", "above", "after", "all", "also", "among", "an", "and", "any", "are",
    "as", "at", "be", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "down", "during", "each", "every",
    "few", "for", "from", "had", "has", "have", "he", "her", "here", "his", "how", "i",
    "if", "in", "into", "is", "it", "its", "just", "may", "might", "more", "most",
    "must", "my", "no", "nor", "not", "of", "off", "on", "only", "onto", "or", "other",
    "our", "out", "over", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "there", "these", "they", "this", "those", "through", "to", "under", "up",
    "upon", "very", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "whose", "why", "will", "with", "would", "yes", "yet", "you",
    "your",
];

/// Whether `token` is a function word once lowercased and stripped of
/// everything outside `a..=z`.
pub fn is_leading_word(token: &str) -> bool {
    let mut normalized = String::<LEADING_WORD_MAX_BYTES>::new();
    for ch in token.chars().flat_map(char::to_lowercase) {
        if !ch.is_ascii_lowercase() {
            continue;
        }
        if normalized.push(ch).is_err() {
            return false;
        }
    }

    !normalized.is_empty() && LEADING_WORDS.binary_search(&normalized.as_str()).is_ok()
}

pub fn ends_sentence(token: &str) -> bool {
    token.ends_with(['.', '!', '?'])
}

/// Partitions `tokens` into chunks of at most [`MAX_CHUNK_WORDS`] tokens.
///
/// Every token lands in exactly one chunk and order is preserved.
pub fn chunk_tokens(tokens: &[&str]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < tokens.len() {
        let mut end = start + 1;

        while end < tokens.len()
            && end - start < MAX_CHUNK_WORDS
            && is_leading_word(tokens[end - 1])
            && !ends_sentence(tokens[end - 1])
        {
            end += 1;
        }

        // A lone function word still pairs with its successor, even across a
        // sentence end. With nothing after it, it stays alone.
        if end - start == 1 && is_leading_word(tokens[start]) && end < tokens.len() {
            end += 1;
        }

        if let Some(chunk) = Chunk::from_tokens(&tokens[start..end]) {
            chunks.push(chunk);
        }
        start = end;
    }

    chunks
}

/// One chunk per token, for reading with chunking turned off.
pub fn single_word_chunks(tokens: &[&str]) -> Vec<Chunk> {
    tokens
        .iter()
        .filter_map(|token| Chunk::from_tokens(core::slice::from_ref(token)))
        .collect()
}

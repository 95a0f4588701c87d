//! Reading content: tokens, chunks, and where the text comes from.

use alloc::string::String;

pub mod chunker;
pub mod page;
pub mod sample;
pub mod tokenizer;

pub use chunker::{chunk_tokens, ends_sentence, is_leading_word, single_word_chunks};
pub use tokenizer::{count_words, tokenize};

/// One reading unit: consecutive tokens joined by single spaces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chunk {
    text: String,
    word_count: usize,
}

impl Chunk {
    /// Joins `tokens` into a chunk. Returns `None` for an empty slice.
    pub fn from_tokens(tokens: &[&str]) -> Option<Self> {
        let (first, rest) = tokens.split_first()?;

        let capacity = tokens.iter().map(|token| token.len() + 1).sum::<usize>();
        let mut text = String::with_capacity(capacity);
        text.push_str(first);
        for token in rest {
            text.push(' ');
            text.push_str(token);
        }

        Some(Self {
            text,
            word_count: tokens.len(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Tokens in original order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ')
    }
}

/// Source of the raw text to read, typically the user's current selection.
#[allow(async_fn_in_trait)]
pub trait TextProvider {
    type Error: core::fmt::Debug;

    /// Returns the text to read, or an empty string when nothing is available.
    async fn selected_text(&mut self) -> Result<String, Self::Error>;
}

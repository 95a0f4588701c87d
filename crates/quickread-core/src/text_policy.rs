//! Bounded text shaping for counters, status lines and log previews.

use core::fmt::Write;

use heapless::String;

pub const COUNTER_LABEL_BYTES: usize = 48;
pub const STATUS_BYTES: usize = 64;
pub const PREVIEW_BYTES: usize = 64;

pub const COMPACT_MAX_WORDS: usize = 7;
pub const COMPACT_MAX_CHARS: usize = 34;

/// `"current / total"`.
pub fn counter_label(current: usize, total: usize) -> String<COUNTER_LABEL_BYTES> {
    let mut out = String::new();
    let _ = write!(out, "{current} / {total}");
    out
}

/// Share of `total` covered by `current`, as a whole percentage.
pub fn progress_pct(current: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let current = current.min(total) as u64;
    ((current * 100) / total as u64) as u8
}

/// Status line after text is loaded. `chunks` is set when chunking was used.
pub fn loaded_status(words: usize, chunks: Option<usize>) -> String<STATUS_BYTES> {
    let mut out = String::new();
    let _ = match chunks {
        Some(chunks) => write!(out, "Loaded {words} words ({chunks} chunks)"),
        None => write!(out, "Loaded {words} words"),
    };
    out
}

pub fn preview_compact(source: &str) -> String<PREVIEW_BYTES> {
    preview_limited(source, COMPACT_MAX_WORDS, COMPACT_MAX_CHARS)
}

/// First words of `source`, whitespace collapsed, with `...` appended when
/// anything was cut.
pub fn preview_limited<const N: usize>(
    source: &str,
    max_words: usize,
    max_chars: usize,
) -> String<N> {
    let mut out = String::<N>::new();
    let mut char_count = 0usize;
    let mut truncated = false;

    'words: for (word_count, word) in source.split_whitespace().enumerate() {
        if word_count >= max_words {
            truncated = true;
            break;
        }

        if word_count > 0 {
            if char_count >= max_chars || out.push(' ').is_err() {
                truncated = true;
                break;
            }
            char_count += 1;
        }

        for ch in word.chars() {
            if char_count >= max_chars || out.push(ch).is_err() {
                truncated = true;
                break 'words;
            }
            char_count += 1;
        }
    }

    if truncated && !out.is_empty() {
        while out.len() + 3 > N && out.pop().is_some() {}
        let _ = out.push_str("...");
    }

    out
}

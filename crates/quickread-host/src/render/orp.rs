//! Optimal recognition point placement.
//!
//! Each chunk is shifted so that one letter, a little left of its middle, lands
//! on a fixed column. The eye stays on that column instead of scanning.

pub const ORP_ANCHOR_PERCENT: usize = 42;

/// A chunk split around its pivot character, with the indent that puts the
/// pivot on the anchor column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnchoredLine<'a> {
    pub indent: usize,
    pub before: &'a str,
    pub pivot: &'a str,
    pub after: &'a str,
}

pub fn anchor_column(width: usize, anchor_percent: usize) -> usize {
    (width * anchor_percent.min(100)) / 100
}

pub fn anchor_line(text: &str, width: usize, anchor_percent: usize) -> AnchoredLine<'_> {
    let pivot_char = orp_char_index(text);
    let mut chars = text.char_indices().skip(pivot_char);

    let Some((pivot_start, pivot)) = chars.next() else {
        return AnchoredLine {
            indent: anchor_column(width, anchor_percent),
            before: text,
            pivot: "",
            after: "",
        };
    };
    let pivot_end = pivot_start + pivot.len_utf8();

    AnchoredLine {
        indent: anchor_column(width, anchor_percent).saturating_sub(pivot_char),
        before: &text[..pivot_start],
        pivot: &text[pivot_start..pivot_end],
        after: &text[pivot_end..],
    }
}

/// Character index of the pivot in `text`.
pub fn orp_char_index(text: &str) -> usize {
    let total_chars = text.chars().count();
    let letter_chars = text.chars().filter(|c| c.is_alphanumeric()).count();

    if letter_chars == 0 {
        return total_chars.saturating_sub(1) / 2;
    }

    let target_letter = orp_letter_index(letter_chars).min(letter_chars - 1);
    text.chars()
        .enumerate()
        .filter(|(_, c)| c.is_alphanumeric())
        .nth(target_letter)
        .map(|(index, _)| index)
        .unwrap_or(total_chars.saturating_sub(1) / 2)
}

fn orp_letter_index(letter_count: usize) -> usize {
    match letter_count {
        0 | 1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// `[#####-----]` spanning `width` columns.
pub fn progress_bar(progress_pct: u8, width: usize) -> String {
    let inner = width.saturating_sub(2);
    let filled = (inner * progress_pct.min(100) as usize) / 100;

    let mut bar = String::with_capacity(width);
    bar.push('[');
    bar.extend(std::iter::repeat_n('#', filled));
    bar.extend(std::iter::repeat_n('-', inner - filled));
    bar.push(']');
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_moves_right_with_length() {
        assert_eq!(orp_char_index("a"), 0);
        assert_eq!(orp_char_index("quick"), 1);
        assert_eq!(orp_char_index("reading"), 2);
        assert_eq!(orp_char_index("\"Ishmael.\""), 3);
        assert_eq!(orp_char_index("..."), 1);
        assert_eq!(orp_char_index(""), 0);
    }

    #[test]
    fn pivot_lands_on_anchor_column() {
        let line = anchor_line("quick", 100, ORP_ANCHOR_PERCENT);
        assert_eq!(line.before, "q");
        assert_eq!(line.pivot, "u");
        assert_eq!(line.after, "ick");
        assert_eq!(line.indent + line.before.chars().count(), 42);
    }

    #[test]
    fn multibyte_pivot_is_sliced_cleanly() {
        let line = anchor_line("así", 10, 50);
        assert_eq!(line.pivot, "s");
        let line = anchor_line("çé", 10, 50);
        assert_eq!(line.pivot, "é");
        assert_eq!(line.before, "ç");
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 12), "[----------]");
        assert_eq!(progress_bar(50, 12), "[#####-----]");
        assert_eq!(progress_bar(100, 12), "[##########]");
        assert_eq!(progress_bar(100, 1), "[]");
    }
}

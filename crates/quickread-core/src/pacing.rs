//! Display duration per chunk.

use core::num::NonZeroU16;

use crate::content::Chunk;

/// A reading rate in words per minute. Never zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Wpm(NonZeroU16);

impl Wpm {
    pub const MIN: Self = Self(NonZeroU16::MIN);

    pub const fn new(wpm: u16) -> Option<Self> {
        match NonZeroU16::new(wpm) {
            Some(wpm) => Some(Self(wpm)),
            None => None,
        }
    }

    /// Clamps `raw` into `min..=max`. Bounds are swapped when reversed.
    pub fn clamped(raw: u32, min: Wpm, max: Wpm) -> Self {
        let (low, high) = if max < min { (max, min) } else { (min, max) };
        let value = raw.clamp(low.get() as u32, high.get() as u32) as u16;
        Self::new(value).unwrap_or(low)
    }

    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

/// Milliseconds one word stays on screen at `wpm`.
pub const fn base_delay_ms(wpm: Wpm) -> u32 {
    60_000 / wpm.get() as u32
}

/// Milliseconds a `word_count`-word chunk stays on screen at `wpm`.
pub const fn words_delay_ms(word_count: usize, wpm: Wpm) -> u32 {
    base_delay_ms(wpm).saturating_mul(word_count as u32)
}

pub fn chunk_delay_ms(chunk: &Chunk, wpm: Wpm) -> u32 {
    words_delay_ms(chunk.word_count(), wpm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wpm(value: u16) -> Wpm {
        Wpm::new(value).unwrap()
    }

    #[test]
    fn delay_scales_linearly_with_words() {
        let one = Chunk::from_tokens(&["fox"]).unwrap();
        let two = Chunk::from_tokens(&["the", "fox"]).unwrap();

        assert_eq!(base_delay_ms(wpm(300)), 200);
        assert_eq!(chunk_delay_ms(&one, wpm(300)), 200);
        assert_eq!(chunk_delay_ms(&two, wpm(300)), 400);
        assert_eq!(words_delay_ms(3, wpm(600)), 300);
    }

    #[test]
    fn zero_is_not_a_rate() {
        assert_eq!(Wpm::new(0), None);
    }

    #[test]
    fn clamping_keeps_rate_in_bounds() {
        let min = wpm(100);
        let max = wpm(1000);
        assert_eq!(Wpm::clamped(0, min, max), min);
        assert_eq!(Wpm::clamped(450, min, max).get(), 450);
        assert_eq!(Wpm::clamped(u32::MAX, min, max), max);
        assert_eq!(Wpm::clamped(50, max, min), min);
    }
}

//! Protected-token handling
//!
//! A protected token is a substring that is either fully shown or fully
//! hidden. Positions are counted in `char`s, never bytes, so multi-byte
//! text cuts cleanly.

use std::ops::Range;

/// One phrase as rendered (`prefix + phrase + suffix`) with the spans of
/// every protected token occurrence inside it
#[derive(Debug, Clone, PartialEq)]
pub struct FullText {
    chars: Vec<char>,
    spans: Vec<Range<usize>>,
}

impl FullText {
    pub fn new(text: &str, protected_tokens: &[String]) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut spans = Vec::new();

        for token in protected_tokens {
            let needle: Vec<char> = token.chars().collect();
            if needle.is_empty() || needle.len() > chars.len() {
                continue;
            }
            for start in 0..=chars.len() - needle.len() {
                if chars[start..start + needle.len()] == needle[..] {
                    spans.push(start..start + needle.len());
                }
            }
        }

        spans.sort_by_key(|span| span.start);
        Self { chars, spans }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    /// The first `count` characters
    pub fn slice(&self, count: usize) -> String {
        self.chars[..count.min(self.chars.len())].iter().collect()
    }

    pub fn to_full_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// Character at `index`, if any
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// True when a cut at `cut` would show part of a protected token
    pub fn splits_token(&self, cut: usize) -> bool {
        self.spans
            .iter()
            .any(|span| span.start < cut && cut < span.end)
    }

    /// Move `cut` back to the start of any token it would split
    ///
    /// Repeats until stable so overlapping tokens are all honored.
    pub fn retract(&self, mut cut: usize) -> usize {
        cut = cut.min(self.chars.len());
        loop {
            let inside = self
                .spans
                .iter()
                .find(|span| span.start < cut && cut < span.end);
            match inside {
                Some(span) => cut = span.start,
                None => return cut,
            }
        }
    }

    /// Move `cut` forward to the end of any token it would split
    pub fn extend(&self, mut cut: usize) -> usize {
        cut = cut.min(self.chars.len());
        loop {
            let inside = self
                .spans
                .iter()
                .find(|span| span.start < cut && cut < span.end);
            match inside {
                Some(span) => cut = span.end,
                None => return cut,
            }
        }
    }
}

//! [`FuzzPattern`] definition.

use derive_more::Display;
use itertools::Itertools as _;
use postgres_types::ToSql;

/// `SIMILAR TO` pattern matching a text containing any of the given words.
///
/// Every metacharacter of the words is escaped, so the words are matched
/// literally.
#[derive(Clone, Debug, Display, Eq, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct FuzzPattern(String);

impl FuzzPattern {
    /// Metacharacters of a `SIMILAR TO` pattern.
    const SPECIAL: &'static [char] = &[
        '\\', '%', '_', '|', '*', '+', '?', '{', '}', '(', ')', '[', ']',
    ];

    /// Creates a new [`FuzzPattern`] out of the words of the given `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "({})",
            input.split_whitespace().format_with("|", |word, f| {
                f(&format_args!("%{}%", Self::escape(word)))
            }),
        ))
    }

    /// Escapes all the [`FuzzPattern::SPECIAL`] characters of the `word`.
    fn escape(word: &str) -> String {
        let mut escaped = String::with_capacity(word.len());
        for c in word.chars() {
            if Self::SPECIAL.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }
}

#[cfg(test)]
mod spec {
    use super::FuzzPattern;

    #[test]
    fn matches_any_word() {
        assert_eq!(
            FuzzPattern::new(" New  Zealand ").to_string(),
            "(%New%|%Zealand%)",
        );
    }

    #[test]
    fn escapes_metacharacters() {
        assert_eq!(
            FuzzPattern::new(r"50% a_b (x|y)").to_string(),
            r"(%50\%%|%a\_b%|%\(x\|y\)%)",
        );
    }
}

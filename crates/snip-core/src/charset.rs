//! URL-safe character sets used for short codes.
//!
//! The alphabet is always composed in the same order: digits, lowercase
//! ASCII, uppercase ASCII, then the unreserved specials `~_-.`. The order
//! is part of the code format: changing it changes every issued code.

use std::fmt;

const DIGITS: &str = "0123456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SPECIAL: &str = "~_-.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharsetError {
    #[error("at least one character group must be enabled")]
    Empty,
}

/// Immutable, ordered URL-safe alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCharset {
    symbols: String,
}

impl UrlCharset {
    pub fn new(
        numeric: bool,
        lowercase: bool,
        uppercase: bool,
        special: bool,
    ) -> Result<Self, CharsetError> {
        let mut symbols = String::new();
        if numeric {
            symbols.push_str(DIGITS);
        }
        if lowercase {
            symbols.push_str(LOWERCASE);
        }
        if uppercase {
            symbols.push_str(UPPERCASE);
        }
        if special {
            symbols.push_str(SPECIAL);
        }
        if symbols.is_empty() {
            return Err(CharsetError::Empty);
        }
        Ok(Self { symbols })
    }

    /// `[0-9a-zA-Z]`, the 62-symbol alphabet used for issued codes.
    pub fn alphanumeric() -> Self {
        Self {
            symbols: format!("{DIGITS}{LOWERCASE}{UPPERCASE}"),
        }
    }

    /// Number of symbols (the numeric base of codes over this charset).
    pub fn len(&self) -> usize {
        // All groups are ASCII, so bytes == chars.
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.symbols.as_bytes().get(index).map(|b| *b as char)
    }

    pub fn index_of(&self, c: char) -> Option<usize> {
        if !c.is_ascii() {
            return None;
        }
        self.symbols.bytes().position(|b| b == c as u8)
    }

    /// True if every character of `input` belongs to this charset.
    /// The empty string is trivially valid.
    pub fn contains_all(&self, input: &str) -> bool {
        input.chars().all(|c| self.index_of(c).is_some())
    }

    pub fn as_str(&self) -> &str {
        &self.symbols
    }
}

impl fmt::Display for UrlCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols)
    }
}

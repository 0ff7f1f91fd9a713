//! Passphrase-keyed shift over a charset.
//!
//! Makes sequential codes look unrelated to each other without changing
//! their length. This is not encryption: the shift is recoverable from a
//! handful of known codes.

use crate::charset::UrlCharset;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObfuscatorError {
    #[error("input {input:?} contains characters outside the charset ({charset})")]
    InvalidInput { input: String, charset: String },
}

#[derive(Debug, Clone)]
pub struct Obfuscator {
    charset: UrlCharset,
    shift: usize,
}

impl Obfuscator {
    pub fn new(charset: UrlCharset, passphrase: &str) -> Result<Self, ObfuscatorError> {
        validate(&charset, passphrase)?;
        let base = charset.len();
        let shift = passphrase
            .chars()
            .filter_map(|c| charset.index_of(c))
            .sum::<usize>()
            % base;
        Ok(Self { charset, shift })
    }

    pub fn transform(&self, input: &str) -> Result<String, ObfuscatorError> {
        self.translate(input, self.shift)
    }

    pub fn restore(&self, input: &str) -> Result<String, ObfuscatorError> {
        // Shifting back by `shift` is shifting forward by `base - shift`.
        let base = self.charset.len();
        self.translate(input, (base - self.shift) % base)
    }

    fn translate(&self, input: &str, shift: usize) -> Result<String, ObfuscatorError> {
        validate(&self.charset, input)?;
        let base = self.charset.len();
        Ok(input
            .chars()
            .filter_map(|c| self.charset.index_of(c))
            .filter_map(|pos| self.charset.char_at((pos + shift) % base))
            .collect())
    }
}

fn validate(charset: &UrlCharset, input: &str) -> Result<(), ObfuscatorError> {
    if charset.contains_all(input) {
        Ok(())
    } else {
        Err(ObfuscatorError::InvalidInput {
            input: input.to_string(),
            charset: charset.to_string(),
        })
    }
}

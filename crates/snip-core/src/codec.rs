//! Base-N conversion between link row ids and short codes.

use crate::charset::UrlCharset;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("empty code")]
    Empty,
    #[error("character {0:?} is not part of the code charset")]
    InvalidChar(char),
    #[error("code is too large to be a link id")]
    Overflow,
}

/// Translates an integer to a URL-safe string and back, using the charset length as base.
#[derive(Debug, Clone)]
pub struct Codec {
    charset: UrlCharset,
}

impl Codec {
    pub fn new(charset: UrlCharset) -> Self {
        Self { charset }
    }

    pub fn charset(&self) -> &UrlCharset {
        &self.charset
    }

    fn base(&self) -> u64 {
        self.charset.len() as u64
    }

    /// Most significant digit first; `0` encodes to the first symbol.
    pub fn encode(&self, mut id: u64) -> String {
        let base = self.base();
        let mut digits = Vec::new();
        loop {
            let rem = (id % base) as usize;
            // rem < base == charset.len()
            digits.push(self.charset.char_at(rem).unwrap_or('0'));
            id /= base;
            if id == 0 {
                break;
            }
        }
        digits.iter().rev().collect()
    }

    pub fn decode(&self, code: &str) -> Result<u64, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Empty);
        }
        let base = self.base();
        let mut value: u64 = 0;
        for c in code.chars() {
            let digit = self.charset.index_of(c).ok_or(CodecError::InvalidChar(c))? as u64;
            value = value
                .checked_mul(base)
                .and_then(|v| v.checked_add(digit))
                .ok_or(CodecError::Overflow)?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> Codec {
        Codec::new(UrlCharset::alphanumeric())
    }

    #[test]
    fn encode_decode_symmetry() {
        let c = codec();
        for i in 0..10_000u64 {
            assert_eq!(c.decode(&c.encode(i)).unwrap(), i);
        }
    }

    #[test]
    fn zero_is_first_symbol() {
        let c = codec();
        assert_eq!(c.encode(0), "0");
        assert_eq!(c.decode("0").unwrap(), 0);
    }

    #[test]
    fn known_values() {
        let c = codec();
        assert_eq!(c.encode(1), "1");
        assert_eq!(c.encode(61), "Z");
        assert_eq!(c.encode(62), "10");
        assert_eq!(c.encode(123_456_789), "8m0Kx");
    }

    #[test]
    fn large_numbers_round_trip() {
        let c = codec();
        assert_eq!(c.decode(&c.encode(123_456_789)).unwrap(), 123_456_789);
        assert_eq!(c.decode(&c.encode(u64::MAX)).unwrap(), u64::MAX);
    }

    #[test]
    fn invalid_decode_input() {
        let c = codec();
        assert_eq!(c.decode("invalid string!"), Err(CodecError::InvalidChar(' ')));
        assert_eq!(c.decode(""), Err(CodecError::Empty));
    }

    #[test]
    fn overflow_detected() {
        let c = codec();
        assert_eq!(c.decode("ZZZZZZZZZZZZZZZ"), Err(CodecError::Overflow));
    }
}

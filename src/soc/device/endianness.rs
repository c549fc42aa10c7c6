use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Byte order of 16-bit instruction words in a memory image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    #[inline(always)]
    pub fn decode_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        }
    }

    #[inline(always)]
    pub fn encode_u16(self, word: u16) -> [u8; 2] {
        match self {
            Endianness::Little => word.to_le_bytes(),
            Endianness::Big => word.to_be_bytes(),
        }
    }

    /// Splits `bytes` into whole words; a trailing odd byte is dropped.
    pub fn words(self, bytes: &[u8]) -> impl Iterator<Item = u16> + '_ {
        bytes
            .chunks_exact(2)
            .map(move |pair| self.decode_u16([pair[0], pair[1]]))
    }

    /// Serializes `words` in this byte order.
    pub fn encode_words(self, words: &[u16]) -> Vec<u8> {
        words
            .iter()
            .flat_map(|word| self.encode_u16(*word))
            .collect()
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => f.write_str("little"),
            Endianness::Big => f.write_str("big"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown endianness '{0}' (expected 'big' or 'little')")]
pub struct ParseEndiannessError(String);

impl FromStr for Endianness {
    type Err = ParseEndiannessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(Endianness::Little),
            "big" | "be" => Ok(Endianness::Big),
            other => Err(ParseEndiannessError(other.to_string())),
        }
    }
}

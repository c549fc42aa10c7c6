//! Run-length scan of a bit-pattern string into fixed bits and operand ranges.

use smallvec::SmallVec;
use thiserror::Error;

use super::ast::{EncodingWidth, Operand};

/// Fixed bits and operands recovered from one pattern string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPattern {
    pub width: EncodingWidth,
    pub fixed_mask: u32,
    pub fixed_value: u32,
    pub operands: SmallVec<[Operand; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("bit pattern has {found} bits; expected {expected}")]
    Width { found: usize, expected: &'static str },
    #[error("bit pattern character {position} is the digit '{digit}'; only 0 and 1 may be fixed")]
    Digit { digit: char, position: usize },
}

/// Scans a main-instruction pattern (whitespace allowed), which must be 16 or 32 bits wide.
pub fn scan_main(pattern: &str) -> Result<BitPattern, PatternError> {
    let chars = strip(pattern);
    match chars.len() {
        16 | 32 => scan(&chars),
        found => Err(PatternError::Width {
            found,
            expected: "16 or 32",
        }),
    }
}

/// Scans an extension sub-opcode pattern, which must be exactly 8 bits wide.
pub fn scan_extension(pattern: &str) -> Result<BitPattern, PatternError> {
    let chars = strip(pattern);
    match chars.len() {
        8 => scan(&chars),
        found => Err(PatternError::Width {
            found,
            expected: "8",
        }),
    }
}

fn strip(pattern: &str) -> Vec<char> {
    pattern.chars().filter(|ch| !ch.is_whitespace()).collect()
}

fn is_operand_symbol(ch: char) -> bool {
    !ch.is_ascii_digit()
}

/// Walks the pattern from its most significant character. A run of identical operand symbols
/// closes when the symbol changes; the operand list is reversed at the end so it ascends by
/// `low_bit`.
fn scan(chars: &[char]) -> Result<BitPattern, PatternError> {
    let width = chars.len();
    let mut fixed_mask = 0u32;
    let mut fixed_value = 0u32;
    let mut operands: SmallVec<[Operand; 4]> = SmallVec::new();
    // (symbol, high bit) of the run currently open
    let mut run: Option<(char, u8)> = None;

    for (position, &ch) in chars.iter().enumerate() {
        let bit = (width - 1 - position) as u8;
        match ch {
            '0' | '1' => {
                fixed_mask |= 1 << bit;
                if ch == '1' {
                    fixed_value |= 1 << bit;
                }
            }
            digit if !is_operand_symbol(digit) => {
                return Err(PatternError::Digit {
                    digit,
                    position: position + 1,
                });
            }
            _ => {}
        }

        let continues_run = matches!(run, Some((symbol, _)) if symbol == ch);
        if continues_run {
            continue;
        }
        if let Some((symbol, high)) = run.take() {
            operands.push(Operand::new(bit + 1, high, symbol));
        }
        if is_operand_symbol(ch) {
            run = Some((ch, bit));
        }
    }
    if let Some((symbol, high)) = run {
        operands.push(Operand::new(0, high, symbol));
    }
    operands.reverse();

    let width = EncodingWidth::from_bits(width).ok_or(PatternError::Width {
        found: width,
        expected: "8, 16 or 32",
    })?;
    Ok(BitPattern {
        width,
        fixed_mask,
        fixed_value,
        operands,
    })
}

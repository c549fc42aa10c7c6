//! Where each operand's bits live among the decoder inputs.
//!
//! A 16-bit instruction reads its fields from the first word. A 32-bit instruction reads
//! bits `16..=31` from the first word (shifted down by 16) and bits `0..=15` from the
//! second. Extension fields come from the low byte of the first word.

use super::ast::{EncodingWidth, Instruction, Operand};
use super::bits::extract;
use super::error::IsaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSource {
    FirstWord { low: u8, high: u8 },
    SecondWord { low: u8, high: u8 },
    /// The whole second word, read without masking.
    WholeSecondWord,
    ExtensionByte { low: u8, high: u8 },
}

impl OperandSource {
    pub fn resolve(instr: &Instruction, operand: &Operand) -> Result<Self, IsaError> {
        let (low, high) = (operand.low_bit, operand.high_bit);
        match instr.width {
            EncodingWidth::Bits8 => Ok(OperandSource::ExtensionByte { low, high }),
            EncodingWidth::Bits16 => Ok(OperandSource::FirstWord { low, high }),
            EncodingWidth::Bits32 if low >= 16 => Ok(OperandSource::FirstWord {
                low: low - 16,
                high: high - 16,
            }),
            EncodingWidth::Bits32 if low == 0 && high == 15 => Ok(OperandSource::WholeSecondWord),
            EncodingWidth::Bits32 if high < 16 => Ok(OperandSource::SecondWord { low, high }),
            EncodingWidth::Bits32 => Err(IsaError::StraddlingOperand {
                opcode: instr.name.clone(),
                symbol: operand.symbol,
                low_bit: low,
                high_bit: high,
            }),
        }
    }

    /// Resolves every operand of `instr`, in operand order.
    pub fn resolve_all(instr: &Instruction) -> Result<Vec<Self>, IsaError> {
        instr
            .operands
            .iter()
            .map(|operand| Self::resolve(instr, operand))
            .collect()
    }

    pub fn read(self, first: u16, second: u16) -> u16 {
        match self {
            OperandSource::FirstWord { low, high } => extract(u32::from(first), low, high) as u16,
            OperandSource::SecondWord { low, high } => {
                extract(u32::from(second), low, high) as u16
            }
            OperandSource::WholeSecondWord => second,
            OperandSource::ExtensionByte { low, high } => {
                extract(u32::from(first & 0xFF), low, high) as u16
            }
        }
    }

    /// Name of the decoder input this source reads, as spelled in generated code.
    pub fn input(self) -> &'static str {
        match self {
            OperandSource::FirstWord { .. } | OperandSource::ExtensionByte { .. } => "instruction",
            OperandSource::SecondWord { .. } | OperandSource::WholeSecondWord => {
                "next_instruction"
            }
        }
    }

    /// Bit range within the word returned by [`OperandSource::input`].
    pub fn range(self) -> (u8, u8) {
        match self {
            OperandSource::FirstWord { low, high }
            | OperandSource::SecondWord { low, high }
            | OperandSource::ExtensionByte { low, high } => (low, high),
            OperandSource::WholeSecondWord => (0, 15),
        }
    }
}

//! Instruction records produced by the spec parser.

use std::fmt;
use std::path::PathBuf;

use ahash::AHashMap;
use smallvec::SmallVec;

use super::bits::mask_for_width;
use super::diagnostic::SourceSpan;

/// A parsed spec file: main instructions and 8-bit extension sub-opcodes, in file order.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    pub path: PathBuf,
    /// Hex SHA-256 of the spec source.
    pub digest: String,
    pub instructions: Vec<Instruction>,
    pub extensions: Vec<Instruction>,
}

impl SpecDocument {
    pub fn new(
        path: PathBuf,
        digest: String,
        instructions: Vec<Instruction>,
        extensions: Vec<Instruction>,
    ) -> Self {
        Self {
            path,
            digest,
            instructions,
            extensions,
        }
    }

    pub fn instruction(&self, name: &str) -> Option<&Instruction> {
        self.instructions.iter().find(|instr| instr.name == name)
    }

    pub fn extension(&self, name: &str) -> Option<&Instruction> {
        self.extensions.iter().find(|instr| instr.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingWidth {
    Bits8,
    Bits16,
    Bits32,
}

impl EncodingWidth {
    pub fn bits(self) -> u32 {
        match self {
            EncodingWidth::Bits8 => 8,
            EncodingWidth::Bits16 => 16,
            EncodingWidth::Bits32 => 32,
        }
    }

    pub fn from_bits(bits: usize) -> Option<Self> {
        match bits {
            8 => Some(EncodingWidth::Bits8),
            16 => Some(EncodingWidth::Bits16),
            32 => Some(EncodingWidth::Bits32),
            _ => None,
        }
    }

    /// Hex digits needed to print a full word of this width.
    pub fn hex_digits(self) -> usize {
        (self.bits() / 4) as usize
    }
}

/// Inclusive bit range carrying a decoded field, tagged with the spec symbol that marked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operand {
    pub low_bit: u8,
    pub high_bit: u8,
    pub symbol: char,
}

impl Operand {
    pub fn new(low_bit: u8, high_bit: u8, symbol: char) -> Self {
        debug_assert!(low_bit <= high_bit);
        Self {
            low_bit,
            high_bit,
            symbol,
        }
    }

    pub fn width(&self) -> u32 {
        u32::from(self.high_bit - self.low_bit) + 1
    }

    pub fn is_single_bit(&self) -> bool {
        self.low_bit == self.high_bit
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_bit() {
            write!(f, "{}[{}]", self.symbol, self.low_bit)
        } else {
            write!(f, "{}[{}..={}]", self.symbol, self.low_bit, self.high_bit)
        }
    }
}

/// One spec line: a main instruction (16/32 bits) or an extension sub-opcode (8 bits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Opcode tokens joined with underscores (`ADD D` -> `ADD_D`).
    pub name: String,
    /// First opcode token (`ADD`).
    pub mnemonic: String,
    /// Operands ordered by ascending `low_bit`.
    pub operands: SmallVec<[Operand; 4]>,
    pub fixed_mask: u32,
    pub fixed_value: u32,
    pub width: EncodingWidth,
    pub span: SourceSpan,
}

impl Instruction {
    pub fn is_extension(&self) -> bool {
        self.width == EncodingWidth::Bits8
    }

    /// Fixed bits as seen from the first instruction word. The second word of a two-word
    /// instruction never takes part in table discrimination.
    pub fn first_word_mask(&self) -> u16 {
        match self.width {
            EncodingWidth::Bits32 => (self.fixed_mask >> 16) as u16,
            _ => self.fixed_mask as u16,
        }
    }

    pub fn first_word_value(&self) -> u16 {
        match self.width {
            EncodingWidth::Bits32 => (self.fixed_value >> 16) as u16,
            _ => self.fixed_value as u16,
        }
    }

    /// Full fixed-bit match against the decoder inputs, including the second word of
    /// two-word instructions and only the low byte for extensions.
    pub fn matches(&self, first: u16, second: u16) -> bool {
        let word = match self.width {
            EncodingWidth::Bits8 => u32::from(first & 0xFF),
            EncodingWidth::Bits16 => u32::from(first),
            EncodingWidth::Bits32 => (u32::from(first) << 16) | u32::from(second),
        };
        word & self.fixed_mask == self.fixed_value
    }

    /// Places `values` (one per operand, in operand order) into the fixed pattern. Values are
    /// truncated to their operand width; missing values encode as zero.
    pub fn encode(&self, values: &[u32]) -> u32 {
        self.operands
            .iter()
            .zip(values.iter().copied().chain(std::iter::repeat(0)))
            .fold(self.fixed_value, |word, (operand, value)| {
                word | ((value & mask_for_width(operand.width())) << operand.low_bit)
            })
    }

    /// Splits an encoded word into the `(instruction, next_instruction)` decoder inputs.
    pub fn split_words(&self, word: u32) -> (u16, u16) {
        match self.width {
            EncodingWidth::Bits32 => ((word >> 16) as u16, word as u16),
            _ => (word as u16, 0),
        }
    }

    /// Field identifiers, aligned with `operands`. A symbol used by several ranges gets a
    /// numeric suffix on every range after the lowest one.
    pub fn field_names(&self) -> SmallVec<[String; 4]> {
        let mut seen: AHashMap<String, usize> = AHashMap::new();
        self.operands
            .iter()
            .map(|operand| {
                let base = field_ident(operand.symbol);
                let count = seen.entry(base.clone()).or_insert(0);
                let name = if *count == 0 {
                    base
                } else {
                    format!("{base}_{count}")
                };
                *count += 1;
                name
            })
            .collect()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.width.hex_digits();
        write!(
            f,
            "{} (mask=0x{:0digits$x}, value=0x{:0digits$x})",
            self.name, self.fixed_mask, self.fixed_value
        )
    }
}

/// Rust field identifier for an operand symbol.
pub fn field_ident(symbol: char) -> String {
    if symbol.is_ascii_alphabetic() {
        symbol.to_ascii_lowercase().to_string()
    } else {
        format!("op_{:02x}", symbol as u32)
    }
}

//! Table-driven reference decoder.
//!
//! Walks the same decision tree and extension table the emitter compiles, so its results
//! match the generated `decode_instruction_with_extension` bit for bit. Used for
//! disassembly and to cross-check generated code.

use std::fmt;

use log::debug;
use smallvec::SmallVec;

use crate::soc::device::Endianness;

use super::ast::{EncodingWidth, Instruction, SpecDocument};
use super::error::IsaError;
use super::extension::ExtensionTable;
use super::operand::OperandSource;
use super::table::DecisionTree;

/// Name of the no-op every unmatched word decodes to.
pub const FALLBACK_NAME: &str = "NOP";

/// Top nibbles at or above this value carry an 8-bit extension in their low byte.
pub const EXTENSION_NIBBLE: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub name: String,
    pub value: u16,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:#x}", self.name, self.value)
    }
}

/// One decoded main instruction or extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOp<'a> {
    instruction: Option<&'a Instruction>,
    fields: SmallVec<[FieldValue; 4]>,
    fallback: bool,
}

impl<'a> DecodedOp<'a> {
    fn fallback(nop: Option<&'a Instruction>) -> Self {
        Self {
            instruction: nop,
            fields: SmallVec::new(),
            fallback: true,
        }
    }

    pub fn instruction(&self) -> Option<&'a Instruction> {
        self.instruction
    }

    pub fn name(&self) -> &str {
        self.instruction
            .map_or(FALLBACK_NAME, |instr| instr.name.as_str())
    }

    pub fn mnemonic(&self) -> &str {
        self.instruction
            .map_or(FALLBACK_NAME, |instr| instr.mnemonic.as_str())
    }

    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<u16> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value)
    }

    /// True when no spec entry matched and the no-op stood in.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn width(&self) -> EncodingWidth {
        match self.instruction {
            Some(instr) if !self.fallback => instr.width,
            _ => EncodingWidth::Bits16,
        }
    }

    /// Words this op occupies in the instruction stream.
    pub fn word_count(&self) -> usize {
        if self.width() == EncodingWidth::Bits32 {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for DecodedOp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for (idx, field) in self.fields.iter().enumerate() {
            let sep = if idx == 0 { " " } else { ", " };
            write!(f, "{sep}{field}")?;
        }
        Ok(())
    }
}

/// A main instruction with its optional extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub main: DecodedOp<'a>,
    pub has_extension: bool,
    pub extension: DecodedOp<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Word address of the first instruction word.
    pub address: u64,
    pub words: SmallVec<[u16; 2]>,
    pub text: String,
    pub fallback: bool,
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:", self.address)?;
        for word in &self.words {
            write!(f, " {word:04x}")?;
        }
        if self.words.len() == 1 {
            f.write_str("     ")?;
        }
        write!(f, "  {}", self.text)
    }
}

pub struct Decoder<'a> {
    tree: DecisionTree<'a>,
    extensions: ExtensionTable<'a>,
    main_sources: Vec<Vec<OperandSource>>,
    extension_sources: Vec<Vec<OperandSource>>,
    main_nop: Option<&'a Instruction>,
    extension_nop: Option<&'a Instruction>,
}

impl<'a> Decoder<'a> {
    pub fn new(doc: &'a SpecDocument) -> Result<Self, IsaError> {
        let main_sources = doc
            .instructions
            .iter()
            .map(OperandSource::resolve_all)
            .collect::<Result<Vec<_>, _>>()?;
        let extension_sources = doc
            .extensions
            .iter()
            .map(OperandSource::resolve_all)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            tree: DecisionTree::build(&doc.instructions),
            extensions: ExtensionTable::build(&doc.extensions),
            main_sources,
            extension_sources,
            main_nop: doc.instruction(FALLBACK_NAME),
            extension_nop: doc.extension(FALLBACK_NAME),
        })
    }

    pub fn tree(&self) -> &DecisionTree<'a> {
        &self.tree
    }

    pub fn extension_table(&self) -> &ExtensionTable<'a> {
        &self.extensions
    }

    /// Decodes the main instruction in `first`; `second` is only read by two-word encodings.
    pub fn decode_main(&self, first: u16, second: u16) -> DecodedOp<'a> {
        match self.tree.lookup(first) {
            Some(idx) => {
                let instr = self.tree.instruction(idx);
                DecodedOp {
                    instruction: Some(instr),
                    fields: read_fields(instr, &self.main_sources[idx], first, second),
                    fallback: false,
                }
            }
            None => DecodedOp::fallback(self.main_nop),
        }
    }

    /// Decodes the extension held in the low byte of `word`.
    pub fn decode_extension(&self, word: u16) -> DecodedOp<'a> {
        let byte = (word & 0xFF) as u8;
        match self.extensions.index_of(byte) {
            Some(idx) => {
                let ext = &self.extensions.extensions()[idx];
                DecodedOp {
                    instruction: Some(ext),
                    fields: read_fields(ext, &self.extension_sources[idx], word, 0),
                    fallback: false,
                }
            }
            None => DecodedOp::fallback(self.extension_nop),
        }
    }

    /// Words whose top nibble is 3 carry a 7-bit extension that is not decoded here.
    pub fn decode(&self, first: u16, second: u16) -> Decoded<'a> {
        let main = self.decode_main(first, second);
        if (first >> 12) >= EXTENSION_NIBBLE {
            Decoded {
                main,
                has_extension: true,
                extension: self.decode_extension(first),
            }
        } else {
            Decoded {
                main,
                has_extension: false,
                extension: DecodedOp::fallback(self.extension_nop),
            }
        }
    }

    /// Decodes a memory image into a listing. Addresses count 16-bit words from
    /// `base_address` and wrap past `u64::MAX`. A two-word instruction whose second word is
    /// missing ends the listing.
    pub fn disassemble(
        &self,
        bytes: &[u8],
        endianness: Endianness,
        base_address: u64,
    ) -> Vec<Disassembly> {
        let words: Vec<u16> = endianness.words(bytes).collect();
        let mut listing = Vec::new();
        let mut cursor = 0usize;

        while cursor < words.len() {
            let address = base_address.wrapping_add(cursor as u64);
            let first = words[cursor];
            let second = words.get(cursor + 1).copied();
            let decoded = self.decode(first, second.unwrap_or(0));
            let count = decoded.main.word_count();
            if count == 2 && second.is_none() {
                debug!("{address:04x}: '{}' is truncated; stopping", decoded.main.name());
                break;
            }
            if decoded.main.is_fallback() {
                debug!("{address:04x}: no instruction matches {first:#06x}");
            }

            let mut text = decoded.main.to_string();
            if decoded.has_extension {
                text.push_str(" : ");
                text.push_str(&decoded.extension.to_string());
            }
            listing.push(Disassembly {
                address,
                words: words[cursor..cursor + count].iter().copied().collect(),
                text,
                fallback: decoded.main.is_fallback(),
            });
            cursor += count;
        }

        listing
    }
}

fn read_fields(
    instr: &Instruction,
    sources: &[OperandSource],
    first: u16,
    second: u16,
) -> SmallVec<[FieldValue; 4]> {
    instr
        .field_names()
        .into_iter()
        .zip(sources)
        .map(|(name, source)| FieldValue {
            name,
            value: source.read(first, second),
        })
        .collect()
}

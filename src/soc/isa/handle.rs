//! Public entry point that upstream tools use to load a spec and decode or compile it.

use std::path::Path;

use crate::codegen::{CodeEmitter, EmitOptions};
use crate::loader::spec::SpecLoader;
use crate::soc::device::Endianness;

use super::ast::SpecDocument;
use super::decoder::{Decoder, Disassembly};
use super::error::IsaError;

pub struct SpecHandle {
    document: SpecDocument,
}

impl SpecHandle {
    /// Loads and validates the spec at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IsaError> {
        let document = SpecLoader::new().load(path)?;
        Ok(Self { document })
    }

    pub fn decoder(&self) -> Result<Decoder<'_>, IsaError> {
        Decoder::new(&self.document)
    }

    /// Disassembles a memory image of 16-bit words, addressed from `base_address`.
    pub fn disassemble(
        &self,
        bytes: &[u8],
        endianness: Endianness,
        base_address: u64,
    ) -> Result<Vec<Disassembly>, IsaError> {
        Ok(self.decoder()?.disassemble(bytes, endianness, base_address))
    }

    /// Renders the generated decoder source for this spec.
    pub fn emit(&self, options: &EmitOptions) -> Result<String, IsaError> {
        CodeEmitter::new(&self.document, options)?.emit()
    }
}

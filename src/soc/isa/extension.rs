//! Byte-indexed lookup for 8-bit extension sub-opcodes.

use log::warn;

use super::ast::Instruction;

/// Two extensions that both match the same low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionConflict {
    pub byte: u8,
    /// Index of the extension that owns the byte.
    pub kept: usize,
    pub rejected: usize,
}

/// Maps every possible low byte to the first extension (in spec order) whose fixed bits
/// match it.
#[derive(Debug, Clone)]
pub struct ExtensionTable<'a> {
    extensions: &'a [Instruction],
    entries: [Option<usize>; 256],
    conflicts: Vec<ExtensionConflict>,
}

impl<'a> ExtensionTable<'a> {
    pub fn build(extensions: &'a [Instruction]) -> Self {
        let mut entries = [None; 256];
        let mut conflicts = Vec::new();
        for byte in 0..=u8::MAX {
            let value = u32::from(byte);
            for (idx, ext) in extensions.iter().enumerate() {
                if value & ext.fixed_mask != ext.fixed_value {
                    continue;
                }
                match entries[usize::from(byte)] {
                    None => entries[usize::from(byte)] = Some(idx),
                    Some(kept) => {
                        warn!(
                            "extension byte {byte:#04x} matches both '{}' and '{}'; keeping '{}'",
                            extensions[kept].name, ext.name, extensions[kept].name
                        );
                        conflicts.push(ExtensionConflict {
                            byte,
                            kept,
                            rejected: idx,
                        });
                    }
                }
            }
        }
        Self {
            extensions,
            entries,
            conflicts,
        }
    }

    pub fn lookup(&self, byte: u8) -> Option<&'a Instruction> {
        self.entries[usize::from(byte)].map(|idx| &self.extensions[idx])
    }

    pub fn index_of(&self, byte: u8) -> Option<usize> {
        self.entries[usize::from(byte)]
    }

    pub fn extensions(&self) -> &'a [Instruction] {
        self.extensions
    }

    pub fn conflicts(&self) -> &[ExtensionConflict] {
        &self.conflicts
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }

    /// Bytes that map to some extension, ascending.
    pub fn covered(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        (0..=u8::MAX).filter_map(|byte| self.index_of(byte).map(|idx| (byte, idx)))
    }
}

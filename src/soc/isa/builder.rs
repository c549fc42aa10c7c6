//! Helpers for assembling spec documents in memory.
//!
//! The builder renders ordinary spec lines and runs them through the real parser, so
//! documents built here carry the same spans and diagnostics as ones read from disk.

use std::path::PathBuf;

use crate::loader::spec::parse_str;
use crate::soc::isa::ast::SpecDocument;
use crate::soc::isa::error::IsaError;

/// Convenience wrapper for assembling a full spec in memory.
#[derive(Debug, Clone)]
pub struct SpecBuilder {
    path: PathBuf,
    lines: Vec<String>,
}

impl SpecBuilder {
    /// Creates a new builder that pretends every line originated from `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.lines.push(format!("# {text}"));
        self
    }

    /// Appends a main instruction line (`opcode * pattern`).
    pub fn instruction(mut self, opcode: &str, pattern: &str) -> Self {
        self.lines.push(format!("{opcode} * {pattern}"));
        self
    }

    /// Appends an extension line; `pattern` is the 8-bit sub-opcode, the ignored main half is
    /// filled in.
    pub fn extension(mut self, opcode: &str, pattern: &str) -> Self {
        self.lines.push(format!("'{opcode} * xxxx xxxx {pattern}"));
        self
    }

    pub fn source(&self) -> String {
        let mut src = self.lines.join("\n");
        src.push('\n');
        src
    }

    /// Parses the assembled lines.
    pub fn build(&self) -> Result<SpecDocument, IsaError> {
        parse_str(self.path.clone(), &self.source())
    }
}

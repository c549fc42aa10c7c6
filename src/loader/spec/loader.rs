//! Loading pipeline that reads a spec file, parses it, and validates the result.

use std::fs;
use std::path::Path;

use log::debug;

use crate::loader::spec::parse_str;
use crate::soc::isa::ast::SpecDocument;
use crate::soc::isa::error::IsaError;
use crate::soc::isa::validator::Validator;

#[derive(Default)]
pub struct SpecLoader {
    validator: Validator,
}

impl SpecLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads, parses, and validates the spec at `path`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<SpecDocument, IsaError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)?;
        self.load_str(path, &src)
    }

    /// Parses and validates in-memory source as if it had been read from `path`.
    pub fn load_str(&mut self, path: &Path, src: &str) -> Result<SpecDocument, IsaError> {
        let doc = parse_str(path.to_path_buf(), src)?;
        debug!(
            "parsed {}: {} instruction(s), {} extension(s)",
            path.display(),
            doc.instructions.len(),
            doc.extensions.len()
        );
        self.validator.validate(&doc)?;
        Ok(doc)
    }
}

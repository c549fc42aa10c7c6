//! Decoder source generation.
//!
//! [`generate`] is the whole pipeline: load and validate a spec, build its decode tables,
//! render the decoder into memory, and write it out in one step.

pub mod emitter;
pub mod names;

use std::fs;
use std::path::Path;

use log::info;

use crate::loader::spec::SpecLoader;
use crate::soc::isa::error::IsaError;

pub use emitter::{CodeEmitter, EmitOptions};

/// What one generation run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub instructions: usize,
    pub extensions: usize,
    /// Main dispatch functions emitted.
    pub tables: usize,
    pub extension_conflicts: usize,
    /// Decision-tree nodes whose instructions could not be told apart.
    pub ambiguous_nodes: usize,
    pub bytes_written: usize,
}

/// Compiles the spec at `spec_path` into decoder source at `output_path`.
///
/// Nothing is written unless every stage succeeds.
pub fn generate<S: AsRef<Path>, O: AsRef<Path>>(
    spec_path: S,
    output_path: O,
    options: &EmitOptions,
) -> Result<GenerationSummary, IsaError> {
    let doc = SpecLoader::new().load(spec_path.as_ref())?;
    let emitter = CodeEmitter::new(&doc, options)?;
    let source = emitter.emit()?;
    fs::write(output_path.as_ref(), &source)?;

    let summary = GenerationSummary {
        instructions: doc.instructions.len(),
        extensions: doc.extensions.len(),
        tables: emitter.table_functions(),
        extension_conflicts: emitter.extension_table().conflicts().len(),
        ambiguous_nodes: emitter.tree().diagnostics().len(),
        bytes_written: source.len(),
    };
    info!(
        "wrote {} ({} bytes): {} instruction(s), {} extension(s), {} table function(s)",
        output_path.as_ref().display(),
        summary.bytes_written,
        summary.instructions,
        summary.extensions,
        summary.tables
    );
    Ok(summary)
}

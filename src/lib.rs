//! Build-time compiler from a textual DSP instruction-set spec to a generated Rust decoder.
//!
//! The pipeline is staged: [`loader::spec`] tokenizes and parses the spec file,
//! [`soc::isa`] validates the instruction set and builds the decode structures, and
//! [`codegen`] renders them into decoder source.

pub mod codegen;
pub mod loader;
pub mod soc;

pub use codegen::{CodeEmitter, EmitOptions, GenerationSummary, generate};
pub use loader::spec::SpecLoader;
pub use soc::isa::{Decoder, IsaError, SpecDocument, SpecHandle};

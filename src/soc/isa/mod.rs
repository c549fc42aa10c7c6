//! DSP instruction-set model: parsed spec records, validation, and decode tables.
//!
//! A spec is parsed by [`crate::loader::spec`] into a [`SpecDocument`], checked by the
//! [`validator`], and compiled into a [`table::DecisionTree`] plus an
//! [`extension::ExtensionTable`]. Those tables drive both the reference [`Decoder`] and the
//! generated Rust decoder.

pub mod ast;
pub mod bits;
pub mod builder;
pub mod decoder;
pub mod diagnostic;
pub mod error;
pub mod extension;
pub mod handle;
pub mod operand;
pub mod pattern;
pub mod table;
pub mod validator;


pub use ast::{EncodingWidth, Instruction, Operand, SpecDocument};
pub use builder::SpecBuilder;
pub use decoder::{Decoded, DecodedOp, Decoder, Disassembly, FieldValue};
pub use diagnostic::{DiagnosticLevel, DiagnosticPhase, IsaDiagnostic, SourceSpan};
pub use error::IsaError;
pub use extension::ExtensionTable;
pub use handle::SpecHandle;
pub use table::{DecisionNode, DecisionTable, DecisionTree};
pub use validator::Validator;

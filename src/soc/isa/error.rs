use thiserror::Error;

use crate::soc::isa::diagnostic::{DiagnosticPhase, IsaDiagnostic};

/// Represents any failure that can occur while loading, parsing, validating, or emitting a
/// DSP decoder from its spec.
#[derive(Debug, Error)]
pub enum IsaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}", render_diagnostics(*.phase, .diagnostics))]
    Diagnostics {
        phase: DiagnosticPhase,
        diagnostics: Vec<IsaDiagnostic>,
    },
    #[error(
        "operand '{symbol}' of '{opcode}' spans bits {low_bit}..={high_bit} across the 16-bit word boundary"
    )]
    StraddlingOperand {
        opcode: String,
        symbol: char,
        low_bit: u8,
        high_bit: u8,
    },
    #[error("failed to render generated source")]
    Emit(#[from] std::fmt::Error),
}

impl IsaError {
    /// Diagnostics carried by the error, if it came from an accumulating phase.
    pub fn diagnostics(&self) -> &[IsaDiagnostic] {
        match self {
            IsaError::Diagnostics { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}

fn render_diagnostics(phase: DiagnosticPhase, diagnostics: &[IsaDiagnostic]) -> String {
    let mut out = format!("{phase:?} produced {} issue(s):", diagnostics.len());
    for diag in diagnostics {
        out.push_str("\n  - ");
        out.push_str(&diag.format_human());
    }
    out
}

//! Semantic validation for a parsed spec: encoding overlaps and operand layout.

use super::ast::{EncodingWidth, Instruction, SpecDocument};
use super::diagnostic::{DiagnosticPhase, IsaDiagnostic, SourceSpan};
use super::error::IsaError;


/// Two same-width main instructions that agree on every bit both of them fix.
#[derive(Debug, Clone, Copy)]
pub struct Overlap<'a> {
    pub first: &'a Instruction,
    pub second: &'a Instruction,
    pub common_mask: u32,
}

impl Overlap<'_> {
    fn describe(&self) -> String {
        let digits = self.first.width.hex_digits();
        format!(
            "instructions '{a}' and '{b}' have overlapping encodings: \
             {a}: fixed_mask=0x{am:0digits$x}, fixed_value=0x{av:0digits$x}; \
             {b}: fixed_mask=0x{bm:0digits$x}, fixed_value=0x{bv:0digits$x}; \
             common fixed bits: 0x{common:0digits$x}",
            a = self.first.name,
            b = self.second.name,
            am = self.first.fixed_mask,
            av = self.first.fixed_value,
            bm = self.second.fixed_mask,
            bv = self.second.fixed_value,
            common = self.common_mask,
        )
    }
}

/// Every unordered pair of equal-width instructions whose common fixed bits carry equal
/// values. Pairs with no common fixed bit are never reported.
pub fn find_overlaps(instructions: &[Instruction]) -> Vec<Overlap<'_>> {
    let mut overlaps = Vec::new();
    for (idx, first) in instructions.iter().enumerate() {
        for second in &instructions[idx + 1..] {
            if first.width != second.width {
                continue;
            }
            let common_mask = first.fixed_mask & second.fixed_mask;
            if common_mask == 0 {
                continue;
            }
            if first.fixed_value & common_mask == second.fixed_value & common_mask {
                overlaps.push(Overlap {
                    first,
                    second,
                    common_mask,
                });
            }
        }
    }
    overlaps
}

#[derive(Default)]
pub struct Validator {
    diagnostics: Vec<IsaDiagnostic>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with every overlap and layout problem found. Extension sub-opcodes are not
    /// checked for overlaps here; the extension table resolves those with a warning.
    pub fn validate(&mut self, doc: &SpecDocument) -> Result<(), IsaError> {
        for overlap in find_overlaps(&doc.instructions) {
            self.push_validation_diagnostic(
                "validation.overlapping-encoding",
                overlap.describe(),
                Some(overlap.second.span.clone()),
            );
        }
        for instr in &doc.instructions {
            self.validate_operand_layout(instr);
        }

        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(IsaError::Diagnostics {
                phase: DiagnosticPhase::Validation,
                diagnostics: std::mem::take(&mut self.diagnostics),
            })
        }
    }

    fn validate_operand_layout(&mut self, instr: &Instruction) {
        if instr.width != EncodingWidth::Bits32 {
            return;
        }
        for operand in &instr.operands {
            if operand.low_bit < 16 && operand.high_bit >= 16 {
                self.push_validation_diagnostic(
                    "validation.straddling-operand",
                    format!(
                        "operand '{}' of '{}' spans bits {}..={} across the 16-bit word boundary",
                        operand.symbol, instr.name, operand.low_bit, operand.high_bit
                    ),
                    Some(instr.span.clone()),
                );
            }
        }
    }

    fn push_validation_diagnostic(
        &mut self,
        code: &'static str,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) {
        self.diagnostics.push(IsaDiagnostic::error(
            DiagnosticPhase::Validation,
            code,
            message,
            span,
        ));
    }
}

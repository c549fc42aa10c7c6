//! Renders decision tables and extension lookups into Rust decoder source.
//!
//! The output is one self-contained file: opcode types, the extension dispatcher, one
//! dispatch function per decision table (root first, then children depth-first), and the
//! combined entry point. Every item carries its own `#[allow]` attributes so the file can
//! be used as a module or pulled in with `include!`.

use std::fmt::Write;

use crate::soc::isa::ast::{Instruction, SpecDocument};
use crate::soc::isa::bits::set_bits;
use crate::soc::isa::decoder::{EXTENSION_NIBBLE, FALLBACK_NAME};
use crate::soc::isa::error::IsaError;
use crate::soc::isa::extension::ExtensionTable;
use crate::soc::isa::operand::OperandSource;
use crate::soc::isa::table::{DecisionNode, DecisionTable, DecisionTree};

use super::names::{FreshNames, TypeNames};

const ROOT_FN: &str = "decode_instruction";
const ALLOW_TYPES: &str = "#[allow(non_camel_case_types)]";
const ALLOW_FNS: &str = "#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]";

#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// `log` target used by the generated unknown-opcode warnings.
    pub log_target: String,
    /// How the spec is named in the generated header.
    pub source_label: String,
    /// Overrides the digest recorded in the header; defaults to the parsed spec's digest.
    pub source_digest: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            log_target: "dsp".to_string(),
            source_label: "defs/dsp/spec".to_string(),
            source_digest: None,
        }
    }
}

/// A generated struct: identifier plus fields declared from the highest operand down.
#[derive(Debug, Clone)]
struct OpcodeType {
    ident: String,
    bits: u32,
    fields: Vec<(String, OperandSource)>,
}

impl OpcodeType {
    fn from_instruction(instr: &Instruction, ident: String) -> Result<Self, IsaError> {
        let sources = OperandSource::resolve_all(instr)?;
        let mut fields: Vec<_> = instr.field_names().into_iter().zip(sources).collect();
        fields.reverse();
        Ok(Self {
            ident,
            bits: instr.width.bits(),
            fields,
        })
    }

    fn synthesized(ident: String) -> Self {
        Self {
            ident,
            bits: 16,
            fields: Vec::new(),
        }
    }
}

pub struct CodeEmitter<'a> {
    doc: &'a SpecDocument,
    options: &'a EmitOptions,
    tree: DecisionTree<'a>,
    extension_table: ExtensionTable<'a>,
    main_types: Vec<OpcodeType>,
    extension_types: Vec<OpcodeType>,
    /// Index into `main_types` of the fallback no-op.
    main_nop: usize,
    extension_nop: usize,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(doc: &'a SpecDocument, options: &'a EmitOptions) -> Result<Self, IsaError> {
        let mut names = TypeNames::new();
        let mut main_types = doc
            .instructions
            .iter()
            .map(|instr| OpcodeType::from_instruction(instr, names.claim_main(&instr.name)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut extension_types = doc
            .extensions
            .iter()
            .map(|ext| OpcodeType::from_instruction(ext, names.claim_extension(&ext.name)))
            .collect::<Result<Vec<_>, _>>()?;

        let main_nop = match doc.instructions.iter().position(|i| i.name == FALLBACK_NAME) {
            Some(idx) => idx,
            None => {
                main_types.push(OpcodeType::synthesized(names.claim_main(FALLBACK_NAME)));
                main_types.len() - 1
            }
        };
        let extension_nop = match doc.extensions.iter().position(|e| e.name == FALLBACK_NAME) {
            Some(idx) => idx,
            None => {
                extension_types.push(OpcodeType::synthesized(
                    names.claim_extension(FALLBACK_NAME),
                ));
                extension_types.len() - 1
            }
        };

        Ok(Self {
            doc,
            options,
            tree: DecisionTree::build(&doc.instructions),
            extension_table: ExtensionTable::build(&doc.extensions),
            main_types,
            extension_types,
            main_nop,
            extension_nop,
        })
    }

    pub fn tree(&self) -> &DecisionTree<'a> {
        &self.tree
    }

    pub fn extension_table(&self) -> &ExtensionTable<'a> {
        &self.extension_table
    }

    /// Dispatch functions the emitted file contains for main instructions.
    pub fn table_functions(&self) -> usize {
        self.tree.table_count().max(1)
    }

    pub fn emit(&self) -> Result<String, IsaError> {
        let mut out = String::new();
        self.write_header(&mut out)?;
        write_bit_helpers(&mut out)?;
        self.write_main_types(&mut out)?;
        self.write_extension_types(&mut out)?;
        self.write_decoded_type(&mut out)?;
        self.write_extension_dispatcher(&mut out)?;
        self.write_main_dispatchers(&mut out)?;
        self.write_entry_point(&mut out)?;
        Ok(out)
    }

    fn write_header(&self, out: &mut String) -> Result<(), IsaError> {
        let digest = self
            .options
            .source_digest
            .as_deref()
            .unwrap_or(&self.doc.digest);
        writeln!(out, "// @generated by dsp-codegen. Do not edit by hand.")?;
        writeln!(out, "// Source: {}", self.options.source_label)?;
        writeln!(out, "// Source sha256: {digest}")?;
        writeln!(
            out,
            "// {} instruction(s), {} extension(s)",
            self.doc.instructions.len(),
            self.doc.extensions.len()
        )?;
        writeln!(out)?;
        Ok(())
    }

    fn write_main_types(&self, out: &mut String) -> Result<(), IsaError> {
        write_opcode_enum(out, "DspOpcode", &self.main_types)?;
        for ty in &self.main_types {
            write_struct(out, ty)?;
        }
        write_instruction_enum(out, "DspInstruction", &self.main_types)?;

        writeln!(out, "impl DspInstruction {{")?;
        write_opcode_fn(out, "DspInstruction", "DspOpcode", &self.main_types)?;
        writeln!(out)?;
        writeln!(out, "    /// Encoded width in bits.")?;
        writeln!(out, "    pub const fn size(&self) -> u32 {{")?;
        writeln!(out, "        match self {{")?;
        for ty in &self.main_types {
            writeln!(out, "            DspInstruction::{}(_) => {},", ty.ident, ty.bits)?;
        }
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_extension_types(&self, out: &mut String) -> Result<(), IsaError> {
        write_opcode_enum(out, "ExtensionOpcode", &self.extension_types)?;
        for ty in &self.extension_types {
            write_struct(out, ty)?;
        }
        write_instruction_enum(out, "ExtensionInstruction", &self.extension_types)?;

        writeln!(out, "impl ExtensionInstruction {{")?;
        write_opcode_fn(
            out,
            "ExtensionInstruction",
            "ExtensionOpcode",
            &self.extension_types,
        )?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_decoded_type(&self, out: &mut String) -> Result<(), IsaError> {
        writeln!(out, "/// A main instruction together with its optional extension.")?;
        writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
        writeln!(out, "pub struct DecodedInstruction {{")?;
        writeln!(out, "    pub main: DspInstruction,")?;
        writeln!(out, "    pub has_extension: bool,")?;
        writeln!(out, "    pub extension: ExtensionInstruction,")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_extension_dispatcher(&self, out: &mut String) -> Result<(), IsaError> {
        writeln!(out, "/// Decodes the extension held in the low byte of `instruction`.")?;
        writeln!(out, "{ALLOW_FNS}")?;
        writeln!(
            out,
            "pub fn decode_extension(instruction: u16) -> ExtensionInstruction {{"
        )?;
        writeln!(out, "    match (instruction & 0xFF) as u8 {{")?;
        for (start, end, idx) in byte_runs(&self.extension_table) {
            let pattern = if start == end {
                format!("{start:#04x}")
            } else {
                format!("{start:#04x}..={end:#04x}")
            };
            let ty = &self.extension_types[idx];
            writeln!(
                out,
                "        {pattern} => {},",
                construct("ExtensionInstruction", ty)
            )?;
        }
        if !self.extension_table.is_complete() {
            writeln!(out, "        _ => {{")?;
            writeln!(
                out,
                "            log::warn!(target: {:?}, \"unknown extension opcode: {{:#04x}}\", instruction & 0xFF);",
                self.options.log_target
            )?;
            writeln!(
                out,
                "            {}",
                fallback("ExtensionInstruction", &self.extension_types[self.extension_nop])
            )?;
            writeln!(out, "        }}")?;
        }
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_main_dispatchers(&self, out: &mut String) -> Result<(), IsaError> {
        match self.tree.root() {
            Some(DecisionNode::Table(table)) => {
                let mut fresh = FreshNames::new();
                self.write_table_fn(out, &mut fresh, ROOT_FN, true, table)
            }
            Some(DecisionNode::Leaf(idx)) => {
                write_dispatch_signature(out, ROOT_FN, true)?;
                writeln!(out, "    {}", construct("DspInstruction", &self.main_types[*idx]))?;
                writeln!(out, "}}")?;
                writeln!(out)?;
                Ok(())
            }
            None => {
                write_dispatch_signature(out, ROOT_FN, true)?;
                writeln!(
                    out,
                    "    log::warn!(target: {:?}, \"unknown instruction opcode: {{:#06x}}\", instruction);",
                    self.options.log_target
                )?;
                writeln!(out, "    {}", self.main_fallback())?;
                writeln!(out, "}}")?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    fn write_table_fn(
        &self,
        out: &mut String,
        fresh: &mut FreshNames,
        name: &str,
        public: bool,
        table: &DecisionTable,
    ) -> Result<(), IsaError> {
        let mut children: Vec<(String, &DecisionTable)> = Vec::new();

        write_dispatch_signature(out, name, public)?;
        writeln!(out, "    let mut index: u16 = 0;")?;
        for (slot_bit, bit) in set_bits(u32::from(table.mask())).enumerate() {
            writeln!(
                out,
                "    index |= ((instruction >> {bit}) & 0x1) << {slot_bit};"
            )?;
        }
        writeln!(out, "    match index {{")?;
        for (idx, slot) in table.slots().iter().enumerate() {
            match slot {
                None => {}
                Some(DecisionNode::Leaf(instr)) => {
                    writeln!(
                        out,
                        "        {idx} => {},",
                        construct("DspInstruction", &self.main_types[*instr])
                    )?;
                }
                Some(DecisionNode::Table(child)) => {
                    let child_name = fresh.next_table();
                    writeln!(out, "        {idx} => {child_name}(instruction, next_instruction),")?;
                    children.push((child_name, child));
                }
            }
        }
        writeln!(out, "        _ => {{")?;
        writeln!(
            out,
            "            log::warn!(target: {:?}, \"unknown instruction opcode: {{:#06x}} (index: {{}})\", instruction, index);",
            self.options.log_target
        )?;
        writeln!(out, "            {}", self.main_fallback())?;
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        for (child_name, child) in children {
            self.write_table_fn(out, fresh, &child_name, false, child)?;
        }
        Ok(())
    }

    fn write_entry_point(&self, out: &mut String) -> Result<(), IsaError> {
        let ext_nop = fallback("ExtensionInstruction", &self.extension_types[self.extension_nop]);
        writeln!(
            out,
            "/// Decodes the main instruction and, when the top nibble of `instruction` is {EXTENSION_NIBBLE} or"
        )?;
        writeln!(out, "/// above, the extension in its low byte.")?;
        writeln!(
            out,
            "/// A top nibble of 3 carries a 7-bit extension that is not decoded yet."
        )?;
        writeln!(out, "{ALLOW_FNS}")?;
        writeln!(
            out,
            "pub fn decode_instruction_with_extension(instruction: u16, next_instruction: u16) -> DecodedInstruction {{"
        )?;
        writeln!(
            out,
            "    let main = {ROOT_FN}(instruction, next_instruction);"
        )?;
        writeln!(out, "    if (instruction >> 12) >= {EXTENSION_NIBBLE} {{")?;
        writeln!(out, "        DecodedInstruction {{")?;
        writeln!(out, "            main,")?;
        writeln!(out, "            has_extension: true,")?;
        writeln!(out, "            extension: decode_extension(instruction),")?;
        writeln!(out, "        }}")?;
        writeln!(out, "    }} else {{")?;
        writeln!(out, "        DecodedInstruction {{")?;
        writeln!(out, "            main,")?;
        writeln!(out, "            has_extension: false,")?;
        writeln!(out, "            extension: {ext_nop},")?;
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        Ok(())
    }

    fn main_fallback(&self) -> String {
        fallback("DspInstruction", &self.main_types[self.main_nop])
    }
}

fn write_bit_helpers(out: &mut String) -> Result<(), IsaError> {
    writeln!(out, "#[inline(always)]")?;
    writeln!(out, "#[allow(dead_code)]")?;
    writeln!(out, "const fn bit(word: u16, index: u32) -> u16 {{")?;
    writeln!(out, "    (word >> index) & 0x1")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "#[inline(always)]")?;
    writeln!(out, "#[allow(dead_code)]")?;
    writeln!(out, "const fn bits(word: u16, low: u32, high: u32) -> u16 {{")?;
    writeln!(
        out,
        "    (word >> low) & (((1u32 << (high - low + 1)) - 1) as u16)"
    )?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}

fn write_opcode_enum(out: &mut String, name: &str, types: &[OpcodeType]) -> Result<(), IsaError> {
    writeln!(out, "{ALLOW_TYPES}")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "pub enum {name} {{")?;
    for ty in types {
        writeln!(out, "    {},", ty.ident)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}

fn write_struct(out: &mut String, ty: &OpcodeType) -> Result<(), IsaError> {
    writeln!(out, "{ALLOW_TYPES}")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]")?;
    if ty.fields.is_empty() {
        writeln!(out, "pub struct {} {{}}", ty.ident)?;
    } else {
        writeln!(out, "pub struct {} {{", ty.ident)?;
        for (field, _) in &ty.fields {
            writeln!(out, "    pub {field}: u16,")?;
        }
        writeln!(out, "}}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_instruction_enum(
    out: &mut String,
    name: &str,
    types: &[OpcodeType],
) -> Result<(), IsaError> {
    writeln!(out, "{ALLOW_TYPES}")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "pub enum {name} {{")?;
    for ty in types {
        writeln!(out, "    {0}({0}),", ty.ident)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}

fn write_opcode_fn(
    out: &mut String,
    instruction_enum: &str,
    opcode_enum: &str,
    types: &[OpcodeType],
) -> Result<(), IsaError> {
    writeln!(out, "    pub const fn opcode(&self) -> {opcode_enum} {{")?;
    writeln!(out, "        match self {{")?;
    for ty in types {
        writeln!(
            out,
            "            {instruction_enum}::{0}(_) => {opcode_enum}::{0},",
            ty.ident
        )?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    Ok(())
}

fn write_dispatch_signature(out: &mut String, name: &str, public: bool) -> Result<(), IsaError> {
    let vis = if public { "pub " } else { "" };
    writeln!(out, "{ALLOW_FNS}")?;
    writeln!(
        out,
        "{vis}fn {name}(instruction: u16, next_instruction: u16) -> DspInstruction {{"
    )?;
    Ok(())
}

/// `Enum::TYPE(TYPE { field: expr, .. })` for one decoded opcode.
fn construct(enum_name: &str, ty: &OpcodeType) -> String {
    if ty.fields.is_empty() {
        return format!("{enum_name}::{0}({0} {{}})", ty.ident);
    }
    let fields = ty
        .fields
        .iter()
        .map(|(name, source)| format!("{name}: {}", read_expr(*source)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{enum_name}::{0}({0} {{ {fields} }})", ty.ident)
}

fn fallback(enum_name: &str, ty: &OpcodeType) -> String {
    format!("{enum_name}::{0}({0}::default())", ty.ident)
}

/// Expression reading one operand from the decoder inputs.
fn read_expr(source: OperandSource) -> String {
    let input = source.input();
    match source {
        OperandSource::WholeSecondWord => input.to_string(),
        _ => {
            let (low, high) = source.range();
            if low == high {
                format!("bit({input}, {low})")
            } else {
                format!("bits({input}, {low}, {high})")
            }
        }
    }
}

/// Consecutive bytes mapped to the same extension, as `(first, last, index)`.
fn byte_runs(table: &ExtensionTable<'_>) -> Vec<(u8, u8, usize)> {
    let mut runs: Vec<(u8, u8, usize)> = Vec::new();
    for (byte, idx) in table.covered() {
        match runs.last_mut() {
            Some((_, last, run_idx)) if *run_idx == idx && u16::from(*last) + 1 == u16::from(byte) => {
                *last = byte;
            }
            _ => runs.push((byte, byte, idx)),
        }
    }
    runs
}

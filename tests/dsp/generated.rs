// @generated by dsp-codegen. Do not edit by hand.
// Source: defs/dsp/spec
// Source sha256: 599b738718ddd25bb1650d70a9808ab2d38bbe2fde75b0eaf28c72baa1ce9c28
// 24 instruction(s), 7 extension(s)

#[inline(always)]
#[allow(dead_code)]
const fn bit(word: u16, index: u32) -> u16 {
    (word >> index) & 0x1
}

#[inline(always)]
#[allow(dead_code)]
const fn bits(word: u16, low: u32, high: u32) -> u16 {
    (word >> low) & (((1u32 << (high - low + 1)) - 1) as u16)
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DspOpcode {
    NOP,
    DAR_D,
    IAR_D,
    HALT,
    LOOP_R,
    BLOOP_R_A,
    LRI_D_I,
    LR_D_M,
    SR_M_S,
    ADDI_R_I,
    JCC_C_A,
    ADDIS_D_I,
    CMPIS_D_I,
    LRIS_D_I,
    SI_M_I,
    MRR_D_S,
    LRS_D_M,
    SRS_M_S,
    ADD_D,
    ADDR_D_S,
    ADDAX_D_S,
    MOVR_D_S,
    CLR_R,
    TST_R,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NOP {}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DAR_D {
    pub d: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IAR_D {
    pub d: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HALT {}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LOOP_R {
    pub r: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BLOOP_R_A {
    pub r: u16,
    pub a: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LRI_D_I {
    pub d: u16,
    pub i: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LR_D_M {
    pub d: u16,
    pub m: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SR_M_S {
    pub s: u16,
    pub m: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ADDI_R_I {
    pub r: u16,
    pub i: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JCC_C_A {
    pub c: u16,
    pub a: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ADDIS_D_I {
    pub d: u16,
    pub i: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CMPIS_D_I {
    pub d: u16,
    pub i: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LRIS_D_I {
    pub d: u16,
    pub i: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SI_M_I {
    pub m: u16,
    pub i: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MRR_D_S {
    pub d: u16,
    pub s: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LRS_D_M {
    pub d: u16,
    pub m: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SRS_M_S {
    pub s: u16,
    pub m: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ADD_D {
    pub d: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ADDR_D_S {
    pub s: u16,
    pub d: u16,
    pub x: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ADDAX_D_S {
    pub s: u16,
    pub d: u16,
    pub x: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MOVR_D_S {
    pub s: u16,
    pub d: u16,
    pub x: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CLR_R {
    pub r: u16,
    pub x: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TST_R {
    pub r: u16,
    pub x: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DspInstruction {
    NOP(NOP),
    DAR_D(DAR_D),
    IAR_D(IAR_D),
    HALT(HALT),
    LOOP_R(LOOP_R),
    BLOOP_R_A(BLOOP_R_A),
    LRI_D_I(LRI_D_I),
    LR_D_M(LR_D_M),
    SR_M_S(SR_M_S),
    ADDI_R_I(ADDI_R_I),
    JCC_C_A(JCC_C_A),
    ADDIS_D_I(ADDIS_D_I),
    CMPIS_D_I(CMPIS_D_I),
    LRIS_D_I(LRIS_D_I),
    SI_M_I(SI_M_I),
    MRR_D_S(MRR_D_S),
    LRS_D_M(LRS_D_M),
    SRS_M_S(SRS_M_S),
    ADD_D(ADD_D),
    ADDR_D_S(ADDR_D_S),
    ADDAX_D_S(ADDAX_D_S),
    MOVR_D_S(MOVR_D_S),
    CLR_R(CLR_R),
    TST_R(TST_R),
}

impl DspInstruction {
    pub const fn opcode(&self) -> DspOpcode {
        match self {
            DspInstruction::NOP(_) => DspOpcode::NOP,
            DspInstruction::DAR_D(_) => DspOpcode::DAR_D,
            DspInstruction::IAR_D(_) => DspOpcode::IAR_D,
            DspInstruction::HALT(_) => DspOpcode::HALT,
            DspInstruction::LOOP_R(_) => DspOpcode::LOOP_R,
            DspInstruction::BLOOP_R_A(_) => DspOpcode::BLOOP_R_A,
            DspInstruction::LRI_D_I(_) => DspOpcode::LRI_D_I,
            DspInstruction::LR_D_M(_) => DspOpcode::LR_D_M,
            DspInstruction::SR_M_S(_) => DspOpcode::SR_M_S,
            DspInstruction::ADDI_R_I(_) => DspOpcode::ADDI_R_I,
            DspInstruction::JCC_C_A(_) => DspOpcode::JCC_C_A,
            DspInstruction::ADDIS_D_I(_) => DspOpcode::ADDIS_D_I,
            DspInstruction::CMPIS_D_I(_) => DspOpcode::CMPIS_D_I,
            DspInstruction::LRIS_D_I(_) => DspOpcode::LRIS_D_I,
            DspInstruction::SI_M_I(_) => DspOpcode::SI_M_I,
            DspInstruction::MRR_D_S(_) => DspOpcode::MRR_D_S,
            DspInstruction::LRS_D_M(_) => DspOpcode::LRS_D_M,
            DspInstruction::SRS_M_S(_) => DspOpcode::SRS_M_S,
            DspInstruction::ADD_D(_) => DspOpcode::ADD_D,
            DspInstruction::ADDR_D_S(_) => DspOpcode::ADDR_D_S,
            DspInstruction::ADDAX_D_S(_) => DspOpcode::ADDAX_D_S,
            DspInstruction::MOVR_D_S(_) => DspOpcode::MOVR_D_S,
            DspInstruction::CLR_R(_) => DspOpcode::CLR_R,
            DspInstruction::TST_R(_) => DspOpcode::TST_R,
        }
    }

    /// Encoded width in bits.
    pub const fn size(&self) -> u32 {
        match self {
            DspInstruction::NOP(_) => 16,
            DspInstruction::DAR_D(_) => 16,
            DspInstruction::IAR_D(_) => 16,
            DspInstruction::HALT(_) => 16,
            DspInstruction::LOOP_R(_) => 16,
            DspInstruction::BLOOP_R_A(_) => 32,
            DspInstruction::LRI_D_I(_) => 32,
            DspInstruction::LR_D_M(_) => 32,
            DspInstruction::SR_M_S(_) => 32,
            DspInstruction::ADDI_R_I(_) => 32,
            DspInstruction::JCC_C_A(_) => 32,
            DspInstruction::ADDIS_D_I(_) => 16,
            DspInstruction::CMPIS_D_I(_) => 16,
            DspInstruction::LRIS_D_I(_) => 16,
            DspInstruction::SI_M_I(_) => 32,
            DspInstruction::MRR_D_S(_) => 16,
            DspInstruction::LRS_D_M(_) => 16,
            DspInstruction::SRS_M_S(_) => 16,
            DspInstruction::ADD_D(_) => 16,
            DspInstruction::ADDR_D_S(_) => 16,
            DspInstruction::ADDAX_D_S(_) => 16,
            DspInstruction::MOVR_D_S(_) => 16,
            DspInstruction::CLR_R(_) => 16,
            DspInstruction::TST_R(_) => 16,
        }
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionOpcode {
    EXT_NOP,
    EXT_DR_R,
    EXT_IR_R,
    EXT_NR_R,
    EXT_MV_D_S,
    EXT_S_D_S,
    EXT_L_D_S,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EXT_NOP {}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EXT_DR_R {
    pub r: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EXT_IR_R {
    pub r: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EXT_NR_R {
    pub r: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EXT_MV_D_S {
    pub d: u16,
    pub s: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EXT_S_D_S {
    pub s: u16,
    pub d: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EXT_L_D_S {
    pub d: u16,
    pub s: u16,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionInstruction {
    EXT_NOP(EXT_NOP),
    EXT_DR_R(EXT_DR_R),
    EXT_IR_R(EXT_IR_R),
    EXT_NR_R(EXT_NR_R),
    EXT_MV_D_S(EXT_MV_D_S),
    EXT_S_D_S(EXT_S_D_S),
    EXT_L_D_S(EXT_L_D_S),
}

impl ExtensionInstruction {
    pub const fn opcode(&self) -> ExtensionOpcode {
        match self {
            ExtensionInstruction::EXT_NOP(_) => ExtensionOpcode::EXT_NOP,
            ExtensionInstruction::EXT_DR_R(_) => ExtensionOpcode::EXT_DR_R,
            ExtensionInstruction::EXT_IR_R(_) => ExtensionOpcode::EXT_IR_R,
            ExtensionInstruction::EXT_NR_R(_) => ExtensionOpcode::EXT_NR_R,
            ExtensionInstruction::EXT_MV_D_S(_) => ExtensionOpcode::EXT_MV_D_S,
            ExtensionInstruction::EXT_S_D_S(_) => ExtensionOpcode::EXT_S_D_S,
            ExtensionInstruction::EXT_L_D_S(_) => ExtensionOpcode::EXT_L_D_S,
        }
    }
}

/// A main instruction together with its optional extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedInstruction {
    pub main: DspInstruction,
    pub has_extension: bool,
    pub extension: ExtensionInstruction,
}

/// Decodes the extension held in the low byte of `instruction`.
#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
pub fn decode_extension(instruction: u16) -> ExtensionInstruction {
    match (instruction & 0xFF) as u8 {
        0x00 => ExtensionInstruction::EXT_NOP(EXT_NOP {}),
        0x04..=0x07 => ExtensionInstruction::EXT_DR_R(EXT_DR_R { r: bits(instruction, 0, 1) }),
        0x08..=0x0b => ExtensionInstruction::EXT_IR_R(EXT_IR_R { r: bits(instruction, 0, 1) }),
        0x0c..=0x0f => ExtensionInstruction::EXT_NR_R(EXT_NR_R { r: bits(instruction, 0, 1) }),
        0x10..=0x1f => ExtensionInstruction::EXT_MV_D_S(EXT_MV_D_S { d: bits(instruction, 2, 3), s: bits(instruction, 0, 1) }),
        0x20..=0x23 => ExtensionInstruction::EXT_S_D_S(EXT_S_D_S { s: bits(instruction, 3, 4), d: bits(instruction, 0, 1) }),
        0x28..=0x2b => ExtensionInstruction::EXT_S_D_S(EXT_S_D_S { s: bits(instruction, 3, 4), d: bits(instruction, 0, 1) }),
        0x30..=0x33 => ExtensionInstruction::EXT_S_D_S(EXT_S_D_S { s: bits(instruction, 3, 4), d: bits(instruction, 0, 1) }),
        0x38..=0x3b => ExtensionInstruction::EXT_S_D_S(EXT_S_D_S { s: bits(instruction, 3, 4), d: bits(instruction, 0, 1) }),
        0x40..=0x43 => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        0x48..=0x4b => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        0x50..=0x53 => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        0x58..=0x5b => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        0x60..=0x63 => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        0x68..=0x6b => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        0x70..=0x73 => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        0x78..=0x7b => ExtensionInstruction::EXT_L_D_S(EXT_L_D_S { d: bits(instruction, 3, 5), s: bits(instruction, 0, 1) }),
        _ => {
            log::warn!(target: "dsp", "unknown extension opcode: {:#04x}", instruction & 0xFF);
            ExtensionInstruction::EXT_NOP(EXT_NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
pub fn decode_instruction(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 12) & 0x1) << 0;
    index |= ((instruction >> 13) & 0x1) << 1;
    index |= ((instruction >> 14) & 0x1) << 2;
    index |= ((instruction >> 15) & 0x1) << 3;
    match index {
        0 => generated_table_1(instruction, next_instruction),
        1 => generated_table_2(instruction, next_instruction),
        2 => generated_table_3(instruction, next_instruction),
        3 => DspInstruction::ADD_D(ADD_D { d: bit(instruction, 8) }),
        4 => generated_table_4(instruction, next_instruction),
        6 => DspInstruction::MOVR_D_S(MOVR_D_S { s: bits(instruction, 9, 10), d: bit(instruction, 8), x: bits(instruction, 0, 7) }),
        8 => DspInstruction::CLR_R(CLR_R { r: bit(instruction, 11), x: bits(instruction, 0, 7) }),
        11 => DspInstruction::TST_R(TST_R { r: bit(instruction, 11), x: bits(instruction, 0, 7) }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_1(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 11) & 0x1) << 0;
    match index {
        0 => generated_table_5(instruction, next_instruction),
        1 => DspInstruction::LRIS_D_I(LRIS_D_I { d: bits(instruction, 8, 10), i: bits(instruction, 0, 7) }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_5(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 9) & 0x1) << 0;
    index |= ((instruction >> 10) & 0x1) << 1;
    match index {
        0 => generated_table_6(instruction, next_instruction),
        1 => generated_table_7(instruction, next_instruction),
        2 => DspInstruction::ADDIS_D_I(ADDIS_D_I { d: bit(instruction, 8), i: bits(instruction, 0, 7) }),
        3 => DspInstruction::CMPIS_D_I(CMPIS_D_I { d: bit(instruction, 8), i: bits(instruction, 0, 7) }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_6(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 5) & 0x1) << 0;
    index |= ((instruction >> 6) & 0x1) << 1;
    index |= ((instruction >> 7) & 0x1) << 2;
    index |= ((instruction >> 8) & 0x1) << 3;
    match index {
        0 => generated_table_8(instruction, next_instruction),
        1 => DspInstruction::HALT(HALT {}),
        2 => DspInstruction::LOOP_R(LOOP_R { r: bits(instruction, 0, 4) }),
        3 => DspInstruction::BLOOP_R_A(BLOOP_R_A { r: bits(instruction, 0, 4), a: next_instruction }),
        4 => DspInstruction::LRI_D_I(LRI_D_I { d: bits(instruction, 0, 4), i: next_instruction }),
        6 => DspInstruction::LR_D_M(LR_D_M { d: bits(instruction, 0, 4), m: next_instruction }),
        7 => DspInstruction::SR_M_S(SR_M_S { s: bits(instruction, 0, 4), m: next_instruction }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_8(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 2) & 0x1) << 0;
    index |= ((instruction >> 3) & 0x1) << 1;
    index |= ((instruction >> 4) & 0x1) << 2;
    match index {
        0 => DspInstruction::NOP(NOP {}),
        1 => DspInstruction::DAR_D(DAR_D { d: bits(instruction, 0, 1) }),
        2 => DspInstruction::IAR_D(IAR_D { d: bits(instruction, 0, 1) }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_7(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 4) & 0x1) << 0;
    index |= ((instruction >> 5) & 0x1) << 1;
    index |= ((instruction >> 6) & 0x1) << 2;
    index |= ((instruction >> 7) & 0x1) << 3;
    match index {
        0 => DspInstruction::ADDI_R_I(ADDI_R_I { r: bit(instruction, 8), i: next_instruction }),
        9 => DspInstruction::JCC_C_A(JCC_C_A { c: bits(instruction, 0, 3), a: next_instruction }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_2(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 10) & 0x1) << 0;
    index |= ((instruction >> 11) & 0x1) << 1;
    match index {
        1 => DspInstruction::SI_M_I(SI_M_I { m: bits(instruction, 0, 7), i: next_instruction }),
        3 => DspInstruction::MRR_D_S(MRR_D_S { d: bits(instruction, 5, 9), s: bits(instruction, 0, 4) }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_3(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 11) & 0x1) << 0;
    match index {
        0 => DspInstruction::LRS_D_M(LRS_D_M { d: bits(instruction, 8, 10), m: bits(instruction, 0, 7) }),
        1 => DspInstruction::SRS_M_S(SRS_M_S { s: bits(instruction, 8, 10), m: bits(instruction, 0, 7) }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
fn generated_table_4(instruction: u16, next_instruction: u16) -> DspInstruction {
    let mut index: u16 = 0;
    index |= ((instruction >> 11) & 0x1) << 0;
    match index {
        0 => DspInstruction::ADDR_D_S(ADDR_D_S { s: bits(instruction, 9, 10), d: bit(instruction, 8), x: bits(instruction, 0, 7) }),
        1 => DspInstruction::ADDAX_D_S(ADDAX_D_S { s: bit(instruction, 9), d: bit(instruction, 8), x: bits(instruction, 0, 7) }),
        _ => {
            log::warn!(target: "dsp", "unknown instruction opcode: {:#06x} (index: {})", instruction, index);
            DspInstruction::NOP(NOP::default())
        }
    }
}

/// Decodes the main instruction and, when the top nibble of `instruction` is 4 or
/// above, the extension in its low byte.
/// A top nibble of 3 carries a 7-bit extension that is not decoded yet.
#[allow(unused_variables, clippy::identity_op, clippy::match_single_binding)]
pub fn decode_instruction_with_extension(instruction: u16, next_instruction: u16) -> DecodedInstruction {
    let main = decode_instruction(instruction, next_instruction);
    if (instruction >> 12) >= 4 {
        DecodedInstruction {
            main,
            has_extension: true,
            extension: decode_extension(instruction),
        }
    } else {
        DecodedInstruction {
            main,
            has_extension: false,
            extension: ExtensionInstruction::EXT_NOP(EXT_NOP::default()),
        }
    }
}

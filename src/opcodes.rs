//! # Opcode Dispatch Tables
//!
//! Two immutable 256-slot tables map every opcode byte to its mnemonic,
//! addressing mode, length, base cycle cost and handler:
//!
//! - [`MOS6502_TABLE`]: the 151 documented NMOS opcodes, shared by the 6502
//!   and the 6510.
//! - [`WDC65C02_TABLE`]: a copy of the NMOS table with the 65C02 additions
//!   laid over the unassigned slots.
//!
//! Both tables are built by `const fn` and live in statics, so they exist
//! before the first instruction runs and are never written afterwards.
//! Unassigned slots hold `None`; the engine reports them as
//! [`ExecutionError::InvalidOpcode`](crate::ExecutionError::InvalidOpcode).
//!
//! Base cycles are the documented minimum. Page-crossing and branch
//! penalties are not stored here; they arise from the extra bus reads the
//! handlers perform. `Processor::step` spends one more cycle than the base
//! on its second opcode read.

use std::fmt;

use crate::addressing::AddressingMode::{self, *};
use crate::cpu::Processor;
use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::ProcessorVariant;

/// Semantic implementation of one opcode.
///
/// Called after the opcode byte has been fetched, with PC pointing at the
/// first operand byte.
pub type Handler = fn(&mut Processor, AddressingMode);

/// Dispatch entry for a single opcode.
///
/// # Examples
///
/// ```
/// use retro6502::{lookup, AddressingMode, ProcessorVariant};
///
/// let lda_imm = lookup(0xA9, ProcessorVariant::Mos6502).unwrap();
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.cycles, 2);
/// assert_eq!(lda_imm.bytes, 2);
/// ```
#[derive(Clone, Copy)]
pub struct OpcodeEntry {
    /// Instruction mnemonic, e.g. "LDA".
    pub mnemonic: &'static str,

    /// How the operand bytes are interpreted.
    pub mode: AddressingMode,

    /// Total instruction length including the opcode (1-3).
    pub bytes: u8,

    /// Documented base cycle cost, before page-crossing and branch penalties.
    pub cycles: u8,

    pub(crate) handler: Handler,
}

impl fmt::Debug for OpcodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpcodeEntry")
            .field("mnemonic", &self.mnemonic)
            .field("mode", &self.mode)
            .field("bytes", &self.bytes)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

/// An immutable opcode dispatch table.
#[derive(Debug)]
pub struct OpcodeTable {
    entries: [Option<OpcodeEntry>; 256],
}

/// NMOS 6502 / 6510 dispatch table.
pub static MOS6502_TABLE: OpcodeTable = OpcodeTable::mos6502();

/// WDC 65C02 dispatch table.
pub static WDC65C02_TABLE: OpcodeTable = OpcodeTable::wdc65c02();

/// Looks up `opcode` in the table for `variant`.
///
/// Returns `None` for opcodes the variant does not define.
pub fn lookup(opcode: u8, variant: ProcessorVariant) -> Option<OpcodeEntry> {
    variant.opcode_table().get(opcode).copied()
}

const fn op(
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    handler: Handler,
) -> Option<OpcodeEntry> {
    Some(OpcodeEntry {
        mnemonic,
        mode,
        bytes: 1 + mode.operand_len(),
        cycles,
        handler,
    })
}

impl OpcodeTable {
    /// Returns the entry for `opcode`, if the table defines it.
    pub fn get(&self, opcode: u8) -> Option<&OpcodeEntry> {
        self.entries[opcode as usize].as_ref()
    }

    /// Iterates over every defined opcode in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &OpcodeEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(opcode, entry)| entry.as_ref().map(|e| (opcode as u8, e)))
    }

    /// Number of defined opcodes.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no opcode is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    const fn mos6502() -> Self {
        let mut t: [Option<OpcodeEntry>; 256] = [None; 256];

        // Loads and stores
        t[0xA9] = op("LDA", Immediate, 2, load_store::lda);
        t[0xA5] = op("LDA", ZeroPage, 3, load_store::lda);
        t[0xB5] = op("LDA", ZeroPageX, 4, load_store::lda);
        t[0xAD] = op("LDA", Absolute, 4, load_store::lda);
        t[0xBD] = op("LDA", AbsoluteX, 4, load_store::lda);
        t[0xB9] = op("LDA", AbsoluteY, 4, load_store::lda);
        t[0xA1] = op("LDA", IndirectX, 6, load_store::lda);
        t[0xB1] = op("LDA", IndirectY, 5, load_store::lda);

        t[0xA2] = op("LDX", Immediate, 2, load_store::ldx);
        t[0xA6] = op("LDX", ZeroPage, 3, load_store::ldx);
        t[0xB6] = op("LDX", ZeroPageY, 4, load_store::ldx);
        t[0xAE] = op("LDX", Absolute, 4, load_store::ldx);
        t[0xBE] = op("LDX", AbsoluteY, 4, load_store::ldx);

        t[0xA0] = op("LDY", Immediate, 2, load_store::ldy);
        t[0xA4] = op("LDY", ZeroPage, 3, load_store::ldy);
        t[0xB4] = op("LDY", ZeroPageX, 4, load_store::ldy);
        t[0xAC] = op("LDY", Absolute, 4, load_store::ldy);
        t[0xBC] = op("LDY", AbsoluteX, 4, load_store::ldy);

        t[0x85] = op("STA", ZeroPage, 3, load_store::sta);
        t[0x95] = op("STA", ZeroPageX, 4, load_store::sta);
        t[0x8D] = op("STA", Absolute, 4, load_store::sta);
        t[0x9D] = op("STA", AbsoluteX, 5, load_store::sta);
        t[0x99] = op("STA", AbsoluteY, 5, load_store::sta);
        t[0x81] = op("STA", IndirectX, 6, load_store::sta);
        t[0x91] = op("STA", IndirectY, 6, load_store::sta);

        t[0x86] = op("STX", ZeroPage, 3, load_store::stx);
        t[0x96] = op("STX", ZeroPageY, 4, load_store::stx);
        t[0x8E] = op("STX", Absolute, 4, load_store::stx);

        t[0x84] = op("STY", ZeroPage, 3, load_store::sty);
        t[0x94] = op("STY", ZeroPageX, 4, load_store::sty);
        t[0x8C] = op("STY", Absolute, 4, load_store::sty);

        // Arithmetic and logic
        t[0x69] = op("ADC", Immediate, 2, alu::adc);
        t[0x65] = op("ADC", ZeroPage, 3, alu::adc);
        t[0x75] = op("ADC", ZeroPageX, 4, alu::adc);
        t[0x6D] = op("ADC", Absolute, 4, alu::adc);
        t[0x7D] = op("ADC", AbsoluteX, 4, alu::adc);
        t[0x79] = op("ADC", AbsoluteY, 4, alu::adc);
        t[0x61] = op("ADC", IndirectX, 6, alu::adc);
        t[0x71] = op("ADC", IndirectY, 5, alu::adc);

        t[0xE9] = op("SBC", Immediate, 2, alu::sbc);
        t[0xE5] = op("SBC", ZeroPage, 3, alu::sbc);
        t[0xF5] = op("SBC", ZeroPageX, 4, alu::sbc);
        t[0xED] = op("SBC", Absolute, 4, alu::sbc);
        t[0xFD] = op("SBC", AbsoluteX, 4, alu::sbc);
        t[0xF9] = op("SBC", AbsoluteY, 4, alu::sbc);
        t[0xE1] = op("SBC", IndirectX, 6, alu::sbc);
        t[0xF1] = op("SBC", IndirectY, 5, alu::sbc);

        t[0x29] = op("AND", Immediate, 2, alu::and);
        t[0x25] = op("AND", ZeroPage, 3, alu::and);
        t[0x35] = op("AND", ZeroPageX, 4, alu::and);
        t[0x2D] = op("AND", Absolute, 4, alu::and);
        t[0x3D] = op("AND", AbsoluteX, 4, alu::and);
        t[0x39] = op("AND", AbsoluteY, 4, alu::and);
        t[0x21] = op("AND", IndirectX, 6, alu::and);
        t[0x31] = op("AND", IndirectY, 5, alu::and);

        t[0x09] = op("ORA", Immediate, 2, alu::ora);
        t[0x05] = op("ORA", ZeroPage, 3, alu::ora);
        t[0x15] = op("ORA", ZeroPageX, 4, alu::ora);
        t[0x0D] = op("ORA", Absolute, 4, alu::ora);
        t[0x1D] = op("ORA", AbsoluteX, 4, alu::ora);
        t[0x19] = op("ORA", AbsoluteY, 4, alu::ora);
        t[0x01] = op("ORA", IndirectX, 6, alu::ora);
        t[0x11] = op("ORA", IndirectY, 5, alu::ora);

        t[0x49] = op("EOR", Immediate, 2, alu::eor);
        t[0x45] = op("EOR", ZeroPage, 3, alu::eor);
        t[0x55] = op("EOR", ZeroPageX, 4, alu::eor);
        t[0x4D] = op("EOR", Absolute, 4, alu::eor);
        t[0x5D] = op("EOR", AbsoluteX, 4, alu::eor);
        t[0x59] = op("EOR", AbsoluteY, 4, alu::eor);
        t[0x41] = op("EOR", IndirectX, 6, alu::eor);
        t[0x51] = op("EOR", IndirectY, 5, alu::eor);

        t[0xC9] = op("CMP", Immediate, 2, alu::cmp);
        t[0xC5] = op("CMP", ZeroPage, 3, alu::cmp);
        t[0xD5] = op("CMP", ZeroPageX, 4, alu::cmp);
        t[0xCD] = op("CMP", Absolute, 4, alu::cmp);
        t[0xDD] = op("CMP", AbsoluteX, 4, alu::cmp);
        t[0xD9] = op("CMP", AbsoluteY, 4, alu::cmp);
        t[0xC1] = op("CMP", IndirectX, 6, alu::cmp);
        t[0xD1] = op("CMP", IndirectY, 5, alu::cmp);

        t[0xE0] = op("CPX", Immediate, 2, alu::cpx);
        t[0xE4] = op("CPX", ZeroPage, 3, alu::cpx);
        t[0xEC] = op("CPX", Absolute, 4, alu::cpx);

        t[0xC0] = op("CPY", Immediate, 2, alu::cpy);
        t[0xC4] = op("CPY", ZeroPage, 3, alu::cpy);
        t[0xCC] = op("CPY", Absolute, 4, alu::cpy);

        t[0x24] = op("BIT", ZeroPage, 3, alu::bit);
        t[0x2C] = op("BIT", Absolute, 4, alu::bit);

        // Shifts and rotates
        t[0x0A] = op("ASL", Accumulator, 2, shifts::asl);
        t[0x06] = op("ASL", ZeroPage, 5, shifts::asl);
        t[0x16] = op("ASL", ZeroPageX, 6, shifts::asl);
        t[0x0E] = op("ASL", Absolute, 6, shifts::asl);
        t[0x1E] = op("ASL", AbsoluteX, 7, shifts::asl);

        t[0x4A] = op("LSR", Accumulator, 2, shifts::lsr);
        t[0x46] = op("LSR", ZeroPage, 5, shifts::lsr);
        t[0x56] = op("LSR", ZeroPageX, 6, shifts::lsr);
        t[0x4E] = op("LSR", Absolute, 6, shifts::lsr);
        t[0x5E] = op("LSR", AbsoluteX, 7, shifts::lsr);

        t[0x2A] = op("ROL", Accumulator, 2, shifts::rol);
        t[0x26] = op("ROL", ZeroPage, 5, shifts::rol);
        t[0x36] = op("ROL", ZeroPageX, 6, shifts::rol);
        t[0x2E] = op("ROL", Absolute, 6, shifts::rol);
        t[0x3E] = op("ROL", AbsoluteX, 7, shifts::rol);

        t[0x6A] = op("ROR", Accumulator, 2, shifts::ror);
        t[0x66] = op("ROR", ZeroPage, 5, shifts::ror);
        t[0x76] = op("ROR", ZeroPageX, 6, shifts::ror);
        t[0x6E] = op("ROR", Absolute, 6, shifts::ror);
        t[0x7E] = op("ROR", AbsoluteX, 7, shifts::ror);

        // Increments and decrements
        t[0xE6] = op("INC", ZeroPage, 5, inc_dec::inc);
        t[0xF6] = op("INC", ZeroPageX, 6, inc_dec::inc);
        t[0xEE] = op("INC", Absolute, 6, inc_dec::inc);
        t[0xFE] = op("INC", AbsoluteX, 7, inc_dec::inc);

        t[0xC6] = op("DEC", ZeroPage, 5, inc_dec::dec);
        t[0xD6] = op("DEC", ZeroPageX, 6, inc_dec::dec);
        t[0xCE] = op("DEC", Absolute, 6, inc_dec::dec);
        t[0xDE] = op("DEC", AbsoluteX, 7, inc_dec::dec);

        t[0xE8] = op("INX", Implied, 2, inc_dec::inx);
        t[0xC8] = op("INY", Implied, 2, inc_dec::iny);
        t[0xCA] = op("DEX", Implied, 2, inc_dec::dex);
        t[0x88] = op("DEY", Implied, 2, inc_dec::dey);

        // Branches
        t[0x90] = op("BCC", Relative, 2, branches::bcc);
        t[0xB0] = op("BCS", Relative, 2, branches::bcs);
        t[0xF0] = op("BEQ", Relative, 2, branches::beq);
        t[0xD0] = op("BNE", Relative, 2, branches::bne);
        t[0x30] = op("BMI", Relative, 2, branches::bmi);
        t[0x10] = op("BPL", Relative, 2, branches::bpl);
        t[0x50] = op("BVC", Relative, 2, branches::bvc);
        t[0x70] = op("BVS", Relative, 2, branches::bvs);

        // Control transfer
        t[0x00] = op("BRK", Implied, 7, control::brk);
        t[0x4C] = op("JMP", Absolute, 3, control::jmp);
        t[0x6C] = op("JMP", Indirect, 5, control::jmp);
        t[0x20] = op("JSR", Absolute, 6, control::jsr);
        t[0x60] = op("RTS", Implied, 6, control::rts);
        t[0x40] = op("RTI", Implied, 6, control::rti);
        t[0xEA] = op("NOP", Implied, 2, control::nop);

        // Stack
        t[0x48] = op("PHA", Implied, 3, stack::pha);
        t[0x08] = op("PHP", Implied, 3, stack::php);
        t[0x68] = op("PLA", Implied, 4, stack::pla);
        t[0x28] = op("PLP", Implied, 4, stack::plp);

        // Flags
        t[0x18] = op("CLC", Implied, 2, flags::clc);
        t[0x38] = op("SEC", Implied, 2, flags::sec);
        t[0x58] = op("CLI", Implied, 2, flags::cli);
        t[0x78] = op("SEI", Implied, 2, flags::sei);
        t[0xD8] = op("CLD", Implied, 2, flags::cld);
        t[0xF8] = op("SED", Implied, 2, flags::sed);
        t[0xB8] = op("CLV", Implied, 2, flags::clv);

        // Register transfers
        t[0xAA] = op("TAX", Implied, 2, transfer::tax);
        t[0xA8] = op("TAY", Implied, 2, transfer::tay);
        t[0x8A] = op("TXA", Implied, 2, transfer::txa);
        t[0x98] = op("TYA", Implied, 2, transfer::tya);
        t[0xBA] = op("TSX", Implied, 2, transfer::tsx);
        t[0x9A] = op("TXS", Implied, 2, transfer::txs);

        Self { entries: t }
    }

    const fn wdc65c02() -> Self {
        let mut t = Self::mos6502().entries;

        t[0xDA] = op("PHX", Implied, 3, stack::phx);
        t[0xFA] = op("PLX", Implied, 4, stack::plx);
        t[0x5A] = op("PHY", Implied, 3, stack::phy);
        t[0x7A] = op("PLY", Implied, 4, stack::ply);

        t[0x64] = op("STZ", ZeroPage, 3, load_store::stz);
        t[0x74] = op("STZ", ZeroPageX, 4, load_store::stz);
        t[0x9C] = op("STZ", Absolute, 4, load_store::stz);
        t[0x9E] = op("STZ", AbsoluteX, 5, load_store::stz);

        t[0x80] = op("BRA", Relative, 3, branches::bra);

        t[0x1A] = op("INC", Accumulator, 2, inc_dec::inc);
        t[0x3A] = op("DEC", Accumulator, 2, inc_dec::dec);

        t[0x04] = op("TSB", ZeroPage, 5, alu::tsb);
        t[0x0C] = op("TSB", Absolute, 6, alu::tsb);
        t[0x14] = op("TRB", ZeroPage, 5, alu::trb);
        t[0x1C] = op("TRB", Absolute, 6, alu::trb);

        t[0x89] = op("BIT", Immediate, 2, alu::bit);
        t[0x34] = op("BIT", ZeroPageX, 4, alu::bit);
        t[0x3C] = op("BIT", AbsoluteX, 4, alu::bit);

        t[0x12] = op("ORA", ZeroPageIndirect, 5, alu::ora);
        t[0x32] = op("AND", ZeroPageIndirect, 5, alu::and);
        t[0x52] = op("EOR", ZeroPageIndirect, 5, alu::eor);
        t[0x72] = op("ADC", ZeroPageIndirect, 5, alu::adc);
        t[0x92] = op("STA", ZeroPageIndirect, 5, load_store::sta);
        t[0xB2] = op("LDA", ZeroPageIndirect, 5, load_store::lda);
        t[0xD2] = op("CMP", ZeroPageIndirect, 5, alu::cmp);
        t[0xF2] = op("SBC", ZeroPageIndirect, 5, alu::sbc);

        t[0x7C] = op("JMP", AbsoluteIndexedIndirect, 6, control::jmp);

        Self { entries: t }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nmos_table_has_151_opcodes() {
        assert_eq!(MOS6502_TABLE.len(), 151);
    }

    #[test]
    fn test_cmos_table_adds_27_opcodes() {
        assert_eq!(WDC65C02_TABLE.len(), 151 + 27);
    }

    #[test]
    fn test_cmos_table_keeps_shared_entries() {
        for (opcode, entry) in MOS6502_TABLE.iter() {
            let cmos = WDC65C02_TABLE.get(opcode).unwrap();
            assert_eq!(cmos.mnemonic, entry.mnemonic, "opcode 0x{:02X}", opcode);
            assert_eq!(cmos.mode, entry.mode, "opcode 0x{:02X}", opcode);
            assert_eq!(cmos.cycles, entry.cycles, "opcode 0x{:02X}", opcode);
        }
    }

    #[test]
    fn test_cmos_only_opcodes_absent_from_nmos() {
        for opcode in [0xDA, 0xFA, 0x5A, 0x7A, 0x64, 0x80, 0x1A, 0x3A] {
            assert!(MOS6502_TABLE.get(opcode).is_none());
            assert!(lookup(opcode, ProcessorVariant::Mos6510).is_none());
            assert!(lookup(opcode, ProcessorVariant::Wdc65c02).is_some());
        }
    }

    #[test]
    fn test_sizes_follow_addressing_mode() {
        for (opcode, entry) in WDC65C02_TABLE.iter() {
            assert_eq!(
                entry.bytes,
                1 + entry.mode.operand_len(),
                "opcode 0x{:02X} ({})",
                opcode,
                entry.mnemonic
            );
        }
    }
}

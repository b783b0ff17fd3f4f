//! # Addressing Modes
//!
//! This module defines the addressing modes of the 6502 family and the
//! resolver that turns the operand bytes following an opcode into an
//! effective address.
//!
//! Every operand byte the resolver consumes is read through the
//! cycle-consuming bus path and advances PC, so the resolver is where most of
//! an instruction's cycles are spent.

use crate::cpu::Processor;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX,
///   IndirectY, ZeroPageIndirect
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect, AbsoluteIndexedIndirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// If the pointer's low byte is 0xFF the high byte of the target is
    /// fetched from the start of the same page.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,

    /// 65C02 zero page indirect without index.
    ///
    /// Example: LDA ($40)
    ZeroPageIndirect,

    /// 65C02 absolute indexed indirect. Only used by JMP.
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY
            | ZeroPageIndirect => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect | AbsoluteIndexedIndirect => 2,
        }
    }
}

/// Opcodes whose indexed fix-up read is unconditional.
///
/// Stores and read-modify-write instructions always spend the fix-up cycle,
/// so a page crossing costs them nothing extra: ASL/ROL/LSR/ROR/DEC/INC
/// abs,X, STA abs,X, STA abs,Y, STA (zp),Y and the 65C02 STZ abs,X.
const FIXED_INDEX_CYCLE: [u8; 10] = [
    0x1E, // ASL abs,X
    0x3E, // ROL abs,X
    0x5E, // LSR abs,X
    0x7E, // ROR abs,X
    0xDE, // DEC abs,X
    0xFE, // INC abs,X
    0x9D, // STA abs,X
    0x99, // STA abs,Y
    0x91, // STA (zp),Y
    0x9E, // STZ abs,X
];

/// Returns true if `opcode` never pays a page-crossing penalty.
pub(crate) fn has_fixed_index_cycle(opcode: u8) -> bool {
    FIXED_INDEX_CYCLE.contains(&opcode)
}

impl Processor {
    /// Resolves the effective address for `mode`, advancing PC past every
    /// operand byte consumed.
    ///
    /// For Immediate and Relative the returned address is the operand byte
    /// itself; the caller reads it.
    ///
    /// # Panics
    ///
    /// Panics for [`AddressingMode::Implied`] and
    /// [`AddressingMode::Accumulator`]; those have no address and reaching
    /// this with them means the opcode table is wrong.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::Immediate | AddressingMode::Relative => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => self.fetch_byte() as u16,
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte();
                self.read_byte(base as u16);
                base.wrapping_add(self.x) as u16
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte();
                self.read_byte(base as u16);
                base.wrapping_add(self.y) as u16
            }
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                self.index(base, self.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                self.index(base, self.y)
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word();
                let lo = self.read_byte(ptr);
                // NMOS bug: the high byte never leaves the pointer's page
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let hi = self.read_byte(hi_addr);
                u16::from_le_bytes([lo, hi])
            }
            AddressingMode::IndirectX => {
                let base = self.fetch_byte();
                self.read_byte(base as u16);
                self.read_zero_page_word(base.wrapping_add(self.x))
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let base = self.read_zero_page_word(zp);
                self.index(base, self.y)
            }
            AddressingMode::ZeroPageIndirect => {
                let zp = self.fetch_byte();
                self.read_zero_page_word(zp)
            }
            AddressingMode::AbsoluteIndexedIndirect => {
                let base = self.fetch_word();
                self.read_byte(self.pc.wrapping_sub(1));
                let ptr = base.wrapping_add(self.x as u16);
                let lo = self.read_byte(ptr);
                let hi = self.read_byte(ptr.wrapping_add(1));
                u16::from_le_bytes([lo, hi])
            }
            AddressingMode::Implied | AddressingMode::Accumulator => panic!(
                "opcode 0x{:02X} resolved an address in {:?} mode",
                self.current_opcode, mode
            ),
        }
    }

    /// Adds an index register to a 16-bit base, spending the fix-up read
    /// when the hardware would.
    fn index(&mut self, base: u16, index: u8) -> u16 {
        let addr = base.wrapping_add(index as u16);
        let crossed = (base & 0xFF00) != (addr & 0xFF00);

        if crossed || has_fixed_index_cycle(self.current_opcode) {
            // The chip reads from the un-carried address first
            self.read_byte((base & 0xFF00) | (addr & 0x00FF));
        }

        addr
    }

    /// Reads the operand byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read_byte(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian operand word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    /// Reads a pointer from zero page; the high byte wraps to 0x00.
    fn read_zero_page_word(&mut self, zp: u8) -> u16 {
        let lo = self.read_byte(zp as u16);
        let hi = self.read_byte(zp.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }
}

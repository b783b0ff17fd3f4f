//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all instructions, organized by category.
//! Each instruction is a standalone handler taking the processor and the addressing
//! mode from its opcode table entry. Handlers run with PC pointing at the first
//! operand byte and spend every cycle through the bus. The table cycles quoted
//! in the handler docs are the handler's reads and writes plus one opcode fetch;
//! `Processor::step` reads the opcode twice, so a stepped instruction costs one
//! more than its table entry.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT, TSB, TRB)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS, BRA)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP, PHX, PLX, PHY, PLY)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Computes the new value of a read-modify-write operand, updating flags.
pub(crate) type Modify = fn(&mut Processor, u8) -> u8;

impl Processor {
    /// Resolves `mode` and reads the operand byte.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> u8 {
        let addr = self.resolve(mode);
        self.read_byte(addr)
    }

    /// Applies `op` to the accumulator or to a memory operand.
    ///
    /// Memory operands follow the NMOS read-modify-write bus pattern: read,
    /// write the unmodified value back, then write the result.
    pub(crate) fn modify_operand(&mut self, mode: AddressingMode, op: Modify) {
        if mode == AddressingMode::Accumulator {
            self.idle();
            let value = self.a;
            self.a = op(self, value);
            return;
        }

        let addr = self.resolve(mode);
        let value = self.read_byte(addr);
        self.write_byte(addr, value);
        let result = op(self, value);
        self.write_byte(addr, result);
    }
}

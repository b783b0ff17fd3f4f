//! # Branch Instructions
//!
//! This module implements the relative branches:
//! - BCC / BCS: Branch on Carry Clear / Set
//! - BEQ / BNE: Branch on Zero Set / Clear
//! - BMI / BPL: Branch on Negative Set / Clear
//! - BVC / BVS: Branch on Overflow Clear / Set
//! - BRA: Branch Always (65C02)
//!
//! All branches use relative addressing with a signed 8-bit offset measured
//! from the address of the next instruction.
//!
//! Cycle timing:
//! - 2 cycles if the branch is not taken
//! - 3 cycles if taken to the same page
//! - 4 cycles if taken to a different page
//!
//! No flags are affected.

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Reads the offset and, if `taken`, moves PC to the target.
///
/// The extra cycles are dummy reads: one of the next-instruction address
/// when taken, and one of the un-carried target when the page changes.
fn branch(cpu: &mut Processor, mode: AddressingMode, taken: bool) {
    let offset = cpu.read_operand(mode) as i8;
    if !taken {
        return;
    }

    let next = cpu.pc;
    let target = next.wrapping_add_signed(offset as i16);
    cpu.read_byte(next);

    if (next & 0xFF00) != (target & 0xFF00) {
        cpu.read_byte((next & 0xFF00) | (target & 0x00FF));
    }

    cpu.pc = target;
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn bcc(cpu: &mut Processor, mode: AddressingMode) {
    let taken = !cpu.flag_c;
    branch(cpu, mode, taken);
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn bcs(cpu: &mut Processor, mode: AddressingMode) {
    let taken = cpu.flag_c;
    branch(cpu, mode, taken);
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn beq(cpu: &mut Processor, mode: AddressingMode) {
    let taken = cpu.flag_z;
    branch(cpu, mode, taken);
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn bne(cpu: &mut Processor, mode: AddressingMode) {
    let taken = !cpu.flag_z;
    branch(cpu, mode, taken);
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn bmi(cpu: &mut Processor, mode: AddressingMode) {
    let taken = cpu.flag_n;
    branch(cpu, mode, taken);
}

/// Executes the BPL (Branch if Plus) instruction.
pub(crate) fn bpl(cpu: &mut Processor, mode: AddressingMode) {
    let taken = !cpu.flag_n;
    branch(cpu, mode, taken);
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn bvc(cpu: &mut Processor, mode: AddressingMode) {
    let taken = !cpu.flag_v;
    branch(cpu, mode, taken);
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn bvs(cpu: &mut Processor, mode: AddressingMode) {
    let taken = cpu.flag_v;
    branch(cpu, mode, taken);
}

/// Executes the BRA (Branch Always) instruction.
pub(crate) fn bra(cpu: &mut Processor, mode: AddressingMode) {
    branch(cpu, mode, true);
}

//! # Load/Store Instructions
//!
//! Loads (LDA, LDX, LDY) set Z and N from the loaded value. Stores (STA,
//! STX, STY and the 65C02 STZ) never affect flags.

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn lda(cpu: &mut Processor, mode: AddressingMode) {
    cpu.a = cpu.read_operand(mode);
    cpu.set_nz(cpu.a);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn ldx(cpu: &mut Processor, mode: AddressingMode) {
    cpu.x = cpu.read_operand(mode);
    cpu.set_nz(cpu.x);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn ldy(cpu: &mut Processor, mode: AddressingMode) {
    cpu.y = cpu.read_operand(mode);
    cpu.set_nz(cpu.y);
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Indexed forms always spend the fix-up read, so `STA abs,X` is 5 cycles
/// whether or not the page changes.
pub(crate) fn sta(cpu: &mut Processor, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    cpu.write_byte(addr, cpu.a);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn stx(cpu: &mut Processor, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    cpu.write_byte(addr, cpu.x);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn sty(cpu: &mut Processor, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    cpu.write_byte(addr, cpu.y);
}

/// Executes the STZ (Store Zero) instruction.
pub(crate) fn stz(cpu: &mut Processor, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    cpu.write_byte(addr, 0);
}

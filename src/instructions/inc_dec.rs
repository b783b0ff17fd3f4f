//! # Increment/Decrement Instructions
//!
//! - INC / DEC: memory read-modify-write, or the accumulator on the 65C02
//! - INX / INY / DEX / DEY: index registers
//!
//! All wrap at the byte boundary and set Z and N from the result. C and V
//! are never touched.

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Executes the INC (Increment Memory) instruction.
///
/// Cycle timing: 5 (zp), 6 (zp,X / abs), 7 (abs,X), 2 (A on the 65C02).
pub(crate) fn inc(cpu: &mut Processor, mode: AddressingMode) {
    cpu.modify_operand(mode, |cpu, value| {
        let result = value.wrapping_add(1);
        cpu.set_nz(result);
        result
    });
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn dec(cpu: &mut Processor, mode: AddressingMode) {
    cpu.modify_operand(mode, |cpu, value| {
        let result = value.wrapping_sub(1);
        cpu.set_nz(result);
        result
    });
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn inx(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_nz(cpu.x);
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn iny(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_nz(cpu.y);
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn dex(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_nz(cpu.x);
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn dey(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_nz(cpu.y);
}

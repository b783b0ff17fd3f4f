//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX set Z and N from the copied value. TXS does
//! not touch the flags.

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn tax(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.x = cpu.a;
    cpu.set_nz(cpu.x);
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn tay(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.y = cpu.a;
    cpu.set_nz(cpu.y);
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn txa(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.a = cpu.x;
    cpu.set_nz(cpu.a);
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn tya(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.a = cpu.y;
    cpu.set_nz(cpu.a);
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn tsx(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.x = cpu.sp;
    cpu.set_nz(cpu.x);
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
pub(crate) fn txs(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.sp = cpu.x;
}

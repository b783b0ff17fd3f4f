//! # Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV. Each takes 2 cycles and touches
//! only the flag it names.

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Executes the CLC (Clear Carry Flag) instruction.
pub(crate) fn clc(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.flag_c = false;
}

/// Executes the SEC (Set Carry Flag) instruction.
pub(crate) fn sec(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.flag_c = true;
}

/// Executes the CLI (Clear Interrupt Disable) instruction.
///
/// A pending IRQ is serviced as soon as this instruction completes.
pub(crate) fn cli(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.flag_i = false;
}

/// Executes the SEI (Set Interrupt Disable) instruction.
pub(crate) fn sei(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.flag_i = true;
}

/// Executes the CLD (Clear Decimal Mode) instruction.
pub(crate) fn cld(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.flag_d = false;
}

/// Executes the SED (Set Decimal Mode) instruction.
pub(crate) fn sed(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.flag_d = true;
}

/// Executes the CLV (Clear Overflow Flag) instruction.
///
/// There is no matching SEV.
pub(crate) fn clv(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.flag_v = false;
}

//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC / SBC: binary and packed-BCD addition and subtraction
//! - AND / ORA / EOR: bitwise logic on the accumulator
//! - CMP / CPX / CPY: register comparison
//! - BIT: bit test
//! - TSB / TRB: 65C02 test-and-set / test-and-reset
//!
//! ## Decimal Mode
//!
//! With D set, ADC and SBC read both operands as packed BCD, compute the
//! decimal sum or difference, and re-encode it. A sum above 99 carries; a
//! difference below zero borrows (clears C). V follows the binary sign rule
//! applied to the operands and the BCD result; Z and N reflect the BCD result.
//! Nibbles above 9 are not rejected: they decode as 10-15 and produce a
//! deterministic result, still reduced into 00-99.

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Executes the ADC (Add with Carry) instruction.
pub(crate) fn adc(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    add(cpu, value);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// C is the inverted borrow: set means no borrow.
pub(crate) fn sbc(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    subtract(cpu, value);
}

fn add(cpu: &mut Processor, value: u8) {
    let a = cpu.a;
    let carry = cpu.flag_c as u16;

    let result = if cpu.flag_d {
        let sum = bcd_to_binary(a) as u16 + bcd_to_binary(value) as u16 + carry;
        cpu.flag_c = sum > 99;
        binary_to_bcd((sum % 100) as u8)
    } else {
        let sum = a as u16 + value as u16 + carry;
        cpu.flag_c = sum > 0xFF;
        sum as u8
    };

    // Both operands had the same sign and the result's sign differs
    cpu.flag_v = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.set_nz(result);
    cpu.a = result;
}

fn subtract(cpu: &mut Processor, value: u8) {
    let a = cpu.a;
    let borrow = (!cpu.flag_c) as i16;

    let result = if cpu.flag_d {
        let difference = bcd_to_binary(a) as i16 - bcd_to_binary(value) as i16 - borrow;
        cpu.flag_c = difference >= 0;
        binary_to_bcd(difference.rem_euclid(100) as u8)
    } else {
        let difference = a as i16 - value as i16 - borrow;
        cpu.flag_c = difference >= 0;
        difference as u8
    };

    cpu.flag_v = (a ^ value) & (a ^ result) & 0x80 != 0;
    cpu.set_nz(result);
    cpu.a = result;
}

fn bcd_to_binary(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// `value` must be below 100.
fn binary_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn and(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a &= value;
    cpu.set_nz(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn ora(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a |= value;
    cpu.set_nz(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn eor(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a ^= value;
    cpu.set_nz(cpu.a);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn cmp(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let register = cpu.a;
    compare(cpu, register, value);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn cpx(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let register = cpu.x;
    compare(cpu, register, value);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn cpy(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let register = cpu.y;
    compare(cpu, register, value);
}

fn compare(cpu: &mut Processor, register: u8, value: u8) {
    cpu.flag_c = register >= value;
    cpu.set_nz(register.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z reflects `A & M`; N and V are copied from bits 7 and 6 of the operand.
/// The 65C02 immediate form only affects Z.
pub(crate) fn bit(cpu: &mut Processor, mode: AddressingMode) {
    let value = cpu.read_operand(mode);

    cpu.flag_z = cpu.a & value == 0;
    if mode != AddressingMode::Immediate {
        cpu.flag_n = value & 0x80 != 0;
        cpu.flag_v = value & 0x40 != 0;
    }
}

/// Executes the TSB (Test and Set Bits) instruction.
pub(crate) fn tsb(cpu: &mut Processor, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    let value = cpu.read_byte(addr);
    cpu.read_byte(addr);

    cpu.flag_z = cpu.a & value == 0;
    cpu.write_byte(addr, value | cpu.a);
}

/// Executes the TRB (Test and Reset Bits) instruction.
pub(crate) fn trb(cpu: &mut Processor, mode: AddressingMode) {
    let addr = cpu.resolve(mode);
    let value = cpu.read_byte(addr);
    cpu.read_byte(addr);

    cpu.flag_z = cpu.a & value == 0;
    cpu.write_byte(addr, value & !cpu.a);
}

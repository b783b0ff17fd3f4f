//! Tests for the ALU instructions.
//!
//! Tests cover:
//! - ADC / SBC in binary mode, including carry and overflow edges
//! - ADC / SBC in decimal mode
//! - CMP / CPX / CPY flag results
//! - BIT, including the 65C02 immediate form
//! - Logical operations

use retro6502::{Processor, ProcessorVariant};

/// Creates a processor with `program` at 0x8000 and PC pointing at it.
fn setup_cpu(program: &[u8]) -> Processor {
    setup_variant(ProcessorVariant::Mos6502, program)
}

fn setup_variant(variant: ProcessorVariant, program: &[u8]) -> Processor {
    let mut cpu = Processor::new(variant, None);
    cpu.load_program(0x8000, program, Some(0x8000));
    cpu
}

/// Runs `ADC #operand` from the given state and returns the processor.
fn adc(a: u8, operand: u8, carry: bool, decimal: bool) -> Processor {
    let mut cpu = setup_cpu(&[0x69, operand]);
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.set_flag_d(decimal);
    cpu.step().unwrap();
    cpu
}

/// Runs `SBC #operand` from the given state and returns the processor.
fn sbc(a: u8, operand: u8, carry: bool, decimal: bool) -> Processor {
    let mut cpu = setup_cpu(&[0xE9, operand]);
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.set_flag_d(decimal);
    cpu.step().unwrap();
    cpu
}

// ========== Binary ADC ==========

#[test]
fn test_adc_basic() {
    let cpu = adc(0x10, 0x05, false, false);

    assert_eq!(cpu.a(), 0x15);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_adc_carry_in_and_out() {
    let cpu = adc(0xFF, 0x00, true, false);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_signed_overflow() {
    // 127 + 1 = -128
    let cpu = adc(0x7F, 0x01, false, false);
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());

    // -128 + -1 = +127
    let cpu = adc(0x80, 0xFF, false, false);
    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

// ========== Binary SBC ==========

#[test]
fn test_sbc_no_borrow() {
    let cpu = sbc(0x50, 0x20, true, false);

    assert_eq!(cpu.a(), 0x30);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_v());
}

#[test]
fn test_sbc_borrow_in() {
    let cpu = sbc(0x50, 0x20, false, false);
    assert_eq!(cpu.a(), 0x2F);
}

#[test]
fn test_sbc_underflow_clears_carry() {
    let cpu = sbc(0x00, 0x01, true, false);

    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_signed_overflow() {
    // -128 - 1 = +127
    let cpu = sbc(0x80, 0x01, true, false);
    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
}

// ========== Decimal Mode ==========

#[test]
fn test_adc_decimal() {
    let cpu = adc(0x15, 0x27, false, true);
    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal_carry_out() {
    let cpu = adc(0x58, 0x46, true, true);
    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());

    let cpu = adc(0x99, 0x01, false, true);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

#[test]
fn test_sbc_decimal() {
    let cpu = sbc(0x42, 0x15, true, true);
    assert_eq!(cpu.a(), 0x27);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_borrow_wraps() {
    let cpu = sbc(0x00, 0x01, true, true);
    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flag_c());

    let cpu = sbc(0x10, 0x10, false, true);
    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flag_c());
}

// ========== Compare ==========

#[test]
fn test_cmp_flags() {
    // CMP #$10 with A = $20, $10, $05
    for (a, c, z, n) in [
        (0x20u8, true, false, false),
        (0x10, true, true, false),
        (0x05, false, false, true),
    ] {
        let mut cpu = setup_cpu(&[0xC9, 0x10]);
        cpu.set_a(a);
        cpu.step().unwrap();

        assert_eq!(cpu.flag_c(), c, "A=0x{:02X}", a);
        assert_eq!(cpu.flag_z(), z, "A=0x{:02X}", a);
        assert_eq!(cpu.flag_n(), n, "A=0x{:02X}", a);
        assert_eq!(cpu.a(), a);
    }
}

#[test]
fn test_cpx_cpy_zero_page() {
    let mut cpu = setup_cpu(&[0xE4, 0x10, 0xC4, 0x10]);
    cpu.poke_byte(0x0010, 0x40);
    cpu.set_x(0x40);
    cpu.set_y(0x3F);

    cpu.step().unwrap();
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());

    cpu.step().unwrap();
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 8);
}

// ========== BIT ==========

#[test]
fn test_bit_copies_high_bits() {
    let mut cpu = setup_cpu(&[0x24, 0x10]);
    cpu.poke_byte(0x0010, 0xC0);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_cmos_bit_immediate_only_sets_z() {
    let mut cpu = setup_variant(ProcessorVariant::Wdc65c02, &[0x89, 0xC0]);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}

// ========== Logical ==========

#[test]
fn test_and_ora_eor() {
    // AND #$0F ; ORA #$80 ; EOR #$FF
    let mut cpu = setup_cpu(&[0x29, 0x0F, 0x09, 0x80, 0x49, 0xFF]);
    cpu.set_a(0x3C);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x0C);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x8C);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x73);
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 9);
}

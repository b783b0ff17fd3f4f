//! # Stack Instructions
//!
//! Pushes (PHA, PHP, PHX, PHY) take 3 cycles; pulls (PLA, PLP, PLX, PLY)
//! take 4. PHX, PHY, PLX and PLY exist on the 65C02 only.
//!
//! The stack lives in page 1 and SP wraps within it.

use crate::addressing::AddressingMode;
use crate::cpu::{Processor, FLAG_B};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn pha(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.push(cpu.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy has B and bit 5 set.
pub(crate) fn php(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    let status = cpu.status() | FLAG_B;
    cpu.push(status);
}

/// Executes the PHX (Push X Register) instruction.
pub(crate) fn phx(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.push(cpu.x);
}

/// Executes the PHY (Push Y Register) instruction.
pub(crate) fn phy(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.push(cpu.y);
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn pla(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.stack_idle();
    cpu.a = cpu.pull();
    cpu.set_nz(cpu.a);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// B and bit 5 of the pulled byte are discarded.
pub(crate) fn plp(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.stack_idle();
    let status = cpu.pull();
    cpu.set_status(status);
}

/// Executes the PLX (Pull X Register) instruction.
pub(crate) fn plx(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.stack_idle();
    cpu.x = cpu.pull();
    cpu.set_nz(cpu.x);
}

/// Executes the PLY (Pull Y Register) instruction.
pub(crate) fn ply(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.stack_idle();
    cpu.y = cpu.pull();
    cpu.set_nz(cpu.y);
}

#[cfg(test)]
mod tests {
    use crate::{Processor, ProcessorVariant};

    fn setup_cpu(variant: ProcessorVariant, program: &[u8]) -> Processor {
        let mut cpu = Processor::new(variant, None);
        cpu.load_program(0x8000, program, Some(0x8000));
        cpu
    }

    #[test]
    fn test_pha_pla_round_trip() {
        // PHA ; LDA #$00 ; PLA
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x48, 0xA9, 0x00, 0x68]);
        cpu.set_a(0x9C);

        cpu.step().unwrap();
        assert_eq!(cpu.sp(), 0xFC);
        assert_eq!(cpu.peek_byte(0x01FD), 0x9C);
        assert_eq!(cpu.cycles(), 4);

        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.a(), 0x9C);
        assert!(cpu.flag_n());
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.cycles(), 4 + 3 + 5);
    }

    #[test]
    fn test_php_sets_break_and_unused_bits() {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x08]);
        cpu.step().unwrap();

        assert_eq!(cpu.peek_byte(0x01FD), 0x34);
    }

    #[test]
    fn test_plp_ignores_break_bit() {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x28]);
        cpu.set_sp(0xFC);
        cpu.poke_byte(0x01FD, 0xFF);

        cpu.step().unwrap();

        assert_eq!(cpu.status(), 0xEF);
        assert_eq!(cpu.cycles(), 5);
    }

    #[test]
    fn test_stack_pointer_wraps_in_page_one() {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x48]);
        cpu.set_sp(0x00);
        cpu.set_a(0x77);

        cpu.step().unwrap();

        assert_eq!(cpu.peek_byte(0x0100), 0x77);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn test_cmos_phx_ply() {
        let mut cpu = setup_cpu(ProcessorVariant::Wdc65c02, &[0xDA, 0x7A]);
        cpu.set_x(0x00);
        cpu.set_y(0x55);

        cpu.step().unwrap();
        cpu.step().unwrap();

        assert_eq!(cpu.y(), 0x00);
        assert!(cpu.flag_z());
        assert_eq!(cpu.cycles(), 9);
    }
}

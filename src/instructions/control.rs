//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump (absolute, indirect, and the 65C02 `(abs,X)` form)
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from Interrupt
//! - NOP: No Operation
//!
//! BRK is a software interrupt that:
//! 1. Pushes the address of the opcode plus two (high byte first)
//! 2. Pushes the status register with B set
//! 3. Sets I (and clears D on the 65C02)
//! 4. Loads PC from the IRQ vector at $FFFE/F

use crate::addressing::AddressingMode;
use crate::cpu::{Processor, FLAG_B, IRQ_VECTOR};

/// Executes the BRK (Force Interrupt) instruction.
///
/// The byte after the opcode is a padding byte that is read and skipped,
/// which is why the pushed return address is the opcode address plus two.
///
/// Cycle timing: 7 cycles (fixed)
///
/// Flags affected:
/// - B: Set to 1 (in the pushed status byte only)
/// - I: Set to 1
pub(crate) fn brk(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.fetch_byte();
    cpu.push_word(cpu.pc);
    let status = cpu.status() | FLAG_B;
    cpu.push(status);
    cpu.enter_handler(IRQ_VECTOR);
}

/// Executes the JMP (Jump) instruction.
///
/// Cycle timing: 3 cycles absolute, 5 indirect, 6 absolute indexed indirect.
pub(crate) fn jmp(cpu: &mut Processor, mode: AddressingMode) {
    cpu.pc = cpu.resolve(mode);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction, so RTS must
/// add one to what it pulls. The high operand byte is read after the push.
///
/// Cycle timing: 6 cycles (fixed)
pub(crate) fn jsr(cpu: &mut Processor, _mode: AddressingMode) {
    let lo = cpu.fetch_byte();
    cpu.stack_idle();
    cpu.push_word(cpu.pc);
    let hi = cpu.read_byte(cpu.pc);
    cpu.pc = u16::from_le_bytes([lo, hi]);
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Cycle timing: 6 cycles (fixed)
pub(crate) fn rts(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.stack_idle();
    cpu.pc = cpu.pull_word();
    cpu.idle();
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (ignoring B and bit 5), then PC. Unlike RTS
/// the pulled address is used as-is.
///
/// Cycle timing: 6 cycles (fixed)
pub(crate) fn rti(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
    cpu.stack_idle();
    let status = cpu.pull();
    cpu.set_status(status);
    cpu.pc = cpu.pull_word();
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn nop(cpu: &mut Processor, _mode: AddressingMode) {
    cpu.idle();
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
    fn test_brk_pushes_return_address_and_status() {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x00, 0xFF]);
        cpu.poke_byte(0xFFFE, 0x00);
        cpu.poke_byte(0xFFFF, 0x90);
        cpu.set_flag_c(true);

        cpu.step().unwrap();

        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.sp(), 0xFA);
        assert_eq!(cpu.peek_byte(0x01FD), 0x80);
        assert_eq!(cpu.peek_byte(0x01FC), 0x02);
        assert_eq!(cpu.peek_byte(0x01FB), 0x35); // U, B, I, C
        assert!(cpu.flag_i());
        assert_eq!(cpu.cycles(), 8);
    }

    #[test]
    fn test_brk_clears_decimal_on_cmos_only() {
        let mut nmos = setup_cpu(ProcessorVariant::Mos6502, &[0x00]);
        nmos.set_flag_d(true);
        nmos.step().unwrap();
        assert!(nmos.flag_d());

        let mut cmos = setup_cpu(ProcessorVariant::Wdc65c02, &[0x00]);
        cmos.set_flag_d(true);
        cmos.step().unwrap();
        assert!(!cmos.flag_d());
    }

    #[test]
    fn test_jsr_then_rts() {
        // JSR $9000 ; ... $9000: RTS
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x20, 0x00, 0x90]);
        cpu.poke_byte(0x9000, 0x60);

        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.peek_word(0x01FC), 0x8002);
        assert_eq!(cpu.cycles(), 7);

        cpu.step().unwrap();
        assert_eq!(cpu.pc(), 0x8003);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.cycles(), 14);
    }

    #[test]
    fn test_rti_restores_status_and_pc() {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x40]);
        cpu.set_sp(0xFA);
        cpu.poke_byte(0x01FB, 0xC3); // N V Z C
        cpu.poke_byte(0x01FC, 0x34);
        cpu.poke_byte(0x01FD, 0x12);

        cpu.step().unwrap();

        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.status(), 0xE3);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.cycles(), 7);
    }

    #[test]
    fn test_jmp_absolute_indexed_indirect() {
        let mut cpu = setup_cpu(ProcessorVariant::Wdc65c02, &[0x7C, 0x00, 0x30]);
        cpu.set_x(0x04);
        cpu.poke_byte(0x3004, 0xCD);
        cpu.poke_byte(0x3005, 0xAB);

        cpu.step().unwrap();

        assert_eq!(cpu.pc(), 0xABCD);
        assert_eq!(cpu.cycles(), 7);
    }
}

//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR on the accumulator or on memory. The bit shifted
//! out lands in C; Z and N are set from the result.
//!
//! Memory forms are read-modify-write: 5 cycles (zp), 6 (zp,X / abs) and
//! 7 (abs,X, with no page-crossing variance).

use crate::addressing::AddressingMode;
use crate::cpu::Processor;

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn asl(cpu: &mut Processor, mode: AddressingMode) {
    cpu.modify_operand(mode, |cpu, value| {
        cpu.flag_c = value & 0x80 != 0;
        let result = value << 1;
        cpu.set_nz(result);
        result
    });
}

/// Executes the LSR (Logical Shift Right) instruction. N always ends clear.
pub(crate) fn lsr(cpu: &mut Processor, mode: AddressingMode) {
    cpu.modify_operand(mode, |cpu, value| {
        cpu.flag_c = value & 0x01 != 0;
        let result = value >> 1;
        cpu.set_nz(result);
        result
    });
}

/// Executes the ROL (Rotate Left) instruction: C enters bit 0.
pub(crate) fn rol(cpu: &mut Processor, mode: AddressingMode) {
    cpu.modify_operand(mode, |cpu, value| {
        let carry_in = cpu.flag_c as u8;
        cpu.flag_c = value & 0x80 != 0;
        let result = (value << 1) | carry_in;
        cpu.set_nz(result);
        result
    });
}

/// Executes the ROR (Rotate Right) instruction: C enters bit 7.
pub(crate) fn ror(cpu: &mut Processor, mode: AddressingMode) {
    cpu.modify_operand(mode, |cpu, value| {
        let carry_in = (cpu.flag_c as u8) << 7;
        cpu.flag_c = value & 0x01 != 0;
        let result = (value >> 1) | carry_in;
        cpu.set_nz(result);
        result
    });
}

#[cfg(test)]
mod tests {
    use crate::{Processor, ProcessorVariant};

    fn setup_cpu(program: &[u8]) -> Processor {
        let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);
        cpu.load_program(0x8000, program, Some(0x8000));
        cpu
    }

    #[test]
    fn test_asl_accumulator() {
        let mut cpu = setup_cpu(&[0x0A]);
        cpu.set_a(0x81);

        cpu.step().unwrap();

        assert_eq!(cpu.a(), 0x02);
        assert!(cpu.flag_c());
        assert!(!cpu.flag_n());
        assert_eq!(cpu.cycles(), 3);
    }

    #[test]
    fn test_lsr_to_zero() {
        let mut cpu = setup_cpu(&[0x4A]);
        cpu.set_a(0x01);

        cpu.step().unwrap();

        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.flag_c());
        assert!(cpu.flag_z());
    }

    #[test]
    fn test_rol_memory_carries_through() {
        let mut cpu = setup_cpu(&[0x26, 0x20]);
        cpu.poke_byte(0x0020, 0x40);
        cpu.set_flag_c(true);

        cpu.step().unwrap();

        assert_eq!(cpu.peek_byte(0x0020), 0x81);
        assert!(!cpu.flag_c());
        assert!(cpu.flag_n());
        assert_eq!(cpu.cycles(), 6);
    }

    #[test]
    fn test_ror_absolute_x_same_cycles_across_page() {
        let mut cpu = setup_cpu(&[0x7E, 0xFF, 0x20]);
        cpu.set_x(0x01);
        cpu.poke_byte(0x2100, 0x02);

        cpu.step().unwrap();

        assert_eq!(cpu.peek_byte(0x2100), 0x01);
        assert!(!cpu.flag_c());
        assert_eq!(cpu.cycles(), 8);
    }
}

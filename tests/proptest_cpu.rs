//! Property-based tests for processor invariants.
//!
//! These tests use proptest to check the arithmetic laws, address wrapping
//! and timing bounds across the whole input space.

use proptest::prelude::*;
use retro6502::{AddressingMode, Processor, ProcessorVariant, WDC65C02_TABLE};

/// Creates a processor with `program` at 0x8000 and PC pointing at it.
fn setup_cpu(variant: ProcessorVariant, program: &[u8]) -> Processor {
    let mut cpu = Processor::new(variant, None);
    cpu.load_program(0x8000, program, Some(0x8000));
    cpu
}

/// Opcodes whose PC after execution is the next sequential instruction.
fn sequential_opcodes() -> Vec<u8> {
    WDC65C02_TABLE
        .iter()
        .filter(|(_, entry)| {
            entry.mode != AddressingMode::Relative
                && !matches!(entry.mnemonic, "JMP" | "JSR" | "RTS" | "RTI" | "BRK")
        })
        .map(|(opcode, _)| opcode)
        .collect()
}

fn all_opcodes() -> Vec<u8> {
    WDC65C02_TABLE.iter().map(|(opcode, _)| opcode).collect()
}

fn bcd() -> impl Strategy<Value = u8> {
    (0u8..=9, 0u8..=9).prop_map(|(hi, lo)| (hi << 4) | lo)
}

fn from_bcd(value: u8) -> u16 {
    (value >> 4) as u16 * 10 + (value & 0x0F) as u16
}

fn is_bcd(value: u8) -> bool {
    value >> 4 <= 9 && value & 0x0F <= 9
}

// ========== PC and Timing Property Tests ==========

proptest! {
    /// Property: sequential instructions advance PC by their length
    #[test]
    fn prop_pc_advances_by_instruction_size(
        opcode in prop::sample::select(sequential_opcodes()),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(ProcessorVariant::Wdc65c02, &[opcode, operand1, operand2]);
        cpu.set_x(x);
        cpu.set_y(y);

        cpu.step().unwrap();

        let entry = WDC65C02_TABLE.get(opcode).unwrap();
        prop_assert_eq!(
            cpu.pc(),
            0x8000 + entry.bytes as u16,
            "opcode 0x{:02X} ({})",
            opcode,
            entry.mnemonic
        );
    }

    /// Property: a stepped instruction costs its base cycles plus the second
    /// opcode read, plus at most two penalty cycles
    #[test]
    fn prop_cycles_within_penalty_bounds(
        opcode in prop::sample::select(all_opcodes()),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(ProcessorVariant::Wdc65c02, &[opcode, operand1, operand2]);
        cpu.set_x(x);
        cpu.set_y(y);

        cpu.step().unwrap();

        let base = WDC65C02_TABLE.get(opcode).unwrap().cycles as u64;
        prop_assert!(cpu.cycles() >= base + 1, "opcode 0x{:02X}", opcode);
        prop_assert!(cpu.cycles() <= base + 3, "opcode 0x{:02X}", opcode);
    }

    /// Property: peeking never costs a cycle, reading always costs one
    #[test]
    fn prop_peek_is_free(addr in any::<u16>(), value in any::<u8>()) {
        let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);
        cpu.poke_byte(addr, value);

        prop_assert_eq!(cpu.peek_byte(addr), value);
        prop_assert_eq!(cpu.cycles(), 0);

        prop_assert_eq!(cpu.read_byte(addr), value);
        prop_assert_eq!(cpu.cycles(), 1);
    }
}

// ========== Addressing Property Tests ==========

proptest! {
    /// Property: zero page indexed addresses wrap within page zero
    #[test]
    fn prop_zero_page_x_wraps(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0xB5, base]); // LDA zp,X
        cpu.set_x(x);
        cpu.poke_byte(base.wrapping_add(x) as u16, value);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.cycles(), 5);
    }

    /// Property: absolute indexed reads pay one cycle exactly on page cross
    #[test]
    fn prop_absolute_x_page_penalty(base in any::<u16>(), x in any::<u8>()) {
        let [lo, hi] = base.to_le_bytes();
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0xBD, lo, hi]); // LDA abs,X
        cpu.set_x(x);

        cpu.step().unwrap();

        let target = base.wrapping_add(x as u16);
        let crossed = (base & 0xFF00) != (target & 0xFF00);
        prop_assert_eq!(cpu.cycles(), 5 + crossed as u64);
    }
}

// ========== ADC/SBC Property Tests ==========

proptest! {
    /// Property: binary ADC computes A + M + C with carry out of bit 7
    #[test]
    fn prop_adc_binary(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x69, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);

        cpu.step().unwrap();

        let sum = a as u16 + m as u16 + carry as u16;
        let result = sum as u8;
        let overflow = (a ^ result) & (m ^ result) & 0x80 != 0;

        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_v(), overflow);
        prop_assert_eq!(cpu.flag_z(), result == 0);
        prop_assert_eq!(cpu.flag_n(), result & 0x80 != 0);
    }

    /// Property: binary SBC equals ADC of the complemented operand
    #[test]
    fn prop_sbc_is_adc_of_complement(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut sub = setup_cpu(ProcessorVariant::Mos6502, &[0xE9, m]);
        sub.set_a(a);
        sub.set_flag_c(carry);
        sub.step().unwrap();

        let mut add = setup_cpu(ProcessorVariant::Mos6502, &[0x69, !m]);
        add.set_a(a);
        add.set_flag_c(carry);
        add.step().unwrap();

        prop_assert_eq!(sub.a(), add.a());
        prop_assert_eq!(sub.flag_c(), add.flag_c());
        prop_assert_eq!(sub.flag_v(), add.flag_v());
        prop_assert_eq!(sub.status(), add.status());
    }

    /// Property: decimal ADC of valid BCD operands yields valid BCD
    #[test]
    fn prop_adc_decimal_closure(a in bcd(), m in bcd(), carry in any::<bool>()) {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x69, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);
        cpu.set_flag_d(true);

        cpu.step().unwrap();

        let sum = from_bcd(a) + from_bcd(m) + carry as u16;
        prop_assert!(is_bcd(cpu.a()), "0x{:02X} is not BCD", cpu.a());
        prop_assert_eq!(from_bcd(cpu.a()), sum % 100);
        prop_assert_eq!(cpu.flag_c(), sum > 99);
        prop_assert_eq!(cpu.flag_z(), cpu.a() == 0);
    }

    /// Property: decimal SBC of valid BCD operands yields valid BCD
    #[test]
    fn prop_sbc_decimal_closure(a in bcd(), m in bcd(), carry in any::<bool>()) {
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0xE9, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);
        cpu.set_flag_d(true);

        cpu.step().unwrap();

        let difference = from_bcd(a) as i32 - from_bcd(m) as i32 - (!carry) as i32;
        prop_assert!(is_bcd(cpu.a()), "0x{:02X} is not BCD", cpu.a());
        prop_assert_eq!(from_bcd(cpu.a()) as i32, difference.rem_euclid(100));
        prop_assert_eq!(cpu.flag_c(), difference >= 0);
    }
}

// ========== Stack Property Tests ==========

proptest! {
    /// Property: PHP then PLP restores every flag
    #[test]
    fn prop_php_plp_round_trip(status in any::<u8>()) {
        // PLP ; PHP ; PLP
        let mut cpu = setup_cpu(ProcessorVariant::Mos6502, &[0x28, 0x08, 0x28]);
        cpu.set_sp(0xFC);
        cpu.poke_byte(0x01FD, status);

        cpu.step().unwrap();
        let loaded = cpu.status();
        cpu.step().unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(loaded, (status | 0x20) & !0x10);
        prop_assert_eq!(cpu.status(), loaded);
        prop_assert_eq!(cpu.sp(), 0xFD);
    }
}

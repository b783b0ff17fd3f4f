//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary byte sequences to the disassembler to find edge cases
//! and crashes in instruction decoding and formatting.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use retro6502::disassembler::formatter::format_instruction;
use retro6502::{disassemble, ProcessorVariant};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
    cmos: bool,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let variant = if input.cmos {
        ProcessorVariant::Wdc65c02
    } else {
        ProcessorVariant::Mos6502
    };

    let instructions = disassemble(&input.bytes, input.start_address, variant);

    // Every byte is covered exactly once
    let total: usize = instructions.iter().map(|i| i.size_bytes as usize).sum();
    assert_eq!(total, input.bytes.len());

    let mut expected = input.start_address;
    for instr in &instructions {
        assert_eq!(instr.address, expected);
        assert!((1..=3).contains(&instr.size_bytes));
        if instr.mnemonic != ".byte" {
            assert_eq!(instr.operand_bytes.len() + 1, instr.size_bytes as usize);
        }
        assert!(!format_instruction(instr).is_empty());
        expected = expected.wrapping_add(instr.size_bytes as u16);
    }
});

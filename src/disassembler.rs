//! 6502 Disassembler Module
//!
//! Converts machine code into assembly text. The trace log and decode
//! diagnostics are built on it.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::cpu::Processor;
use crate::ProcessorVariant;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", "JMP")
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (excluding page-crossing penalties)
    pub base_cycles: u8,
}

/// Disassemble a byte slice loaded at `start_address`.
///
/// Bytes the variant does not define, and a truncated final instruction,
/// become `.byte` entries.
///
/// # Examples
///
/// ```
/// use retro6502::{disassemble, ProcessorVariant};
///
/// let listing = disassemble(&[0xA9, 0x42, 0x60], 0x1000, ProcessorVariant::Mos6502);
/// assert_eq!(listing.len(), 2);
/// assert_eq!(listing[1].address, 0x1002);
/// assert_eq!(listing[1].mnemonic, "RTS");
/// ```
pub fn disassemble(
    bytes: &[u8],
    start_address: u16,
    variant: ProcessorVariant,
) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = start_address;

    while offset < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[offset..], address, variant)
            .unwrap_or_else(|| decoder::data_byte(bytes[offset], address));

        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

impl Processor {
    /// Formats the instruction at `addr` and returns it with its length.
    ///
    /// Reads memory with `peek_byte`, so no cycles are consumed.
    ///
    /// ```
    /// use retro6502::{Processor, ProcessorVariant};
    ///
    /// let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);
    /// cpu.load_program(0x0600, &[0x6C, 0xFF, 0x30], None);
    ///
    /// assert_eq!(cpu.disassemble(0x0600), ("JMP ($30FF)".to_string(), 3));
    /// ```
    pub fn disassemble(&self, addr: u16) -> (String, u8) {
        let bytes: Vec<u8> = (0..3)
            .map(|i| self.peek_byte(addr.wrapping_add(i)))
            .collect();

        let instr = decoder::decode_instruction(&bytes, addr, self.variant())
            .unwrap_or_else(|| decoder::data_byte(bytes[0], addr));

        (formatter::format_instruction(&instr), instr.size_bytes)
    }
}

//! Instruction decoder for the 6502 disassembler

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::ProcessorVariant;

/// Decode a single instruction from a byte slice
///
/// Returns `None` if the opcode is not defined for `variant` or the slice is
/// shorter than the instruction.
pub fn decode_instruction(
    bytes: &[u8],
    address: u16,
    variant: ProcessorVariant,
) -> Option<Instruction> {
    let (&opcode, operands) = bytes.split_first()?;
    let entry = variant.opcode_table().get(opcode)?;

    let operand_len = (entry.bytes - 1) as usize;
    if operands.len() < operand_len {
        return None;
    }

    Some(Instruction {
        address,
        opcode,
        mnemonic: entry.mnemonic,
        mode: entry.mode,
        operand_bytes: operands[..operand_len].to_vec(),
        size_bytes: entry.bytes,
        base_cycles: entry.cycles,
    })
}

/// A single undecodable byte, rendered as a `.byte` directive.
pub(crate) fn data_byte(value: u8, address: u16) -> Instruction {
    Instruction {
        address,
        opcode: value,
        mnemonic: ".byte",
        mode: AddressingMode::Implied,
        operand_bytes: vec![value],
        size_bytes: 1,
        base_cycles: 0,
    }
}

//! # 6502 Execution Engine
//!
//! A cycle-accurate emulation of the MOS 6502 family (NMOS 6502, 6510 and
//! WDC 65C02) built to run and bound assembly test routines.
//!
//! Every bus access the real chip performs is modelled as one call to
//! [`Processor::read_byte`] or [`Processor::write_byte`], and each of those
//! costs exactly one cycle. Instruction timings, page-crossing penalties and
//! read-modify-write dummy accesses therefore fall out of the bus pattern
//! rather than being added up from a table. The opcode byte is read twice,
//! once to sample it and once to consume it, so every stepped instruction
//! takes one cycle more than its documented timing.
//!
//! ## Quick Start
//!
//! ```rust
//! use retro6502::{Processor, ProcessorVariant, RunConfig, StopReason};
//!
//! let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);
//!
//! // LDA #$42 ; RTS
//! cpu.load_program(0x1000, &[0xA9, 0x42, 0x60], None);
//!
//! let outcome = cpu.run(0x1000, None, true, true).unwrap();
//! assert!(outcome.clean);
//! assert_eq!(outcome.reason, StopReason::Rts);
//! assert_eq!(cpu.a(), 0x42);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - processor state, bus protocol and the fetch/decode/execute loop
//! - `memory` - the memory-map collaborator trait and the 6510 I/O port
//! - `opcodes` - immutable per-variant dispatch tables
//! - `addressing` - addressing modes and effective address resolution
//! - `runner` - the subroutine runner used to bound test routines
//! - `disassembler` - instruction formatting for traces and diagnostics

pub mod addressing;
pub mod cpu;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod runner;
pub mod variant;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{CycleHook, Interrupt, Processor};
pub use disassembler::{disassemble, Instruction};
pub use memory::MemoryMap;
pub use opcodes::{lookup, OpcodeEntry, OpcodeTable, MOS6502_TABLE, WDC65C02_TABLE};
pub use runner::{ExecutionOutcome, RunConfig, StopReason};
pub use variant::ProcessorVariant;

/// Errors that stop the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The byte at `pc` has no entry in the active variant's opcode table.
    ///
    /// The processor state is left untouched: PC still points at the
    /// offending byte and the failed decode consumed no cycles.
    #[error("invalid opcode 0x{opcode:02X} at ${pc:04X} for {variant}")]
    InvalidOpcode {
        opcode: u8,
        pc: u16,
        variant: ProcessorVariant,
        /// Cycles elapsed before the failure. `step` reports the processor's
        /// counter; `run` reports the cycles spent since the run started.
        cycles: u64,
    },
}

//! Processor variants.

use std::fmt;

use crate::opcodes::{OpcodeTable, MOS6502_TABLE, WDC65C02_TABLE};

/// The member of the 6502 family being emulated.
///
/// The variant picks the opcode table and decides whether addresses
/// 0x0000/0x0001 are the 6510's on-chip I/O port or plain RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessorVariant {
    /// NMOS 6502.
    #[default]
    Mos6502,

    /// 6510 (C64): NMOS instruction set plus the I/O port at 0x0000/0x0001.
    Mos6510,

    /// WDC 65C02: NMOS instruction set plus the CMOS additions.
    Wdc65c02,
}

impl ProcessorVariant {
    /// Returns the dispatch table for this variant.
    ///
    /// The 6510 shares the NMOS table exactly.
    pub fn opcode_table(self) -> &'static OpcodeTable {
        match self {
            ProcessorVariant::Mos6502 | ProcessorVariant::Mos6510 => &MOS6502_TABLE,
            ProcessorVariant::Wdc65c02 => &WDC65C02_TABLE,
        }
    }

    /// Returns true if 0x0000/0x0001 are decoded as the on-chip I/O port.
    pub fn has_io_port(self) -> bool {
        self == ProcessorVariant::Mos6510
    }

    /// Returns true for the CMOS part, which clears D on interrupt entry.
    pub fn is_cmos(self) -> bool {
        self == ProcessorVariant::Wdc65c02
    }
}

impl fmt::Display for ProcessorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessorVariant::Mos6502 => "6502",
            ProcessorVariant::Mos6510 => "6510",
            ProcessorVariant::Wdc65c02 => "65C02",
        };
        f.write_str(name)
    }
}

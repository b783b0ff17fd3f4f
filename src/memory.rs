//! # Memory Decoding
//!
//! The processor owns a flat 64KB RAM. Machine-specific address decoding
//! (ROM overlays, memory-mapped I/O, banking) lives outside the core behind
//! the [`MemoryMap`] trait: a map gets the first look at every access and
//! either claims it or lets it fall through to RAM.
//!
//! When the 6510 variant runs without a map, addresses 0x0000 and 0x0001 are
//! decoded as the on-chip I/O port instead.
//!
//! ## Design Principles
//!
//! - No bus errors: reads and writes always succeed
//! - Cycle accounting is not done here; see `Processor::read_byte`
//! - `peek`/`poke` must never have side effects on device state

/// External address-decoding collaborator.
///
/// # Examples
///
/// ```
/// use retro6502::{MemoryMap, Processor, ProcessorVariant};
///
/// /// 8KB of ROM at 0xE000-0xFFFF; writes fall through to the RAM below.
/// struct KernalRom {
///     rom: Vec<u8>,
/// }
///
/// impl MemoryMap for KernalRom {
///     fn read(&mut self, addr: u16) -> Option<u8> {
///         self.peek(addr)
///     }
///
///     fn write(&mut self, _addr: u16, _value: u8) -> bool {
///         false
///     }
///
///     fn peek(&self, addr: u16) -> Option<u8> {
///         (addr >= 0xE000).then(|| self.rom[(addr - 0xE000) as usize])
///     }
/// }
///
/// let mut rom = vec![0xEA; 0x2000];
/// rom[0x1FFC] = 0x00;
/// rom[0x1FFD] = 0xE0;
///
/// let cpu = Processor::new(ProcessorVariant::Mos6510, Some(Box::new(KernalRom { rom })));
/// assert_eq!(cpu.pc(), 0xE000);
/// ```
pub trait MemoryMap {
    /// Decodes a bus read. `None` lets the read fall through to RAM.
    fn read(&mut self, addr: u16) -> Option<u8>;

    /// Decodes a bus write. Returning `false` lets the write fall through
    /// to RAM.
    fn write(&mut self, addr: u16, value: u8) -> bool;

    /// Side-effect-free view of `read`.
    fn peek(&self, addr: u16) -> Option<u8>;

    /// Side-effect-free counterpart of `write`, used to pre-seed memory.
    ///
    /// The default lets every poke land in RAM.
    fn poke(&mut self, _addr: u16, _value: u8) -> bool {
        false
    }

    /// Called once per cycle-consuming bus access.
    fn tick(&mut self) {}

    /// Level of the shared IRQ line, sampled after every instruction.
    fn irq_active(&self) -> bool {
        false
    }

    /// Level of the NMI line; the processor latches rising edges.
    fn nmi_active(&self) -> bool {
        false
    }
}

/// Data-direction register reset value.
pub(crate) const PORT_DDR_RESET: u8 = 0x2F;

/// Data register reset value.
pub(crate) const PORT_DATA_RESET: u8 = 0x37;

/// Pin levels seen on input bits when nothing drives them.
pub(crate) const PORT_PINS_DEFAULT: u8 = 0x3F;

/// The 6510's on-chip I/O port at 0x0000 (direction) and 0x0001 (data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IoPort {
    pub(crate) ddr: u8,
    pub(crate) data: u8,
    pub(crate) pins: u8,
}

impl IoPort {
    pub(crate) fn new() -> Self {
        Self {
            ddr: PORT_DDR_RESET,
            data: PORT_DATA_RESET,
            pins: PORT_PINS_DEFAULT,
        }
    }

    /// Output bits come from the latch, input bits from the pins.
    fn data_in(&self) -> u8 {
        (self.data & self.ddr) | (self.pins & !self.ddr)
    }

    fn read(&self, addr: u16) -> u8 {
        if addr == 0 {
            self.ddr
        } else {
            self.data_in()
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr == 0 {
            self.ddr = value;
        } else {
            self.data = value;
        }
    }
}

/// The processor's view of the address space.
pub(crate) struct Memory {
    ram: Box<[u8; 0x10000]>,
    map: Option<Box<dyn MemoryMap>>,
    port: Option<IoPort>,
}

impl Memory {
    pub(crate) fn new(io_port: bool, map: Option<Box<dyn MemoryMap>>) -> Self {
        // The port only exists when nothing external decodes the bus
        let port = (io_port && map.is_none()).then(IoPort::new);

        Self {
            ram: Box::new([0; 0x10000]),
            map,
            port,
        }
    }

    pub(crate) fn read(&mut self, addr: u16) -> u8 {
        if let Some(map) = self.map.as_mut() {
            if let Some(value) = map.read(addr) {
                return value;
            }
        }
        self.load_ram(addr)
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        if let Some(map) = self.map.as_mut() {
            if map.write(addr, value) {
                return;
            }
        }
        self.store_ram(addr, value);
    }

    pub(crate) fn peek(&self, addr: u16) -> u8 {
        if let Some(value) = self.map.as_ref().and_then(|map| map.peek(addr)) {
            return value;
        }
        self.load_ram(addr)
    }

    pub(crate) fn poke(&mut self, addr: u16, value: u8) {
        if let Some(map) = self.map.as_mut() {
            if map.poke(addr, value) {
                return;
            }
        }
        self.store_ram(addr, value);
    }

    fn load_ram(&self, addr: u16) -> u8 {
        match self.port {
            Some(port) if addr <= 0x0001 => port.read(addr),
            _ => self.ram[addr as usize],
        }
    }

    fn store_ram(&mut self, addr: u16, value: u8) {
        if let Some(port) = self.port.as_mut() {
            if addr <= 0x0001 {
                port.write(addr, value);
            }
        }
        // Port writes also reach the RAM underneath
        self.ram[addr as usize] = value;
    }

    pub(crate) fn tick(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.tick();
        }
    }

    pub(crate) fn irq_active(&self) -> bool {
        self.map.as_ref().is_some_and(|map| map.irq_active())
    }

    pub(crate) fn nmi_active(&self) -> bool {
        self.map.as_ref().is_some_and(|map| map.nmi_active())
    }

    pub(crate) fn port_mut(&mut self) -> Option<&mut IoPort> {
        self.port.as_mut()
    }

    pub(crate) fn reset_port(&mut self) {
        if let Some(port) = self.port.as_mut() {
            let pins = port.pins;
            *port = IoPort::new();
            port.pins = pins;
        }
    }
}

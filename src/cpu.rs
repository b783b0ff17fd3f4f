//! # Processor State and Execution
//!
//! This module contains the [`Processor`] struct representing the emulated
//! CPU, the bus access protocol every instruction goes through, and the
//! fetch/decode/execute loop.
//!
//! ## Bus Protocol
//!
//! Two method families access memory:
//!
//! - **Cycle-consuming**: [`Processor::read_byte`] / [`Processor::write_byte`].
//!   Each call is one bus cycle: the cycle counter advances by exactly one,
//!   the memory map is ticked and the cycle hook runs.
//! - **Non-consuming**: [`Processor::peek_byte`] / [`Processor::poke_byte`].
//!   Used to inspect or pre-seed memory without disturbing timing.
//!
//! ## Execution Model
//!
//! [`Processor::step`] runs one instruction:
//! 1. Fetch: the opcode at PC is inspected for the trace line, then read
//!    on the bus (one cycle) and PC advances
//! 2. Decode: opcode table lookup for the active variant
//! 3. Execute: the handler resolves its operand and performs its bus cycles
//! 4. Interrupt check: a pending NMI, or an IRQ with I clear, is serviced

use crate::memory::{Memory, MemoryMap};
use crate::opcodes::OpcodeTable;
use crate::{ExecutionError, ProcessorVariant};

pub(crate) const FLAG_C: u8 = 0b0000_0001;
pub(crate) const FLAG_Z: u8 = 0b0000_0010;
pub(crate) const FLAG_I: u8 = 0b0000_0100;
pub(crate) const FLAG_D: u8 = 0b0000_1000;
pub(crate) const FLAG_B: u8 = 0b0001_0000;
pub(crate) const FLAG_U: u8 = 0b0010_0000;
pub(crate) const FLAG_V: u8 = 0b0100_0000;
pub(crate) const FLAG_N: u8 = 0b1000_0000;

pub(crate) const STACK_PAGE: u16 = 0x0100;
pub(crate) const NMI_VECTOR: u16 = 0xFFFA;
pub(crate) const RESET_VECTOR: u16 = 0xFFFC;
pub(crate) const IRQ_VECTOR: u16 = 0xFFFE;

/// An interrupt request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    /// Non-maskable interrupt, vector 0xFFFA.
    Nmi,
    /// Maskable interrupt, vector 0xFFFE.
    Irq,
}

/// Callback run after every cycle-consuming bus access.
///
/// Receives the cycle count after the access and may return an interrupt
/// request to latch. Latched requests are serviced at the next instruction
/// boundary.
pub type CycleHook = Box<dyn FnMut(u64) -> Option<Interrupt>>;

/// The emulated processor.
///
/// Owns the register file, the status flags, the cycle counter, the
/// interrupt latches and the 64KB address space.
///
/// # Examples
///
/// ```
/// use retro6502::{Processor, ProcessorVariant};
///
/// let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);
///
/// // Reset vector to 0xC000, then reset
/// cpu.load_program(0xC000, &[0xEA], Some(0xC000));
///
/// assert_eq!(cpu.pc(), 0xC000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct Processor {
    variant: ProcessorVariant,
    table: &'static OpcodeTable,

    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    pub(crate) flag_n: bool,
    pub(crate) flag_v: bool,
    pub(crate) flag_d: bool,
    pub(crate) flag_i: bool,
    pub(crate) flag_z: bool,
    pub(crate) flag_c: bool,

    /// Total bus cycles since reset
    pub(crate) cycles: u64,

    /// Opcode of the instruction being executed
    pub(crate) current_opcode: u8,

    nmi_pending: bool,
    nmi_line: bool,
    irq_pending: bool,

    memory: Memory,
    cycle_hook: Option<CycleHook>,

    trace_enabled: bool,
    trace: Vec<String>,
}

impl Processor {
    /// Creates a processor and performs a reset.
    ///
    /// With a memory map, every access is offered to the map first. Without
    /// one, the 6510 variant decodes 0x0000/0x0001 as its I/O port.
    pub fn new(variant: ProcessorVariant, memory_map: Option<Box<dyn MemoryMap>>) -> Self {
        let mut cpu = Self {
            variant,
            table: variant.opcode_table(),
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0xFD,
            flag_n: false,
            flag_v: false,
            flag_d: false,
            flag_i: true,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            current_opcode: 0,
            nmi_pending: false,
            nmi_line: false,
            irq_pending: false,
            memory: Memory::new(variant.has_io_port(), memory_map),
            cycle_hook: None,
            trace_enabled: false,
            trace: Vec::new(),
        };
        cpu.reset();
        cpu
    }

    /// Performs the hardware reset sequence.
    ///
    /// PC is loaded from the reset vector at 0xFFFC/0xFFFD without consuming
    /// cycles. A, X and Y are cleared, SP becomes 0xFD, I is set and the
    /// other flags cleared. Interrupt latches, the 6510 port and the cycle
    /// counter are reinitialised.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.flag_n = false;
        self.flag_v = false;
        self.flag_d = false;
        self.flag_i = true;
        self.flag_z = false;
        self.flag_c = false;
        self.cycles = 0;
        self.current_opcode = 0;
        self.nmi_pending = false;
        self.nmi_line = false;
        self.irq_pending = false;
        self.memory.reset_port();
        self.pc = self.peek_word(RESET_VECTOR);

        log::debug!("{} reset, pc=${:04X}", self.variant, self.pc);
    }

    /// Copies `bytes` into memory starting at `offset` without consuming
    /// cycles. Addresses wrap at 0xFFFF.
    ///
    /// If `new_pc` is given, the reset vector is rewritten to it and a full
    /// reset follows.
    pub fn load_program(&mut self, offset: u16, bytes: &[u8], new_pc: Option<u16>) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.poke_byte(offset.wrapping_add(i as u16), byte);
        }
        log::debug!("loaded {} bytes at ${:04X}", bytes.len(), offset);

        if let Some(pc) = new_pc {
            let [lo, hi] = pc.to_le_bytes();
            self.poke_byte(RESET_VECTOR, lo);
            self.poke_byte(RESET_VECTOR.wrapping_add(1), hi);
            self.reset();
        }
    }

    /// Executes exactly one instruction, then services any pending interrupt.
    ///
    /// The opcode byte is read twice on the bus, so every instruction costs
    /// one cycle more than its table entry.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InvalidOpcode`] if the byte at PC is not
    /// defined for this variant. Nothing is consumed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use retro6502::{Processor, ProcessorVariant};
    ///
    /// let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);
    /// cpu.load_program(0x8000, &[0xA9, 0x42], Some(0x8000)); // LDA #$42
    ///
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.a(), 0x42);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// assert_eq!(cpu.cycles(), 3);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let pc = self.pc;
        let opcode = self.memory.peek(pc);

        let Some(&entry) = self.table.get(opcode) else {
            log::warn!(
                "invalid opcode 0x{:02X} at ${:04X} for {}",
                opcode,
                pc,
                self.variant
            );
            return Err(ExecutionError::InvalidOpcode {
                opcode,
                pc,
                variant: self.variant,
                cycles: self.cycles,
            });
        };

        if self.trace_enabled || log::log_enabled!(log::Level::Trace) {
            let line = self.trace_line(pc);
            log::trace!("{line}");
            if self.trace_enabled {
                self.trace.push(line);
            }
        }

        // Opcode fetch: a sampling read at PC, then the read that consumes it
        self.read_byte(pc);
        self.read_byte(pc);
        self.current_opcode = opcode;
        self.pc = pc.wrapping_add(1);

        (entry.handler)(self, entry.mode);

        self.service_interrupts();
        Ok(())
    }

    fn service_interrupts(&mut self) {
        let nmi_line = self.memory.nmi_active();
        if nmi_line && !self.nmi_line {
            self.nmi_pending = true;
        }
        self.nmi_line = nmi_line;

        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(NMI_VECTOR);
        } else if !self.flag_i && (self.irq_pending || self.memory.irq_active()) {
            self.irq_pending = false;
            self.interrupt(IRQ_VECTOR);
        }
    }

    /// Hardware interrupt entry: the BRK sequence without the break bit.
    fn interrupt(&mut self, vector: u16) {
        log::debug!("interrupt via ${:04X} from pc=${:04X}", vector, self.pc);
        if self.trace_enabled {
            let name = if vector == NMI_VECTOR { "NMI" } else { "IRQ" };
            self.trace
                .push(format!("{:04X}  ---- {} ----  CYC:{}", self.pc, name, self.cycles));
        }

        self.read_byte(self.pc);
        self.read_byte(self.pc);
        self.push_word(self.pc);
        self.push(self.status() & !FLAG_B);
        self.enter_handler(vector);
    }

    /// Sets I (and on the 65C02 clears D), then loads PC from `vector`.
    pub(crate) fn enter_handler(&mut self, vector: u16) {
        self.flag_i = true;
        if self.variant.is_cmos() {
            self.flag_d = false;
        }
        self.pc = self.read_word(vector);
    }

    // ========== Bus Access: cycle-consuming ==========

    /// Reads a byte on the bus, consuming one cycle.
    pub fn read_byte(&mut self, addr: u16) -> u8 {
        let value = self.memory.read(addr);
        self.tick();
        value
    }

    /// Writes a byte on the bus, consuming one cycle.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
        self.tick();
    }

    /// Reads a little-endian word as two bus cycles. The high byte comes
    /// from `addr + 1`, wrapping at 0xFFFF.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    fn tick(&mut self) {
        self.cycles += 1;
        self.memory.tick();

        if let Some(hook) = self.cycle_hook.as_mut() {
            match hook(self.cycles) {
                Some(Interrupt::Nmi) => self.nmi_pending = true,
                Some(Interrupt::Irq) => self.irq_pending = true,
                None => {}
            }
        }
    }

    /// Dummy read of PC, the second cycle of every one-byte instruction.
    pub(crate) fn idle(&mut self) {
        self.read_byte(self.pc);
    }

    // ========== Bus Access: non-consuming ==========

    /// Returns the byte at `addr` without consuming a cycle or triggering
    /// device side effects.
    pub fn peek_byte(&self, addr: u16) -> u8 {
        self.memory.peek(addr)
    }

    /// Returns the little-endian word at `addr` without consuming cycles.
    pub fn peek_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.peek_byte(addr), self.peek_byte(addr.wrapping_add(1))])
    }

    /// Stores a byte without consuming a cycle.
    pub fn poke_byte(&mut self, addr: u16, value: u8) {
        self.memory.poke(addr, value);
    }

    // ========== Stack ==========

    pub(crate) fn push(&mut self, value: u8) {
        self.write_byte(STACK_PAGE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.read_byte(STACK_PAGE | self.sp as u16)
    }

    /// Pushes high byte first so the word reads little-endian on the stack.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }

    /// Dummy read of the current stack slot, spent before a pull.
    pub(crate) fn stack_idle(&mut self) {
        self.read_byte(STACK_PAGE | self.sp as u16);
    }

    // ========== Interrupt Requests ==========

    /// Latches an NMI. It is serviced after the current instruction even if
    /// I is set, and the latch clears once serviced.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Latches an IRQ. It stays pending while I is set and clears once
    /// serviced.
    pub fn trigger_irq(&mut self) {
        self.irq_pending = true;
    }

    /// Withdraws a latched IRQ that has not been serviced yet.
    pub fn clear_irq(&mut self) {
        self.irq_pending = false;
    }

    /// True while an NMI is latched and not yet serviced.
    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// True while a software IRQ request is latched.
    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    /// Installs a callback run after every cycle-consuming bus access.
    pub fn set_cycle_hook<F>(&mut self, hook: F)
    where
        F: FnMut(u64) -> Option<Interrupt> + 'static,
    {
        self.cycle_hook = Some(Box::new(hook));
    }

    /// Removes the cycle hook.
    pub fn clear_cycle_hook(&mut self) {
        self.cycle_hook = None;
    }

    // ========== Trace ==========

    /// Enables or disables the per-instruction trace log. Disabling keeps
    /// the lines already recorded.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
    }

    /// Whether instructions are currently being traced.
    pub fn trace_enabled(&self) -> bool {
        self.trace_enabled
    }

    /// Lines recorded since the trace was last cleared.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Drops every recorded trace line.
    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Returns the recorded lines and empties the log.
    pub fn take_trace(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace)
    }

    fn trace_line(&self, pc: u16) -> String {
        let (text, len) = self.disassemble(pc);
        let bytes: Vec<String> = (0..len as u16)
            .map(|i| format!("{:02X}", self.peek_byte(pc.wrapping_add(i))))
            .collect();

        format!(
            "{:04X}  {:<8}  {:<14} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{} CYC:{}",
            pc,
            bytes.join(" "),
            text,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.flags_string(),
            self.cycles
        )
    }

    /// Status register as `NV-BDIZC` letters, lowercase when clear.
    fn flags_string(&self) -> String {
        let status = self.status();
        "NV-BDIZC"
            .chars()
            .enumerate()
            .map(|(i, letter)| {
                if letter == '-' || status & (0x80 >> i) != 0 {
                    letter
                } else {
                    letter.to_ascii_lowercase()
                }
            })
            .collect()
    }

    // ========== Configuration ==========

    /// The variant chosen at construction.
    pub fn variant(&self) -> ProcessorVariant {
        self.variant
    }

    /// Sets the levels driven onto the 6510 port's input pins.
    ///
    /// Has no effect on other variants or when a memory map is installed.
    pub fn set_port_input(&mut self, pins: u8) {
        if let Some(port) = self.memory.port_mut() {
            port.pins = pins;
        }
    }

    // ========== Cycle Counter ==========

    /// Returns the number of bus cycles since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Zeroes the cycle counter.
    pub fn reset_cycles(&mut self) {
        self.cycles = 0;
    }

    // ========== Registers ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Sets the accumulator without touching the flags.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Sets X without touching the flags.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Sets Y without touching the flags.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Moves PC without consuming cycles.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    // ========== Status Flags ==========

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (always 0 here; only set in copies pushed by BRK/PHP)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut status = FLAG_U;

        if self.flag_n {
            status |= FLAG_N;
        }
        if self.flag_v {
            status |= FLAG_V;
        }
        if self.flag_d {
            status |= FLAG_D;
        }
        if self.flag_i {
            status |= FLAG_I;
        }
        if self.flag_z {
            status |= FLAG_Z;
        }
        if self.flag_c {
            status |= FLAG_C;
        }

        status
    }

    /// Unpacks a status byte. B and bit 5 do not exist in the register.
    pub(crate) fn set_status(&mut self, status: u8) {
        self.flag_n = status & FLAG_N != 0;
        self.flag_v = status & FLAG_V != 0;
        self.flag_d = status & FLAG_D != 0;
        self.flag_i = status & FLAG_I != 0;
        self.flag_z = status & FLAG_Z != 0;
        self.flag_c = status & FLAG_C != 0;
    }

    /// Sets Z and N from a result byte.
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    /// Sets the carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Sets the zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Sets the negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Sets the overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Sets the decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Returns true if the Interrupt Disable flag is set.
    ///
    /// I only changes through reset, BRK, interrupts, RTI, PLP, CLI and SEI.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }
}

//! # Subroutine Runner
//!
//! Runs a routine from a start address until it returns, breaks, reaches a
//! stop address or exhausts a cycle budget. This is the entry point a test
//! harness uses: load a routine, call [`Processor::run`], then inspect the
//! [`ExecutionOutcome`] and the register file.
//!
//! ## Stop Conditions
//!
//! Checked after every instruction, in this order:
//!
//! 1. **BRK**: the routine executed a BRK. Clean unless `fail_on_brk`.
//! 2. **RTS**: an RTS returned from call depth zero and `stop_on_rts` is set.
//!    Depth goes up on every JSR and down on every nested RTS, so inner
//!    subroutines return normally.
//! 3. **Stop address**: PC equalled the stop address when the instruction
//!    started. That instruction still runs before the runner stops.
//! 4. **Timeout**: the cycle budget is used up. Never clean.
//!
//! BRK and timeouts are outcomes, not errors. Only an undefined opcode
//! aborts the run with an [`ExecutionError`].

use crate::cpu::Processor;
use crate::ExecutionError;

const OPCODE_BRK: u8 = 0x00;
const OPCODE_JSR: u8 = 0x20;
const OPCODE_RTS: u8 = 0x60;

/// Stopping conditions for [`Processor::run_with`].
///
/// # Examples
///
/// ```
/// use retro6502::RunConfig;
///
/// let config = RunConfig::default()
///     .with_stop_address(0x2000)
///     .with_max_cycles(10_000);
///
/// assert!(config.stop_on_rts);
/// assert!(config.fail_on_brk);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Stop after executing the instruction at this address. `None` and
    /// `Some(0)` disable the check.
    pub stop_address: Option<u16>,

    /// Stop when an RTS returns from call depth zero.
    pub stop_on_rts: bool,

    /// Report a BRK as an unclean stop.
    pub fail_on_brk: bool,

    /// Cycle budget for the whole run. `None` runs without limit.
    pub max_cycles: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            stop_address: None,
            stop_on_rts: true,
            fail_on_brk: true,
            max_cycles: None,
        }
    }
}

impl RunConfig {
    /// Stops after the instruction at `addr`.
    pub fn with_stop_address(mut self, addr: u16) -> Self {
        self.stop_address = Some(addr);
        self
    }

    /// Sets whether an RTS from call depth zero ends the run.
    pub fn with_stop_on_rts(mut self, stop: bool) -> Self {
        self.stop_on_rts = stop;
        self
    }

    /// Sets whether a BRK counts as an unclean stop.
    pub fn with_fail_on_brk(mut self, fail: bool) -> Self {
        self.fail_on_brk = fail;
        self
    }

    /// Caps the run at `cycles` bus cycles.
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// The effective stop address; zero means disabled.
    fn stop_address(&self) -> Option<u16> {
        self.stop_address.filter(|&addr| addr != 0)
    }
}

/// Why the runner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// An RTS returned from call depth zero.
    Rts,
    /// A BRK was executed.
    Brk,
    /// The instruction at the stop address was executed.
    StopAddress,
    /// The cycle budget ran out.
    Timeout,
}

/// Result of a [`Processor::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// True if the routine finished in a way the caller asked for.
    pub clean: bool,

    pub reason: StopReason,

    /// Cycles consumed by this run, interrupts included.
    pub cycles: u64,

    /// PC after the last executed instruction.
    pub pc: u16,
}

impl Processor {
    /// Runs from `start` until a stop condition fires.
    ///
    /// Equivalent to [`Processor::run_with`] with no cycle budget.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InvalidOpcode`] if the routine reaches an
    /// undefined opcode.
    pub fn run(
        &mut self,
        start: u16,
        stop_address: Option<u16>,
        stop_on_rts: bool,
        fail_on_brk: bool,
    ) -> Result<ExecutionOutcome, ExecutionError> {
        let config = RunConfig {
            stop_address,
            stop_on_rts,
            fail_on_brk,
            max_cycles: None,
        };
        self.run_with(start, &config)
    }

    /// Runs from `start` under `config`.
    ///
    /// PC is set to `start`; registers, flags and the cycle counter carry
    /// over from the current state.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InvalidOpcode`] if the routine reaches an
    /// undefined opcode. PC then points at the offending byte and the error
    /// carries the cycles spent by this run.
    ///
    /// # Examples
    ///
    /// ```
    /// use retro6502::{Processor, ProcessorVariant, RunConfig, StopReason};
    ///
    /// let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);
    /// cpu.load_program(0x0200, &[0x4C, 0x00, 0x02], None); // JMP $0200
    ///
    /// let config = RunConfig::default().with_max_cycles(300);
    /// let outcome = cpu.run_with(0x0200, &config).unwrap();
    ///
    /// assert!(!outcome.clean);
    /// assert_eq!(outcome.reason, StopReason::Timeout);
    /// assert_eq!(outcome.cycles, 300);
    /// ```
    pub fn run_with(
        &mut self,
        start: u16,
        config: &RunConfig,
    ) -> Result<ExecutionOutcome, ExecutionError> {
        self.pc = start;
        let start_cycles = self.cycles;
        let stop_address = config.stop_address();
        let mut depth: usize = 0;

        log::debug!(
            "run from ${:04X} (stop={:?}, stop_on_rts={}, fail_on_brk={}, budget={:?})",
            start,
            stop_address,
            config.stop_on_rts,
            config.fail_on_brk,
            config.max_cycles
        );

        let (clean, reason) = loop {
            let pc = self.pc;
            let opcode = self.peek_byte(pc);
            let at_stop = stop_address == Some(pc);

            let mut returned = false;
            match opcode {
                OPCODE_JSR => depth += 1,
                OPCODE_RTS if depth == 0 => returned = config.stop_on_rts,
                OPCODE_RTS => depth -= 1,
                _ => {}
            }

            self.step().map_err(|err| match err {
                ExecutionError::InvalidOpcode {
                    opcode, pc, variant, ..
                } => ExecutionError::InvalidOpcode {
                    opcode,
                    pc,
                    variant,
                    cycles: self.cycles - start_cycles,
                },
            })?;

            if opcode == OPCODE_BRK {
                break (!config.fail_on_brk, StopReason::Brk);
            }
            if returned {
                break (true, StopReason::Rts);
            }
            if at_stop {
                break (true, StopReason::StopAddress);
            }
            if let Some(budget) = config.max_cycles {
                if self.cycles - start_cycles >= budget {
                    log::warn!(
                        "run from ${:04X} exceeded {} cycles, pc=${:04X}",
                        start,
                        budget,
                        self.pc
                    );
                    break (false, StopReason::Timeout);
                }
            }
        };

        let outcome = ExecutionOutcome {
            clean,
            reason,
            cycles: self.cycles - start_cycles,
            pc: self.pc,
        };
        log::debug!(
            "run stopped: {:?} (clean={}) after {} cycles, pc=${:04X}",
            outcome.reason,
            outcome.clean,
            outcome.cycles,
            outcome.pc
        );

        Ok(outcome)
    }
}

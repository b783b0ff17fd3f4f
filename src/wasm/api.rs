//! WASM API for the emulator.
//!
//! Wraps a [`Processor`] in a JavaScript-callable class. Errors cross the
//! boundary as [`JsError`] values carrying the `Display` text of the
//! underlying [`crate::ExecutionError`].

use crate::{ExecutionOutcome, Processor, ProcessorVariant, RunConfig, StopReason};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Result of a `run` call, flattened for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct RunResult {
    clean: bool,
    reason: String,
    cycles: f64,
    pc: u16,
}

#[wasm_bindgen]
impl RunResult {
    #[wasm_bindgen(getter)]
    pub fn clean(&self) -> bool {
        self.clean
    }

    /// One of `"rts"`, `"brk"`, `"stop_address"` or `"timeout"`.
    #[wasm_bindgen(getter)]
    pub fn reason(&self) -> String {
        self.reason.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cycles
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.pc
    }
}

impl From<ExecutionOutcome> for RunResult {
    fn from(outcome: ExecutionOutcome) -> Self {
        let reason = match outcome.reason {
            StopReason::Rts => "rts",
            StopReason::Brk => "brk",
            StopReason::StopAddress => "stop_address",
            StopReason::Timeout => "timeout",
        };

        RunResult {
            clean: outcome.clean,
            reason: reason.to_string(),
            // JavaScript numbers are f64; cycle counts stay exact below 2^53
            cycles: outcome.cycles as f64,
            pc: outcome.pc,
        }
    }
}

/// Browser-facing processor with a flat 64KB address space.
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: Processor,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Creates a processor. `variant` is `"6502"`, `"6510"` or `"65c02"`.
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> Result<Emulator6502, JsError> {
        let variant = match variant.to_ascii_lowercase().as_str() {
            "6502" => ProcessorVariant::Mos6502,
            "6510" => ProcessorVariant::Mos6510,
            "65c02" => ProcessorVariant::Wdc65c02,
            other => return Err(JsError::new(&format!("unknown variant '{other}'"))),
        };

        Ok(Emulator6502 {
            cpu: Processor::new(variant, None),
        })
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu.step().map_err(|e| JsError::new(&e.to_string()))
    }

    /// Run a routine. `stop_address` of 0 and `max_cycles` of 0 disable
    /// those conditions.
    pub fn run(
        &mut self,
        start: u16,
        stop_address: u16,
        stop_on_rts: bool,
        fail_on_brk: bool,
        max_cycles: f64,
    ) -> Result<RunResult, JsError> {
        let config = RunConfig {
            stop_address: Some(stop_address),
            stop_on_rts,
            fail_on_brk,
            max_cycles: (max_cycles > 0.0).then_some(max_cycles as u64),
        };

        self.cpu
            .run_with(start, &config)
            .map(RunResult::from)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Reset the CPU from its reset vector
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Latch a non-maskable interrupt
    pub fn trigger_nmi(&mut self) {
        self.cpu.trigger_nmi();
    }

    /// Latch a maskable interrupt request
    pub fn trigger_irq(&mut self) {
        self.cpu.trigger_irq();
    }

    /// Copy a program into memory; a nonzero `new_pc` also resets into it.
    pub fn load_program(&mut self, program: &[u8], offset: u16, new_pc: u16) {
        let new_pc = (new_pc != 0).then_some(new_pc);
        self.cpu.load_program(offset, program, new_pc);
    }

    /// Read a byte without consuming cycles
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.peek_byte(addr)
    }

    /// Write a byte without consuming cycles
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.poke_byte(addr, value);
    }

    /// Get a 256-byte page of memory
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let base = (page as u16) << 8;
        (0..=0xFFu16).map(|i| self.cpu.peek_byte(base | i)).collect()
    }

    /// Disassemble the instruction at `addr`
    pub fn disassemble(&self, addr: u16) -> String {
        self.cpu.disassemble(addr).0
    }

    /// Enable or disable instruction tracing
    pub fn set_trace(&mut self, enabled: bool) {
        self.cpu.set_trace(enabled);
    }

    /// Drain the trace log into a JavaScript array of strings.
    pub fn take_trace(&mut self) -> js_sys::Array {
        self.cpu
            .take_trace()
            .into_iter()
            .map(|line| JsValue::from_str(&line))
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }
}

//! WebAssembly bindings for the emulator.
//!
//! Lets a browser-hosted harness load a routine, run it and read back the
//! register file, the outcome and the trace.

pub mod api;

pub use api::Emulator6502;

//! Fuzz target for the subroutine runner.
//!
//! Loads arbitrary code and register state, then runs it under a cycle
//! budget. Any panic is a bug: undefined opcodes must surface as errors and
//! runaway code as a timeout.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use retro6502::{ExecutionError, Processor, ProcessorVariant, RunConfig, StopReason};

#[derive(Debug, Arbitrary)]
enum FuzzVariant {
    Mos6502,
    Mos6510,
    Wdc65c02,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    variant: FuzzVariant,
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    start: u16,
    stop_address: Option<u16>,
    stop_on_rts: bool,
    fail_on_brk: bool,
    nmi: bool,
    irq: bool,
    code: Vec<u8>,
    zero_page: [u8; 256],
    stack_page: [u8; 256],
}

const BUDGET: u64 = 20_000;

fuzz_target!(|input: FuzzInput| {
    if input.code.len() > 4096 {
        return;
    }

    let variant = match input.variant {
        FuzzVariant::Mos6502 => ProcessorVariant::Mos6502,
        FuzzVariant::Mos6510 => ProcessorVariant::Mos6510,
        FuzzVariant::Wdc65c02 => ProcessorVariant::Wdc65c02,
    };

    let mut cpu = Processor::new(variant, None);
    cpu.load_program(0x0000, &input.zero_page, None);
    cpu.load_program(0x0100, &input.stack_page, None);
    cpu.load_program(input.start, &input.code, None);

    cpu.set_a(input.a);
    cpu.set_x(input.x);
    cpu.set_y(input.y);
    cpu.set_sp(input.sp);
    cpu.set_flag_c(input.status & 0x01 != 0);
    cpu.set_flag_z(input.status & 0x02 != 0);
    cpu.set_flag_d(input.status & 0x08 != 0);
    cpu.set_flag_v(input.status & 0x40 != 0);
    cpu.set_flag_n(input.status & 0x80 != 0);
    if input.nmi {
        cpu.trigger_nmi();
    }
    if input.irq {
        cpu.trigger_irq();
    }

    let config = RunConfig {
        stop_address: input.stop_address,
        stop_on_rts: input.stop_on_rts,
        fail_on_brk: input.fail_on_brk,
        max_cycles: Some(BUDGET),
    };

    match cpu.run_with(input.start, &config) {
        Ok(outcome) => {
            assert_eq!(outcome.pc, cpu.pc());
            assert!(outcome.cycles <= BUDGET + 16, "overran budget: {:?}", outcome);
            if outcome.reason == StopReason::Timeout {
                assert!(!outcome.clean);
                assert!(outcome.cycles >= BUDGET);
            }
        }
        Err(ExecutionError::InvalidOpcode {
            opcode, pc, cycles, ..
        }) => {
            assert_eq!(pc, cpu.pc());
            assert!(cycles < BUDGET + 16);
            assert_eq!(opcode, cpu.peek_byte(pc));
            assert!(retro6502::lookup(opcode, variant).is_none());
        }
    }
});

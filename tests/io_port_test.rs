//! 6510 on-chip I/O port tests

use retro6502::{MemoryMap, Processor, ProcessorVariant};

fn setup_cpu(program: &[u8]) -> Processor {
    let mut cpu = Processor::new(ProcessorVariant::Mos6510, None);
    cpu.load_program(0x8000, program, Some(0x8000));
    cpu
}

#[test]
fn test_port_reset_values() {
    let cpu = setup_cpu(&[]);

    assert_eq!(cpu.peek_byte(0x0000), 0x2F);
    assert_eq!(cpu.peek_byte(0x0001), 0x37);
}

#[test]
fn test_input_bits_read_from_pins() {
    // LDA $01
    let mut cpu = setup_cpu(&[0xA5, 0x01]);
    cpu.set_port_input(0x00);

    cpu.step().unwrap();

    // DDR 0x2F: bits 0-3 and 5 are outputs (latch 0x37), bits 4, 6, 7 inputs
    assert_eq!(cpu.a(), 0x27);
}

#[test]
fn test_program_writes_direction_and_data() {
    // LDA #$FF ; STA $00 ; LDA #$AA ; STA $01 ; LDA $01
    let mut cpu = setup_cpu(&[0xA9, 0xFF, 0x85, 0x00, 0xA9, 0xAA, 0x85, 0x01, 0xA5, 0x01]);
    for _ in 0..5 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.a(), 0xAA);
    assert_eq!(cpu.peek_byte(0x0000), 0xFF);
}

#[test]
fn test_reset_restores_port_and_keeps_pins() {
    let mut cpu = setup_cpu(&[]);
    cpu.poke_byte(0x0000, 0x00);
    cpu.set_port_input(0x15);

    cpu.reset();

    assert_eq!(cpu.peek_byte(0x0000), 0x2F);
    // Bits 4, 6, 7 come from the pins
    assert_eq!(cpu.peek_byte(0x0001), 0x27 | (0x15 & 0xD0));
}

#[test]
fn test_plain_6502_has_no_port() {
    let mut cpu = Processor::new(ProcessorVariant::Mos6502, None);

    assert_eq!(cpu.peek_byte(0x0000), 0x00);
    cpu.poke_byte(0x0001, 0x12);
    assert_eq!(cpu.peek_byte(0x0001), 0x12);
}

struct Empty;

impl MemoryMap for Empty {
    fn read(&mut self, _addr: u16) -> Option<u8> {
        None
    }

    fn write(&mut self, _addr: u16, _value: u8) -> bool {
        false
    }

    fn peek(&self, _addr: u16) -> Option<u8> {
        None
    }
}

#[test]
fn test_memory_map_replaces_port() {
    let cpu = Processor::new(ProcessorVariant::Mos6510, Some(Box::new(Empty)));

    assert_eq!(cpu.peek_byte(0x0000), 0x00);
    assert_eq!(cpu.peek_byte(0x0001), 0x00);
}

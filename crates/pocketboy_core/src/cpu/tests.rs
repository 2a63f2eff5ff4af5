use super::*;
use crate::EmuError;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl TestBus {
    fn load(&mut self, addr: u16, program: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) -> crate::Result<()> {
        self.memory[addr as usize] = value;
        Ok(())
    }
}

/// Bus that keeps every trace record it is handed.
#[derive(Default)]
struct TracingBus {
    inner: TestBus,
    records: Vec<TraceRecord>,
}

impl Bus for TracingBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.inner.read8(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) -> crate::Result<()> {
        self.inner.write8(addr, value)
    }

    fn tracing(&self) -> bool {
        true
    }

    fn trace_instruction(&mut self, record: &TraceRecord) {
        self.records.push(record.clone());
    }
}

fn cpu_at(pc: u16) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.regs.pc = pc;
    cpu
}

#[test]
fn power_on_state_matches_dmg_boot_handoff() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
    assert!(!cpu.halted);
}

#[test]
fn register_pair_views_share_storage() {
    let mut regs = Registers::default();
    regs.set_bc(0x1234);
    assert_eq!(regs.b(), 0x12);
    assert_eq!(regs.c(), 0x34);

    regs.set_c(0xFF);
    assert_eq!(regs.bc(), 0x12FF);

    regs.set_h(0xAB);
    regs.set_l(0xCD);
    assert_eq!(regs.hl(), 0xABCD);

    // Low nibble of F never holds data.
    regs.set_af(0x12FF);
    assert_eq!(regs.a(), 0x12);
    assert_eq!(regs.f(), 0xF0);
}

#[test]
fn nop_at_entry_point_only_advances_pc() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    // 0x0100: NOP
    bus.memory[0x0100] = 0x00;
    let before = cpu.regs;

    let cycles = cpu.step(&mut bus).unwrap();

    assert_eq!(cycles, u32::from(instructions::lookup(0x00).cycles));
    let mut expected = before;
    expected.pc = 0x0101;
    assert_eq!(cpu.regs, expected);
    assert!(!cpu.ime);
    assert!(!cpu.halted);
}

#[test]
fn ld_16bit_and_basic_ld_indirect_work() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();

    // Program:
    // 0x0000: LD BC, 0xC123
    // 0x0003: LD (BC), A
    // 0x0004: LD A, 0x00
    // 0x0006: LD A, (BC)
    bus.load(0x0000, &[0x01, 0x23, 0xC1, 0x02, 0x3E, 0x00, 0x0A]);
    cpu.regs.set_a(0x5A);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.bc(), 0xC123);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(bus.memory[0xC123], 0x5A);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x00);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a(), 0x5A);
    assert_eq!(cpu.regs.pc, 0x0007);
}

#[test]
fn ld_hl_increment_and_decrement_forms() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();

    // 0x0000: LD (HL+), A
    // 0x0001: LD (HL-), A
    // 0x0002: LD A, (HL+)
    bus.load(0x0000, &[0x22, 0x32, 0x2A]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.set_a(0x11);

    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.memory[0xC000], 0x11);
    assert_eq!(cpu.regs.hl(), 0xC001);

    cpu.regs.set_a(0x22);
    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.memory[0xC001], 0x22);
    assert_eq!(cpu.regs.hl(), 0xC000);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x11);
    assert_eq!(cpu.regs.hl(), 0xC001);
}

#[test]
fn ld_r_r_and_memory_operand() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();

    // 0x0000: LD B, A
    // 0x0001: LD (HL), B
    // 0x0002: LD E, (HL)
    // 0x0003: LD (HL), 0x99
    bus.load(0x0000, &[0x47, 0x70, 0x5E, 0x36, 0x99]);
    cpu.regs.set_a(0x42);
    cpu.regs.set_hl(0xD000);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.b(), 0x42);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(bus.memory[0xD000], 0x42);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.e(), 0x42);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xD000], 0x99);
}

#[test]
fn ldh_and_c_relative_io_loads() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();

    // 0x0000: LDH (0x80), A
    // 0x0002: LD (C), A
    // 0x0003: LDH A, (0x81)
    bus.load(0x0000, &[0xE0, 0x80, 0xE2, 0xF0, 0x81]);
    cpu.regs.set_a(0x7E);
    cpu.regs.set_c(0x81);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xFF80], 0x7E);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(bus.memory[0xFF81], 0x7E);

    cpu.regs.set_a(0);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x7E);
}

#[test]
fn ld_a16_sp_stores_little_endian() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: LD (0xC100), SP
    bus.load(0x0000, &[0x08, 0x00, 0xC1]);
    cpu.regs.sp = 0xBEEF;

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(bus.memory[0xC100], 0xEF);
    assert_eq!(bus.memory[0xC101], 0xBE);
}

#[test]
fn inc_dec_8bit_update_flags_and_preserve_c() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: INC B
    // 0x0001: DEC B
    // 0x0002: DEC B
    bus.load(0x0000, &[0x04, 0x05, 0x05]);
    cpu.regs.set_b(0x0F);
    cpu.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b(), 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b(), 0x0F);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::N));

    cpu.regs.set_b(0x01);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b(), 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn inc_dec_on_hl_memory_and_16bit_pairs() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: INC (HL)
    // 0x0001: DEC DE
    // 0x0002: INC SP
    bus.load(0x0000, &[0x34, 0x1B, 0x33]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0xFF;
    cpu.regs.set_de(0x0000);
    cpu.regs.sp = 0xFFFF;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.get_flag(Flag::Z));

    let flags_after_inc = cpu.regs.f();
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.de(), 0xFFFF);
    assert_eq!(cpu.regs.f(), flags_after_inc);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.sp, 0x0000);
}

#[test]
fn add_and_adc_flags() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: ADD A, 0x01
    // 0x0002: ADC A, B
    bus.load(0x0000, &[0xC6, 0x01, 0x88]);
    cpu.regs.set_a(0xFF);
    cpu.regs.set_b(0x0E);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::N));

    // 0x00 + 0x0E + carry
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x0F);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn sub_sbc_and_cp_flags() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: SUB 0x01
    // 0x0002: SBC A, C
    // 0x0003: CP 0x10
    bus.load(0x0000, &[0xD6, 0x01, 0x99, 0xFE, 0x10]);
    cpu.regs.set_a(0x00);
    cpu.regs.set_c(0x00);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0xFF);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    // 0xFF - 0 - carry
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0xFE);
    assert!(!cpu.get_flag(Flag::C));

    cpu.regs.set_a(0x10);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x10);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn logic_ops_set_documented_flags() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: AND 0x0F
    // 0x0002: OR B
    // 0x0003: XOR A
    bus.load(0x0000, &[0xE6, 0x0F, 0xB0, 0xAF]);
    cpu.regs.set_a(0xF0);
    cpu.regs.set_b(0x81);
    cpu.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x81);
    assert_eq!(cpu.regs.f(), 0x00);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(cpu.regs.f(), Flag::Z.mask());
}

#[test]
fn add_hl_rr_keeps_zero_flag() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: ADD HL, BC
    bus.memory[0x0000] = 0x09;
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0xF001);
    cpu.set_flag(Flag::Z, true);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::N));
}

#[test]
fn add_sp_r8_signed_and_ld_hl_sp_plus_r8() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: ADD SP, -1
    // 0x0002: LD HL, SP+2
    // 0x0004: LD SP, HL
    bus.load(0x0000, &[0xE8, 0xFF, 0xF8, 0x02, 0xF9]);
    cpu.regs.sp = 0xFFF8;

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.sp, 0xFFF7);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::H));

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.hl(), 0xFFF9);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.sp, 0xFFF9);
}

#[test]
fn daa_after_bcd_addition_and_subtraction() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: ADD A, 0x27
    // 0x0002: DAA
    // 0x0003: SUB 0x09
    // 0x0005: DAA
    bus.load(0x0000, &[0xC6, 0x27, 0x27, 0xD6, 0x09, 0x27]);
    cpu.regs.set_a(0x15);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x42);
    assert!(!cpu.get_flag(Flag::C));

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x33);
}

#[test]
fn rotate_a_always_clears_zero() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: RLCA
    // 0x0001: RRA
    bus.load(0x0000, &[0x07, 0x1F]);
    cpu.regs.set_a(0x80);
    cpu.set_flag(Flag::Z, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x01);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));

    // 0x01 >> 1 with carry in -> 0x80, carry out 1
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0x80);
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn cpl_scf_ccf() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: CPL
    // 0x0001: SCF
    // 0x0002: CCF
    bus.load(0x0000, &[0x2F, 0x37, 0x3F]);
    cpu.regs.set_a(0x5A);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a(), 0xA5);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));

    cpu.step(&mut bus).unwrap();
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::N));

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn jr_backwards_and_conditional_timing() {
    let mut cpu = cpu_at(0x0010);
    let mut bus = TestBus::default();
    // 0x0010: JR -2 (to itself)
    bus.load(0x0010, &[0x18, 0xFE]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0010);

    // 0x0020: JR NZ, +5
    bus.load(0x0020, &[0x20, 0x05]);
    cpu.regs.pc = 0x0020;
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.pc, 0x0022);

    cpu.regs.pc = 0x0020;
    cpu.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0027);
}

#[test]
fn call_and_ret_roundtrip() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();

    // Program:
    // 0x0000: CALL 0x1234
    bus.load(0x0000, &[0xCD, 0x34, 0x12]);
    // Subroutine at 0x1234: RET
    bus.memory[0x1234] = 0xC9;
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus).unwrap(), 24);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    // Return address (0x0003) should be on stack at 0xFFFC/0xFFFD
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x00);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_call_and_ret_not_taken() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: CALL C, 0x4000
    // 0x0003: RET NC
    bus.load(0x0000, &[0xDC, 0x00, 0x40, 0xD0]);
    cpu.regs.sp = 0xFFFE;
    cpu.set_flag(Flag::C, false);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xFFFE);

    cpu.set_flag(Flag::C, true);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.pc, 0x0004);
}

#[test]
fn conditional_jp_does_not_touch_stack() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: JP Z, 0x0150
    bus.load(0x0000, &[0xCA, 0x50, 0x01]);
    cpu.regs.sp = 0xFFFE;
    cpu.set_flag(Flag::Z, true);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cpu.regs.sp, 0xFFFE);

    cpu.regs.pc = 0x0000;
    cpu.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn jp_hl_jumps_to_hl() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: JP HL
    bus.memory[0x0000] = 0xE9;
    cpu.regs.set_hl(0x4321);
    // A stray value at (HL) must not matter.
    bus.memory[0x4321] = 0x99;

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, 0x4321);
}

#[test]
fn push_pop_roundtrip_and_af_mask() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: PUSH BC
    // 0x0001: POP AF
    bus.load(0x0000, &[0xC5, 0xF1]);
    cpu.regs.sp = 0xD000;
    cpu.regs.set_bc(0x12FF);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFF], 0x12);
    assert_eq!(bus.memory[0xCFFE], 0xFF);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.sp, 0xD000);
    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn rst_pushes_return_address() {
    let mut cpu = cpu_at(0x0200);
    let mut bus = TestBus::default();
    // 0x0200: RST 28H
    bus.memory[0x0200] = 0xEF;
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.memory[0xFFFD], 0x02);
    assert_eq!(bus.memory[0xFFFC], 0x01);
}

#[test]
fn prefixed_ops_charge_remaining_cycles() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: SWAP A
    // 0x0002: SET 3, (HL)
    // 0x0004: BIT 3, (HL)
    bus.load(0x0000, &[0xCB, 0x37, 0xCB, 0xDE, 0xCB, 0x5E]);
    cpu.regs.set_a(0xF1);
    cpu.regs.set_hl(0xC000);

    // Escape byte, then the rest of the 8 cycles.
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert!(cpu.is_prefixed());
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert!(!cpu.is_prefixed());
    assert_eq!(cpu.regs.a(), 0x1F);
    assert_eq!(cpu.regs.f(), 0x00);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xC000], 0x08);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert_eq!(cpu.regs.pc, 0x0006);
}

#[test]
fn cb_shifts_and_res() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: RL B
    // 0x0002: SRA C
    // 0x0004: SRL D
    // 0x0006: RES 7, E
    bus.load(0x0000, &[0xCB, 0x10, 0xCB, 0x29, 0xCB, 0x3A, 0xCB, 0xBB]);
    cpu.regs.set_b(0x80);
    cpu.regs.set_c(0x81);
    cpu.regs.set_d(0x01);
    cpu.regs.set_e(0xFF);
    cpu.set_flag(Flag::C, false);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b(), 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.c(), 0xC0);
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.d(), 0x00);
    assert!(cpu.get_flag(Flag::Z));

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.e(), 0x7F);
}

#[test]
fn illegal_opcode_is_reported() {
    let mut cpu = cpu_at(0x0300);
    let mut bus = TestBus::default();
    bus.memory[0x0300] = 0xDD;

    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(
        err,
        EmuError::IllegalOpcode {
            opcode: 0xDD,
            address: 0x0300
        }
    );
}

#[test]
fn stop_is_unimplemented() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    bus.load(0x0000, &[0x10, 0x00]);

    match cpu.step(&mut bus) {
        Err(EmuError::UnimplementedOpcode {
            opcode, address, ..
        }) => {
            assert_eq!(opcode, 0x10);
            assert_eq!(address, 0x0000);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: EI
    // 0x0001: NOP
    // 0x0002: NOP
    bus.load(0x0000, &[0xFB, 0x00, 0x00]);
    cpu.regs.sp = 0xFFFE;
    bus.memory[IE_ADDR as usize] = InterruptFlags::TIMER.bits();
    bus.memory[IF_ADDR as usize] = InterruptFlags::TIMER.bits();

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.ime);
    // The instruction after EI still runs.
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0002);
    assert!(cpu.ime);

    assert_eq!(cpu.step(&mut bus).unwrap(), INTERRUPT_CYCLES);
    assert_eq!(cpu.regs.pc, Interrupt::Timer.vector());
}

#[test]
fn interrupt_delivery_follows_priority() {
    let mut cpu = cpu_at(0x1234);
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.sp = 0xFFFE;
    let requested = InterruptFlags::TIMER | InterruptFlags::SERIAL | InterruptFlags::LCD_STAT;
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = requested.bits();

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.regs.pc, 0x0048);
    assert!(!cpu.ime);
    assert_eq!(
        bus.memory[IF_ADDR as usize],
        (InterruptFlags::TIMER | InterruptFlags::SERIAL).bits()
    );
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[0xFFFC], 0x34);
}

#[test]
fn interrupt_enable_masks_requests() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = InterruptFlags::JOYPAD.bits();
    bus.memory[IF_ADDR as usize] = InterruptFlags::TIMER.bits();

    // NOP runs instead of the timer handler.
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert!(cpu.ime);
}

#[test]
fn stat_latch_ignores_interrupt_enable() {
    let mut cpu = cpu_at(0x0500);
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.sp = 0xFFFE;
    cpu.trigger_stat_interrupt();

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.regs.pc, 0x0048);
    assert!(!cpu.stat_pending());
    assert_eq!(bus.memory[IF_ADDR as usize], 0x00);
}

#[test]
fn no_interrupt_between_prefix_and_opcode() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: SET 0, B
    bus.load(0x0000, &[0xCB, 0xC0]);
    cpu.ime = true;
    cpu.regs.sp = 0xFFFE;

    cpu.step(&mut bus).unwrap();
    bus.memory[IE_ADDR as usize] = InterruptFlags::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = InterruptFlags::VBLANK.bits();

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b() & 0x01, 0x01);
    assert_eq!(cpu.regs.pc, 0x0002);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0040);
}

#[test]
fn halt_idles_until_an_interrupt_is_pending() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: HALT
    // 0x0001: INC A
    bus.load(0x0000, &[0x76, 0x3C]);
    cpu.regs.set_a(0x00);
    bus.memory[IE_ADDR as usize] = InterruptFlags::TIMER.bits();

    cpu.step(&mut bus).unwrap();
    assert!(cpu.halted);
    for _ in 0..3 {
        assert_eq!(cpu.step(&mut bus).unwrap(), HALT_IDLE_CYCLES);
        assert_eq!(cpu.regs.pc, 0x0001);
    }

    // IME is clear: wake up and continue without servicing.
    bus.memory[IF_ADDR as usize] = InterruptFlags::TIMER.bits();
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a(), 0x01);
    assert_eq!(bus.memory[IF_ADDR as usize], InterruptFlags::TIMER.bits());
}

#[test]
fn tick_waits_out_instruction_cycles() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    // 0x0000: LD A, 0x01   (8 cycles)
    // 0x0002: INC A        (4 cycles)
    bus.load(0x0000, &[0x3E, 0x01, 0x3C]);

    assert_eq!(cpu.tick(&mut bus).unwrap(), CpuState::Fetching);
    assert_eq!(cpu.ticks(), 1);
    assert_eq!(cpu.wait_until(), 9);
    assert_eq!(cpu.regs.a(), 0x01);

    for _ in 0..7 {
        assert_eq!(cpu.tick(&mut bus).unwrap(), CpuState::Waiting);
    }
    assert_eq!(cpu.regs.pc, 0x0002);

    assert_eq!(cpu.tick(&mut bus).unwrap(), CpuState::Fetching);
    assert_eq!(cpu.regs.a(), 0x02);
    assert_eq!(cpu.wait_until(), 13);
}

#[test]
fn tick_reports_interrupt_service() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.sp = 0xFFFE;
    bus.memory[IE_ADDR as usize] = InterruptFlags::SERIAL.bits();
    bus.memory[IF_ADDR as usize] = InterruptFlags::SERIAL.bits();

    assert_eq!(cpu.tick(&mut bus).unwrap(), CpuState::ServicingInterrupt);
    assert_eq!(cpu.regs.pc, 0x0058);
    assert_eq!(cpu.wait_until(), 1 + INTERRUPT_CYCLES as u64);
}

#[test]
fn trace_records_show_decoded_instruction() {
    let mut cpu = cpu_at(0x0150);
    let mut bus = TracingBus::default();
    // 0x0150: LD A, 0x2A
    // 0x0152: JP 0x0150
    bus.inner.load(0x0150, &[0x3E, 0x2A, 0xC3, 0x50, 0x01]);

    cpu.tick(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(bus.records.len(), 2);
    let first = &bus.records[0];
    assert_eq!(first.address, 0x0150);
    assert_eq!(first.ticks, 1);
    assert_eq!(first.entry.mnemonic, "LD A,d8");

    let text = first.to_string();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("AF:01b0 BC:0013 DE:00d8 HL:014d PC:0152 SP:fffe"));
    assert!(header.contains("ZnHC"));
    assert!(header.ends_with("1 ticks"));
    assert_eq!(lines.next().unwrap(), "0x0150:  3e 2a     LD A,$2a");

    let second = bus.records[1].to_string();
    assert!(second.ends_with("0x0152:  c3 50 01  JP $0150"));
}

#[test]
fn prefixed_trace_lists_only_bytes_at_its_address() {
    let mut cpu = cpu_at(0x0200);
    let mut bus = TracingBus::default();
    // 0x0200: SWAP A
    bus.inner.load(0x0200, &[0xCB, 0x37]);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(bus.records.len(), 2);
    let escape = bus.records[0].to_string();
    assert!(escape.lines().nth(1).unwrap().starts_with("0x0200:  cb "));

    let swap = &bus.records[1];
    assert_eq!(swap.address, 0x0201);
    assert_eq!(
        swap.to_string().lines().nth(1).unwrap(),
        "0x0201:  37        SWAP A"
    );
}

#[test]
fn register_pairs_alias_for_every_value() {
    let mut regs = Registers::default();
    for value in 0..=u16::MAX {
        let [hi, lo] = value.to_be_bytes();

        regs.set_bc(value);
        regs.set_de(value);
        regs.set_hl(value);
        assert_eq!((regs.b(), regs.c()), (hi, lo));
        assert_eq!((regs.d(), regs.e()), (hi, lo));
        assert_eq!((regs.h(), regs.l()), (hi, lo));

        regs.set_af(value);
        assert_eq!(regs.a(), hi);
        assert_eq!(regs.f(), lo & 0xF0);

        regs.set_h(lo);
        regs.set_l(hi);
        assert_eq!(regs.hl(), u16::from_be_bytes([lo, hi]));
    }
}

#[test]
fn cp_immediate_leaves_a_and_sets_flags() {
    for (a, operand) in [(0x10u8, 0x10u8), (0x10, 0x01), (0x01, 0x10), (0x00, 0xFF)] {
        let mut cpu = cpu_at(0x0000);
        let mut bus = TestBus::default();
        bus.load(0x0000, &[0xFE, operand]);
        cpu.regs.set_a(a);

        assert_eq!(cpu.step(&mut bus).unwrap(), 8);
        assert_eq!(cpu.regs.a(), a);
        assert_eq!(cpu.get_flag(Flag::Z), a == operand);
        assert!(cpu.get_flag(Flag::N));
        assert_eq!(cpu.get_flag(Flag::H), (a & 0x0F) < (operand & 0x0F));
        assert_eq!(cpu.get_flag(Flag::C), a < operand);
    }
}

#[test]
fn every_conditional_branch_honours_its_condition() {
    // (opcode, length) for JR cc, JP cc, CALL cc, RET cc.
    let groups: [(u8, u16); 4] = [(0x20, 2), (0xC2, 3), (0xC4, 3), (0xC0, 1)];
    // Flag settings under which NZ, Z, NC, C hold.
    let holds = |cc: u8, z: bool, c: bool| match cc {
        0 => !z,
        1 => z,
        2 => !c,
        _ => c,
    };

    for (base, length) in groups {
        for cc in 0..4u8 {
            let opcode = base | (cc << 3);
            let entry = instructions::lookup(opcode as u16);
            for (z, c) in [(false, false), (true, false), (false, true), (true, true)] {
                let mut cpu = cpu_at(0x0200);
                let mut bus = TestBus::default();
                // Operands: JR +0x10, JP/CALL 0x4000. RET pops 0x1234.
                bus.load(0x0200, &[opcode, 0x00, 0x40]);
                if base == 0x20 {
                    bus.memory[0x0201] = 0x10;
                }
                cpu.regs.sp = 0xFFFC;
                bus.memory[0xFFFC] = 0x34;
                bus.memory[0xFFFD] = 0x12;
                cpu.set_flag(Flag::Z, z);
                cpu.set_flag(Flag::C, c);

                let cycles = cpu.step(&mut bus).unwrap();
                let next = 0x0200 + length;

                if holds(cc, z, c) {
                    assert_eq!(cycles, entry.cycles as u32, "{}", entry.mnemonic);
                    let target = match base {
                        0x20 => next + 0x10,
                        0xC0 => 0x1234,
                        _ => 0x4000,
                    };
                    assert_eq!(cpu.regs.pc, target, "{}", entry.mnemonic);
                } else {
                    assert_eq!(cycles, entry.cycles_not_taken as u32, "{}", entry.mnemonic);
                    assert_eq!(cpu.regs.pc, next, "{}", entry.mnemonic);
                    assert_eq!(cpu.regs.sp, 0xFFFC, "{}", entry.mnemonic);
                }
            }
        }
    }
}

#[test]
fn push_then_pop_restores_every_pair() {
    // PUSH rr ; POP rr for BC, DE, HL, AF.
    for (push, pop) in [(0xC5u8, 0xC1u8), (0xD5, 0xD1), (0xE5, 0xE1), (0xF5, 0xF1)] {
        let mut cpu = cpu_at(0x0000);
        let mut bus = TestBus::default();
        bus.load(0x0000, &[push, pop]);
        cpu.regs.sp = 0xDFF0;
        cpu.regs.set_bc(0x1122);
        cpu.regs.set_de(0x3344);
        cpu.regs.set_hl(0x5566);
        cpu.regs.set_af(0x77A0);
        let before = cpu.regs;

        cpu.step(&mut bus).unwrap();
        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.regs, before);
    }
}

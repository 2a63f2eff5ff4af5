use crate::cpu::instructions::Decoded;
use crate::cpu::{Bus, Cpu, Reg16, Reg8};
use crate::Result;

impl Cpu {
    pub(in crate::cpu) fn exec_ld<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        match opcode {
            // LD rr,d16
            0x01 | 0x11 | 0x21 | 0x31 => {
                self.regs.set16(Reg16::from_bits(opcode >> 4), ins.imm16());
            }
            // LD (BC),A / LD (DE),A / LD (HL+),A / LD (HL-),A
            0x02 | 0x12 | 0x22 | 0x32 => {
                let addr = self.indirect_address(opcode);
                bus.write8(addr, self.regs.a())?;
            }
            // LD A,(BC) / LD A,(DE) / LD A,(HL+) / LD A,(HL-)
            0x0A | 0x1A | 0x2A | 0x3A => {
                let addr = self.indirect_address(opcode);
                let value = bus.read8(addr);
                self.regs.set_a(value);
            }
            // LD r,d8 and LD (HL),d8
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                self.write_reg8(bus, Reg8::from_bits(opcode >> 3), ins.imm8())?;
            }
            // LD (a16),SP
            0x08 => {
                let [lo, hi] = self.regs.sp.to_le_bytes();
                let addr = ins.imm16();
                bus.write8(addr, lo)?;
                bus.write8(addr.wrapping_add(1), hi)?;
            }
            // LD r,r' (0x76 is HALT and never reaches here)
            0x40..=0x7F => {
                let value = self.read_reg8(bus, Reg8::from_bits(opcode));
                self.write_reg8(bus, Reg8::from_bits(opcode >> 3), value)?;
            }
            // LD (C),A
            0xE2 => {
                let addr = 0xFF00 | self.regs.c() as u16;
                bus.write8(addr, self.regs.a())?;
            }
            // LD A,(C)
            0xF2 => {
                let value = bus.read8(0xFF00 | self.regs.c() as u16);
                self.regs.set_a(value);
            }
            // LD (a16),A
            0xEA => bus.write8(ins.imm16(), self.regs.a())?,
            // LD A,(a16)
            0xFA => {
                let value = bus.read8(ins.imm16());
                self.regs.set_a(value);
            }
            // LD HL,SP+r8
            0xF8 => {
                let value = self.alu_add16_signed(self.regs.sp, ins.imm8());
                self.regs.set_hl(value);
            }
            // LD SP,HL
            0xF9 => self.regs.sp = self.regs.hl(),
            _ => return Err(ins.unimplemented()),
        }
        Ok(ins.cycles())
    }

    /// LDH (a8),A / LDH A,(a8).
    pub(in crate::cpu) fn exec_ldh<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let addr = 0xFF00 | ins.imm8() as u16;
        if ins.opcode() & 0x10 == 0 {
            bus.write8(addr, self.regs.a())?;
        } else {
            let value = bus.read8(addr);
            self.regs.set_a(value);
        }
        Ok(ins.cycles())
    }

    /// Address for the (BC)/(DE)/(HL+)/(HL-) forms; HL is stepped afterwards.
    fn indirect_address(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }
}

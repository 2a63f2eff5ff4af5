use crate::cpu::instructions::Decoded;
use crate::cpu::{Bus, Cpu};
use crate::Result;

impl Cpu {
    /// JP a16 / JP cc,a16 / JP HL.
    pub(in crate::cpu) fn exec_jp(&mut self, ins: &Decoded) -> Result<u32> {
        match ins.opcode() {
            0xE9 => self.regs.pc = self.regs.hl(),
            0xC3 => self.regs.pc = ins.imm16(),
            opcode => {
                if !self.cc_condition(opcode) {
                    return Ok(ins.cycles_not_taken());
                }
                self.regs.pc = ins.imm16();
            }
        }
        Ok(ins.cycles())
    }

    /// JR r8 / JR cc,r8. The displacement is relative to the next instruction.
    pub(in crate::cpu) fn exec_jr(&mut self, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        if opcode != 0x18 && !self.cc_condition(opcode) {
            return Ok(ins.cycles_not_taken());
        }
        let offset = ins.imm8() as i8 as i16 as u16;
        self.regs.pc = self.regs.pc.wrapping_add(offset);
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_call<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        if opcode != 0xCD && !self.cc_condition(opcode) {
            return Ok(ins.cycles_not_taken());
        }
        let ret = self.regs.pc;
        self.push_u16(bus, ret)?;
        self.regs.pc = ins.imm16();
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_ret<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        if opcode != 0xC9 && !self.cc_condition(opcode) {
            return Ok(ins.cycles_not_taken());
        }
        self.regs.pc = self.pop_u16(bus);
        Ok(ins.cycles())
    }

    /// RETI enables IME immediately, without the EI delay.
    pub(in crate::cpu) fn exec_reti<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_rst<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let ret = self.regs.pc;
        self.push_u16(bus, ret)?;
        self.regs.pc = (ins.opcode() & 0x38) as u16;
        Ok(ins.cycles())
    }
}

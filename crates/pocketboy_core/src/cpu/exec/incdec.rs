use crate::cpu::instructions::Decoded;
use crate::cpu::{Bus, Cpu, Reg16, Reg8};
use crate::Result;

impl Cpu {
    pub(in crate::cpu) fn exec_inc<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        if opcode & 0x07 == 0x03 {
            // INC rr: no flags.
            let reg = Reg16::from_bits(opcode >> 4);
            let value = self.regs.get16(reg).wrapping_add(1);
            self.regs.set16(reg, value);
        } else {
            let reg = Reg8::from_bits(opcode >> 3);
            let value = self.read_reg8(bus, reg);
            let result = self.alu_inc8(value);
            self.write_reg8(bus, reg, result)?;
        }
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_dec<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        if opcode & 0x07 == 0x03 {
            let reg = Reg16::from_bits(opcode >> 4);
            let value = self.regs.get16(reg).wrapping_sub(1);
            self.regs.set16(reg, value);
        } else {
            let reg = Reg8::from_bits(opcode >> 3);
            let value = self.read_reg8(bus, reg);
            let result = self.alu_dec8(value);
            self.write_reg8(bus, reg, result)?;
        }
        Ok(ins.cycles())
    }
}

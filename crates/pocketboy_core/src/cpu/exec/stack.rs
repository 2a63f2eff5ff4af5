use crate::cpu::instructions::Decoded;
use crate::cpu::{Bus, Cpu, Reg16Stack};
use crate::Result;

impl Cpu {
    pub(in crate::cpu) fn exec_push<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let value = self.regs.get16_stack(Reg16Stack::from_bits(ins.opcode() >> 4));
        self.push_u16(bus, value)?;
        Ok(ins.cycles())
    }

    /// POP AF drops the low nibble of F.
    pub(in crate::cpu) fn exec_pop<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let value = self.pop_u16(bus);
        self.regs.set16_stack(Reg16Stack::from_bits(ins.opcode() >> 4), value);
        Ok(ins.cycles())
    }
}

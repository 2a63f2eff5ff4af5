use crate::Result;

use super::instructions::{Decoded, Operation};
use super::{Bus, Cpu, Flag, Reg8};

impl Cpu {
    /// Rotates, shifts and SWAP from the CB page. The operand is in
    /// opcode bits 2..0.
    pub(super) fn exec_shift<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let reg = Reg8::from_bits(ins.opcode());
        let value = self.read_reg8(bus, reg);
        let carry_in = self.get_flag(Flag::C);

        let (result, carry_out) = match ins.entry.operation {
            Operation::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            Operation::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            Operation::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            Operation::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            Operation::Sla => (value << 1, value & 0x80 != 0),
            Operation::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Operation::Swap => (value.rotate_left(4), false),
            Operation::Srl => (value >> 1, value & 0x01 != 0),
            _ => return Err(ins.unimplemented()),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry_out);
        self.write_reg8(bus, reg, result)?;
        Ok(ins.cycles())
    }

    /// BIT/RES/SET b,r. The bit index is in opcode bits 5..3.
    pub(super) fn exec_bit_op<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        let reg = Reg8::from_bits(opcode);
        let mask = 1u8 << ((opcode >> 3) & 0x07);
        let value = self.read_reg8(bus, reg);

        match ins.entry.operation {
            Operation::Bit => {
                self.set_flag(Flag::Z, value & mask == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
            }
            Operation::Res => self.write_reg8(bus, reg, value & !mask)?,
            Operation::Set => self.write_reg8(bus, reg, value | mask)?,
            _ => return Err(ins.unimplemented()),
        }
        Ok(ins.cycles())
    }
}

use crate::cpu::instructions::{Decoded, Operation};
use crate::cpu::{Bus, Cpu, Flag, Reg16, Reg8};
use crate::Result;

impl Cpu {
    /// Right-hand operand of an 8-bit ALU op: a register in bits 2..0 for
    /// the 0x80..=0xBF block, the immediate byte for the 0xC6.. column.
    fn alu_operand<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> u8 {
        if ins.opcode() & 0xC0 == 0xC0 {
            ins.imm8()
        } else {
            self.read_reg8(bus, Reg8::from_bits(ins.opcode()))
        }
    }

    /// ADD A,x / ADD HL,rr / ADD SP,r8.
    pub(in crate::cpu) fn exec_add<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let opcode = ins.opcode();
        match opcode {
            0x09 | 0x19 | 0x29 | 0x39 => {
                let value = self.regs.get16(Reg16::from_bits(opcode >> 4));
                self.alu_add16_hl(value);
            }
            0xE8 => {
                self.regs.sp = self.alu_add16_signed(self.regs.sp, ins.imm8());
            }
            _ => {
                let value = self.alu_operand(bus, ins);
                self.alu_add(value, false);
            }
        }
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_alu8<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        let value = self.alu_operand(bus, ins);
        match ins.entry.operation {
            Operation::Adc => self.alu_add(value, true),
            Operation::Sub => self.alu_sub(value, false),
            Operation::Sbc => self.alu_sub(value, true),
            Operation::And => self.alu_and(value),
            Operation::Xor => self.alu_xor(value),
            Operation::Or => self.alu_or(value),
            Operation::Cp => self.alu_cp(value),
            _ => return Err(ins.unimplemented()),
        }
        Ok(ins.cycles())
    }

    /// RLCA/RRCA/RLA/RRA. Unlike the CB forms, Z is always cleared.
    pub(in crate::cpu) fn exec_rotate_a(&mut self, ins: &Decoded) -> Result<u32> {
        let a = self.regs.a();
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match ins.entry.operation {
            Operation::Rlca => (a.rotate_left(1), a & 0x80 != 0),
            Operation::Rrca => (a.rotate_right(1), a & 0x01 != 0),
            Operation::Rla => ((a << 1) | u8::from(carry_in), a & 0x80 != 0),
            Operation::Rra => ((a >> 1) | (u8::from(carry_in) << 7), a & 0x01 != 0),
            _ => return Err(ins.unimplemented()),
        };
        self.regs.set_a(result);
        self.clear_flags();
        self.set_flag(Flag::C, carry_out);
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_daa(&mut self, ins: &Decoded) -> Result<u32> {
        self.alu_daa();
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_cpl(&mut self, ins: &Decoded) -> Result<u32> {
        let a = self.regs.a();
        self.regs.set_a(!a);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_scf(&mut self, ins: &Decoded) -> Result<u32> {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_ccf(&mut self, ins: &Decoded) -> Result<u32> {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        Ok(ins.cycles())
    }
}

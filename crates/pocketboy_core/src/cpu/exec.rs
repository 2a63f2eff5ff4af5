mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use crate::{EmuError, Result};

use super::instructions::{Decoded, Operation};
use super::{Bus, Cpu};

impl Decoded {
    pub(super) fn unimplemented(&self) -> EmuError {
        EmuError::UnimplementedOpcode {
            opcode: self.entry.opcode,
            address: self.address,
            mnemonic: self.entry.mnemonic.as_str(),
        }
    }

    /// Cycles for the taken path, or the unconditional cost.
    #[inline]
    pub(super) fn cycles(&self) -> u32 {
        self.entry.cycles as u32
    }

    #[inline]
    pub(super) fn cycles_not_taken(&self) -> u32 {
        self.entry.cycles_not_taken as u32
    }
}

impl Cpu {
    /// Execute a decoded instruction and return the cycles it takes
    /// according to the table.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, ins: &Decoded) -> Result<u32> {
        match ins.entry.operation {
            Operation::Nop => Ok(ins.cycles()),

            Operation::Ld => self.exec_ld(bus, ins),
            Operation::Ldh => self.exec_ldh(bus, ins),

            Operation::Inc => self.exec_inc(bus, ins),
            Operation::Dec => self.exec_dec(bus, ins),

            Operation::Add => self.exec_add(bus, ins),
            Operation::Adc
            | Operation::Sub
            | Operation::Sbc
            | Operation::And
            | Operation::Xor
            | Operation::Or
            | Operation::Cp => self.exec_alu8(bus, ins),

            Operation::Rlca | Operation::Rrca | Operation::Rla | Operation::Rra => {
                self.exec_rotate_a(ins)
            }
            Operation::Daa => self.exec_daa(ins),
            Operation::Cpl => self.exec_cpl(ins),
            Operation::Scf => self.exec_scf(ins),
            Operation::Ccf => self.exec_ccf(ins),

            Operation::Jp => self.exec_jp(ins),
            Operation::Jr => self.exec_jr(ins),
            Operation::Call => self.exec_call(bus, ins),
            Operation::Ret => self.exec_ret(bus, ins),
            Operation::Reti => self.exec_reti(bus, ins),
            Operation::Rst => self.exec_rst(bus, ins),
            Operation::Push => self.exec_push(bus, ins),
            Operation::Pop => self.exec_pop(bus, ins),

            Operation::Di => self.exec_di(ins),
            Operation::Ei => self.exec_ei(ins),
            Operation::Halt => self.exec_halt(ins),
            Operation::Stop => self.exec_stop(ins),
            Operation::Prefix => self.exec_prefix(ins),

            Operation::Rlc
            | Operation::Rrc
            | Operation::Rl
            | Operation::Rr
            | Operation::Sla
            | Operation::Sra
            | Operation::Swap
            | Operation::Srl => self.exec_shift(bus, ins),
            Operation::Bit | Operation::Res | Operation::Set => self.exec_bit_op(bus, ins),

            Operation::Illegal => Err(EmuError::IllegalOpcode {
                opcode: ins.entry.opcode,
                address: ins.address,
            }),
        }
    }
}

use crate::cpu::instructions::Decoded;
use crate::cpu::Cpu;
use crate::Result;

impl Cpu {
    pub(in crate::cpu) fn exec_di(&mut self, ins: &Decoded) -> Result<u32> {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        Ok(ins.cycles())
    }

    /// IME becomes 1 after the next instruction completes.
    pub(in crate::cpu) fn exec_ei(&mut self, ins: &Decoded) -> Result<u32> {
        self.ime_enable_pending = true;
        Ok(ins.cycles())
    }

    pub(in crate::cpu) fn exec_halt(&mut self, ins: &Decoded) -> Result<u32> {
        self.halted = true;
        Ok(ins.cycles())
    }

    /// STOP waits for a joypad line, and there is no joypad.
    pub(in crate::cpu) fn exec_stop(&mut self, ins: &Decoded) -> Result<u32> {
        Err(ins.unimplemented())
    }

    /// The escape byte only switches the next fetch to the CB page.
    pub(in crate::cpu) fn exec_prefix(&mut self, ins: &Decoded) -> Result<u32> {
        self.prefixed = true;
        Ok(ins.cycles())
    }
}

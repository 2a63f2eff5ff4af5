use crate::Result;

use super::super::{Bus, Cpu, INTERRUPT_CYCLES};
use super::{PendingInterrupt, IF_ADDR};

impl Cpu {
    /// Deliver one interrupt if IME is set and something is pending.
    ///
    /// Returns `Some(cycles)` when an interrupt was taken.
    pub(in crate::cpu) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Result<Option<u32>> {
        if !self.ime {
            return Ok(None);
        }
        let Some(pending) = self.pending_interrupt(bus) else {
            return Ok(None);
        };

        self.ime = false;
        self.halted = false;

        match pending {
            PendingInterrupt::Line(irq) => {
                let iflags = bus.read8(IF_ADDR);
                bus.write8(IF_ADDR, iflags & !irq.flag().bits())?;
            }
            PendingInterrupt::StatLatch => self.stat_pending = false,
        }

        let pc = self.regs.pc;
        self.push_u16(bus, pc)?;
        let vector = pending.vector();
        self.regs.pc = vector;

        log::debug!(
            "CPU interrupt: {:?} vector=0x{:04X} return=0x{:04X} sp=0x{:04X}",
            pending,
            vector,
            pc,
            self.regs.sp,
        );

        Ok(Some(INTERRUPT_CYCLES))
    }
}

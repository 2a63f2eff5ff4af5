use super::super::{Bus, Cpu};
use super::{Interrupt, InterruptFlags, PendingInterrupt, IE_ADDR, IF_ADDR};

impl Cpu {
    /// Lines that are both requested and enabled.
    #[inline]
    pub(in crate::cpu) fn requested_and_enabled<B: Bus>(&self, bus: &mut B) -> InterruptFlags {
        let ie = bus.read8(IE_ADDR);
        let iflags = bus.read8(IF_ADDR);
        InterruptFlags::from_bits_truncate(ie & iflags)
    }

    /// Pick the highest-priority interrupt that is ready for delivery,
    /// ignoring IME.
    pub(in crate::cpu) fn pending_interrupt<B: Bus>(&self, bus: &mut B) -> Option<PendingInterrupt> {
        let pending = self.requested_and_enabled(bus);
        for irq in Interrupt::PRIORITY {
            if pending.contains(irq.flag()) {
                return Some(PendingInterrupt::Line(irq));
            }
            if irq == Interrupt::LcdStat && self.stat_pending {
                return Some(PendingInterrupt::StatLatch);
            }
        }
        None
    }
}

use crate::Result;

use super::interrupts::{InterruptFlags, IF_ADDR};
use super::trace::TraceRecord;

/// Abstraction over the console bus (memory and I/O) as seen by the CPU.
///
/// Reads never fail. Writes can: a store into the I/O window at an address
/// with no known register is a fatal emulation error.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8) -> Result<()>;

    /// Request an interrupt by OR-ing its bit into IF.
    ///
    /// This only raises the request; delivery happens at the top of a CPU
    /// tick when IME is set.
    fn request_interrupt(&mut self, irq: InterruptFlags) -> Result<()> {
        let pending = self.read8(IF_ADDR);
        self.write8(IF_ADDR, pending | irq.bits())
    }

    /// Whether `trace_instruction` wants records. The CPU skips building
    /// them when this is false.
    fn tracing(&self) -> bool {
        false
    }

    /// Hook called once per decoded instruction, before it executes.
    ///
    /// Default implementation does nothing; system buses can override this
    /// to write a trace log.
    fn trace_instruction(&mut self, _record: &TraceRecord) {}
}

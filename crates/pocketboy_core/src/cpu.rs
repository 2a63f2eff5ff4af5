mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
pub mod instructions;
pub mod interrupts;
mod regs;
mod step;
pub mod trace;

pub use bus::Bus;
pub use instructions::{
    AddressingMode, Decoded, FlagEffect, FlagEffects, InstructionEntry, Operation,
};
pub use interrupts::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR};
pub use regs::{Flag, Reg16, Reg16Stack, Reg8, RegisterPair, Registers};
pub use trace::TraceRecord;

/// Cycles charged for delivering an interrupt.
pub const INTERRUPT_CYCLES: u32 = 20;

/// Cycles a halted CPU idles for before checking IE & IF again.
pub const HALT_IDLE_CYCLES: u32 = 4;

/// What a call to [`Cpu::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    /// The previous instruction is still consuming its cycles.
    Waiting,
    /// An instruction was fetched and executed.
    Fetching,
    /// An interrupt was delivered instead of fetching.
    ServicingInterrupt,
    /// HALT is in effect and nothing is pending.
    Halted,
}

/// SM83 CPU core.
///
/// The CPU is driven one clock tick at a time by [`Cpu::tick`]. An
/// instruction executes in full on the tick it is fetched, and the CPU then
/// idles until its documented cycle count has elapsed.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Set after the 0xCB escape byte; the next fetch reads from the
    /// prefixed half of the instruction table.
    prefixed: bool,
    /// CPU-side STAT request latch. Not visible in IF and not masked by IE.
    stat_pending: bool,
    ticks: u64,
    wait_until: u64,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.f() & flag.mask() != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let f = self.regs.f();
        if value {
            self.regs.set_f(f | flag.mask());
        } else {
            self.regs.set_f(f & !flag.mask());
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.set_f(0);
    }

    /// Clock ticks seen so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Tick count at which the next fetch or interrupt check happens.
    #[inline]
    pub fn wait_until(&self) -> u64 {
        self.wait_until
    }

    /// True between the 0xCB escape byte and the opcode that follows it.
    #[inline]
    pub fn is_prefixed(&self) -> bool {
        self.prefixed
    }

    /// Latch a STAT interrupt request.
    ///
    /// It is delivered through the LCD STAT vector the next time IME allows,
    /// regardless of IE.
    pub fn trigger_stat_interrupt(&mut self) {
        self.stat_pending = true;
    }

    #[inline]
    pub fn stat_pending(&self) -> bool {
        self.stat_pending
    }
}

#[cfg(test)]
mod tests;

use std::fmt;
use std::io::Write;

use super::{Memory, Serial, Timer};
use crate::cpu::{Bus, InterruptFlags};
use crate::Result;

mod dump;
mod mmio;
mod traits;

/// Number of registers in the I/O window.
const IO_REGISTER_COUNT: usize = 0x80;

/// The system bus: owns memory and the peripherals that sit on it.
///
/// All CPU traffic goes through here. Plain reads and writes go straight to
/// [`Memory`]; writes into the I/O window go through the register dispatch
/// in `mmio`.
pub struct SystemBus {
    memory: Memory,
    timer: Timer,
    serial: Serial,
    tracer: Option<Box<dyn Write + Send>>,
    /// I/O registers already reported as stored-but-not-emulated.
    warned_io: [bool; IO_REGISTER_COUNT],
}

impl fmt::Debug for SystemBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemBus")
            .field("timer", &self.timer)
            .field("serial", &self.serial)
            .field("tracing", &self.tracer.is_some())
            .finish_non_exhaustive()
    }
}

impl SystemBus {
    pub fn new(memory: Memory) -> Self {
        Self {
            memory,
            timer: Timer::new(),
            serial: Serial::new(),
            tracer: None,
            warned_io: [false; IO_REGISTER_COUNT],
        }
    }

    #[inline]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    #[inline]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[inline]
    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    #[inline]
    pub fn serial_mut(&mut self) -> &mut Serial {
        &mut self.serial
    }

    /// Send one trace record per executed instruction to `tracer`.
    pub fn set_tracer(&mut self, tracer: Box<dyn Write + Send>) {
        self.tracer = Some(tracer);
    }

    /// Read without going through the CPU-facing trait.
    #[inline]
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory.read8(addr)
    }

    /// Advance the timer by one clock tick and raise its interrupt on
    /// overflow.
    pub fn tick_timer(&mut self) -> Result<()> {
        if self.timer.tick(&mut self.memory) {
            self.request_interrupt(InterruptFlags::TIMER)?;
        }
        Ok(())
    }
}

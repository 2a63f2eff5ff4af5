use crate::cpu::{Bus, Cpu};
use crate::Result;

use super::{CoreConfig, Memory, SystemBus};

/// The whole machine: CPU plus system bus.
///
/// [`Board::tick`] is the single clock input. Each tick advances the timer
/// first, then the CPU, so a timer overflow is visible to the CPU on the
/// same tick.
#[derive(Debug)]
pub struct Board {
    pub cpu: Cpu,
    pub bus: SystemBus,
}

impl Board {
    /// Build a board around the cartridge named in `config`.
    pub fn new(config: CoreConfig) -> Result<Self> {
        let memory = Memory::new(&config)?;
        Ok(Self::with_memory(memory))
    }

    /// Build a board around an in-memory cartridge image.
    pub fn from_rom(image: Vec<u8>) -> Result<Self> {
        let memory = Memory::from_rom(image)?;
        Ok(Self::with_memory(memory))
    }

    fn with_memory(memory: Memory) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: SystemBus::new(memory),
        }
    }

    /// Put the CPU back into its post-boot state. Memory is left alone.
    pub fn reset_cpu(&mut self) {
        self.cpu.reset();
    }

    pub fn tick(&mut self) -> Result<()> {
        self.bus.tick_timer()?;
        self.cpu.tick(&mut self.bus)?;
        Ok(())
    }

    /// Tick until `max_ticks` have elapsed or an error stops the machine.
    pub fn run(&mut self, max_ticks: u64) -> Result<()> {
        for _ in 0..max_ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Read a byte the way the CPU would see it.
    #[inline]
    pub fn read8(&mut self, addr: u16) -> u8 {
        self.bus.read8(addr)
    }

    pub fn hex_dump(&self, start: u16, count: u16) -> String {
        self.bus.hex_dump(start, count)
    }
}

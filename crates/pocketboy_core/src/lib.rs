pub mod cpu;
mod error;
pub mod machine;

pub use cpu::{Bus, Cpu, CpuState, TraceRecord};
pub use error::{EmuError, Result};
pub use machine::{Board, CoreConfig, SystemBus};

/// Address the CPU starts executing cartridge code from after the boot ROM.
pub const ENTRY_POINT: u16 = 0x0100;

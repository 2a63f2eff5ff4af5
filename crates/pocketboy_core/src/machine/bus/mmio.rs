use super::super::io::{self, IO_WINDOW};
use super::SystemBus;
use crate::cpu::{Bus, InterruptFlags};
use crate::{EmuError, Result};

impl SystemBus {
    /// Store into an I/O register, applying its side effects.
    pub(crate) fn io_write(&mut self, addr: u16, value: u8) -> Result<()> {
        if !IO_WINDOW.contains(&addr) {
            return Err(EmuError::IoDispatchOutOfRange { address: addr });
        }

        match addr {
            io::DIV => self.memory.write8(addr, 0),
            io::TAC => {
                self.timer.set_tac(value);
                self.memory.write8(addr, value);
            }
            io::SC => {
                self.memory.write8(addr, value);
                if value & io::SC_START_INTERNAL == io::SC_START_INTERNAL {
                    self.start_serial_transfer(value)?;
                }
            }
            io::P1 | io::SB | io::TIMA | io::TMA | io::IF | io::BOOT_ROM_DISABLE => {
                self.memory.write8(addr, value);
            }
            a if io::SOUND.contains(&a) || io::LCD.contains(&a) => {
                self.note_unemulated(addr, value);
                self.memory.write8(addr, value);
            }
            _ => {
                log::error!(
                    "Write of 0x{:02x} to unmapped I/O register 0x{:04x}",
                    value,
                    addr
                );
                return Err(EmuError::UnmappedIo {
                    address: addr,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Shift SB out at once, then report the transfer as complete.
    fn start_serial_transfer(&mut self, sc: u8) -> Result<()> {
        let byte = self.memory.read8(io::SB);
        self.serial.emit(byte);
        self.memory.write8(io::SC, sc & !0x80);
        self.request_interrupt(InterruptFlags::SERIAL)
    }

    fn note_unemulated(&mut self, addr: u16, value: u8) {
        let slot = (addr - *IO_WINDOW.start()) as usize;
        if self.warned_io[slot] {
            log::debug!(
                "{} (0x{:04x}) <- 0x{:02x}",
                io::register_name(addr),
                addr,
                value
            );
        } else {
            self.warned_io[slot] = true;
            log::warn!(
                "{} (0x{:04x}) is not emulated; storing 0x{:02x}",
                io::register_name(addr),
                addr,
                value
            );
        }
    }
}

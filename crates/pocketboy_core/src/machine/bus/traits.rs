use std::io::Write;

use super::super::io::IO_WINDOW;
use super::SystemBus;
use crate::cpu::{Bus, TraceRecord};
use crate::Result;

impl Bus for SystemBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory.read8(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<()> {
        if IO_WINDOW.contains(&addr) {
            self.io_write(addr, value)
        } else {
            self.memory.write8(addr, value);
            Ok(())
        }
    }

    #[inline]
    fn tracing(&self) -> bool {
        self.tracer.is_some()
    }

    fn trace_instruction(&mut self, record: &TraceRecord) {
        if let Some(tracer) = self.tracer.as_mut() {
            if let Err(err) = writeln!(tracer, "{record}") {
                log::warn!("Trace write failed, tracing disabled: {}", err);
                self.tracer = None;
            }
        }
    }
}

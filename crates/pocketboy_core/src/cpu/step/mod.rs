use crate::Result;

use super::instructions::{self, Decoded, Operation, PREFIX_BASE, PREFIX_CYCLES};
use super::trace::TraceRecord;
use super::{Bus, Cpu, CpuState, HALT_IDLE_CYCLES};

impl Cpu {
    /// Advance the CPU by one clock tick.
    ///
    /// While the current instruction's cycles are still elapsing this only
    /// counts the tick. Otherwise one interrupt is delivered or one
    /// instruction is fetched and executed, and the CPU waits out its
    /// cycle count from here.
    pub fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<CpuState> {
        self.ticks += 1;
        if self.ticks < self.wait_until {
            return Ok(CpuState::Waiting);
        }
        let (state, cycles) = self.advance(bus)?;
        self.wait_until = self.ticks + cycles as u64;
        Ok(state)
    }

    /// Execute a single instruction (or deliver an interrupt) right away
    /// and return the number of cycles it takes.
    ///
    /// The CB escape byte counts as its own step.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        self.advance(bus).map(|(_, cycles)| cycles)
    }

    fn advance<B: Bus>(&mut self, bus: &mut B) -> Result<(CpuState, u32)> {
        // Nothing may come between the escape byte and its opcode.
        if !self.prefixed {
            if let Some(cycles) = self.handle_interrupts(bus)? {
                return Ok((CpuState::ServicingInterrupt, cycles));
            }

            if self.halted {
                if self.requested_and_enabled(bus).is_empty() && !self.stat_pending {
                    return Ok((CpuState::Halted, HALT_IDLE_CYCLES));
                }
                // Wake without servicing when IME is clear.
                self.halted = false;
            }
        }

        let decoded = self.decode(bus);
        if bus.tracing() {
            bus.trace_instruction(&TraceRecord::new(&decoded, &self.regs, self.ticks));
        }

        let mut cycles = self.execute(bus, &decoded)?;
        if decoded.entry.is_prefixed() {
            // The escape byte's share was charged when it executed.
            cycles = cycles.saturating_sub(PREFIX_CYCLES);
        }
        if decoded.entry.operation != Operation::Prefix {
            self.apply_ime_delay();
        }

        Ok((CpuState::Fetching, cycles))
    }

    /// Fetch the opcode at PC and as many operand bytes as its addressing
    /// mode needs.
    fn decode<B: Bus>(&mut self, bus: &mut B) -> Decoded {
        let address = self.regs.pc;
        let byte = self.fetch8(bus) as u16;
        let opcode = if std::mem::take(&mut self.prefixed) {
            PREFIX_BASE | byte
        } else {
            byte
        };
        let entry = instructions::lookup(opcode);

        let mut operands = [0u8; 2];
        for slot in operands.iter_mut().take(entry.mode.operand_len() as usize) {
            *slot = self.fetch8(bus);
        }

        Decoded {
            address,
            entry,
            operands,
        }
    }
}

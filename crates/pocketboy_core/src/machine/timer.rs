use super::io::{DIV, TIMA, TMA};
use super::Memory;

/// Input clock divisors in machine cycles, indexed by TAC bits 1..0.
pub const DIVISORS: [u64; 4] = [256, 4, 16, 64];

/// Clock ticks per machine cycle.
const TICKS_PER_M_CYCLE: u64 = 4;
/// Clock ticks per DIV increment.
const TICKS_PER_DIV: u64 = 256;

/// Divider and timer counter.
///
/// Counts clock ticks itself and updates DIV and TIMA in memory. TAC is
/// mirrored here through [`Timer::set_tac`] when the bus sees a TAC write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    t_ticks: u64,
    m_ticks: u64,
    enabled: bool,
    divisor: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            t_ticks: 0,
            m_ticks: 0,
            enabled: false,
            divisor: DIVISORS[0],
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    pub fn set_tac(&mut self, tac: u8) {
        self.enabled = tac & 0x04 != 0;
        self.divisor = DIVISORS[(tac & 0x03) as usize];
        log::debug!(
            "Timer TAC=0x{:02x} enabled={} divisor={}",
            tac,
            self.enabled,
            self.divisor
        );
    }

    /// Advance one clock tick. Returns true when TIMA overflowed and the
    /// timer interrupt should be requested.
    pub fn tick(&mut self, memory: &mut Memory) -> bool {
        self.t_ticks += 1;

        if self.t_ticks % TICKS_PER_DIV == 0 {
            // Raw store; a CPU write to DIV would clear it.
            let div = memory.read8(DIV);
            memory.write8(DIV, div.wrapping_add(1));
        }

        if self.t_ticks % TICKS_PER_M_CYCLE != 0 {
            return false;
        }
        self.m_ticks += 1;

        if !self.enabled || self.m_ticks % self.divisor != 0 {
            return false;
        }

        let tima = memory.read8(TIMA);
        if tima == 0xFF {
            let tma = memory.read8(TMA);
            memory.write8(TIMA, tma);
            log::debug!("Timer overflow, TIMA reloaded with 0x{:02x}", tma);
            true
        } else {
            memory.write8(TIMA, tima + 1);
            false
        }
    }
}

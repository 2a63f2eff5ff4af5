use super::super::Cpu;

impl Cpu {
    /// Advance the delayed IME enable requested by EI.
    ///
    /// Called once after every completed instruction, EI included, so IME
    /// turns on after the instruction that follows EI.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}

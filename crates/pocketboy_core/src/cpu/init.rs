use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            prefixed: false,
            stat_pending: false,
            ticks: 0,
            wait_until: 0,
        };
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// Return to the state the CPU is in right after the boot ROM.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Registers as the DMG boot ROM leaves them when it jumps to 0x0100.
    fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = crate::ENTRY_POINT;

        // Cartridge code enables interrupts itself.
        self.ime = false;
    }
}

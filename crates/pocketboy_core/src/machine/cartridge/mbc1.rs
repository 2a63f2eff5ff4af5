/// MBC1 ROM banking.
///
/// Bank 0 is fixed at 0x0000..=0x3FFF and 0x4000..=0x7FFF shows the
/// selected bank. Only the 5-bit bank register is modelled; RAM enable,
/// the upper bank bits and the banking mode switch are not, so any ROM
/// write lands in the bank register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mbc1 {
    bank: u8,
}

impl Default for Mbc1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mbc1 {
    pub fn new() -> Self {
        Self { bank: 1 }
    }

    /// Currently selected switchable bank (never 0).
    #[inline]
    pub fn bank(&self) -> u8 {
        self.bank
    }

    pub(super) fn cart_address(&self, addr: u16) -> usize {
        if addr < 0x4000 {
            return addr as usize;
        }
        self.bank as usize * 0x4000 + (addr as usize - 0x4000)
    }

    /// Every write into the ROM window is a bank select. Bank 0 cannot be
    /// mapped into the switchable window, so a zero selects bank 1.
    pub(super) fn write(&mut self, addr: u16, value: u8) {
        let bank = value & 0x1F;
        self.bank = if bank == 0 { 1 } else { bank };
        log::debug!("MBC1 bank select via 0x{:04X}: {}", addr, self.bank);
    }
}

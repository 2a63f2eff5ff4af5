mod header;
mod mbc1;

pub use header::CartridgeHeader;
pub use mbc1::Mbc1;

use crate::{EmuError, Result};

/// Header offset of the cartridge type byte.
pub const CARTRIDGE_TYPE_ADDR: usize = 0x0147;

/// Maps logical ROM addresses onto offsets in the cartridge image and
/// swallows writes aimed at the ROM region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BankController {
    /// 32 KiB cartridges wired straight to the bus.
    #[default]
    NoBanking,
    Mbc1(Mbc1),
}

impl BankController {
    /// Pick the controller named by the header's cartridge type byte.
    pub fn from_type(code: u8) -> Result<Self> {
        match code {
            0x00 => Ok(BankController::NoBanking),
            0x01 => Ok(BankController::Mbc1(Mbc1::new())),
            code => Err(EmuError::UnknownCartridgeType { code }),
        }
    }

    /// Controller for a cartridge image. An image too short to carry a
    /// header gets no banking.
    pub fn for_image(image: &[u8]) -> Result<Self> {
        match image.get(CARTRIDGE_TYPE_ADDR) {
            Some(&code) => Self::from_type(code),
            None => Ok(BankController::NoBanking),
        }
    }

    /// Offset into the cartridge image for a CPU address in 0x0000..=0x7FFF.
    #[inline]
    pub fn cart_address(&self, addr: u16) -> usize {
        match self {
            BankController::NoBanking => addr as usize,
            BankController::Mbc1(m) => m.cart_address(addr),
        }
    }

    /// A CPU write into the ROM region. The image itself never changes.
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        match self {
            BankController::NoBanking => {}
            BankController::Mbc1(m) => m.write(addr, value),
        }
    }
}

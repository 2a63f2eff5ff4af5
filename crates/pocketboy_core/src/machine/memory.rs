use super::cartridge::{BankController, CartridgeHeader};
use super::io::{LY, LY_POWER_ON};
use super::{CoreConfig, MEMORY_SIZE};
use crate::Result;

/// Highest address served by the cartridge image.
const CART_END: u16 = 0x7FFF;
const ECHO_START: u16 = 0xE000;
const ECHO_END: u16 = 0xFDFF;
const UNUSABLE_START: u16 = 0xFEA0;
const UNUSABLE_END: u16 = 0xFEFF;

/// Flat 64 KiB store plus the cartridge image.
///
/// Reads below 0x8000 come from the cartridge through the bank controller;
/// everything else lives in `ram`, including the I/O registers. Writes here
/// are raw stores: register side effects belong to the bus.
#[derive(Clone, Debug)]
pub struct Memory {
    ram: Vec<u8>,
    cart: Vec<u8>,
    controller: BankController,
    header: Option<CartridgeHeader>,
}

impl Memory {
    /// Load the configured cartridge.
    ///
    /// A missing path or unreadable file is logged and leaves the machine
    /// with an empty cartridge. An unsupported cartridge type is an error.
    pub fn new(config: &CoreConfig) -> Result<Self> {
        let image = match &config.cartridge {
            None => {
                log::error!("No cartridge file configured");
                Vec::new()
            }
            Some(path) => match std::fs::read(path) {
                Ok(image) => {
                    log::info!(
                        "Loaded cartridge {} ({} bytes)",
                        path.display(),
                        image.len()
                    );
                    image
                }
                Err(err) => {
                    log::error!("Unable to open cartridge file {}: {}", path.display(), err);
                    Vec::new()
                }
            },
        };
        Self::from_rom(image)
    }

    pub fn from_rom(image: Vec<u8>) -> Result<Self> {
        let controller = BankController::for_image(&image)?;
        let header = CartridgeHeader::parse(&image);
        if let Some(header) = &header {
            header.log_summary();
        }

        let mut ram = vec![0u8; MEMORY_SIZE];
        ram[LY as usize] = LY_POWER_ON;

        Ok(Self {
            ram,
            cart: image,
            controller,
            header,
        })
    }

    #[inline]
    pub fn controller(&self) -> &BankController {
        &self.controller
    }

    #[inline]
    pub fn header(&self) -> Option<&CartridgeHeader> {
        self.header.as_ref()
    }

    /// The cartridge image as loaded.
    #[inline]
    pub fn cartridge(&self) -> &[u8] {
        &self.cart
    }

    pub fn read8(&self, addr: u16) -> u8 {
        let addr = Self::resolve(addr);
        if addr <= CART_END {
            let offset = self.controller.cart_address(addr);
            return self.cart.get(offset).copied().unwrap_or(0xFF);
        }
        self.ram[addr as usize]
    }

    pub fn write8(&mut self, addr: u16, value: u8) {
        let addr = Self::resolve(addr);
        if addr <= CART_END {
            self.controller.write(addr, value);
            return;
        }
        self.ram[addr as usize] = value;
    }

    /// Fold echo RAM onto work RAM and flag the unusable range.
    #[inline]
    fn resolve(addr: u16) -> u16 {
        match addr {
            ECHO_START..=ECHO_END => addr - 0x2000,
            UNUSABLE_START..=UNUSABLE_END => {
                log::warn!("Access to unusable memory at 0x{:04x}", addr);
                addr
            }
            _ => addr,
        }
    }
}

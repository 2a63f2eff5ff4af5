use std::ops::RangeInclusive;

const TITLE: RangeInclusive<usize> = 0x0134..=0x0143;
const NEW_LICENSEE: RangeInclusive<usize> = 0x0144..=0x0145;
const CARTRIDGE_TYPE: usize = 0x0147;
const ROM_SIZE: usize = 0x0148;
const RAM_SIZE: usize = 0x0149;
const DESTINATION: usize = 0x014A;
const OLD_LICENSEE: usize = 0x014B;
const HEADER_CHECKSUM: usize = 0x014D;
const GLOBAL_CHECKSUM: usize = 0x014E;
/// Bytes covered by the header checksum.
const CHECKSUMMED: RangeInclusive<usize> = 0x0134..=0x014C;
/// First byte past the header.
const HEADER_END: usize = 0x0150;

/// Decoded cartridge header (0x0100..=0x014F).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub new_licensee: String,
    pub cartridge_type: u8,
    pub rom_size: u8,
    pub ram_size: u8,
    pub destination: u8,
    pub old_licensee: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
    computed_checksum: u8,
}

impl CartridgeHeader {
    /// Parse the header out of a cartridge image. Returns `None` when the
    /// image ends before the header does.
    pub fn parse(image: &[u8]) -> Option<Self> {
        if image.len() < HEADER_END {
            return None;
        }

        let title_bytes = &image[TITLE];
        let title_len = title_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(title_bytes.len());
        let title = String::from_utf8_lossy(&title_bytes[..title_len]).into_owned();
        let new_licensee = String::from_utf8_lossy(&image[NEW_LICENSEE]).into_owned();

        let computed_checksum = image[CHECKSUMMED]
            .iter()
            .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1));

        Some(Self {
            title,
            new_licensee,
            cartridge_type: image[CARTRIDGE_TYPE],
            rom_size: image[ROM_SIZE],
            ram_size: image[RAM_SIZE],
            destination: image[DESTINATION],
            old_licensee: image[OLD_LICENSEE],
            header_checksum: image[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([image[GLOBAL_CHECKSUM], image[GLOBAL_CHECKSUM + 1]]),
            computed_checksum,
        })
    }

    pub fn cartridge_type_name(&self) -> &'static str {
        match self.cartridge_type {
            0x00 => "ROM ONLY",
            0x01 => "MBC1",
            0x02 => "MBC1+RAM",
            0x03 => "MBC1+RAM+BATTERY",
            0x05 => "MBC2",
            0x06 => "MBC2+BATTERY",
            0x08 => "ROM+RAM",
            0x09 => "ROM+RAM+BATTERY",
            0x0B => "MMM01",
            0x0C => "MMM01+RAM",
            0x0D => "MMM01+RAM+BATTERY",
            0x0F => "MBC3+TIMER+BATTERY",
            0x10 => "MBC3+TIMER+RAM+BATTERY",
            0x11 => "MBC3",
            0x12 => "MBC3+RAM",
            0x13 => "MBC3+RAM+BATTERY",
            0x19 => "MBC5",
            0x1A => "MBC5+RAM",
            0x1B => "MBC5+RAM+BATTERY",
            0x1C => "MBC5+RUMBLE",
            0x1D => "MBC5+RUMBLE+RAM",
            0x1E => "MBC5+RUMBLE+RAM+BATTERY",
            0x20 => "MBC6",
            0x22 => "MBC7+SENSOR+RUMBLE+RAM+BATTERY",
            0xFC => "POCKET CAMERA",
            0xFD => "BANDAI TAMA5",
            0xFE => "HuC3",
            0xFF => "HuC1+RAM+BATTERY",
            _ => "unknown",
        }
    }

    pub fn rom_size_name(&self) -> &'static str {
        match self.rom_size {
            0x00 => "32 KiB",
            0x01 => "64 KiB",
            0x02 => "128 KiB",
            0x03 => "256 KiB",
            0x04 => "512 KiB",
            0x05 => "1 MiB",
            0x06 => "2 MiB",
            0x07 => "4 MiB",
            0x08 => "8 MiB",
            _ => "unknown",
        }
    }

    pub fn ram_size_name(&self) -> &'static str {
        match self.ram_size {
            0x00 => "No RAM",
            0x01 => "Public domain cartridge",
            0x02 => "8 KiB",
            0x03 => "32 KiB",
            0x04 => "128 KiB",
            0x05 => "64 KiB",
            _ => "unknown",
        }
    }

    /// Checksum over 0x0134..=0x014C as the boot ROM computes it.
    #[inline]
    pub fn computed_checksum(&self) -> u8 {
        self.computed_checksum
    }

    #[inline]
    pub fn checksum_ok(&self) -> bool {
        self.computed_checksum == self.header_checksum
    }

    pub fn log_summary(&self) {
        log::info!("Cartridge header:");
        log::info!("   Title = {}", self.title);
        log::info!("   Old licensee code = 0x{:02x}", self.old_licensee);
        log::info!("   New licensee code = {}", self.new_licensee);
        log::info!(
            "   Cartridge type = 0x{:02x} ( {} )",
            self.cartridge_type,
            self.cartridge_type_name()
        );
        log::info!(
            "   ROM size = 0x{:02x} ( {} )",
            self.rom_size,
            self.rom_size_name()
        );
        log::info!(
            "   RAM size = 0x{:02x} ( {} )",
            self.ram_size,
            self.ram_size_name()
        );
        log::info!("   Destination code = 0x{:02x}", self.destination);
        log::info!("   Header checksum = 0x{:02x}", self.header_checksum);
        log::info!("   Global checksum = 0x{:04x}", self.global_checksum);
        if !self.checksum_ok() {
            log::warn!(
                "Header checksum mismatch: stored 0x{:02x}, computed 0x{:02x}",
                self.header_checksum,
                self.computed_checksum
            );
        }
    }
}

//! Addresses of the memory-mapped I/O registers the core knows about.

use std::ops::RangeInclusive;

/// The I/O register window.
pub const IO_WINDOW: RangeInclusive<u16> = 0xFF00..=0xFF7F;

pub const P1: u16 = 0xFF00;
pub const SB: u16 = 0xFF01;
pub const SC: u16 = 0xFF02;
pub const DIV: u16 = 0xFF04;
pub const TIMA: u16 = 0xFF05;
pub const TMA: u16 = 0xFF06;
pub const TAC: u16 = 0xFF07;
pub const IF: u16 = 0xFF0F;
pub const LCDC: u16 = 0xFF40;
pub const LY: u16 = 0xFF44;
/// Writing here unmaps the boot ROM.
pub const BOOT_ROM_DISABLE: u16 = 0xFF50;

/// Sound registers and wave RAM. Stored but not emulated.
pub const SOUND: RangeInclusive<u16> = 0xFF10..=0xFF3F;
/// LCD registers LCDC..=WX. Stored but not emulated.
pub const LCD: RangeInclusive<u16> = 0xFF40..=0xFF4B;

/// SC value that starts a transfer on the internal clock.
pub const SC_START_INTERNAL: u8 = 0x81;

/// LY at power-on. Code that polls for vertical blank sees line 144.
pub const LY_POWER_ON: u8 = 0x90;

/// Human-readable register name for log messages.
pub fn register_name(addr: u16) -> &'static str {
    match addr {
        P1 => "P1",
        SB => "SB",
        SC => "SC",
        DIV => "DIV",
        TIMA => "TIMA",
        TMA => "TMA",
        TAC => "TAC",
        IF => "IF",
        0xFF10..=0xFF14 => "NR1x",
        0xFF16..=0xFF19 => "NR2x",
        0xFF1A..=0xFF1E => "NR3x",
        0xFF20..=0xFF23 => "NR4x",
        0xFF24 => "NR50",
        0xFF25 => "NR51",
        0xFF26 => "NR52",
        0xFF30..=0xFF3F => "WAVE",
        LCDC => "LCDC",
        0xFF41 => "STAT",
        0xFF42 => "SCY",
        0xFF43 => "SCX",
        LY => "LY",
        0xFF45 => "LYC",
        0xFF46 => "DMA",
        0xFF47 => "BGP",
        0xFF48 => "OBP0",
        0xFF49 => "OBP1",
        0xFF4A => "WY",
        0xFF4B => "WX",
        BOOT_ROM_DISABLE => "BOOT",
        _ => "?",
    }
}

mod ime;
mod poll;
mod service;

use bitflags::bitflags;

/// Interrupt request register.
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register.
pub const IE_ADDR: u16 = 0xFFFF;

bitflags! {
    /// Interrupt lines as laid out in IF and IE.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// A single interrupt source, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// Highest priority first.
    pub const PRIORITY: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub const fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::LcdStat => InterruptFlags::LCD_STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Handler address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + 8 * self as u16
    }
}

/// What the CPU will deliver next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::cpu) enum PendingInterrupt {
    /// A line set in both IE and IF.
    Line(Interrupt),
    /// The CPU-side STAT latch; it shares the LCD STAT vector but has no IE bit.
    StatLatch,
}

impl PendingInterrupt {
    pub(in crate::cpu) fn vector(self) -> u16 {
        match self {
            PendingInterrupt::Line(irq) => irq.vector(),
            PendingInterrupt::StatLatch => Interrupt::LcdStat.vector(),
        }
    }
}

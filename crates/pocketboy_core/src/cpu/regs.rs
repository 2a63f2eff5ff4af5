/// One 16-bit register pair with byte views onto the same storage.
///
/// The high byte is the first-named register of the pair (A in AF, B in BC,
/// ...). Both halves live in `value`, so a write through either view is
/// immediately visible through the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair(u16);

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub const fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn lo(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_hi(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | ((value as u16) << 8);
    }

    #[inline]
    pub fn set_lo(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }
}

/// Registers for the SM83 CPU.
///
/// AF, BC, DE and HL are register pairs; SP and PC are plain 16-bit values.
/// The low nibble of F is always zero, which `set_f`/`set_af` enforce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    af: RegisterPair,
    bc: RegisterPair,
    de: RegisterPair,
    hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_hi(value);
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.af.lo()
    }

    #[inline]
    pub fn set_f(&mut self, value: u8) {
        // Lower 4 bits of F are always zero.
        self.af.set_lo(value & 0xF0);
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.bc.hi()
    }

    #[inline]
    pub fn set_b(&mut self, value: u8) {
        self.bc.set_hi(value);
    }

    #[inline]
    pub fn c(&self) -> u8 {
        self.bc.lo()
    }

    #[inline]
    pub fn set_c(&mut self, value: u8) {
        self.bc.set_lo(value);
    }

    #[inline]
    pub fn d(&self) -> u8 {
        self.de.hi()
    }

    #[inline]
    pub fn set_d(&mut self, value: u8) {
        self.de.set_hi(value);
    }

    #[inline]
    pub fn e(&self) -> u8 {
        self.de.lo()
    }

    #[inline]
    pub fn set_e(&mut self, value: u8) {
        self.de.set_lo(value);
    }

    #[inline]
    pub fn h(&self) -> u8 {
        self.hl.hi()
    }

    #[inline]
    pub fn set_h(&mut self, value: u8) {
        self.hl.set_hi(value);
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.hl.lo()
    }

    #[inline]
    pub fn set_l(&mut self, value: u8) {
        self.hl.set_lo(value);
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.get()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        self.af.set(value & 0xFFF0);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.get()
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc.set(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.get()
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de.set(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.get()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set(value);
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// 8-bit operand selector decoded from a 3-bit opcode field.
///
/// Slot 6 does not name a register: it selects the byte at the address in HL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg8 {
    B,
    C,
    D,
    E,
    H,
    L,
    IndirectHl,
    A,
}

impl Reg8 {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Reg8::B,
            1 => Reg8::C,
            2 => Reg8::D,
            3 => Reg8::E,
            4 => Reg8::H,
            5 => Reg8::L,
            6 => Reg8::IndirectHl,
            _ => Reg8::A,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
            Reg8::IndirectHl => "(HL)",
            Reg8::A => "A",
        }
    }
}

/// 16-bit selector used by loads, INC/DEC and ADD HL (bits 5..4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
}

impl Reg16 {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::SP,
        }
    }
}

/// 16-bit selector used by PUSH/POP, where slot 3 is AF instead of SP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16Stack {
    BC,
    DE,
    HL,
    AF,
}

impl Reg16Stack {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reg16Stack::BC,
            1 => Reg16Stack::DE,
            2 => Reg16Stack::HL,
            _ => Reg16Stack::AF,
        }
    }
}

impl Registers {
    /// Read an 8-bit register. `IndirectHl` is a memory operand and must be
    /// resolved by the caller; it reads as 0 here.
    #[inline]
    pub fn get8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::B => self.b(),
            Reg8::C => self.c(),
            Reg8::D => self.d(),
            Reg8::E => self.e(),
            Reg8::H => self.h(),
            Reg8::L => self.l(),
            Reg8::A => self.a(),
            Reg8::IndirectHl => 0,
        }
    }

    /// Write an 8-bit register. Writes to `IndirectHl` are ignored here for
    /// the same reason as in `get8`.
    #[inline]
    pub fn set8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::B => self.set_b(value),
            Reg8::C => self.set_c(value),
            Reg8::D => self.set_d(value),
            Reg8::E => self.set_e(value),
            Reg8::H => self.set_h(value),
            Reg8::L => self.set_l(value),
            Reg8::A => self.set_a(value),
            Reg8::IndirectHl => {}
        }
    }

    #[inline]
    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
        }
    }

    #[inline]
    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
        }
    }

    #[inline]
    pub fn get16_stack(&self, reg: Reg16Stack) -> u16 {
        match reg {
            Reg16Stack::BC => self.bc(),
            Reg16Stack::DE => self.de(),
            Reg16Stack::HL => self.hl(),
            Reg16Stack::AF => self.af(),
        }
    }

    #[inline]
    pub fn set16_stack(&mut self, reg: Reg16Stack, value: u16) {
        match reg {
            Reg16Stack::BC => self.set_bc(value),
            Reg16Stack::DE => self.set_de(value),
            Reg16Stack::HL => self.set_hl(value),
            Reg16Stack::AF => self.set_af(value),
        }
    }
}

//! Decoding table for the SM83 instruction set.
//!
//! The table has 512 slots: 0x000..=0x0FF are the plain opcodes and
//! 0x100..=0x1FF are the opcodes that follow the 0xCB prefix byte. Each entry
//! is pure data; the executor dispatches on [`Operation`] and reads operand
//! registers out of the opcode bits.

use lazy_static::lazy_static;

use super::regs::Reg8;

/// Offset of the CB-prefixed half of the table.
pub const PREFIX_BASE: u16 = 0x100;

/// Cycles charged for the 0xCB escape byte on its own.
pub const PREFIX_CYCLES: u32 = 4;

/// Instruction family. One variant per executor routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    Add,
    And,
    Bit,
    Call,
    Ccf,
    Cp,
    Cpl,
    Daa,
    Dec,
    Di,
    Ei,
    Halt,
    Illegal,
    Inc,
    Jp,
    Jr,
    Ld,
    Ldh,
    Nop,
    Or,
    Pop,
    Prefix,
    Push,
    Res,
    Ret,
    Reti,
    Rl,
    Rla,
    Rlc,
    Rlca,
    Rr,
    Rra,
    Rrc,
    Rrca,
    Rst,
    Sbc,
    Scf,
    Set,
    Sla,
    Sra,
    Srl,
    Stop,
    Sub,
    Swap,
    Xor,
}

/// How the bytes following the opcode are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand bytes.
    Implied,
    /// 8-bit immediate value.
    Data8,
    /// 16-bit little-endian immediate value.
    Data16,
    /// Signed 8-bit displacement.
    Register8,
    /// 16-bit jump or call target.
    Address16,
    /// 8-bit offset into the 0xFF00 page.
    IndirectIo8,
    /// 16-bit memory address.
    Indirect16,
}

impl AddressingMode {
    /// Number of operand bytes read after the opcode byte.
    #[inline]
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implied => 0,
            AddressingMode::Data8 | AddressingMode::Register8 | AddressingMode::IndirectIo8 => 1,
            AddressingMode::Data16 | AddressingMode::Address16 | AddressingMode::Indirect16 => 2,
        }
    }

    /// Placeholder token standing for the operand in a mnemonic template.
    pub const fn placeholder(self) -> Option<&'static str> {
        match self {
            AddressingMode::Implied => None,
            AddressingMode::Data8 => Some("d8"),
            AddressingMode::Data16 => Some("d16"),
            AddressingMode::Register8 => Some("r8"),
            AddressingMode::Address16 | AddressingMode::Indirect16 => Some("a16"),
            AddressingMode::IndirectIo8 => Some("a8"),
        }
    }
}

/// Documented effect of an instruction on one flag bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagEffect {
    Unaffected,
    Set,
    Reset,
    Computed,
}

impl FlagEffect {
    const fn parse(symbol: u8) -> Self {
        match symbol {
            b'-' => FlagEffect::Unaffected,
            b'1' => FlagEffect::Set,
            b'0' => FlagEffect::Reset,
            _ => FlagEffect::Computed,
        }
    }
}

/// Flag effects in Z, N, H, C order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlagEffects {
    pub z: FlagEffect,
    pub n: FlagEffect,
    pub h: FlagEffect,
    pub c: FlagEffect,
}

impl FlagEffects {
    /// Parse a four-character summary such as `"Z0HC"`: `-` unaffected,
    /// `0` reset, `1` set, anything else computed.
    pub const fn parse(summary: &str) -> Self {
        let s = summary.as_bytes();
        Self {
            z: FlagEffect::parse(s[0]),
            n: FlagEffect::parse(s[1]),
            h: FlagEffect::parse(s[2]),
            c: FlagEffect::parse(s[3]),
        }
    }
}

/// One slot of the decoding table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionEntry {
    /// Slot index; prefixed opcodes carry [`PREFIX_BASE`].
    pub opcode: u16,
    /// Mnemonic template; operand placeholders are `d8`, `d16`, `a8`, `a16` and `r8`.
    pub mnemonic: String,
    pub operation: Operation,
    pub mode: AddressingMode,
    /// Documented instruction length in bytes, prefix byte included.
    pub length: u8,
    /// Cycles when a conditional branch is taken, and for everything else.
    pub cycles: u8,
    /// Cycles when a conditional branch is not taken.
    pub cycles_not_taken: u8,
    pub flags: FlagEffects,
}

impl InstructionEntry {
    #[inline]
    pub fn is_prefixed(&self) -> bool {
        self.opcode >= PREFIX_BASE
    }

    /// Low opcode byte, as it appears in the instruction stream.
    #[inline]
    pub fn code(&self) -> u8 {
        self.opcode as u8
    }

    /// Substitute decoded operand bytes into the mnemonic template.
    pub fn render(&self, operands: [u8; 2]) -> String {
        let Some(token) = self.mode.placeholder() else {
            return self.mnemonic.clone();
        };
        let word = u16::from_le_bytes(operands);
        let text = match self.mode {
            AddressingMode::Data8 | AddressingMode::IndirectIo8 => format!("${:02x}", operands[0]),
            AddressingMode::Register8 => format!("{}", operands[0] as i8),
            _ => format!("${word:04x}"),
        };
        self.mnemonic.replacen(token, &text, 1)
    }
}

/// An instruction fetched from memory together with its operand bytes.
#[derive(Clone, Copy, Debug)]
pub struct Decoded {
    /// Address the opcode byte was fetched from.
    pub address: u16,
    pub entry: &'static InstructionEntry,
    pub operands: [u8; 2],
}

impl Decoded {
    #[inline]
    pub fn opcode(&self) -> u8 {
        self.entry.code()
    }

    #[inline]
    pub fn imm8(&self) -> u8 {
        self.operands[0]
    }

    #[inline]
    pub fn imm16(&self) -> u16 {
        u16::from_le_bytes(self.operands)
    }
}

struct Row {
    mnemonic: &'static str,
    operation: Operation,
    mode: AddressingMode,
    length: u8,
    cycles: u8,
    cycles_not_taken: u8,
    flags: &'static str,
}

const fn row(
    mnemonic: &'static str,
    operation: Operation,
    mode: AddressingMode,
    length: u8,
    cycles: u8,
    cycles_not_taken: u8,
    flags: &'static str,
) -> Row {
    Row {
        mnemonic,
        operation,
        mode,
        length,
        cycles,
        cycles_not_taken,
        flags,
    }
}

use AddressingMode as Mode;
use Operation as Op;

#[rustfmt::skip]
const UNPREFIXED: [Row; 256] = [
    row("NOP", Op::Nop, Mode::Implied, 1, 4, 4, "----"), // 0x00
    row("LD BC,d16", Op::Ld, Mode::Data16, 3, 12, 12, "----"), // 0x01
    row("LD (BC),A", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x02
    row("INC BC", Op::Inc, Mode::Implied, 1, 8, 8, "----"), // 0x03
    row("INC B", Op::Inc, Mode::Implied, 1, 4, 4, "Z0H-"), // 0x04
    row("DEC B", Op::Dec, Mode::Implied, 1, 4, 4, "Z1H-"), // 0x05
    row("LD B,d8", Op::Ld, Mode::Data8, 2, 8, 8, "----"), // 0x06
    row("RLCA", Op::Rlca, Mode::Implied, 1, 4, 4, "000C"), // 0x07
    row("LD (a16),SP", Op::Ld, Mode::Indirect16, 3, 20, 20, "----"), // 0x08
    row("ADD HL,BC", Op::Add, Mode::Implied, 1, 8, 8, "-0HC"), // 0x09
    row("LD A,(BC)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x0A
    row("DEC BC", Op::Dec, Mode::Implied, 1, 8, 8, "----"), // 0x0B
    row("INC C", Op::Inc, Mode::Implied, 1, 4, 4, "Z0H-"), // 0x0C
    row("DEC C", Op::Dec, Mode::Implied, 1, 4, 4, "Z1H-"), // 0x0D
    row("LD C,d8", Op::Ld, Mode::Data8, 2, 8, 8, "----"), // 0x0E
    row("RRCA", Op::Rrca, Mode::Implied, 1, 4, 4, "000C"), // 0x0F
    row("STOP d8", Op::Stop, Mode::Data8, 2, 4, 4, "----"), // 0x10
    row("LD DE,d16", Op::Ld, Mode::Data16, 3, 12, 12, "----"), // 0x11
    row("LD (DE),A", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x12
    row("INC DE", Op::Inc, Mode::Implied, 1, 8, 8, "----"), // 0x13
    row("INC D", Op::Inc, Mode::Implied, 1, 4, 4, "Z0H-"), // 0x14
    row("DEC D", Op::Dec, Mode::Implied, 1, 4, 4, "Z1H-"), // 0x15
    row("LD D,d8", Op::Ld, Mode::Data8, 2, 8, 8, "----"), // 0x16
    row("RLA", Op::Rla, Mode::Implied, 1, 4, 4, "000C"), // 0x17
    row("JR r8", Op::Jr, Mode::Register8, 2, 12, 12, "----"), // 0x18
    row("ADD HL,DE", Op::Add, Mode::Implied, 1, 8, 8, "-0HC"), // 0x19
    row("LD A,(DE)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x1A
    row("DEC DE", Op::Dec, Mode::Implied, 1, 8, 8, "----"), // 0x1B
    row("INC E", Op::Inc, Mode::Implied, 1, 4, 4, "Z0H-"), // 0x1C
    row("DEC E", Op::Dec, Mode::Implied, 1, 4, 4, "Z1H-"), // 0x1D
    row("LD E,d8", Op::Ld, Mode::Data8, 2, 8, 8, "----"), // 0x1E
    row("RRA", Op::Rra, Mode::Implied, 1, 4, 4, "000C"), // 0x1F
    row("JR NZ,r8", Op::Jr, Mode::Register8, 2, 12, 8, "----"), // 0x20
    row("LD HL,d16", Op::Ld, Mode::Data16, 3, 12, 12, "----"), // 0x21
    row("LD (HL+),A", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x22
    row("INC HL", Op::Inc, Mode::Implied, 1, 8, 8, "----"), // 0x23
    row("INC H", Op::Inc, Mode::Implied, 1, 4, 4, "Z0H-"), // 0x24
    row("DEC H", Op::Dec, Mode::Implied, 1, 4, 4, "Z1H-"), // 0x25
    row("LD H,d8", Op::Ld, Mode::Data8, 2, 8, 8, "----"), // 0x26
    row("DAA", Op::Daa, Mode::Implied, 1, 4, 4, "Z-0C"), // 0x27
    row("JR Z,r8", Op::Jr, Mode::Register8, 2, 12, 8, "----"), // 0x28
    row("ADD HL,HL", Op::Add, Mode::Implied, 1, 8, 8, "-0HC"), // 0x29
    row("LD A,(HL+)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x2A
    row("DEC HL", Op::Dec, Mode::Implied, 1, 8, 8, "----"), // 0x2B
    row("INC L", Op::Inc, Mode::Implied, 1, 4, 4, "Z0H-"), // 0x2C
    row("DEC L", Op::Dec, Mode::Implied, 1, 4, 4, "Z1H-"), // 0x2D
    row("LD L,d8", Op::Ld, Mode::Data8, 2, 8, 8, "----"), // 0x2E
    row("CPL", Op::Cpl, Mode::Implied, 1, 4, 4, "-11-"), // 0x2F
    row("JR NC,r8", Op::Jr, Mode::Register8, 2, 12, 8, "----"), // 0x30
    row("LD SP,d16", Op::Ld, Mode::Data16, 3, 12, 12, "----"), // 0x31
    row("LD (HL-),A", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x32
    row("INC SP", Op::Inc, Mode::Implied, 1, 8, 8, "----"), // 0x33
    row("INC (HL)", Op::Inc, Mode::Implied, 1, 12, 12, "Z0H-"), // 0x34
    row("DEC (HL)", Op::Dec, Mode::Implied, 1, 12, 12, "Z1H-"), // 0x35
    row("LD (HL),d8", Op::Ld, Mode::Data8, 2, 12, 12, "----"), // 0x36
    row("SCF", Op::Scf, Mode::Implied, 1, 4, 4, "-001"), // 0x37
    row("JR C,r8", Op::Jr, Mode::Register8, 2, 12, 8, "----"), // 0x38
    row("ADD HL,SP", Op::Add, Mode::Implied, 1, 8, 8, "-0HC"), // 0x39
    row("LD A,(HL-)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x3A
    row("DEC SP", Op::Dec, Mode::Implied, 1, 8, 8, "----"), // 0x3B
    row("INC A", Op::Inc, Mode::Implied, 1, 4, 4, "Z0H-"), // 0x3C
    row("DEC A", Op::Dec, Mode::Implied, 1, 4, 4, "Z1H-"), // 0x3D
    row("LD A,d8", Op::Ld, Mode::Data8, 2, 8, 8, "----"), // 0x3E
    row("CCF", Op::Ccf, Mode::Implied, 1, 4, 4, "-00C"), // 0x3F
    row("LD B,B", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x40
    row("LD B,C", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x41
    row("LD B,D", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x42
    row("LD B,E", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x43
    row("LD B,H", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x44
    row("LD B,L", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x45
    row("LD B,(HL)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x46
    row("LD B,A", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x47
    row("LD C,B", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x48
    row("LD C,C", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x49
    row("LD C,D", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x4A
    row("LD C,E", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x4B
    row("LD C,H", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x4C
    row("LD C,L", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x4D
    row("LD C,(HL)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x4E
    row("LD C,A", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x4F
    row("LD D,B", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x50
    row("LD D,C", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x51
    row("LD D,D", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x52
    row("LD D,E", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x53
    row("LD D,H", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x54
    row("LD D,L", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x55
    row("LD D,(HL)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x56
    row("LD D,A", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x57
    row("LD E,B", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x58
    row("LD E,C", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x59
    row("LD E,D", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x5A
    row("LD E,E", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x5B
    row("LD E,H", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x5C
    row("LD E,L", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x5D
    row("LD E,(HL)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x5E
    row("LD E,A", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x5F
    row("LD H,B", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x60
    row("LD H,C", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x61
    row("LD H,D", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x62
    row("LD H,E", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x63
    row("LD H,H", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x64
    row("LD H,L", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x65
    row("LD H,(HL)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x66
    row("LD H,A", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x67
    row("LD L,B", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x68
    row("LD L,C", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x69
    row("LD L,D", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x6A
    row("LD L,E", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x6B
    row("LD L,H", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x6C
    row("LD L,L", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x6D
    row("LD L,(HL)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x6E
    row("LD L,A", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x6F
    row("LD (HL),B", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x70
    row("LD (HL),C", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x71
    row("LD (HL),D", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x72
    row("LD (HL),E", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x73
    row("LD (HL),H", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x74
    row("LD (HL),L", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x75
    row("HALT", Op::Halt, Mode::Implied, 1, 4, 4, "----"), // 0x76
    row("LD (HL),A", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x77
    row("LD A,B", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x78
    row("LD A,C", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x79
    row("LD A,D", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x7A
    row("LD A,E", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x7B
    row("LD A,H", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x7C
    row("LD A,L", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x7D
    row("LD A,(HL)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0x7E
    row("LD A,A", Op::Ld, Mode::Implied, 1, 4, 4, "----"), // 0x7F
    row("ADD A,B", Op::Add, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x80
    row("ADD A,C", Op::Add, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x81
    row("ADD A,D", Op::Add, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x82
    row("ADD A,E", Op::Add, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x83
    row("ADD A,H", Op::Add, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x84
    row("ADD A,L", Op::Add, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x85
    row("ADD A,(HL)", Op::Add, Mode::Implied, 1, 8, 8, "Z0HC"), // 0x86
    row("ADD A,A", Op::Add, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x87
    row("ADC A,B", Op::Adc, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x88
    row("ADC A,C", Op::Adc, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x89
    row("ADC A,D", Op::Adc, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x8A
    row("ADC A,E", Op::Adc, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x8B
    row("ADC A,H", Op::Adc, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x8C
    row("ADC A,L", Op::Adc, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x8D
    row("ADC A,(HL)", Op::Adc, Mode::Implied, 1, 8, 8, "Z0HC"), // 0x8E
    row("ADC A,A", Op::Adc, Mode::Implied, 1, 4, 4, "Z0HC"), // 0x8F
    row("SUB B", Op::Sub, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x90
    row("SUB C", Op::Sub, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x91
    row("SUB D", Op::Sub, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x92
    row("SUB E", Op::Sub, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x93
    row("SUB H", Op::Sub, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x94
    row("SUB L", Op::Sub, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x95
    row("SUB (HL)", Op::Sub, Mode::Implied, 1, 8, 8, "Z1HC"), // 0x96
    row("SUB A", Op::Sub, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x97
    row("SBC A,B", Op::Sbc, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x98
    row("SBC A,C", Op::Sbc, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x99
    row("SBC A,D", Op::Sbc, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x9A
    row("SBC A,E", Op::Sbc, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x9B
    row("SBC A,H", Op::Sbc, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x9C
    row("SBC A,L", Op::Sbc, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x9D
    row("SBC A,(HL)", Op::Sbc, Mode::Implied, 1, 8, 8, "Z1HC"), // 0x9E
    row("SBC A,A", Op::Sbc, Mode::Implied, 1, 4, 4, "Z1HC"), // 0x9F
    row("AND B", Op::And, Mode::Implied, 1, 4, 4, "Z010"), // 0xA0
    row("AND C", Op::And, Mode::Implied, 1, 4, 4, "Z010"), // 0xA1
    row("AND D", Op::And, Mode::Implied, 1, 4, 4, "Z010"), // 0xA2
    row("AND E", Op::And, Mode::Implied, 1, 4, 4, "Z010"), // 0xA3
    row("AND H", Op::And, Mode::Implied, 1, 4, 4, "Z010"), // 0xA4
    row("AND L", Op::And, Mode::Implied, 1, 4, 4, "Z010"), // 0xA5
    row("AND (HL)", Op::And, Mode::Implied, 1, 8, 8, "Z010"), // 0xA6
    row("AND A", Op::And, Mode::Implied, 1, 4, 4, "Z010"), // 0xA7
    row("XOR B", Op::Xor, Mode::Implied, 1, 4, 4, "Z000"), // 0xA8
    row("XOR C", Op::Xor, Mode::Implied, 1, 4, 4, "Z000"), // 0xA9
    row("XOR D", Op::Xor, Mode::Implied, 1, 4, 4, "Z000"), // 0xAA
    row("XOR E", Op::Xor, Mode::Implied, 1, 4, 4, "Z000"), // 0xAB
    row("XOR H", Op::Xor, Mode::Implied, 1, 4, 4, "Z000"), // 0xAC
    row("XOR L", Op::Xor, Mode::Implied, 1, 4, 4, "Z000"), // 0xAD
    row("XOR (HL)", Op::Xor, Mode::Implied, 1, 8, 8, "Z000"), // 0xAE
    row("XOR A", Op::Xor, Mode::Implied, 1, 4, 4, "Z000"), // 0xAF
    row("OR B", Op::Or, Mode::Implied, 1, 4, 4, "Z000"), // 0xB0
    row("OR C", Op::Or, Mode::Implied, 1, 4, 4, "Z000"), // 0xB1
    row("OR D", Op::Or, Mode::Implied, 1, 4, 4, "Z000"), // 0xB2
    row("OR E", Op::Or, Mode::Implied, 1, 4, 4, "Z000"), // 0xB3
    row("OR H", Op::Or, Mode::Implied, 1, 4, 4, "Z000"), // 0xB4
    row("OR L", Op::Or, Mode::Implied, 1, 4, 4, "Z000"), // 0xB5
    row("OR (HL)", Op::Or, Mode::Implied, 1, 8, 8, "Z000"), // 0xB6
    row("OR A", Op::Or, Mode::Implied, 1, 4, 4, "Z000"), // 0xB7
    row("CP B", Op::Cp, Mode::Implied, 1, 4, 4, "Z1HC"), // 0xB8
    row("CP C", Op::Cp, Mode::Implied, 1, 4, 4, "Z1HC"), // 0xB9
    row("CP D", Op::Cp, Mode::Implied, 1, 4, 4, "Z1HC"), // 0xBA
    row("CP E", Op::Cp, Mode::Implied, 1, 4, 4, "Z1HC"), // 0xBB
    row("CP H", Op::Cp, Mode::Implied, 1, 4, 4, "Z1HC"), // 0xBC
    row("CP L", Op::Cp, Mode::Implied, 1, 4, 4, "Z1HC"), // 0xBD
    row("CP (HL)", Op::Cp, Mode::Implied, 1, 8, 8, "Z1HC"), // 0xBE
    row("CP A", Op::Cp, Mode::Implied, 1, 4, 4, "Z1HC"), // 0xBF
    row("RET NZ", Op::Ret, Mode::Implied, 1, 20, 8, "----"), // 0xC0
    row("POP BC", Op::Pop, Mode::Implied, 1, 12, 12, "----"), // 0xC1
    row("JP NZ,a16", Op::Jp, Mode::Address16, 3, 16, 12, "----"), // 0xC2
    row("JP a16", Op::Jp, Mode::Address16, 3, 16, 16, "----"), // 0xC3
    row("CALL NZ,a16", Op::Call, Mode::Address16, 3, 24, 12, "----"), // 0xC4
    row("PUSH BC", Op::Push, Mode::Implied, 1, 16, 16, "----"), // 0xC5
    row("ADD A,d8", Op::Add, Mode::Data8, 2, 8, 8, "Z0HC"), // 0xC6
    row("RST 00H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xC7
    row("RET Z", Op::Ret, Mode::Implied, 1, 20, 8, "----"), // 0xC8
    row("RET", Op::Ret, Mode::Implied, 1, 16, 16, "----"), // 0xC9
    row("JP Z,a16", Op::Jp, Mode::Address16, 3, 16, 12, "----"), // 0xCA
    row("PREFIX CB", Op::Prefix, Mode::Implied, 1, 4, 4, "----"), // 0xCB
    row("CALL Z,a16", Op::Call, Mode::Address16, 3, 24, 12, "----"), // 0xCC
    row("CALL a16", Op::Call, Mode::Address16, 3, 24, 24, "----"), // 0xCD
    row("ADC A,d8", Op::Adc, Mode::Data8, 2, 8, 8, "Z0HC"), // 0xCE
    row("RST 08H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xCF
    row("RET NC", Op::Ret, Mode::Implied, 1, 20, 8, "----"), // 0xD0
    row("POP DE", Op::Pop, Mode::Implied, 1, 12, 12, "----"), // 0xD1
    row("JP NC,a16", Op::Jp, Mode::Address16, 3, 16, 12, "----"), // 0xD2
    row("ILLEGAL_D3", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xD3
    row("CALL NC,a16", Op::Call, Mode::Address16, 3, 24, 12, "----"), // 0xD4
    row("PUSH DE", Op::Push, Mode::Implied, 1, 16, 16, "----"), // 0xD5
    row("SUB d8", Op::Sub, Mode::Data8, 2, 8, 8, "Z1HC"), // 0xD6
    row("RST 10H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xD7
    row("RET C", Op::Ret, Mode::Implied, 1, 20, 8, "----"), // 0xD8
    row("RETI", Op::Reti, Mode::Implied, 1, 16, 16, "----"), // 0xD9
    row("JP C,a16", Op::Jp, Mode::Address16, 3, 16, 12, "----"), // 0xDA
    row("ILLEGAL_DB", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xDB
    row("CALL C,a16", Op::Call, Mode::Address16, 3, 24, 12, "----"), // 0xDC
    row("ILLEGAL_DD", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xDD
    row("SBC A,d8", Op::Sbc, Mode::Data8, 2, 8, 8, "Z1HC"), // 0xDE
    row("RST 18H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xDF
    row("LDH (a8),A", Op::Ldh, Mode::IndirectIo8, 2, 12, 12, "----"), // 0xE0
    row("POP HL", Op::Pop, Mode::Implied, 1, 12, 12, "----"), // 0xE1
    row("LD (C),A", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0xE2
    row("ILLEGAL_E3", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xE3
    row("ILLEGAL_E4", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xE4
    row("PUSH HL", Op::Push, Mode::Implied, 1, 16, 16, "----"), // 0xE5
    row("AND d8", Op::And, Mode::Data8, 2, 8, 8, "Z010"), // 0xE6
    row("RST 20H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xE7
    row("ADD SP,r8", Op::Add, Mode::Register8, 2, 16, 16, "00HC"), // 0xE8
    row("JP HL", Op::Jp, Mode::Implied, 1, 4, 4, "----"), // 0xE9
    row("LD (a16),A", Op::Ld, Mode::Indirect16, 3, 16, 16, "----"), // 0xEA
    row("ILLEGAL_EB", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xEB
    row("ILLEGAL_EC", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xEC
    row("ILLEGAL_ED", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xED
    row("XOR d8", Op::Xor, Mode::Data8, 2, 8, 8, "Z000"), // 0xEE
    row("RST 28H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xEF
    row("LDH A,(a8)", Op::Ldh, Mode::IndirectIo8, 2, 12, 12, "----"), // 0xF0
    row("POP AF", Op::Pop, Mode::Implied, 1, 12, 12, "ZNHC"), // 0xF1
    row("LD A,(C)", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0xF2
    row("DI", Op::Di, Mode::Implied, 1, 4, 4, "----"), // 0xF3
    row("ILLEGAL_F4", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xF4
    row("PUSH AF", Op::Push, Mode::Implied, 1, 16, 16, "----"), // 0xF5
    row("OR d8", Op::Or, Mode::Data8, 2, 8, 8, "Z000"), // 0xF6
    row("RST 30H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xF7
    row("LD HL,SP+r8", Op::Ld, Mode::Register8, 2, 12, 12, "00HC"), // 0xF8
    row("LD SP,HL", Op::Ld, Mode::Implied, 1, 8, 8, "----"), // 0xF9
    row("LD A,(a16)", Op::Ld, Mode::Indirect16, 3, 16, 16, "----"), // 0xFA
    row("EI", Op::Ei, Mode::Implied, 1, 4, 4, "----"), // 0xFB
    row("ILLEGAL_FC", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xFC
    row("ILLEGAL_FD", Op::Illegal, Mode::Implied, 1, 4, 4, "----"), // 0xFD
    row("CP d8", Op::Cp, Mode::Data8, 2, 8, 8, "Z1HC"), // 0xFE
    row("RST 38H", Op::Rst, Mode::Implied, 1, 16, 16, "----"), // 0xFF
];

/// Rotate/shift group of the CB page, indexed by opcode bits 5..3.
const SHIFT_OPS: [(Operation, &str, &str); 8] = [
    (Op::Rlc, "RLC", "Z00C"),
    (Op::Rrc, "RRC", "Z00C"),
    (Op::Rl, "RL", "Z00C"),
    (Op::Rr, "RR", "Z00C"),
    (Op::Sla, "SLA", "Z00C"),
    (Op::Sra, "SRA", "Z00C"),
    (Op::Swap, "SWAP", "Z000"),
    (Op::Srl, "SRL", "Z00C"),
];

fn prefixed_entry(code: u8) -> InstructionEntry {
    let reg = Reg8::from_bits(code);
    let bit = (code >> 3) & 0x07;
    let memory = reg == Reg8::IndirectHl;

    let (operation, mnemonic, cycles, flags) = match code >> 6 {
        0 => {
            let (operation, name, flags) = SHIFT_OPS[bit as usize];
            let cycles = if memory { 16 } else { 8 };
            (operation, format!("{name} {}", reg.name()), cycles, flags)
        }
        1 => {
            let cycles = if memory { 12 } else { 8 };
            (Op::Bit, format!("BIT {bit},{}", reg.name()), cycles, "Z01-")
        }
        2 => {
            let cycles = if memory { 16 } else { 8 };
            (Op::Res, format!("RES {bit},{}", reg.name()), cycles, "----")
        }
        _ => {
            let cycles = if memory { 16 } else { 8 };
            (Op::Set, format!("SET {bit},{}", reg.name()), cycles, "----")
        }
    };

    InstructionEntry {
        opcode: PREFIX_BASE | code as u16,
        mnemonic,
        operation,
        mode: Mode::Implied,
        length: 2,
        cycles,
        cycles_not_taken: cycles,
        flags: FlagEffects::parse(flags),
    }
}

fn build_table() -> Vec<InstructionEntry> {
    let plain = UNPREFIXED.iter().enumerate().map(|(opcode, row)| InstructionEntry {
        opcode: opcode as u16,
        mnemonic: row.mnemonic.to_string(),
        operation: row.operation,
        mode: row.mode,
        length: row.length,
        cycles: row.cycles,
        cycles_not_taken: row.cycles_not_taken,
        flags: FlagEffects::parse(row.flags),
    });
    let prefixed = (0..=0xFFu8).map(prefixed_entry);
    plain.chain(prefixed).collect()
}

lazy_static! {
    static ref INSTRUCTIONS: Vec<InstructionEntry> = build_table();
}

/// Look up a table slot. Values above 0x1FF wrap into the table.
#[inline]
pub fn lookup(opcode: u16) -> &'static InstructionEntry {
    &INSTRUCTIONS[(opcode & 0x1FF) as usize]
}

/// The whole table in opcode order.
pub fn instructions() -> &'static [InstructionEntry] {
    &INSTRUCTIONS
}

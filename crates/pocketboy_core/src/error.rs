use thiserror::Error;

/// Fatal emulation conditions.
///
/// Each of these stops emulation: continuing past one would silently produce
/// wrong results. Recoverable conditions (unusable RAM access, tolerated I/O
/// writes, missing cartridge) are logged instead and never reach this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmuError {
    /// The opcode has a dispatch target but no semantics behind it yet.
    #[error("unimplemented opcode 0x{opcode:03X} ({mnemonic}) at 0x{address:04X}")]
    UnimplementedOpcode {
        opcode: u16,
        address: u16,
        mnemonic: &'static str,
    },

    /// The opcode is one of the undefined encodings of the SM83.
    #[error("illegal opcode 0x{opcode:02X} at 0x{address:04X}")]
    IllegalOpcode { opcode: u16, address: u16 },

    /// A write hit the I/O window at an address with no known register.
    #[error("write of 0x{value:02X} to unmapped I/O address 0x{address:04X}")]
    UnmappedIo { address: u16, value: u8 },

    /// The I/O dispatcher was handed an address outside 0xFF00..=0xFF7F.
    #[error("I/O dispatch called for non-I/O address 0x{address:04X}")]
    IoDispatchOutOfRange { address: u16 },

    /// Header byte 0x147 names a cartridge type we have no controller for.
    #[error("unknown cartridge type 0x{code:02X}")]
    UnknownCartridgeType { code: u8 },
}

pub type Result<T> = std::result::Result<T, EmuError>;

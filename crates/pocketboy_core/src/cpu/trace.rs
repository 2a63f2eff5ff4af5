use std::fmt;

use super::instructions::{Decoded, InstructionEntry};
use super::regs::{Flag, Registers};

/// Snapshot of one decoded instruction, handed to [`Bus::trace_instruction`].
///
/// Registers are captured after the opcode and operand bytes were fetched,
/// so `PC` already points at the next instruction.
///
/// [`Bus::trace_instruction`]: super::Bus::trace_instruction
#[derive(Clone, Debug)]
pub struct TraceRecord {
    pub address: u16,
    pub entry: &'static InstructionEntry,
    pub operands: [u8; 2],
    pub regs: Registers,
    pub ticks: u64,
}

impl TraceRecord {
    pub(crate) fn new(decoded: &Decoded, regs: &Registers, ticks: u64) -> Self {
        Self {
            address: decoded.address,
            entry: decoded.entry,
            operands: decoded.operands,
            regs: *regs,
            ticks,
        }
    }

    /// `ZNHC` with set flags upper-case and clear flags lower-case.
    pub fn flag_summary(&self) -> String {
        [(Flag::Z, 'Z'), (Flag::N, 'N'), (Flag::H, 'H'), (Flag::C, 'C')]
            .into_iter()
            .map(|(flag, name)| {
                if self.regs.f() & flag.mask() != 0 {
                    name
                } else {
                    name.to_ascii_lowercase()
                }
            })
            .collect()
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.regs;
        writeln!(
            f,
            "AF:{:04x} BC:{:04x} DE:{:04x} HL:{:04x} PC:{:04x} SP:{:04x} {}  {} ticks",
            r.af(),
            r.bc(),
            r.de(),
            r.hl(),
            r.pc,
            r.sp,
            self.flag_summary(),
            self.ticks,
        )?;

        // A prefixed record sits at the byte after 0xCB, which was traced
        // on its own, so only the bytes at `address` are listed.
        write!(f, "0x{:04x}:  {:02x}", self.address, self.entry.code())?;
        let count = self.entry.mode.operand_len() as usize;
        for byte in &self.operands[..count] {
            write!(f, " {byte:02x}")?;
        }
        // Pad so mnemonics line up regardless of operand count.
        for _ in count..2 {
            f.write_str("   ")?;
        }
        write!(f, "  {}", self.entry.render(self.operands))
    }
}

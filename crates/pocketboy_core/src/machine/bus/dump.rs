use std::fmt::Write;

use super::SystemBus;

impl SystemBus {
    /// Hex dump of `count` bytes starting at `start`.
    ///
    /// Lines are 16 bytes wide and start at a 16-byte boundary with a
    /// `xxxx: ` label. Bytes before `start` on the first line are left
    /// blank. Bytes are grouped in pairs with a wider gap after the eighth.
    pub fn hex_dump(&self, start: u16, count: u16) -> String {
        let line_start = start & 0xFFF0;
        let skipped = (start & 0x000F) as usize;
        let total = count as usize + skipped;
        let mut out = String::new();

        for i in 0..total {
            let addr = line_start.wrapping_add(i as u16);
            if i % 16 == 0 {
                let _ = write!(out, "{addr:04x}: ");
            }

            if i < skipped {
                out.push_str("  ");
            } else {
                let _ = write!(out, "{:02x}", self.memory.read8(addr));
            }

            if i % 8 == 7 {
                out.push_str("  ");
            } else if i % 2 == 1 {
                out.push(' ');
            }

            if i % 16 == 15 {
                out.push('\n');
            }
        }

        if total % 16 != 0 {
            out.push('\n');
        }
        out
    }
}

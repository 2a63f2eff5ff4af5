mod board;
mod bus;
mod cartridge;
pub mod io;
mod memory;
mod serial;
mod timer;

use std::path::PathBuf;

use typed_builder::TypedBuilder;

pub use board::Board;
pub use bus::SystemBus;
pub use cartridge::{BankController, CartridgeHeader, Mbc1};
pub use memory::Memory;
pub use serial::Serial;
pub use timer::{Timer, DIVISORS};

/// Total addressable memory (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Settings the core needs at construction time.
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct CoreConfig {
    /// Cartridge image to load. Without one the machine starts with an
    /// empty cartridge.
    #[builder(default, setter(strip_option, into))]
    pub cartridge: Option<PathBuf>,
}

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use pocketboy_common::{logging, Config};
use pocketboy_core::{Board, CoreConfig};

pub const DEFAULT_CONFIG: &str = "GameBoyEmu.conf";
pub const DEFAULT_LOG: &str = "GameBoyEmu.log";

/// Bytes shown either side of PC when a run stops on an error.
const DUMP_WINDOW: u16 = 0x20;

/// Command-line switches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub config: PathBuf,
    pub log: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG),
            log: PathBuf::from(DEFAULT_LOG),
        }
    }
}

impl Options {
    /// Parse `-X value` pairs. `-C` names the configuration file and `-L`
    /// the log file.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(switch) = args.next() {
            let slot = match switch.as_str() {
                "-C" => &mut options.config,
                "-L" => &mut options.log,
                other => anyhow::bail!("unknown switch '{other}'\n{}", usage()),
            };
            let value = args
                .next()
                .with_context(|| format!("switch '{switch}' needs a value\n{}", usage()))?;
            *slot = PathBuf::from(value);
        }
        Ok(options)
    }
}

pub fn usage() -> String {
    format!(
        "usage: pocketboy [-C <config>] [-L <log>]\n  \
         -C  Configuration file for the emulator (default {DEFAULT_CONFIG})\n  \
         -L  Log file for the emulator (default {DEFAULT_LOG})"
    )
}

/// Set up logging, load the configuration and run the board until it stops.
pub fn run(options: &Options) -> Result<()> {
    if let Err(err) = logging::init(&options.log) {
        logging::init_stderr()?;
        log::warn!("{err:#}; logging to stderr");
    }
    log::info!("=== [ PocketBoy started ] ===");
    log::info!("Command line: -C {} -L {}", options.config.display(), options.log.display());

    let config = Config::load(&options.config)?;
    let result = run_with_config(&config);
    if let Err(err) = &result {
        log::error!("{err:#}");
    }
    log::info!("PocketBoy ended");
    result
}

/// Run a board described by `config`. Split out from [`run`] so it can be
/// driven without touching the global logger.
pub fn run_with_config(config: &Config) -> Result<()> {
    for (key, value) in config.iter() {
        log::info!("Config: {key} = {value}");
    }
    if config.start_in_debug() {
        log::warn!("StartInDebug is set but the interactive debugger is not available");
    }

    let core_config = match config.cart() {
        Some(cart) => CoreConfig::builder().cartridge(cart).build(),
        None => CoreConfig::builder().build(),
    };
    let mut board = Board::new(core_config).context("failed to build the board")?;

    if let Some(path) = config.serial_log() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open serial log {}", path.display()))?;
        board.bus.serial_mut().set_sink(Box::new(file));
    }
    if let Some(path) = config.trace_log() {
        let file = File::create(&path)
            .with_context(|| format!("failed to create trace log {}", path.display()))?;
        board.bus.set_tracer(Box::new(file));
    }

    let outcome = match config.max_ticks()? {
        Some(limit) => board.run(limit),
        None => loop {
            if let Err(err) = board.tick() {
                break Err(err);
            }
        },
    };

    if let Err(err) = outcome {
        let pc = board.cpu.regs.pc;
        let start = pc.saturating_sub(DUMP_WINDOW);
        log::error!(
            "Emulation stopped at PC={pc:04x}:\n{}",
            board.hex_dump(start, DUMP_WINDOW * 2)
        );
        return Err(err).context("emulation stopped");
    }

    log::info!("Ran {} ticks", board.cpu.ticks());
    Ok(())
}

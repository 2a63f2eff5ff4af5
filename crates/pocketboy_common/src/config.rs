use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key names understood by the runner.
pub mod keys {
    /// Cartridge image to load.
    pub const CART: &str = "Cart";
    /// File that receives every byte sent over the serial port.
    pub const SERIAL_LOG: &str = "SerialLog";
    /// File that receives one trace record per executed instruction.
    pub const TRACE_LOG: &str = "TraceLog";
    /// Stop after this many ticks instead of running until an error.
    pub const MAX_TICKS: &str = "MaxTicks";
    /// Start in the interactive debugger. Accepted but not supported.
    pub const START_IN_DEBUG: &str = "StartInDebug";
}

/// Emulator configuration loaded from a `key = value` text file.
///
/// `#` starts a comment that runs to the end of the line. Blank lines are
/// skipped. Keys and values are trimmed; a value may itself contain `=`.
/// When a key repeats, the last occurrence wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    /// Load a configuration file. A missing file is not an error: it yields
    /// an empty configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Reading configuration from {}", path.display());
                Ok(Self::parse(&text))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "Configuration file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(err) => Err(err)
                .with_context(|| format!("failed to read configuration file {}", path.display())),
        }
    }

    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for (number, raw) in text.lines().enumerate() {
            let line = match raw.find('#') {
                Some(idx) => &raw[..idx],
                None => raw,
            };
            if line.trim().is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("Ignoring configuration line {}: no '=' in {:?}", number + 1, raw);
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                log::warn!("Ignoring configuration line {}: empty key", number + 1);
                continue;
            }
            entries.insert(key.to_string(), value.trim().to_string());
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// A non-empty value interpreted as a path.
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).filter(|v| !v.is_empty()).map(PathBuf::from)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cart(&self) -> Option<PathBuf> {
        self.get_path(keys::CART)
    }

    pub fn serial_log(&self) -> Option<PathBuf> {
        self.get_path(keys::SERIAL_LOG)
    }

    pub fn trace_log(&self) -> Option<PathBuf> {
        self.get_path(keys::TRACE_LOG)
    }

    /// Tick limit, if one is configured. A value that is not a number is an
    /// error rather than being silently ignored.
    pub fn max_ticks(&self) -> Result<Option<u64>> {
        match self.get(keys::MAX_TICKS).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<u64>()
                .map(Some)
                .with_context(|| format!("invalid {} value {:?}", keys::MAX_TICKS, raw)),
        }
    }

    /// `true`, `yes`, `on` and `1` (any case) turn the flag on.
    pub fn start_in_debug(&self) -> bool {
        self.get(keys::START_IN_DEBUG).is_some_and(|v| {
            matches!(
                v.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    }
}

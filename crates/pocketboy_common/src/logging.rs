use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Install the global logger, appending to `path`.
///
/// Lines are written as `<timestamp>|<LEVEL>|<message>`. `RUST_LOG` still
/// selects what gets through; without it everything at `info` and above is
/// kept.
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    builder()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")
}

/// Install the global logger on stderr with the same line format.
pub fn init_stderr() -> Result<()> {
    builder().try_init().context("logger already initialised")
}

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}|{}|{}",
            buf.timestamp_millis(),
            record.level(),
            record.args()
        )
    });
    builder
}

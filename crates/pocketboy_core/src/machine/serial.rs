use std::fmt;
use std::io::Write;

/// Serial port output capture.
///
/// Every byte shifted out is kept in `output` and, when a sink is
/// attached, written to it straight away.
#[derive(Default)]
pub struct Serial {
    output: Vec<u8>,
    sink: Option<Box<dyn Write + Send>>,
}

impl fmt::Debug for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serial")
            .field("output", &self.output)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Serial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sink(&mut self, sink: Box<dyn Write + Send>) {
        self.sink = Some(sink);
    }

    /// Bytes sent so far.
    #[inline]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub fn emit(&mut self, byte: u8) {
        self.output.push(byte);
        log::debug!("Serial out: 0x{:02x}", byte);

        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.write_all(&[byte]).and_then(|()| sink.flush()) {
                log::warn!("Serial sink write failed: {}", err);
            }
        }
    }
}

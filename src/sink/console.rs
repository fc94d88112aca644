use std::io::{self, Stdout, Write};
use crate::sink::{OutputSink, SinkResult};

/// Writes each announced value as a decimal line
pub struct ConsoleSink<W: Write = Stdout> {
    writer: W,
}

impl ConsoleSink<Stdout> {
    pub fn new() -> Self {
        Self { writer: io::stdout() }
    }
}

impl Default for ConsoleSink<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn announce(&mut self, value: u8) -> SinkResult<()> {
        writeln!(self.writer, "{}", value)?;
        // Flushed before returning so the line is out when SAY completes
        self.writer.flush()?;
        Ok(())
    }
}

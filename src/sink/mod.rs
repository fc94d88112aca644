//! Output sinks that render the values announced by SAY

mod console;
mod recording;
mod threaded;

pub use console::ConsoleSink;
pub use recording::RecordingSink;
pub use threaded::ThreadedSink;

use std::io;
use thiserror::Error;

/// Errors that can occur while announcing a value
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Output worker is no longer running")]
    Disconnected,
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Something that can announce a value on behalf of the CPU.
///
/// `announce` returns only once the value has been fully rendered, so the
/// CPU never decodes its next instruction while an announcement is in flight.
pub trait OutputSink {
    fn announce(&mut self, value: u8) -> SinkResult<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn announce(&mut self, value: u8) -> SinkResult<()> {
        (**self).announce(value)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn announce(&mut self, value: u8) -> SinkResult<()> {
        (**self).announce(value)
    }
}

use std::sync::Arc;
use parking_lot::Mutex;
use crate::sink::{OutputSink, SinkResult};

/// Keeps every announced value. Clones share the same log, so a caller can
/// hand one clone to the CPU and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    announcements: Arc<Mutex<Vec<u8>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the values announced so far, oldest first
    pub fn announcements(&self) -> Vec<u8> {
        self.announcements.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.announcements.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.announcements.lock().is_empty()
    }
}

impl OutputSink for RecordingSink {
    fn announce(&mut self, value: u8) -> SinkResult<()> {
        self.announcements.lock().push(value);
        Ok(())
    }
}

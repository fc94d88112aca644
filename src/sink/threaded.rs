use std::thread::{self, JoinHandle};
use crossbeam::channel::{self, Receiver, Sender};
use crate::sink::{OutputSink, SinkError, SinkResult};

/// Hands each value to a worker thread and waits for it to finish.
///
/// Suited to slow renderers such as speech synthesis: the worker owns the
/// renderer, and `announce` blocks until the worker acknowledges the value.
pub struct ThreadedSink {
    requests: Option<Sender<u8>>,
    done: Receiver<()>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadedSink {
    /// Spawn a worker that calls `render` for every announced value
    pub fn spawn<F>(mut render: F) -> Self
    where
        F: FnMut(u8) + Send + 'static,
    {
        let (request_tx, request_rx) = channel::unbounded::<u8>();
        let (done_tx, done_rx) = channel::unbounded::<()>();

        let worker = thread::spawn(move || {
            for value in request_rx.iter() {
                render(value);
                if done_tx.send(()).is_err() {
                    break;
                }
            }
            tracing::debug!("output worker stopped");
        });

        Self {
            requests: Some(request_tx),
            done: done_rx,
            worker: Some(worker),
        }
    }
}

impl OutputSink for ThreadedSink {
    fn announce(&mut self, value: u8) -> SinkResult<()> {
        let requests = self.requests.as_ref().ok_or(SinkError::Disconnected)?;
        requests.send(value).map_err(|_| SinkError::Disconnected)?;
        self.done.recv().map_err(|_| SinkError::Disconnected)
    }
}

impl Drop for ThreadedSink {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("output worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use parking_lot::Mutex;

    #[test]
    fn test_announce_waits_for_worker() {
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let log = rendered.clone();
        let mut sink = ThreadedSink::spawn(move |value| {
            thread::sleep(Duration::from_millis(20));
            log.lock().push(value);
        });

        sink.announce(42).unwrap();
        // The worker finished rendering before announce returned
        assert_eq!(*rendered.lock(), vec![42]);

        sink.announce(7).unwrap();
        assert_eq!(*rendered.lock(), vec![42, 7]);
    }

    #[test]
    fn test_worker_panic_disconnects() {
        let mut sink = ThreadedSink::spawn(|value| {
            if value == 0 {
                panic!("renderer failed");
            }
        });

        sink.announce(1).unwrap();
        match sink.announce(0) {
            Err(SinkError::Disconnected) => {},
            other => panic!("Expected Disconnected, got {:?}", other),
        }
        assert!(sink.announce(2).is_err());
    }

    #[test]
    fn test_drop_joins_worker() {
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let log = rendered.clone();
        {
            let mut sink = ThreadedSink::spawn(move |value| log.lock().push(value));
            sink.announce(5).unwrap();
        }
        assert_eq!(*rendered.lock(), vec![5]);
        // Worker's closure has been dropped along with the thread
        assert_eq!(Arc::strong_count(&rendered), 1);
    }
}

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, TryIter};
use parking_lot::{Condvar, Mutex};
use tracing::trace;

struct Shared {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

/// Repeating timer running on its own thread.
///
/// Ticks are delivered through a channel and drained by the owner. `cancel`
/// (also run on drop) stops the thread and joins it before returning, so no
/// tick is produced after the owner lets go of the ticker.
pub struct Ticker {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
    ticks: Receiver<u64>,
}

impl Ticker {
    pub fn spawn(interval: Duration) -> std::io::Result<Self> {
        let shared = Arc::new(Shared {
            cancelled: Mutex::new(false),
            wake: Condvar::new(),
        });
        let (tx, rx) = unbounded();

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("keyfall-ticker".into())
            .spawn(move || {
                let mut seq = 0u64;
                let mut cancelled = thread_shared.cancelled.lock();
                loop {
                    let deadline = Instant::now() + interval;
                    while !*cancelled && Instant::now() < deadline {
                        thread_shared.wake.wait_until(&mut cancelled, deadline);
                    }
                    if *cancelled {
                        break;
                    }
                    seq += 1;
                    trace!(seq, "tick");
                    if tx.send(seq).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            shared,
            handle: Some(handle),
            ticks: rx,
        })
    }

    /// Ticks fired since the last call, without blocking.
    pub fn try_iter(&self) -> TryIter<'_, u64> {
        self.ticks.try_iter()
    }

    pub fn try_recv(&self) -> Option<u64> {
        self.ticks.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<u64> {
        self.ticks.recv_timeout(timeout).ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_none()
    }

    /// Stops the timer and waits for its thread to exit. Idempotent.
    pub fn cancel(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        *self.shared.cancelled.lock() = true;
        self.shared.wake.notify_all();
        let _ = handle.join();
        // Anything still queued was fired before cancellation; drop it.
        while self.ticks.try_recv().is_ok() {}
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

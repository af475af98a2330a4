use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use atomic_float::AtomicF64;
use keyfall_schema::Seconds;

/// Monotonic host time in seconds.
pub trait Clock {
    fn now(&self) -> Seconds;
}

/// Wall clock backed by `Instant`, counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Seconds {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Host-driven time source. Clones share the same value, so an input thread
/// can stamp events against the clock the session reads.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Arc<AtomicF64>,
}

impl ManualClock {
    pub fn new(start: Seconds) -> Self {
        Self {
            time: Arc::new(AtomicF64::new(start)),
        }
    }

    pub fn set(&self, time: Seconds) {
        self.time.store(time, Ordering::Release);
    }

    pub fn advance(&self, dt: Seconds) {
        self.time.fetch_add(dt, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Seconds {
        self.time.load(Ordering::Acquire)
    }
}

/// Elapsed time of the playing phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionClock {
    phase_start: Option<Seconds>,
    elapsed: Seconds,
}

impl SessionClock {
    /// Marks `now` as the start of play; elapsed goes back to zero.
    pub fn start(&mut self, now: Seconds) {
        self.phase_start = Some(now);
        self.elapsed = 0.0;
    }

    pub fn phase_start(&self) -> Option<Seconds> {
        self.phase_start
    }

    /// Recomputes elapsed time from `now`. Never moves backwards.
    pub fn sample(&mut self, now: Seconds) -> Seconds {
        if let Some(start) = self.phase_start {
            self.elapsed = self.elapsed.max(now - start);
        }
        self.elapsed
    }

    /// Elapsed time at `instant` without updating the clock; `None` before
    /// play started or for instants earlier than the start.
    pub fn elapsed_at(&self, instant: Seconds) -> Option<Seconds> {
        let start = self.phase_start?;
        let elapsed = instant - start;
        (elapsed >= 0.0).then_some(elapsed)
    }

    pub fn elapsed(&self) -> Seconds {
        self.elapsed
    }
}

//! Time sources for the delay scheduler and the transaction deadlines.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// The longest a worker sleeps on a `ManualClock` before looking at it again.
const MANUAL_CLOCK_POLL: Duration = Duration::from_millis(5);

/// A source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// How long a thread waiting for `due` may sleep on the real clock before checking `now` again.
    fn wait_hint(&self, due: Instant) -> Duration;
}

/// The monotonic system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wait_hint(&self, due: Instant) -> Duration {
        due.saturating_duration_since(Instant::now())
    }
}

/// A clock which only moves when told to.
///
/// Makes the delays deterministic in tests.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::from_secs(0)),
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }

    /// The time passed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }

    fn wait_hint(&self, due: Instant) -> Duration {
        due.saturating_duration_since(self.now()).min(MANUAL_CLOCK_POLL)
    }
}

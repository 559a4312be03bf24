//! Clock port: source of the wall-clock time stamped onto telemetry.

use trigger_domain::time::{self, WallClock};

/// Provides the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> WallClock;
}

/// [`Clock`] backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> WallClock {
        time::now()
    }
}

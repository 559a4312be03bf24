//! Wall-clock stamps attached to telemetry samples.

use chrono::NaiveDateTime;

/// Local wall-clock reading, without a time zone.
pub type WallClock = NaiveDateTime;

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// The `HH:MM` and `DD/MM/YYYY` pair the server stamps onto every sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub time: String,
    pub date: String,
}

impl Stamp {
    #[must_use]
    pub fn at(clock: WallClock) -> Self {
        Self {
            time: clock.format(TIME_FORMAT).to_string(),
            date: clock.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Return the current local wall-clock time.
#[must_use]
pub fn now() -> WallClock {
    chrono::Local::now().naive_local()
}

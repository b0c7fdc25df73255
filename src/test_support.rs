//! Shared helpers for unit tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that advances by one second on every read.
///
/// Successive mutations therefore always observe strictly increasing
/// timestamps, which makes `updated_at` assertions deterministic.
#[derive(Debug)]
pub(crate) struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub(crate) fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }

    pub(crate) fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
            .single()
            .expect("valid fixed timestamp")
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(Self::epoch())
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut guard = self.next.lock().expect("clock mutex poisoned");
        let current = *guard;
        *guard = current + Duration::seconds(1);
        current
    }
}

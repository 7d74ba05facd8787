//! Minute tick source
//!
//! Turns wall clock samples into one notification per minute, in
//! non-decreasing order.

use super::time::WallClockTime;

/// A backwards jump bigger than this is read as the day rolling over.
const DAY_ROLLOVER_MINUTES: u16 = 12 * 60;

#[derive(Clone, Copy, Debug, Default)]
pub struct MinuteTicker {
    /// Last minute handed out
    last: Option<WallClockTime>,
}

impl MinuteTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticker that treats `now` as already delivered
    pub fn seeded(now: WallClockTime) -> Self {
        Self { last: Some(now) }
    }

    /// Return the sample if it starts a new minute
    pub fn poll(&mut self, now: WallClockTime) -> Option<WallClockTime> {
        let Some(last) = self.last else {
            self.last = Some(now);
            return Some(now);
        };

        let (prev, next) = (last.minute_of_day(), now.minute_of_day());
        let advanced = next > prev || prev - next > DAY_ROLLOVER_MINUTES;
        if !advanced {
            if next != prev {
                warn!("Clock went back from {} to {} minutes, tick dropped", prev, next);
            }
            return None;
        }

        trace!("Minute tick {}:{}", now.hour(), now.minute());
        self.last = Some(now);
        Some(now)
    }
}

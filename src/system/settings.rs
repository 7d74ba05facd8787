//! User settings and the clock view the watchface reads on every update

use super::time::{HourFormat, TimeManager, WallClockTime};

/// Host clock and settings service
pub trait ClockSettings {
    /// Current local wall clock time
    fn now(&self) -> WallClockTime;

    /// Current 12/24 hour display preference
    fn hour_format(&self) -> HourFormat;
}

/// User preferences
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub hour_format: HourFormat,
}

impl Settings {
    pub fn new(hour_format: HourFormat) -> Self {
        Self { hour_format }
    }

    /// Switch between 12 and 24 hour display
    pub fn toggle_hour_format(&mut self) -> HourFormat {
        self.hour_format = self.hour_format.toggled();
        debug!("Hour format set to 24h: {}", self.hour_format.is_24h());
        self.hour_format
    }
}

/// [`ClockSettings`] backed by a [`TimeManager`] and an uptime sample
pub struct ManagedClock<'a> {
    time: &'a TimeManager,
    settings: &'a Settings,
    uptime_secs: u64,
}

impl<'a> ManagedClock<'a> {
    pub fn new(time: &'a TimeManager, settings: &'a Settings, uptime_secs: u64) -> Self {
        Self {
            time,
            settings,
            uptime_secs,
        }
    }
}

impl ClockSettings for ManagedClock<'_> {
    fn now(&self) -> WallClockTime {
        self.time.now(self.uptime_secs)
    }

    fn hour_format(&self) -> HourFormat {
        self.settings.hour_format
    }
}

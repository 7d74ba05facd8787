//! Time keeping module for PineTime

use chrono::{DateTime, Duration, NaiveDateTime, Timelike};

/// Hour and minute of the local wall clock
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClockTime {
    /// Hour of day, 0 to 23
    hour: u8,
    /// Minute of hour, 0 to 59
    minute: u8,
}

impl WallClockTime {
    /// Create a new wall clock time, rejecting values a clock can't show
    pub fn new(hour: u8, minute: u8) -> Result<Self, Error> {
        if hour > 23 {
            return Err(Error::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(Error::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Take hour and minute from any chrono time value
    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        // chrono keeps both fields in range
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Hour as it appears on the display for the given format
    pub fn display_hour(&self, format: HourFormat) -> u8 {
        match format {
            HourFormat::TwentyFourHour => self.hour,
            HourFormat::TwelveHour => match self.hour % 12 {
                0 => 12,
                hour => hour,
            },
        }
    }

    /// Minutes since midnight
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl From<NaiveDateTime> for WallClockTime {
    fn from(time: NaiveDateTime) -> Self {
        Self::from_timelike(&time)
    }
}

/// Hour display preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 01 to 12, no AM/PM indicator
    TwelveHour,
    /// 00 to 23
    #[default]
    TwentyFourHour,
}

impl HourFormat {
    pub fn from_24h(use_24h: bool) -> Self {
        if use_24h {
            Self::TwentyFourHour
        } else {
            Self::TwelveHour
        }
    }

    pub fn is_24h(&self) -> bool {
        matches!(self, Self::TwentyFourHour)
    }

    /// The other format
    pub fn toggled(&self) -> Self {
        Self::from_24h(!self.is_24h())
    }
}

/// Seconds to sleep until the next minute boundary (1 to 60)
pub fn secs_until_next_minute<T: Timelike>(now: &T) -> u64 {
    60 - now.second().min(59) as u64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// System uptime at which `time` was taken
    uptime_secs: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            // 1970-01-01 00:00:00
            time: NaiveDateTime::default(),
            uptime_secs: 0,
        }
    }
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime, uptime_secs: u64) -> Self {
        Self { time, uptime_secs }
    }

    /// Create new time reference from a UTC unix timestamp
    pub fn from_timestamp(secs: i64, uptime_secs: u64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(|time| Self::from_datetime(time.naive_utc(), uptime_secs))
    }
}

/// Derives wall clock time from a UTC reference and the system uptime
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeManager {
    reference: TimeReference,
    /// Local offset from UTC in seconds
    utc_offset: i32,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, utc_offset: i32) -> Self {
        Self {
            reference,
            utc_offset,
        }
    }

    /// Get current local time
    pub fn get_time(&self, uptime_secs: u64) -> NaiveDateTime {
        let elapsed = uptime_secs.saturating_sub(self.reference.uptime_secs) as i64;
        let delta = Duration::seconds(elapsed + self.utc_offset as i64);
        // Only reachable hundreds of millennia after the reference
        self.reference
            .time
            .checked_add_signed(delta)
            .unwrap_or(self.reference.time)
    }

    /// Get current local hour and minute
    pub fn now(&self, uptime_secs: u64) -> WallClockTime {
        self.get_time(uptime_secs).into()
    }
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
}

//! Hour, minute and sum watchface for the PineTime
//!
//! The library holds everything that does not touch hardware: time keeping,
//! the watchface logic and a small retained-mode compositor. The firmware
//! binary (feature `firmware`) drives it from embassy tasks.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod app;
pub mod system;
pub mod ui;

pub use app::App;
pub use system::{
    settings::{ClockSettings, ManagedClock, Settings},
    tick::MinuteTicker,
    time::{HourFormat, TimeManager, TimeReference, WallClockTime},
};
pub use ui::{
    compositor::Compositor, plain_watchface::PlainWatchface, sums_watchface::SumsWatchface,
    window::Window, DisplayHost, FieldId, Painter, RegionId, WatchFace, WindowHandlers,
};

//! Clock, settings and tick sources the watchface reads from

pub mod settings;
pub mod tick;
pub mod time;

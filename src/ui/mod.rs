//! UI definitions module
//!
//! The watchface talks to the screen only through [`DisplayHost`] and
//! [`Painter`], so it runs the same against the LCD and in tests.

use embedded_graphics::{
    draw_target::DrawTarget, mono_font::MonoFont, pixelcolor::Rgb565, primitives::Rectangle,
    text::Alignment,
};
use heapless::Vec;

use crate::system::{
    settings::ClockSettings,
    time::{HourFormat, WallClockTime},
};

pub mod compositor;
pub mod field;
pub mod plain_watchface;
pub mod sums_watchface;
pub mod window;

pub use field::FieldText;

/// Most text fields a watchface shows at once
pub const MAX_FIELDS: usize = 3;

/// Height of every text region
pub const FIELD_HEIGHT: u32 = 50;

/// Text derived for each field on an update
pub type DisplayStrings = Vec<(FieldId, FieldText), MAX_FIELDS>;

/// Where each field goes on screen
pub type Layout = Vec<(FieldId, Rectangle), MAX_FIELDS>;

/// Which display region a derived string feeds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldId {
    /// Hour, zero padded
    Hour,
    /// Minute, no padding
    Minute,
    /// Raw hour plus minute
    Total,
    /// HH:MM
    Time,
}

impl FieldId {
    /// Longest text this field can hold
    pub const fn width(&self) -> usize {
        match self {
            Self::Hour => field::HOUR_WIDTH,
            Self::Minute => field::MINUTE_WIDTH,
            Self::Total => field::TOTAL_WIDTH,
            Self::Time => field::CLOCK_WIDTH,
        }
    }
}

/// Handle to a region owned by a [`DisplayHost`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegionId(u8);

impl RegionId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Styling of a text region, fixed at creation
#[derive(Clone, Copy)]
pub struct TextConfig {
    pub alignment: Alignment,
    pub color: Rgb565,
    pub font: &'static MonoFont<'static>,
}

/// Host UI layer
pub trait DisplayHost {
    /// Bounds of the window the regions live in
    fn bounds(&self) -> Rectangle;

    fn create_text_region(&mut self, bounds: Rectangle, config: TextConfig)
        -> Result<RegionId, Error>;

    /// Region whose content comes from a [`Painter`]
    fn create_canvas_region(&mut self, bounds: Rectangle) -> Result<RegionId, Error>;

    fn set_text(&mut self, region: RegionId, text: &str) -> Result<(), Error>;

    /// Request a repaint of the region
    fn mark_dirty(&mut self, region: RegionId) -> Result<(), Error>;

    fn destroy_region(&mut self, region: RegionId) -> Result<(), Error>;
}

/// Repaint callback for canvas regions
pub trait Painter {
    fn repaint<D>(&self, region: RegionId, bounds: Rectangle, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}

pub trait WatchFace {
    /// Text regions, in drawing order, for a window of the given bounds
    fn layout(&self, window: Rectangle) -> Layout;

    /// Style shared by all text regions
    fn text_config(&self) -> TextConfig;

    /// Text for every field at the given time
    ///
    /// Field widths cover every valid [`WallClockTime`], so this only errors
    /// if a width constant is wrong.
    fn derive_display_strings(
        &self,
        time: WallClockTime,
        format: HourFormat,
    ) -> Result<DisplayStrings, Error>;

    /// Whether the face needs a canvas region for static decorations
    fn has_decorations(&self) -> bool {
        false
    }

    fn draw_decorations<D>(&self, _bounds: Rectangle, _target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Ok(())
    }
}

/// Window lifecycle callbacks
pub trait WindowHandlers {
    /// The window became visible: allocate regions and show the current time
    fn on_load<H, S>(&mut self, host: &mut H, settings: &S) -> Result<(), Error>
    where
        H: DisplayHost,
        S: ClockSettings;

    /// The window is going away: release regions
    fn on_unload<H>(&mut self, host: &mut H)
    where
        H: DisplayHost;

    /// A new minute started
    fn on_tick<H, S>(&mut self, host: &mut H, settings: &S, time: WallClockTime) -> Result<(), Error>
    where
        H: DisplayHost,
        S: ClockSettings;
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The host has no free region slot
    RegionsExhausted,
    /// The region was never created or is already destroyed
    UnknownRegion,
    /// Text doesn't fit the field buffer
    TextTooLong,
}

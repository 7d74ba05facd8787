//! Plain HH:MM clock

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
    text::Alignment,
};
use profont::PROFONT_24_POINT;

use super::{
    DisplayStrings, Error, FieldId, FieldText, Layout, TextConfig, WatchFace, FIELD_HEIGHT,
};
use crate::system::time::{HourFormat, WallClockTime};

#[derive(Clone, Copy, Debug, Default)]
pub struct PlainWatchface;

impl PlainWatchface {
    pub fn new() -> Self {
        Self
    }
}

impl WatchFace for PlainWatchface {
    fn layout(&self, window: Rectangle) -> Layout {
        let y = (window.size.height.saturating_sub(FIELD_HEIGHT) / 2) as i32;
        let bounds = Rectangle::new(
            window.top_left + Point::new(0, y),
            Size::new(window.size.width, FIELD_HEIGHT),
        );

        [(FieldId::Time, bounds)].into_iter().collect()
    }

    fn text_config(&self) -> TextConfig {
        TextConfig {
            alignment: Alignment::Center,
            color: Rgb565::BLACK,
            font: &PROFONT_24_POINT,
        }
    }

    fn derive_display_strings(
        &self,
        time: WallClockTime,
        format: HourFormat,
    ) -> Result<DisplayStrings, Error> {
        let text = FieldText::format(format_args!(
            "{:02}:{:02}",
            time.display_hour(format),
            time.minute()
        ))?;

        let mut strings = DisplayStrings::new();
        strings
            .push((FieldId::Time, text))
            .map_err(|_| Error::TextTooLong)?;
        Ok(strings)
    }
}

//! Hour, minute and their sum, stacked like a written addition

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::{Primitive, PrimitiveStyle, Rectangle, RoundedRectangle},
    text::Alignment,
    Drawable,
};
use profont::PROFONT_24_POINT;

use super::{
    DisplayStrings, Error, FieldId, FieldText, Layout, TextConfig, WatchFace, FIELD_HEIGHT,
};
use crate::system::time::{HourFormat, WallClockTime};

/// Text regions stop this far from the right edge
const RIGHT_MARGIN: u32 = 30;
/// Top of the hour, minute and total rows. ProFont 24 inks rows 5 to 23
/// below the top, which keeps the total between the two bars.
const HOUR_Y: i32 = 20;
const MINUTE_Y: i32 = 55;
const TOTAL_Y: i32 = 108;

const BAR_X: i32 = 10;
const BAR_HEIGHT: u32 = 6;
const BAR_RADIUS: u32 = 3;
/// Line under the minute and line under the total
const BAR_YS: [i32; 2] = [95, 148];

/// The plus sign in front of the minute
const PLUS_HORIZONTAL: Rectangle = Rectangle::new(Point::new(20, 70), Size::new(20, 4));
const PLUS_VERTICAL: Rectangle = Rectangle::new(Point::new(28, 62), Size::new(4, 20));

#[derive(Clone, Copy, Debug, Default)]
pub struct SumsWatchface;

impl SumsWatchface {
    pub fn new() -> Self {
        Self
    }

    /// Bars and plus sign for a canvas of the given bounds
    pub fn decorations(bounds: Rectangle) -> [RoundedRectangle; 4] {
        let origin = bounds.top_left;
        let bar = |y| {
            RoundedRectangle::with_equal_corners(
                Rectangle::new(
                    origin + Point::new(BAR_X, y),
                    Size::new(bounds.size.width.saturating_sub(2 * BAR_X as u32), BAR_HEIGHT),
                ),
                Size::new(BAR_RADIUS, BAR_RADIUS),
            )
        };
        let square = |rect: Rectangle| {
            RoundedRectangle::with_equal_corners(
                Rectangle::new(origin + rect.top_left, rect.size),
                Size::zero(),
            )
        };

        [
            bar(BAR_YS[0]),
            bar(BAR_YS[1]),
            square(PLUS_HORIZONTAL),
            square(PLUS_VERTICAL),
        ]
    }
}

impl WatchFace for SumsWatchface {
    fn layout(&self, window: Rectangle) -> Layout {
        let size = Size::new(window.size.width.saturating_sub(RIGHT_MARGIN), FIELD_HEIGHT);
        let row = |y| Rectangle::new(window.top_left + Point::new(0, y), size);

        [
            (FieldId::Hour, row(HOUR_Y)),
            (FieldId::Minute, row(MINUTE_Y)),
            (FieldId::Total, row(TOTAL_Y)),
        ]
        .into_iter()
        .collect()
    }

    fn text_config(&self) -> TextConfig {
        TextConfig {
            alignment: Alignment::Right,
            color: Rgb565::BLACK,
            font: &PROFONT_24_POINT,
        }
    }

    fn derive_display_strings(
        &self,
        time: WallClockTime,
        format: HourFormat,
    ) -> Result<DisplayStrings, Error> {
        // The sum uses the raw 0-23 hour, not the displayed one
        let total = time.hour() + time.minute();

        let mut strings = DisplayStrings::new();
        let fields = [
            (
                FieldId::Hour,
                FieldText::format(format_args!("{:02}", time.display_hour(format)))?,
            ),
            (
                FieldId::Minute,
                FieldText::format(format_args!("{}", time.minute()))?,
            ),
            (FieldId::Total, FieldText::format(format_args!("{}", total))?),
        ];
        for field in fields {
            strings.push(field).map_err(|_| Error::TextTooLong)?;
        }
        Ok(strings)
    }

    fn has_decorations(&self) -> bool {
        true
    }

    fn draw_decorations<D>(&self, bounds: Rectangle, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = PrimitiveStyle::with_fill(Rgb565::BLACK);
        for shape in Self::decorations(bounds) {
            shape.into_styled(style).draw(target)?;
        }
        Ok(())
    }
}

//! Window lifecycle against a recording display host

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
    Pixel,
};
use pinetime_sums::{
    ui::{Error, TextConfig},
    App, ClockSettings, Compositor, DisplayHost, FieldId, HourFormat, ManagedClock, Painter,
    PlainWatchface, RegionId, Settings, SumsWatchface, TimeManager, TimeReference,
    WallClockTime, WatchFace, Window,
};

/// Host that records every call instead of drawing
#[derive(Default)]
struct RecordingHost {
    /// Text of every region ever created, `None` for canvases and empty text
    regions: Vec<Option<String>>,
    dirty: Vec<RegionId>,
    destroyed: Vec<RegionId>,
    /// Refuse to create more than this many live regions
    capacity: Option<usize>,
}

impl RecordingHost {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    fn live(&self) -> usize {
        self.regions.len() - self.destroyed.len()
    }

    fn allocate(&mut self) -> Result<RegionId, Error> {
        if self.capacity.is_some_and(|capacity| self.live() >= capacity) {
            return Err(Error::RegionsExhausted);
        }
        self.regions.push(None);
        Ok(RegionId::new((self.regions.len() - 1) as u8))
    }

    fn check(&self, region: RegionId) -> Result<(), Error> {
        if region.index() >= self.regions.len() || self.destroyed.contains(&region) {
            return Err(Error::UnknownRegion);
        }
        Ok(())
    }

    fn text(&self, region: RegionId) -> Option<&str> {
        self.regions.get(region.index())?.as_deref()
    }
}

impl DisplayHost for RecordingHost {
    fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(144, 168))
    }

    fn create_text_region(&mut self, _bounds: Rectangle, _config: TextConfig) -> Result<RegionId, Error> {
        self.allocate()
    }

    fn create_canvas_region(&mut self, _bounds: Rectangle) -> Result<RegionId, Error> {
        self.allocate()
    }

    fn set_text(&mut self, region: RegionId, text: &str) -> Result<(), Error> {
        self.check(region)?;
        self.regions[region.index()] = Some(text.to_string());
        Ok(())
    }

    fn mark_dirty(&mut self, region: RegionId) -> Result<(), Error> {
        self.check(region)?;
        self.dirty.push(region);
        Ok(())
    }

    fn destroy_region(&mut self, region: RegionId) -> Result<(), Error> {
        self.check(region)?;
        self.destroyed.push(region);
        Ok(())
    }
}

struct FixedClock {
    time: WallClockTime,
    format: HourFormat,
}

impl FixedClock {
    fn new(hour: u8, minute: u8, format: HourFormat) -> Self {
        Self {
            time: WallClockTime::new(hour, minute).unwrap(),
            format,
        }
    }
}

impl ClockSettings for FixedClock {
    fn now(&self) -> WallClockTime {
        self.time
    }

    fn hour_format(&self) -> HourFormat {
        self.format
    }
}

fn t(hour: u8, minute: u8) -> WallClockTime {
    WallClockTime::new(hour, minute).unwrap()
}

fn shown(window: &Window<App<SumsWatchface>>, host: &RecordingHost, field: FieldId) -> String {
    let region = window.handlers().region(field).unwrap();
    host.text(region).unwrap().to_string()
}

#[test]
fn load_shows_current_time() {
    let mut host = RecordingHost::default();
    let mut window = Window::new(App::new(SumsWatchface));

    window
        .push(&mut host, &FixedClock::new(9, 5, HourFormat::TwentyFourHour))
        .unwrap();

    assert!(window.is_loaded());
    assert_eq!(shown(&window, &host, FieldId::Hour), "09");
    assert_eq!(shown(&window, &host, FieldId::Minute), "5");
    assert_eq!(shown(&window, &host, FieldId::Total), "14");

    // Decoration canvas is marked dirty once at load time
    let canvas = window.handlers().canvas().unwrap();
    assert_eq!(host.dirty.iter().filter(|r| **r == canvas).count(), 1);
}

#[test]
fn ticks_rewrite_every_field() {
    let mut host = RecordingHost::default();
    let settings = FixedClock::new(9, 5, HourFormat::TwentyFourHour);
    let mut window = Window::new(App::new(SumsWatchface));
    window.push(&mut host, &settings).unwrap();
    window.subscribe_minutes();

    assert_eq!(window.dispatch_tick(&mut host, &settings, t(23, 59)), Ok(true));
    assert_eq!(shown(&window, &host, FieldId::Hour), "23");
    assert_eq!(shown(&window, &host, FieldId::Minute), "59");
    assert_eq!(shown(&window, &host, FieldId::Total), "82");

    // Canvas is not touched by ticks
    let canvas = window.handlers().canvas().unwrap();
    assert_eq!(host.dirty.iter().filter(|r| **r == canvas).count(), 1);
}

#[test]
fn preference_is_read_on_every_tick() {
    let mut host = RecordingHost::default();
    let mut window = Window::new(App::new(SumsWatchface));
    window
        .push(&mut host, &FixedClock::new(13, 45, HourFormat::TwentyFourHour))
        .unwrap();
    window.subscribe_minutes();
    assert_eq!(shown(&window, &host, FieldId::Hour), "13");

    let mut settings = Settings::default();
    settings.toggle_hour_format();
    let manager = TimeManager::default();
    let clock = ManagedClock::new(&manager, &settings, 0);
    window.dispatch_tick(&mut host, &clock, t(13, 45)).unwrap();

    assert_eq!(shown(&window, &host, FieldId::Hour), "01");
    assert_eq!(shown(&window, &host, FieldId::Minute), "45");
    assert_eq!(shown(&window, &host, FieldId::Total), "58");
}

#[test]
fn ticks_before_subscription_are_dropped() {
    let mut host = RecordingHost::default();
    let settings = FixedClock::new(9, 5, HourFormat::TwentyFourHour);
    let mut window = Window::new(App::new(SumsWatchface));

    assert_eq!(window.dispatch_tick(&mut host, &settings, t(9, 6)), Ok(false));
    window.push(&mut host, &settings).unwrap();
    assert_eq!(window.dispatch_tick(&mut host, &settings, t(9, 6)), Ok(false));
    assert_eq!(shown(&window, &host, FieldId::Minute), "5");
}

#[test]
fn destroy_unsubscribes_and_releases() {
    let mut host = RecordingHost::default();
    let settings = FixedClock::new(9, 5, HourFormat::TwentyFourHour);
    let mut window = Window::new(App::new(SumsWatchface));
    window.push(&mut host, &settings).unwrap();
    window.subscribe_minutes();

    window.destroy(&mut host);
    assert!(!window.is_loaded());
    assert!(!window.is_subscribed());
    assert_eq!(host.destroyed.len(), 4);
    assert_eq!(host.live(), 0);

    // A late tick must not reach released regions
    assert_eq!(window.dispatch_tick(&mut host, &settings, t(9, 6)), Ok(false));
    window.destroy(&mut host);
    assert_eq!(host.destroyed.len(), 4);
}

#[test]
fn failed_load_leaves_nothing_behind() {
    let mut host = RecordingHost::with_capacity(2);
    let settings = FixedClock::new(9, 5, HourFormat::TwentyFourHour);
    let mut window = Window::new(App::new(SumsWatchface));

    assert_eq!(window.push(&mut host, &settings), Err(Error::RegionsExhausted));
    assert!(!window.is_loaded());
    assert!(!window.handlers().is_loaded());
    assert_eq!(host.live(), 0);
}

#[test]
fn plain_face_has_one_field_and_no_canvas() {
    let mut host = RecordingHost::default();
    let settings = FixedClock::new(23, 59, HourFormat::TwelveHour);
    let mut window = Window::new(App::new(PlainWatchface));
    window.push(&mut host, &settings).unwrap();

    let app = window.handlers();
    assert!(app.canvas().is_none());
    assert!(app.region(FieldId::Hour).is_none());
    let region = app.region(FieldId::Time).unwrap();
    assert_eq!(host.text(region), Some("11:59"));

    window.subscribe_minutes();
    window
        .dispatch_tick(&mut host, &FixedClock::new(0, 0, HourFormat::TwentyFourHour), t(0, 0))
        .unwrap();
    assert_eq!(host.text(region), Some("00:00"));
}

#[test]
fn refresh_redraws_with_current_time() {
    let mut host = RecordingHost::default();
    let mut window = Window::new(App::new(PlainWatchface));
    assert_eq!(
        window.refresh(&mut host, &FixedClock::new(8, 0, HourFormat::TwentyFourHour)),
        Ok(false)
    );

    window
        .push(&mut host, &FixedClock::new(8, 0, HourFormat::TwentyFourHour))
        .unwrap();
    window
        .refresh(&mut host, &FixedClock::new(20, 15, HourFormat::TwelveHour))
        .unwrap();
    let region = window.handlers().region(FieldId::Time).unwrap();
    assert_eq!(host.text(region), Some("08:15"));
}

#[test]
fn clock_built_from_reference() {
    // 1970-01-01T09:05:00Z, shown one hour ahead
    let reference = TimeReference::from_timestamp(9 * 3_600 + 5 * 60, 0).unwrap();
    let manager = TimeManager::init(reference, 3_600);
    let settings = Settings::default();

    let mut host = RecordingHost::default();
    let mut window = Window::new(App::new(SumsWatchface));
    window
        .push(&mut host, &ManagedClock::new(&manager, &settings, 0))
        .unwrap();
    assert_eq!(shown(&window, &host, FieldId::Hour), "10");
    assert_eq!(shown(&window, &host, FieldId::Total), "15");
}

const SCREEN: u32 = 240;

struct Framebuffer {
    pixels: Vec<Rgb565>,
}

impl Framebuffer {
    fn new() -> Self {
        Self {
            pixels: vec![Rgb565::RED; (SCREEN * SCREEN) as usize],
        }
    }

    fn at(&self, x: u32, y: u32) -> Rgb565 {
        self.pixels[(y * SCREEN + x) as usize]
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN, SCREEN)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..SCREEN as i32).contains(&point.x) && (0..SCREEN as i32).contains(&point.y) {
                self.pixels[(point.y as u32 * SCREEN + point.x as u32) as usize] = color;
            }
        }
        Ok(())
    }
}

#[test]
fn sums_face_renders_decorations() {
    let screen = Rectangle::new(Point::zero(), Size::new(SCREEN, SCREEN));
    let mut compositor = Compositor::<4>::new(screen, Rgb565::WHITE);
    let mut window = Window::new(App::new(SumsWatchface));
    window
        .push(&mut compositor, &FixedClock::new(9, 5, HourFormat::TwentyFourHour))
        .unwrap();
    window.subscribe_minutes();

    let mut fb = Framebuffer::new();
    assert_eq!(compositor.render(&mut fb, window.handlers()), Ok(true));

    // Plus sign
    assert_eq!(fb.at(30, 72), Rgb565::BLACK);
    assert_eq!(fb.at(29, 64), Rgb565::BLACK);
    assert_eq!(fb.at(22, 64), Rgb565::WHITE);
    // Bars span the width minus margins
    assert_eq!(fb.at(120, 97), Rgb565::BLACK);
    assert_eq!(fb.at(120, 150), Rgb565::BLACK);
    assert_eq!(fb.at(5, 97), Rgb565::WHITE);
    assert_eq!(fb.at(235, 150), Rgb565::WHITE);

    // Nothing changed, nothing to draw
    assert_eq!(compositor.render(&mut fb, window.handlers()), Ok(false));

    window
        .dispatch_tick(&mut compositor, &FixedClock::new(9, 6, HourFormat::TwentyFourHour), t(9, 6))
        .unwrap();
    let minute = window.handlers().region(FieldId::Minute).unwrap();
    assert_eq!(compositor.text(minute), Some("6"));
    assert_eq!(compositor.render(&mut fb, window.handlers()), Ok(true));
    assert_eq!(fb.at(30, 72), Rgb565::BLACK);

    window.destroy(&mut compositor);
    assert!(compositor.is_empty());
    compositor.render(&mut fb, window.handlers()).unwrap();
    assert_eq!(fb.at(30, 72), Rgb565::WHITE);
}

/// Draws nothing into canvases, leaving only the text on screen
struct TextOnly;

impl Painter for TextOnly {
    fn repaint<D>(&self, _: RegionId, _: Rectangle, _: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Ok(())
    }
}

#[test]
fn sums_text_clears_the_bars() {
    let screen = Rectangle::new(Point::zero(), Size::new(SCREEN, SCREEN));
    let mut compositor = Compositor::<4>::new(screen, Rgb565::WHITE);
    let mut window = Window::new(App::new(SumsWatchface));
    // Widest strings of the day: "23", "59" and "82"
    window
        .push(&mut compositor, &FixedClock::new(23, 59, HourFormat::TwentyFourHour))
        .unwrap();

    let mut fb = Framebuffer::new();
    assert_eq!(compositor.render(&mut fb, &TextOnly), Ok(true));

    let inked = |rows: core::ops::Range<u32>| {
        rows.flat_map(|y| (0..SCREEN).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.at(x, y) == Rgb565::BLACK)
            .count()
    };
    // Bars, with a pixel of clearance on either side
    assert_eq!(inked(94..102), 0);
    assert_eq!(inked(147..155), 0);
    // Every row still shows its digits
    let rows = SumsWatchface.layout(screen);
    for (_, bounds) in rows.iter() {
        let top = bounds.top_left.y as u32;
        assert!(inked(top..top + bounds.size.height) > 0);
    }
}

//! Time display updater
//!
//! Owns the display regions of one watchface and rewrites them on every
//! minute tick.

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565, primitives::Rectangle};
use heapless::Vec;

use crate::{
    system::{
        settings::ClockSettings,
        time::{HourFormat, WallClockTime},
    },
    ui::{DisplayHost, Error, FieldId, Painter, RegionId, WatchFace, WindowHandlers, MAX_FIELDS},
};

pub struct App<F> {
    face: F,
    /// Text region of each field, empty while unloaded
    fields: Vec<(FieldId, RegionId), MAX_FIELDS>,
    /// Decoration canvas, if the face has one
    canvas: Option<RegionId>,
}

impl<F> App<F>
where
    F: WatchFace,
{
    pub fn new(face: F) -> Self {
        Self {
            face,
            fields: Vec::new(),
            canvas: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.fields.is_empty() || self.canvas.is_some()
    }

    /// Region a field is shown in
    pub fn region(&self, field: FieldId) -> Option<RegionId> {
        self.fields
            .iter()
            .find(|(id, _)| *id == field)
            .map(|(_, region)| *region)
    }

    pub fn canvas(&self) -> Option<RegionId> {
        self.canvas
    }

    fn create_regions<H>(&mut self, host: &mut H) -> Result<(), Error>
    where
        H: DisplayHost,
    {
        let window = host.bounds();
        let config = self.face.text_config();
        for (field, bounds) in self.face.layout(window) {
            let region = host.create_text_region(bounds, config)?;
            self.fields
                .push((field, region))
                .map_err(|_| Error::RegionsExhausted)?;
        }

        if self.face.has_decorations() {
            let canvas = host.create_canvas_region(window)?;
            self.canvas = Some(canvas);
            // Static content, drawn once here and again only on host repaints
            host.mark_dirty(canvas)?;
        }
        Ok(())
    }

    fn release<H>(&mut self, host: &mut H)
    where
        H: DisplayHost,
    {
        let regions = self
            .fields
            .iter()
            .map(|(_, region)| *region)
            .chain(self.canvas);
        for region in regions {
            if let Err(err) = host.destroy_region(region) {
                warn!("Failed to destroy region {}: {}", region, err);
            }
        }
        self.fields.clear();
        self.canvas = None;
    }

    /// Write the strings for `time` into their regions
    fn update_time<H>(&self, host: &mut H, time: WallClockTime, format: HourFormat) -> Result<(), Error>
    where
        H: DisplayHost,
    {
        for (field, text) in self.face.derive_display_strings(time, format)? {
            let Some(region) = self.region(field) else {
                warn!("No region for field {}", field);
                continue;
            };
            host.set_text(region, text.as_str())?;
            host.mark_dirty(region)?;
        }
        debug!(
            "Time updated to {}:{} (24h: {})",
            time.hour(),
            time.minute(),
            format.is_24h()
        );
        Ok(())
    }
}

impl<F> WindowHandlers for App<F>
where
    F: WatchFace,
{
    fn on_load<H, S>(&mut self, host: &mut H, settings: &S) -> Result<(), Error>
    where
        H: DisplayHost,
        S: ClockSettings,
    {
        if self.is_loaded() {
            return Ok(());
        }
        if let Err(err) = self.create_regions(host) {
            self.release(host);
            return Err(err);
        }
        self.update_time(host, settings.now(), settings.hour_format())
    }

    fn on_unload<H>(&mut self, host: &mut H)
    where
        H: DisplayHost,
    {
        self.release(host);
    }

    fn on_tick<H, S>(&mut self, host: &mut H, settings: &S, time: WallClockTime) -> Result<(), Error>
    where
        H: DisplayHost,
        S: ClockSettings,
    {
        if !self.is_loaded() {
            warn!("Tick without display regions");
            return Ok(());
        }
        // The preference can change at any time
        self.update_time(host, time, settings.hour_format())
    }
}

impl<F> Painter for App<F>
where
    F: WatchFace,
{
    fn repaint<D>(&self, region: RegionId, bounds: Rectangle, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.canvas == Some(region) {
            self.face.draw_decorations(bounds, target)?;
        }
        Ok(())
    }
}

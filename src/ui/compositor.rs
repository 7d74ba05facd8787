//! Retained-mode display host
//!
//! Keeps the regions a watchface creates and redraws them onto any
//! `embedded-graphics` target when one of them is dirty.

use core::array;

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::Point,
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};

use super::{DisplayHost, Error, FieldText, Painter, RegionId, TextConfig};

enum Content {
    Text { config: TextConfig, text: FieldText },
    Canvas,
}

struct Region {
    bounds: Rectangle,
    content: Content,
    dirty: bool,
}

pub struct Compositor<const N: usize> {
    /// Window bounds
    bounds: Rectangle,
    /// Window background
    background: Rgb565,
    /// Region slots, indexed by [`RegionId`]
    regions: [Option<Region>; N],
    /// A region was destroyed and has to be cleared off the screen
    stale: bool,
}

impl<const N: usize> Compositor<N> {
    pub fn new(bounds: Rectangle, background: Rgb565) -> Self {
        Self {
            bounds,
            background,
            regions: array::from_fn(|_| None),
            stale: false,
        }
    }

    /// Number of live regions
    pub fn len(&self) -> usize {
        self.regions.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the next [`render`](Self::render) draws anything
    pub fn needs_render(&self) -> bool {
        self.stale || self.regions.iter().flatten().any(|region| region.dirty)
    }

    /// Current text of a text region
    pub fn text(&self, region: RegionId) -> Option<&str> {
        match &self.region(region).ok()?.content {
            Content::Text { text, .. } => Some(text.as_str()),
            Content::Canvas => None,
        }
    }

    /// Redraw the window if any region is dirty
    ///
    /// Returns whether anything was drawn. Regions are drawn in creation
    /// order, canvas regions through `painter`.
    pub fn render<D, P>(&mut self, target: &mut D, painter: &P) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        P: Painter,
    {
        if !self.needs_render() {
            return Ok(false);
        }

        target.fill_solid(&self.bounds, self.background)?;

        for (index, slot) in self.regions.iter_mut().enumerate() {
            let Some(region) = slot else {
                continue;
            };
            let mut clipped = target.clipped(&region.bounds);
            match &region.content {
                Content::Text { config, text } => {
                    draw_text(&mut clipped, region.bounds, config, text.as_str())?;
                }
                Content::Canvas => {
                    painter.repaint(RegionId::new(index as u8), region.bounds, &mut clipped)?;
                }
            }
            region.dirty = false;
        }
        self.stale = false;

        trace!("Window rendered");
        Ok(true)
    }

    fn insert(&mut self, region: Region) -> Result<RegionId, Error> {
        // Ids have to fit a u8
        let slots = N.min(u8::MAX as usize + 1);
        let index = self.regions[..slots]
            .iter()
            .position(Option::is_none)
            .ok_or(Error::RegionsExhausted)?;
        self.regions[index] = Some(region);
        Ok(RegionId::new(index as u8))
    }

    fn region(&self, region: RegionId) -> Result<&Region, Error> {
        self.regions
            .get(region.index())
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownRegion)
    }

    fn region_mut(&mut self, region: RegionId) -> Result<&mut Region, Error> {
        self.regions
            .get_mut(region.index())
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownRegion)
    }
}

impl<const N: usize> DisplayHost for Compositor<N> {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn create_text_region(
        &mut self,
        bounds: Rectangle,
        config: TextConfig,
    ) -> Result<RegionId, Error> {
        self.insert(Region {
            bounds,
            content: Content::Text {
                config,
                text: FieldText::empty(),
            },
            dirty: false,
        })
    }

    fn create_canvas_region(&mut self, bounds: Rectangle) -> Result<RegionId, Error> {
        self.insert(Region {
            bounds,
            content: Content::Canvas,
            dirty: false,
        })
    }

    fn set_text(&mut self, region: RegionId, text: &str) -> Result<(), Error> {
        match &mut self.region_mut(region)?.content {
            Content::Text { text: current, .. } => {
                *current = FieldText::new(text)?;
                Ok(())
            }
            Content::Canvas => Err(Error::UnknownRegion),
        }
    }

    fn mark_dirty(&mut self, region: RegionId) -> Result<(), Error> {
        self.region_mut(region)?.dirty = true;
        Ok(())
    }

    fn destroy_region(&mut self, region: RegionId) -> Result<(), Error> {
        self.region(region)?;
        self.regions[region.index()] = None;
        self.stale = true;
        Ok(())
    }
}

/// Draw text inside `bounds`, anchored by the configured alignment
fn draw_text<D>(target: &mut D, bounds: Rectangle, config: &TextConfig, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let x = match config.alignment {
        Alignment::Left => bounds.top_left.x,
        Alignment::Center => bounds.top_left.x + bounds.size.width as i32 / 2,
        Alignment::Right => bounds.top_left.x + bounds.size.width as i32,
    };
    let character_style = MonoTextStyle::new(config.font, config.color);
    let text_style = TextStyleBuilder::new()
        .alignment(config.alignment)
        .baseline(Baseline::Top)
        .build();

    Text::with_text_style(text, Point::new(x, bounds.top_left.y), character_style, text_style)
        .draw(target)?;
    Ok(())
}

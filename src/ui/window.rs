//! Window lifecycle and minute tick subscription

use super::{DisplayHost, Error, WindowHandlers};
use crate::system::{settings::ClockSettings, time::WallClockTime};

pub struct Window<A> {
    handlers: A,
    /// Between load and unload
    loaded: bool,
    /// Minute ticks are delivered
    subscribed: bool,
}

impl<A> Window<A>
where
    A: WindowHandlers,
{
    pub fn new(handlers: A) -> Self {
        Self {
            handlers,
            loaded: false,
            subscribed: false,
        }
    }

    /// Show the window, running its load handler once
    pub fn push<H, S>(&mut self, host: &mut H, settings: &S) -> Result<(), Error>
    where
        H: DisplayHost,
        S: ClockSettings,
    {
        if self.loaded {
            return Ok(());
        }
        self.handlers.on_load(host, settings)?;
        self.loaded = true;
        info!("Window loaded");
        Ok(())
    }

    pub fn subscribe_minutes(&mut self) {
        self.subscribed = true;
        debug!("Subscribed to minute ticks");
    }

    pub fn unsubscribe_minutes(&mut self) {
        self.subscribed = false;
        debug!("Unsubscribed from minute ticks");
    }

    /// Deliver a minute tick
    ///
    /// Returns `Ok(false)` when the tick was dropped because the window is
    /// not loaded or not subscribed.
    pub fn dispatch_tick<H, S>(
        &mut self,
        host: &mut H,
        settings: &S,
        time: WallClockTime,
    ) -> Result<bool, Error>
    where
        H: DisplayHost,
        S: ClockSettings,
    {
        if !(self.loaded && self.subscribed) {
            trace!("Tick dropped");
            return Ok(false);
        }
        self.handlers.on_tick(host, settings, time)?;
        Ok(true)
    }

    /// Redraw with the current time and settings, outside the tick schedule
    pub fn refresh<H, S>(&mut self, host: &mut H, settings: &S) -> Result<bool, Error>
    where
        H: DisplayHost,
        S: ClockSettings,
    {
        if !self.loaded {
            return Ok(false);
        }
        self.handlers.on_tick(host, settings, settings.now())?;
        Ok(true)
    }

    /// Tear the window down; no tick reaches it afterwards
    pub fn destroy<H>(&mut self, host: &mut H)
    where
        H: DisplayHost,
    {
        self.unsubscribe_minutes();
        if self.loaded {
            self.handlers.on_unload(host);
            self.loaded = false;
            info!("Window unloaded");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn handlers(&self) -> &A {
        &self.handlers
    }
}

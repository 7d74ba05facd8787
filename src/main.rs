#![no_std]
#![no_main]

mod board;
mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::{Backlight, DEFAULT_BRIGHTNESS},
    button::Button,
    display::Display,
};
use pinetime_sums::{
    system::time::secs_until_next_minute, App, ClockSettings, Compositor, ManagedClock,
    MinuteTicker, Settings, TimeManager, TimeReference, WallClockTime, Window,
};

#[cfg(not(feature = "plain-face"))]
type Face = pinetime_sums::SumsWatchface;
#[cfg(feature = "plain-face")]
type Face = pinetime_sums::PlainWatchface;

/// Region slots: three text fields and the decoration canvas
const MAX_REGIONS: usize = 4;

// Include current UTC epoch and local offset at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static MINUTE_TICK: Signal<ThreadModeRawMutex, WallClockTime> = Signal::new();
static TOGGLE_HOUR_FORMAT: Signal<ThreadModeRawMutex, ()> = Signal::new();

/// Seconds since boot
fn uptime() -> u64 {
    Instant::now().as_secs()
}

/// Wake at every minute boundary and notify the UI.
#[embassy_executor::task(pool_size = 1)]
async fn minute_ticks(clock: TimeManager, shown: WallClockTime) {
    // The load handler already rendered `shown`
    let mut ticker = MinuteTicker::seeded(shown);
    loop {
        let now = clock.get_time(uptime());
        if let Some(time) = ticker.poll(WallClockTime::from(now)) {
            MINUTE_TICK.signal(time);
        }

        // Re-schedule the timer interrupt at the next full minute
        Timer::after(Duration::from_secs(secs_until_next_minute(&now))).await;
    }
}

/// Polls the button state every 10ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button<'static>) {
    loop {
        if button.pressed().await {
            defmt::debug!("Button pressed");
            TOGGLE_HOUR_FORMAT.signal(());
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Apply ticks and setting changes, then redraw what changed.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(
    mut display: Display,
    backlight: Backlight<'static>,
    mut compositor: Compositor<MAX_REGIONS>,
    mut window: Window<App<Face>>,
    clock: TimeManager,
    mut settings: Settings,
) {
    defmt::info!("Backlight at level {}", backlight.get_brightness());

    let mut tick = Ticker::every(Duration::from_millis(50));
    loop {
        if TOGGLE_HOUR_FORMAT.signaled() {
            TOGGLE_HOUR_FORMAT.reset();
            let format = settings.toggle_hour_format();
            defmt::info!("Hour format changed, 24h: {}", format.is_24h());

            // Show the change right away instead of at the next minute
            let now = ManagedClock::new(&clock, &settings, uptime());
            if let Err(err) = window.refresh(&mut compositor, &now) {
                defmt::warn!("Refresh failed: {}", err);
            }
        }

        if MINUTE_TICK.signaled() {
            let time = MINUTE_TICK.wait().await;
            defmt::info!("Current time: {}:{}", time.hour(), time.minute());

            let now = ManagedClock::new(&clock, &settings, uptime());
            if let Err(err) = window.dispatch_tick(&mut compositor, &now, time) {
                defmt::warn!("Tick failed: {}", err);
            }
        }

        // Dirty regions stay dirty on failure and are retried next round
        if let Err(err) = compositor.render(display.lcd(), window.handlers()) {
            defmt::warn!("Render failed: {}", defmt::Debug2Format(&err));
        }

        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(board::config());
    defmt::info!("Initializing");

    // Initialize Backlight
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        DEFAULT_BRIGHTNESS,
    ));

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13.degrade(), Pull::None),
        Output::new(p.P0_15.degrade(), Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD, the watch is useless without it
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    ));

    // Initialize time keeping from the build machine's clock
    let reference = unwrap!(TimeReference::from_timestamp(UTC_TIME, uptime()));
    let clock = TimeManager::init(reference, UTC_OFFSET);
    let settings = Settings::default();

    // Load the watchface and show the current time
    let mut compositor = Compositor::new(Display::bounds(), Rgb565::WHITE);
    let mut window = Window::new(App::new(Face::default()));
    let clock_view = ManagedClock::new(&clock, &settings, uptime());
    let shown = clock_view.now();
    unwrap!(window.push(&mut compositor, &clock_view));
    window.subscribe_minutes();

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(minute_ticks(clock, shown)));
    unwrap!(spawner.spawn(update_lcd(
        display, backlight, compositor, window, clock, settings
    )));
}

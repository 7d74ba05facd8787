//! nRF52832 start-up settings for the PineTime

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};

/// Settings handed to `embassy_nrf::init`
pub fn config() -> Config {
    let mut config = Config::default();

    // Both crystals are fitted on the board
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;
    config.dcdc.reg1 = true;

    // The button and the minute timer share one level
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;

    // Keep SWD attached for defmt-rtt
    config.debug = Debug::Allowed;

    config
}

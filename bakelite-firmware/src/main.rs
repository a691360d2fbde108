//! Bakelite - FM Pocket Radio Firmware
//!
//! Main firmware binary for RP2040-based boards. Drives an RDA5807M tuner
//! and a 128x32 SSD1306 OLED over one bit-banged two-wire bus, and polls
//! three buttons: CH+ seeks the next station, VOL+/VOL- adjust the volume.
//!
//! The whole display/tuner path is deliberately blocking and sequential;
//! the executor only hosts the polling loop and supplies delays.

#![no_std]
#![no_main]

mod board;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use bakelite_core::{BatteryMonitor, RadioConfig};
use bakelite_display::Oled;
use bakelite_hal::bus::BusTiming;
use bakelite_hal::SoftWire;
use bakelite_tuner::Rda5807;

use crate::board::{OpenDrainPin, VsysAdc};

/// Polling budget for the initial tune (10 ms per poll)
const TUNE_POLLS: u16 = 300;

/// Polling budget for a full-band seek
const SEEK_POLLS: u16 = 1500;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Bakelite radio starting...");

    let p = embassy_rp::init(Default::default());
    let config = RadioConfig::DEFAULT;

    // Display and tuner share the same two wires
    let sda = OpenDrainPin::new(p.PIN_16);
    let scl = OpenDrainPin::new(p.PIN_17);
    let bus = RefCell::new(SoftWire::new(sda, scl, Delay, BusTiming::STANDARD));

    let mut oled = Oled::new(&bus);
    let mut tuner = Rda5807::new(&bus);
    let mut battery = BatteryMonitor::new(VsysAdc::new(p.ADC, p.PIN_29));

    let ch_up = Input::new(p.PIN_2, Pull::Up);
    let vol_up = Input::new(p.PIN_3, Pull::Up);
    let vol_down = Input::new(p.PIN_4, Pull::Up);

    oled.init(config.contrast);
    oled.clear_screen();
    oled.println(config.header);
    oled.print("Starting ...");

    let mut volume = config.startup_volume;
    tuner.power_up(volume);
    tuner.set_frequency_10khz(config.startup_freq_10khz);
    if tuner.wait_tune_complete(&mut Delay, TUNE_POLLS).is_err() {
        warn!("initial tune did not complete");
    }

    loop {
        // Refresh the status lines below the header
        tuner.update_status();
        oled.set_cursor(0, 1);
        oled.print("Station:  ");
        oled.println(tuner.station_name());
        oled.print("Vol: ");
        oled.print_val(u16::from(volume), 2, 0);
        oled.print("   Frq: "); // fills the row, cursor wraps
        oled.print_val(tuner.frequency_10khz(), 5, 2);
        oled.print("Sig: ");
        oled.print_val(u16::from(tuner.signal_strength()), 2, 0);
        oled.print("   Bat: ");
        oled.println(battery.state().label());

        if ch_up.is_low() {
            oled.set_cursor(0, 1);
            oled.println("Tuning ...");
            oled.clear_line();
            oled.clear_line();
            tuner.seek_up();
            if tuner.wait_tune_complete(&mut Delay, SEEK_POLLS).is_err() {
                warn!("seek did not complete");
            }
            while ch_up.is_low() {
                Timer::after_millis(10).await;
            }
        }

        if vol_up.is_low() {
            if volume < 15 {
                volume += 1;
                tuner.set_volume(volume);
            }
            while vol_up.is_low() {
                Timer::after_millis(10).await;
            }
        }

        if vol_down.is_low() {
            if volume > 0 {
                volume -= 1;
                tuner.set_volume(volume);
            }
            while vol_down.is_low() {
                Timer::after_millis(10).await;
            }
        }

        Timer::after_millis(100).await;
    }
}

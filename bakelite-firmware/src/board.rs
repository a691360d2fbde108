//! RP2040 pin and ADC bindings
//!
//! Adapts embassy-rp peripherals to the bakelite-hal traits. The bus pins
//! emulate open-drain by switching direction: "high" releases the pin to
//! the pull-up, "low" drives it to ground.

use embassy_rp::adc::{Adc, Blocking, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Flex, Pin, Pull};
use embassy_rp::peripherals::{ADC, PIN_29};
use embassy_rp::Peri;

use bakelite_core::battery::AdcReader;
use bakelite_hal::{InputPin, OutputPin};

/// Open-drain emulation over a direction-switched GPIO
pub struct OpenDrainPin<'d> {
    pin: Flex<'d>,
}

impl<'d> OpenDrainPin<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::Up);
        // Output level is fixed low; direction selects the line state
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }
}

impl OutputPin for OpenDrainPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_as_input();
    }

    fn set_low(&mut self) {
        self.pin.set_as_output();
    }
}

impl InputPin for OpenDrainPin<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Battery sense through the VSYS/3 divider on ADC channel 3
///
/// The battery monitor expects the share of full scale a 1.2 V reference
/// takes against the supply rail. The RP2040 measures the rail directly
/// instead, so this adapter converts.
pub struct VsysAdc<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> VsysAdc<'d> {
    pub fn new(adc: Peri<'d, ADC>, pin: Peri<'d, PIN_29>) -> Self {
        Self {
            adc: Adc::new_blocking(adc, AdcConfig::default()),
            channel: Channel::new_pin(pin, Pull::None),
        }
    }
}

impl AdcReader for VsysAdc<'_> {
    fn read(&mut self) -> u16 {
        // 12-bit reading of VSYS/3 at 3.3 V full scale
        let raw = self.adc.blocking_read(&mut self.channel).unwrap_or(0);
        let supply_mv = u32::from(raw) * 3 * 3300 / 4095;
        if supply_mv == 0 {
            // Read failure counts as weak
            return 1023;
        }
        // 10-bit share a 1.2 V reference would take of that supply
        (1023 * 1200 / supply_mv).min(1023) as u16
    }
}

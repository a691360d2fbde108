//! RDA5807M register driver
//!
//! The chip exposes 16-bit big-endian registers over the two-wire bus and
//! has two addresses: one for register-indexed access (used for writes)
//! and one for sequential access, where reads start at the status register
//! 0x0A. Configuration registers are shadowed locally since the chip
//! cannot be read back cheaply mid-seek.

use embedded_hal::delay::DelayNs;

use bakelite_hal::BusTransport;

use crate::rds::StationName;

/// Register map and bit masks
#[allow(dead_code)]
mod reg {
    /// Bus address for register-indexed access
    pub const ADDR_INDEXED: u8 = 0x11;
    /// Bus address for sequential access (reads start at 0x0A)
    pub const ADDR_SEQUENTIAL: u8 = 0x10;

    pub const CONFIG: u8 = 0x02;
    pub const CHANNEL: u8 = 0x03;
    pub const VOLUME: u8 = 0x05;

    // CONFIG (0x02) bits
    pub const AUDIO_ON: u16 = 1 << 15;
    pub const UNMUTE: u16 = 1 << 14;
    pub const SEEK_UP: u16 = 1 << 9;
    pub const SEEK: u16 = 1 << 8;
    pub const RDS_EN: u16 = 1 << 3;
    pub const NEW_METHOD: u16 = 1 << 2;
    pub const SOFT_RESET: u16 = 1 << 1;
    pub const ENABLE: u16 = 1 << 0;

    // CHANNEL (0x03) bits
    pub const TUNE: u16 = 1 << 4;

    // VOLUME (0x05): datasheet defaults with the volume field cleared
    pub const VOLUME_BASE: u16 = 0x8880;
    pub const VOLUME_MASK: u16 = 0x000F;

    // Status register 0x0A bits
    pub const RDS_READY: u16 = 1 << 15;
    pub const SEEK_TUNE_COMPLETE: u16 = 1 << 14;
    pub const STEREO: u16 = 1 << 10;
    pub const CHAN_MASK: u16 = 0x03FF;
}

/// Bottom of the FM band in 10 kHz units (87.0 MHz)
const BAND_BOTTOM_10KHZ: u16 = 8_700;

/// Channel spacing in 10 kHz units (100 kHz)
const SPACING_10KHZ: u16 = 10;

/// Tuner faults surfaced to the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TunerError {
    /// Seek/tune did not complete within the polling budget
    TuneTimeout,
}

/// Snapshot of the chip status registers
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TunerStatus {
    /// Currently tuned channel (spacing steps above the band bottom)
    pub channel: u16,
    /// Seek/tune complete flag
    pub tune_complete: bool,
    /// Received signal strength, 0-127
    pub rssi: u8,
    /// Stereo reception indicator
    pub stereo: bool,
}

/// RDA5807M FM receiver
pub struct Rda5807<B> {
    bus: B,
    config: u16,
    volume_reg: u16,
    status: TunerStatus,
    name: StationName,
}

impl<B: BusTransport> Rda5807<B> {
    /// Create a driver over the given bus; the chip stays powered down
    /// until [`Rda5807::power_up`]
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            config: reg::AUDIO_ON
                | reg::UNMUTE
                | reg::RDS_EN
                | reg::NEW_METHOD
                | reg::ENABLE,
            volume_reg: reg::VOLUME_BASE,
            status: TunerStatus::default(),
            name: StationName::new(),
        }
    }

    /// Reset and enable the receiver with the given startup volume
    pub fn power_up(&mut self, volume: u8) {
        self.write_register(reg::CONFIG, self.config | reg::SOFT_RESET);
        self.write_register(reg::CONFIG, self.config);
        self.set_volume(volume);
    }

    /// Tune to a channel (spacing steps above 87.0 MHz)
    pub fn set_channel(&mut self, channel: u16) {
        debug_assert!(channel <= 0x03FF);
        self.write_register(reg::CHANNEL, (channel << 6) | reg::TUNE);
        self.status.tune_complete = false;
        self.name.clear();
    }

    /// Tune to a frequency in 10 kHz units (10260 = 102.60 MHz)
    pub fn set_frequency_10khz(&mut self, freq: u16) {
        debug_assert!(freq >= BAND_BOTTOM_10KHZ);
        self.set_channel((freq - BAND_BOTTOM_10KHZ) / SPACING_10KHZ);
    }

    /// Start seeking upward for the next station
    ///
    /// Completion is observed via [`Rda5807::update_status`] or
    /// [`Rda5807::wait_tune_complete`].
    pub fn seek_up(&mut self) {
        self.write_register(reg::CONFIG, self.config | reg::SEEK | reg::SEEK_UP);
        self.status.tune_complete = false;
        self.name.clear();
    }

    /// Set the output volume (0..=15)
    pub fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(15);
        self.volume_reg = (self.volume_reg & !reg::VOLUME_MASK) | u16::from(volume);
        self.write_register(reg::VOLUME, self.volume_reg);
    }

    /// Refresh the status snapshot and feed any pending RDS group
    pub fn update_status(&mut self) {
        let regs = self.read_status_block();
        let status_a = regs[0];
        self.status.channel = status_a & reg::CHAN_MASK;
        self.status.tune_complete = status_a & reg::SEEK_TUNE_COMPLETE != 0;
        self.status.stereo = status_a & reg::STEREO != 0;
        self.status.rssi = (regs[1] >> 9) as u8;
        if status_a & reg::RDS_READY != 0 {
            // Blocks B and D carry the group type and name characters
            self.name.feed(regs[3], regs[5]);
        }
    }

    /// Poll until the current seek/tune finishes
    ///
    /// Polls the status at 10 ms intervals, at most `max_polls` times.
    pub fn wait_tune_complete(
        &mut self,
        delay: &mut impl DelayNs,
        max_polls: u16,
    ) -> Result<(), TunerError> {
        for _ in 0..max_polls {
            self.update_status();
            if self.status.tune_complete {
                return Ok(());
            }
            delay.delay_ms(10);
        }
        Err(TunerError::TuneTimeout)
    }

    /// Last observed status snapshot
    pub fn status(&self) -> TunerStatus {
        self.status
    }

    /// Tuned frequency in 10 kHz units, from the last status refresh
    pub fn frequency_10khz(&self) -> u16 {
        BAND_BOTTOM_10KHZ + self.status.channel * SPACING_10KHZ
    }

    /// Received signal strength, 0-127
    pub fn signal_strength(&self) -> u8 {
        self.status.rssi
    }

    /// Confirmed RDS program service name, space-padded to 8 characters
    pub fn station_name(&self) -> &str {
        self.name.as_str()
    }

    fn write_register(&mut self, index: u8, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.bus.begin_write(reg::ADDR_INDEXED);
        self.bus.write_byte(index);
        self.bus.write_byte(hi);
        self.bus.write_byte(lo);
        self.bus.end();
    }

    /// Read registers 0x0A-0x0F in one sequential transaction
    fn read_status_block(&mut self) -> [u16; 6] {
        let mut regs = [0u16; 6];
        self.bus.begin_read(reg::ADDR_SEQUENTIAL);
        for (i, slot) in regs.iter_mut().enumerate() {
            let hi = self.bus.read_byte(true);
            let lo = self.bus.read_byte(i < 5);
            *slot = u16::from_be_bytes([hi, lo]);
        }
        self.bus.end();
        regs
    }
}

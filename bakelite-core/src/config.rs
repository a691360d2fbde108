//! Compiled-in firmware configuration
//!
//! There is no persistent storage on the board; settings are constants
//! baked into the binary. Edit [`RadioConfig::DEFAULT`] and rebuild to
//! customize.

/// Firmware parameters supplied at startup
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Tuner volume on system start (0..=15)
    pub startup_volume: u8,
    /// Station frequency on system start, in 10 kHz units (10260 = 102.60 MHz)
    pub startup_freq_10khz: u16,
    /// Display brightness (0..=255)
    pub contrast: u8,
    /// Text on the top line of the screen (at most 21 characters)
    pub header: &'static str,
}

impl RadioConfig {
    pub const DEFAULT: Self = Self {
        startup_volume: 3,
        startup_freq_10khz: 10_260,
        contrast: 96,
        header: "Bakelite Radio   v1.0",
    };
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

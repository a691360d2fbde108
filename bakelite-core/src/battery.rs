//! Battery state-of-charge check
//!
//! The board measures the internal 1.2 V reference against the battery
//! rail: as the cell discharges, the reference takes up a larger share of
//! full scale, so a *higher* reading means a *weaker* battery. One
//! threshold comparison is all the hardware budget allows.

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read the internal reference against VCC (10-bit, 0-1023)
    fn read(&mut self) -> u16;
}

/// Battery charge classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryState {
    Ok,
    Weak,
}

impl BatteryState {
    /// Short status text for the display
    pub fn label(self) -> &'static str {
        match self {
            BatteryState::Ok => "OK",
            BatteryState::Weak => "weak",
        }
    }
}

/// Threshold reading above which the battery counts as weak
///
/// 1023 * 1.2 V / 3.2 V: readings above this mean VCC has dropped below
/// 3.2 V.
pub const WEAK_THRESHOLD: u16 = 384;

/// Single-threshold battery monitor
pub struct BatteryMonitor<ADC> {
    adc: ADC,
    threshold: u16,
}

impl<ADC: AdcReader> BatteryMonitor<ADC> {
    /// Create a monitor with the default 3.2 V threshold
    pub fn new(adc: ADC) -> Self {
        Self {
            adc,
            threshold: WEAK_THRESHOLD,
        }
    }

    /// Create a monitor with a custom raw threshold
    pub fn with_threshold(adc: ADC, threshold: u16) -> Self {
        Self { adc, threshold }
    }

    /// Sample the ADC and classify the battery
    pub fn state(&mut self) -> BatteryState {
        if self.adc.read() > self.threshold {
            BatteryState::Weak
        } else {
            BatteryState::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdc(u16);

    impl AdcReader for FixedAdc {
        fn read(&mut self) -> u16 {
            self.0
        }
    }

    #[test]
    fn full_battery_reads_ok() {
        // Fresh cell at ~4.2 V: reference is a small share of full scale
        let mut monitor = BatteryMonitor::new(FixedAdc(292));
        assert_eq!(monitor.state(), BatteryState::Ok);
    }

    #[test]
    fn threshold_reading_is_still_ok() {
        let mut monitor = BatteryMonitor::new(FixedAdc(WEAK_THRESHOLD));
        assert_eq!(monitor.state(), BatteryState::Ok);
    }

    #[test]
    fn sagging_battery_reads_weak() {
        let mut monitor = BatteryMonitor::new(FixedAdc(WEAK_THRESHOLD + 1));
        assert_eq!(monitor.state(), BatteryState::Weak);
        assert_eq!(BatteryState::Weak.label(), "weak");
    }
}

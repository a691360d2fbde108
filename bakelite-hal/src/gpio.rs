//! GPIO pin abstractions
//!
//! Minimal digital pin traits implemented by the board binding in the
//! firmware crate. The bus emulates open-drain signaling on top of these:
//! "high" means the pin is released to the external pull-up, "low" means it
//! is actively driven to ground.

/// Digital output pin
pub trait OutputPin {
    /// Release the pin / drive it high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin that can be driven and read back
///
/// The data line of the two-wire bus needs both directions: it is driven
/// during address/data bits and read during acknowledge clocks and reads.
pub trait IoPin: OutputPin + InputPin {}

// Blanket implementation for types that implement both traits
impl<T: OutputPin + InputPin> IoPin for T {}

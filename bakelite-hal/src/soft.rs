//! Software two-wire bus master
//!
//! Bit-banged implementation of [`BusTransport`] over two GPIO lines with
//! external pull-ups. The clock line is push-pull from the master's point
//! of view (no clock stretching support); the data line is released before
//! acknowledge clocks and reads so the addressed device can drive it.
//!
//! All timing comes from a [`DelayNs`] provider, one half clock period per
//! edge. Byte transfers block until complete.

use embedded_hal::delay::DelayNs;

use crate::bus::{BusTiming, BusTransport};
use crate::gpio::{IoPin, OutputPin};

/// Bit-banged two-wire bus master
pub struct SoftWire<SDA, SCL, D> {
    sda: SDA,
    scl: SCL,
    delay: D,
    timing: BusTiming,
}

impl<SDA, SCL, D> SoftWire<SDA, SCL, D>
where
    SDA: IoPin,
    SCL: OutputPin,
    D: DelayNs,
{
    /// Create a new bus master and release both lines to idle
    pub fn new(mut sda: SDA, mut scl: SCL, delay: D, timing: BusTiming) -> Self {
        sda.set_high();
        scl.set_high();
        Self {
            sda,
            scl,
            delay,
            timing,
        }
    }

    fn tick(&mut self) {
        self.delay.delay_ns(self.timing.half_period_ns);
    }

    /// Clock one bit out, leaving the clock low
    fn clock_out(&mut self, bit: bool) {
        self.sda.set_state(bit);
        self.tick();
        self.scl.set_high();
        self.tick();
        self.scl.set_low();
    }

    /// Clock one bit in from the data line, leaving the clock low
    ///
    /// The caller must have released the data line beforehand.
    fn clock_in(&mut self) -> bool {
        self.tick();
        self.scl.set_high();
        self.tick();
        let bit = self.sda.is_high();
        self.scl.set_low();
        bit
    }
}

impl<SDA, SCL, D> BusTransport for SoftWire<SDA, SCL, D>
where
    SDA: IoPin,
    SCL: OutputPin,
    D: DelayNs,
{
    fn begin_write(&mut self, address: u8) {
        // Start condition: data falls while clock is high
        self.sda.set_high();
        self.scl.set_high();
        self.tick();
        self.sda.set_low();
        self.tick();
        self.scl.set_low();
        self.write_byte(address << 1);
    }

    fn begin_read(&mut self, address: u8) {
        self.sda.set_high();
        self.scl.set_high();
        self.tick();
        self.sda.set_low();
        self.tick();
        self.scl.set_low();
        self.write_byte((address << 1) | 1);
    }

    fn write_byte(&mut self, value: u8) {
        for i in (0..8).rev() {
            self.clock_out(value & (1 << i) != 0);
        }
        // Acknowledge clock: release the data line and discard the answer.
        // Unacknowledged transfers are not surfaced (see bus module docs).
        self.sda.set_high();
        let _ = self.clock_in();
    }

    fn read_byte(&mut self, ack: bool) -> u8 {
        self.sda.set_high();
        let mut value = 0u8;
        for _ in 0..8 {
            value = (value << 1) | self.clock_in() as u8;
        }
        // Master acknowledge: low means acknowledged
        self.clock_out(!ack);
        value
    }

    fn end(&mut self) {
        // Stop condition: data rises while clock is high
        self.sda.set_low();
        self.tick();
        self.scl.set_high();
        self.tick();
        self.sda.set_high();
        self.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::InputPin;
    use core::cell::{Cell, RefCell};
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Start,
        Stop,
        /// Data line level sampled at a rising clock edge
        Bit(bool),
    }

    /// Shared line state observed by both mock pins
    struct Wire {
        sda: Cell<bool>,
        scl: Cell<bool>,
        events: RefCell<Vec<Event, 128>>,
    }

    impl Wire {
        fn new() -> Self {
            Self {
                sda: Cell::new(true),
                scl: Cell::new(true),
                events: RefCell::new(Vec::new()),
            }
        }

        fn push(&self, event: Event) {
            self.events.borrow_mut().push(event).unwrap();
        }
    }

    struct Sda<'a>(&'a Wire);
    struct Scl<'a>(&'a Wire);

    impl OutputPin for Sda<'_> {
        fn set_high(&mut self) {
            if self.0.scl.get() && !self.0.sda.get() {
                self.0.push(Event::Stop);
            }
            self.0.sda.set(true);
        }

        fn set_low(&mut self) {
            if self.0.scl.get() && self.0.sda.get() {
                self.0.push(Event::Start);
            }
            self.0.sda.set(false);
        }
    }

    impl InputPin for Sda<'_> {
        fn is_high(&self) -> bool {
            // No slave on the mock bus: a released line floats high
            self.0.sda.get()
        }
    }

    impl OutputPin for Scl<'_> {
        fn set_high(&mut self) {
            if !self.0.scl.get() {
                self.0.push(Event::Bit(self.0.sda.get()));
            }
            self.0.scl.set(true);
        }

        fn set_low(&mut self) {
            self.0.scl.set(false);
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn bus(wire: &Wire) -> SoftWire<Sda<'_>, Scl<'_>, NoDelay> {
        SoftWire::new(Sda(wire), Scl(wire), NoDelay, BusTiming::STANDARD)
    }

    /// Collect the sampled bits following `offset` into one byte
    fn byte_at(events: &[Event], offset: usize) -> u8 {
        let mut value = 0u8;
        for event in &events[offset..offset + 8] {
            match event {
                Event::Bit(b) => value = (value << 1) | *b as u8,
                other => panic!("expected data bit, got {:?}", other),
            }
        }
        value
    }

    #[test]
    fn write_transaction_framing() {
        let wire = Wire::new();
        {
            let mut bus = bus(&wire);
            bus.begin_write(0x3C);
            bus.write_byte(0x40);
            bus.end();
        }
        let events = wire.events.borrow();
        let events: &[Event] = &events;

        assert_eq!(events[0], Event::Start);
        assert_eq!(*events.last().unwrap(), Event::Stop);
        // Addressed byte is the 7-bit address shifted, write bit clear
        assert_eq!(byte_at(events, 1), 0x78);
        // With nothing acknowledging, the ack clock samples high
        assert_eq!(events[9], Event::Bit(true));
        assert_eq!(byte_at(events, 10), 0x40);
        assert_eq!(events[18], Event::Bit(true));
    }

    #[test]
    fn read_address_carries_read_bit() {
        let wire = Wire::new();
        let value = {
            let mut bus = bus(&wire);
            bus.begin_read(0x10);
            let value = bus.read_byte(false);
            bus.end();
            value
        };
        let events = wire.events.borrow();
        let events: &[Event] = &events;

        assert_eq!(events[0], Event::Start);
        assert_eq!(byte_at(events, 1), 0x21);
        // Floating line reads all ones
        assert_eq!(value, 0xFF);
        // Final byte is not acknowledged: master leaves the line high
        assert_eq!(events[18], Event::Bit(true));
    }

    #[test]
    fn transactions_do_not_leave_clock_low() {
        let wire = Wire::new();
        {
            let mut bus = bus(&wire);
            bus.begin_write(0x3C);
            bus.end();
        }
        assert!(wire.scl.get());
        assert!(wire.sda.get());
    }
}

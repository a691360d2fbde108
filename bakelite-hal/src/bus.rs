//! Two-wire bus abstractions
//!
//! The radio shares one serial bus between the display controller and the
//! tuner chip. There is no bus peripheral on the target board; the
//! microcontroller toggles the lines directly, so this trait models the bus
//! at the transaction level: start condition + address, byte transfers,
//! stop condition.
//!
//! Transfers are deliberately infallible. A device that stops acknowledging
//! simply produces no visible effect; there is no retry or abort path, and
//! drivers do not check acknowledge bits. This mirrors the resource budget
//! of the target hardware.

/// Transaction-level master access to the shared two-wire bus
///
/// A transaction is bracketed by `begin_write`/`begin_read` and `end`.
/// Callers must not issue byte transfers outside an open transaction, and
/// transactions never interleave (the firmware is single-threaded on this
/// path).
pub trait BusTransport {
    /// Drive a start condition and address a device for writing
    ///
    /// `address` is the 7-bit device address; the implementation shifts it
    /// and appends the read/write bit.
    fn begin_write(&mut self, address: u8);

    /// Drive a start condition and address a device for reading
    fn begin_read(&mut self, address: u8);

    /// Transfer one byte to the addressed device
    fn write_byte(&mut self, value: u8);

    /// Clock one byte in from the addressed device
    ///
    /// `ack` selects whether the master acknowledges the byte (true for all
    /// but the last byte of a read).
    fn read_byte(&mut self, ack: bool) -> u8;

    /// Drive a stop condition, closing the transaction
    fn end(&mut self);
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    fn begin_write(&mut self, address: u8) {
        (**self).begin_write(address);
    }

    fn begin_read(&mut self, address: u8) {
        (**self).begin_read(address);
    }

    fn write_byte(&mut self, value: u8) {
        (**self).write_byte(value);
    }

    fn read_byte(&mut self, ack: bool) -> u8 {
        (**self).read_byte(ack)
    }

    fn end(&mut self) {
        (**self).end();
    }
}

/// Shared access to one bus from several drivers
///
/// The display and the tuner sit on the same two wires. Each driver holds a
/// `&RefCell<_>` and borrows the bus for the duration of a single trait
/// call; transactions still never interleave because the render loop is
/// single-threaded and every operation runs to completion.
impl<T: BusTransport> BusTransport for &core::cell::RefCell<T> {
    fn begin_write(&mut self, address: u8) {
        self.borrow_mut().begin_write(address);
    }

    fn begin_read(&mut self, address: u8) {
        self.borrow_mut().begin_read(address);
    }

    fn write_byte(&mut self, value: u8) {
        self.borrow_mut().write_byte(value);
    }

    fn read_byte(&mut self, ack: bool) -> u8 {
        self.borrow_mut().read_byte(ack)
    }

    fn end(&mut self) {
        self.borrow_mut().end();
    }
}

/// Bus timing configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTiming {
    /// Half of one clock period, in nanoseconds
    pub half_period_ns: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BusTiming {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        half_period_ns: 5_000,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        half_period_ns: 1_250,
    };
}

//! Bakelite Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the radio firmware is
//! written against, plus a software (bit-banged) implementation of the
//! shared two-wire bus. The display and tuner drivers only ever see the
//! [`bus::BusTransport`] trait, so they can run against real pins on the
//! target or against a recording mock on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (bakelite-display, -tuner)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bakelite-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ SoftWire over │       │  test mocks   │
//! │  GPIO (here)  │       │  (host only)  │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod soft;

// Re-export key traits at crate root for convenience
pub use bus::BusTransport;
pub use gpio::{InputPin, IoPin, OutputPin};
pub use soft::SoftWire;

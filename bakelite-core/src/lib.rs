//! Board-agnostic core logic for the Bakelite pocket radio
//!
//! Holds the compiled-in configuration and the battery state-of-charge
//! check. Everything here is plain data and arithmetic so it tests on the
//! host.

#![no_std]
#![deny(unsafe_code)]

pub mod battery;
pub mod config;

pub use battery::{AdcReader, BatteryMonitor, BatteryState};
pub use config::RadioConfig;

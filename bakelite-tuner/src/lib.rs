//! FM tuner driver
//!
//! Register-level driver for the RDA5807M single-chip receiver, sharing
//! the two-wire bus with the display. The control loop only needs a small
//! command/status surface: tune, seek, volume, and a periodic status
//! refresh that also captures the RDS station name.

#![no_std]
#![deny(unsafe_code)]

pub mod rda5807;
pub mod rds;

pub use rda5807::{Rda5807, TunerError, TunerStatus};
pub use rds::StationName;

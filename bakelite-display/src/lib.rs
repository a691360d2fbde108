//! Text-mode driver for the 128x32 SSD1306 OLED
//!
//! This crate turns print requests into the exact byte sequences the
//! display controller expects, keeps track of the on-screen cursor, wraps
//! long lines, and formats unsigned values as fixed-width decimal text.
//!
//! The driver writes through the [`bakelite_hal::BusTransport`] trait, so
//! it runs unchanged against the bit-banged bus on the target or a
//! recording mock on the host.
//!
//! # Rendering model
//!
//! The controller addresses the panel as 128 columns by 4 pages of 8
//! vertical pixels. Text is rendered one character cell at a time: a blank
//! spacing column followed by the five glyph columns, 6 bytes per
//! character, 21 characters per row. There is no frame buffer; pixel data
//! goes straight to the controller inside a data transaction.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod cmd;
pub mod font;
mod oled;

pub use oled::{Oled, CHAR_WIDTH, LAST_GLYPH_COLUMN, ROWS, WIDTH};

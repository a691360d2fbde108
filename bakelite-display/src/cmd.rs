//! SSD1306 controller command set
//!
//! Only the subset the text renderer needs. Every transaction starts with
//! one of the two mode prefixes: [`CMD_MODE`] for configuration commands,
//! [`DATA_MODE`] for pixel-column payload.

/// 7-bit bus address of the display controller
pub const ADDRESS: u8 = 0x3C;

/// Transaction prefix selecting command mode
pub const CMD_MODE: u8 = 0x00;

/// Transaction prefix selecting data mode
pub const DATA_MODE: u8 = 0x40;

/// Column start address, low nibble (OR with low nibble of column)
pub const SET_LOW_COLUMN: u8 = 0x00;

/// Column start address, high nibble (OR with high nibble of column)
pub const SET_HIGH_COLUMN: u8 = 0x10;

/// Page start address (OR with page index 0-3)
pub const SET_PAGE_ADDR: u8 = 0xB0;

pub const SET_SEG_REMAP: u8 = 0xA1;
pub const SET_COM_SCAN_DEC: u8 = 0xC8;
pub const SET_MUX_RATIO: u8 = 0xA8;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_CHARGE_PUMP: u8 = 0x8D;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_CONTRAST: u8 = 0x81;

/// Fixed part of the power-up sequence
///
/// Flips the screen for the board's mounting orientation, sets the 1/32
/// multiplex ratio and COM pin layout of the 128x32 panel, enables the
/// charge pump, and switches the panel on. The contrast value follows
/// separately since it comes from configuration.
pub const INIT_SEQUENCE: [u8; 9] = [
    SET_COM_SCAN_DEC,
    SET_SEG_REMAP,
    SET_MUX_RATIO,
    0x1F,
    SET_COM_PINS,
    0x02,
    SET_CHARGE_PUMP,
    0x14,
    DISPLAY_ON,
];

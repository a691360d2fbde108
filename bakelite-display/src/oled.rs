//! Cursor-tracking text renderer
//!
//! Stateful driver for the text-only rendering path: glyph plotting with
//! automatic line wrap, line/screen clearing, and fixed-width decimal
//! output. All pixel data is written inside bracketed data transactions;
//! the helper [`Oled::data_frame`] guarantees the closing stop condition
//! on every path.

use bakelite_hal::BusTransport;

use crate::cmd;
use crate::font;

/// Physical columns per row
pub const WIDTH: u8 = 128;

/// Addressable 8-pixel row pages
pub const ROWS: u8 = 4;

/// Horizontal advance per character (1 gap column + 5 glyph columns)
pub const CHAR_WIDTH: u8 = 6;

/// Last column a full character cell fits at; past this the cursor wraps
pub const LAST_GLYPH_COLUMN: u8 = 122;

/// Powers of ten for digit extraction by repeated subtraction
///
/// Indexed by digit position, least significant first. The formatter
/// subtracts these instead of dividing; the target has no division
/// instruction worth spending cycles on.
const DIVIDERS: [u16; 5] = [1, 10, 100, 1_000, 10_000];

/// Text-mode SSD1306 driver
///
/// Owns the logical cursor. The cursor only resynchronizes with the
/// controller's internal write pointer through [`Oled::set_cursor`]; all
/// other operations advance both in lockstep.
pub struct Oled<B> {
    bus: B,
    column: u8,
    row: u8,
}

impl<B: BusTransport> Oled<B> {
    /// Create a driver over the given bus, cursor at the origin
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            column: 0,
            row: 0,
        }
    }

    /// Send the power-up sequence with the configured contrast
    pub fn init(&mut self, contrast: u8) {
        self.bus.begin_write(cmd::ADDRESS);
        self.bus.write_byte(cmd::CMD_MODE);
        for &c in &cmd::INIT_SEQUENCE {
            self.bus.write_byte(c);
        }
        self.bus.write_byte(cmd::SET_CONTRAST);
        self.bus.write_byte(contrast);
        self.bus.end();
    }

    /// Move the cursor, wrapping column modulo 128 and row modulo 4
    pub fn set_cursor(&mut self, column: u8, row: u8) {
        let column = column & (WIDTH - 1);
        let row = row & (ROWS - 1);
        self.bus.begin_write(cmd::ADDRESS);
        self.bus.write_byte(cmd::CMD_MODE);
        self.bus.write_byte(cmd::SET_LOW_COLUMN | (column & 0x0F));
        self.bus.write_byte(cmd::SET_HIGH_COLUMN | (column >> 4));
        self.bus.write_byte(cmd::SET_PAGE_ADDR | row);
        self.bus.end();
        self.column = column;
        self.row = row;
    }

    /// Current logical cursor position as (column, row)
    pub fn cursor(&self) -> (u8, u8) {
        (self.column, self.row)
    }

    /// Blank the rest of the current row and move to the start of the next
    pub fn clear_line(&mut self) {
        self.data_frame(|d| {
            while d.column < WIDTH {
                d.bus.write_byte(0x00);
                d.column += 1;
            }
        });
        let next_row = self.row + 1;
        self.set_cursor(0, next_row);
    }

    /// Blank all four rows, leaving the cursor at the origin
    pub fn clear_screen(&mut self) {
        self.set_cursor(0, 0);
        for _ in 0..ROWS {
            self.clear_line();
        }
    }

    /// Print a string at the cursor, wrapping at the end of the row
    pub fn print(&mut self, text: &str) {
        self.data_frame(|d| {
            for &c in text.as_bytes() {
                d.plot_char(c);
            }
        });
    }

    /// Print a string, then blank the rest of the row
    pub fn println(&mut self, text: &str) {
        self.print(text);
        self.clear_line();
    }

    /// Print `value` right-aligned in a fixed field of `digits` digits
    ///
    /// Leading zeros render as spaces until the first nonzero digit. With
    /// `decimal` nonzero, a point is inserted after the digit at that
    /// position, and that digit always renders even when zero (so 26 with
    /// `digits = 5, decimal = 2` comes out as `"  0.26"`).
    ///
    /// The caller guarantees `value` fits in `digits` decimal digits;
    /// excess magnitude truncates silently.
    pub fn print_val(&mut self, value: u16, digits: u8, decimal: u8) {
        debug_assert!(digits as usize <= DIVIDERS.len());
        debug_assert!(decimal == 0 || decimal < digits);
        self.data_frame(|d| {
            let mut remaining = value;
            let mut past_leading = false;
            for position in (0..digits).rev() {
                let divider = DIVIDERS[position as usize];
                let mut digit = 0u8;
                while remaining >= divider {
                    past_leading = true;
                    digit += 1;
                    remaining -= divider;
                }
                // The digit ahead of the decimal point always prints
                if position == decimal {
                    past_leading = true;
                }
                if past_leading {
                    d.plot_char(b'0' + digit);
                } else {
                    d.plot_char(b' ');
                }
                if decimal != 0 && position == decimal {
                    d.plot_char(b'.');
                }
            }
        });
    }

    /// Open a data transaction, run `f`, and close it again
    fn data_frame<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.open_data();
        f(self);
        self.bus.end();
    }

    fn open_data(&mut self) {
        self.bus.begin_write(cmd::ADDRESS);
        self.bus.write_byte(cmd::DATA_MODE);
    }

    /// Emit one character cell into the open data transaction
    ///
    /// Advances the column by 6. When a further character would no longer
    /// fit on the row, closes the transaction, re-homes the cursor to the
    /// next row (wrapping past the last one), and opens a fresh data
    /// transaction so the caller can keep plotting.
    fn plot_char(&mut self, c: u8) {
        debug_assert!((font::FIRST_CHAR..=127).contains(&c));
        let index = usize::from(c.wrapping_sub(font::FIRST_CHAR));
        let glyph = font::FONT_5X8.get(index).unwrap_or(&font::FONT_5X8[0]);
        self.bus.write_byte(0x00); // inter-character spacing column
        for &column in glyph {
            self.bus.write_byte(column);
        }
        self.column += CHAR_WIDTH;
        if self.column > LAST_GLYPH_COLUMN {
            self.bus.end();
            let next_row = self.row + 1;
            self.set_cursor(0, next_row);
            self.open_data();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::string::String;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Start(u8),
        Byte(u8),
        Stop,
    }

    /// Recording stand-in for the two-wire bus
    #[derive(Default)]
    struct MockBus {
        ops: Vec<Op>,
    }

    impl BusTransport for MockBus {
        fn begin_write(&mut self, address: u8) {
            self.ops.push(Op::Start(address));
        }

        fn begin_read(&mut self, _address: u8) {
            unreachable!("display never reads");
        }

        fn write_byte(&mut self, value: u8) {
            self.ops.push(Op::Byte(value));
        }

        fn read_byte(&mut self, _ack: bool) -> u8 {
            unreachable!("display never reads");
        }

        fn end(&mut self) {
            self.ops.push(Op::Stop);
        }
    }

    /// Payload bytes of every data-mode transaction, concatenated
    fn data_bytes(ops: &[Op]) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut in_data = false;
        let mut at_prefix = false;
        for op in ops {
            match *op {
                Op::Start(addr) => {
                    assert_eq!(addr, cmd::ADDRESS);
                    at_prefix = true;
                    in_data = false;
                }
                Op::Byte(b) if at_prefix => {
                    in_data = b == cmd::DATA_MODE;
                    at_prefix = false;
                }
                Op::Byte(b) if in_data => bytes.push(b),
                Op::Byte(_) => {}
                Op::Stop => in_data = false,
            }
        }
        bytes
    }

    /// Recover printed text from recorded glyph payload
    fn decode_text(ops: &[Op]) -> String {
        let bytes = data_bytes(ops);
        assert_eq!(bytes.len() % CHAR_WIDTH as usize, 0);
        bytes
            .chunks(CHAR_WIDTH as usize)
            .map(|cell| {
                assert_eq!(cell[0], 0, "missing spacing column");
                let index = font::FONT_5X8
                    .iter()
                    .position(|glyph| glyph[..] == cell[1..])
                    .expect("unknown glyph");
                (font::FIRST_CHAR + index as u8) as char
            })
            .collect()
    }

    fn transaction_count(ops: &[Op]) -> usize {
        ops.iter().filter(|op| matches!(op, Op::Start(_))).count()
    }

    #[test]
    fn init_sends_power_up_sequence() {
        let mut bus = MockBus::default();
        Oled::new(&mut bus).init(96);

        let expected: Vec<Op> = [0x00, 0xC8, 0xA1, 0xA8, 0x1F, 0xDA, 0x02, 0x8D, 0x14, 0xAF, 0x81, 96]
            .iter()
            .map(|&b| Op::Byte(b))
            .collect();
        assert_eq!(bus.ops[0], Op::Start(0x3C));
        assert_eq!(&bus.ops[1..13], &expected[..]);
        assert_eq!(bus.ops[13], Op::Stop);
        assert_eq!(bus.ops.len(), 14);
    }

    #[test]
    fn set_cursor_emits_command_triplet() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.set_cursor(0x2A, 3);
        assert_eq!(oled.cursor(), (0x2A, 3));

        assert_eq!(
            bus.ops,
            [
                Op::Start(0x3C),
                Op::Byte(0x00),
                Op::Byte(0x0A), // low nibble
                Op::Byte(0x12), // high nibble
                Op::Byte(0xB3), // page select
                Op::Stop,
            ]
        );
    }

    #[test]
    fn set_cursor_wraps_modulo_display_size() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.set_cursor(130, 5);
        assert_eq!(oled.cursor(), (2, 1));
    }

    #[test]
    fn plot_emits_six_columns_per_char() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.print("A");
        assert_eq!(oled.cursor(), (6, 0));

        let bytes = data_bytes(&bus.ops);
        assert_eq!(bytes, [0x00, 0x7C, 0x12, 0x11, 0x12, 0x7C]);
    }

    #[test]
    fn print_without_wrap_keeps_one_transaction() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.print("Hello");
        assert_eq!(oled.cursor(), (30, 0));
        assert_eq!(transaction_count(&bus.ops), 1);
        assert_eq!(data_bytes(&bus.ops).len(), 30);
    }

    #[test]
    fn full_row_wraps_exactly_once() {
        // 21 characters fill the row: the 21st lands on column 120..125,
        // pushing the cursor past column 122.
        let text = "Station:  Radio Free "; // 21 chars
        assert_eq!(text.len(), 21);

        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.print(text);

        assert_eq!(oled.cursor(), (0, 1));
        assert_eq!(data_bytes(&bus.ops).len(), 21 * 6);
        // print frame + cursor re-home + reopened frame
        assert_eq!(transaction_count(&bus.ops), 3);
        assert_eq!(decode_text(&bus.ops), text);
    }

    #[test]
    fn wrap_past_last_row_lands_on_first() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.set_cursor(120, 3);
        oled.print("x");
        assert_eq!(oled.cursor(), (0, 0));
    }

    #[test]
    fn clear_line_blanks_rest_of_row() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.set_cursor(30, 1);
        oled.bus.ops.clear();
        oled.clear_line();

        assert_eq!(oled.cursor(), (0, 2));
        let zeros = data_bytes(&oled.bus.ops);
        assert_eq!(zeros.len(), 128 - 30);
        assert!(zeros.iter().all(|&b| b == 0));
    }

    #[test]
    fn clear_line_on_last_row_wraps_to_first() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.set_cursor(0, 3);
        oled.clear_line();
        assert_eq!(oled.cursor(), (0, 0));
    }

    #[test]
    fn clear_screen_blanks_every_column_once() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.set_cursor(77, 2); // anywhere
        oled.clear_screen();

        assert_eq!(oled.cursor(), (0, 0));
        let zeros = data_bytes(&bus.ops);
        assert_eq!(zeros.len(), 4 * 128);
        assert!(zeros.iter().all(|&b| b == 0));
    }

    #[test]
    fn println_prints_then_blanks() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.println("Vol");
        assert_eq!(oled.cursor(), (0, 1));
        assert_eq!(data_bytes(&bus.ops).len(), 3 * 6 + (128 - 18));
    }

    fn format_val(value: u16, digits: u8, decimal: u8) -> String {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.print_val(value, digits, decimal);
        decode_text(&bus.ops)
    }

    #[test]
    fn print_val_pads_with_leading_spaces() {
        assert_eq!(format_val(5, 2, 0), " 5");
        assert_eq!(format_val(0, 2, 0), " 0");
        assert_eq!(format_val(15, 2, 0), "15");
    }

    #[test]
    fn print_val_places_decimal_point() {
        assert_eq!(format_val(10260, 5, 2), "102.60");
        assert_eq!(format_val(1026, 5, 2), " 10.26");
        assert_eq!(format_val(26, 5, 2), "  0.26");
        assert_eq!(format_val(0, 5, 2), "  0.00");
    }

    #[test]
    fn print_val_single_transaction() {
        let mut bus = MockBus::default();
        let mut oled = Oled::new(&mut bus);
        oled.print_val(42, 2, 0);
        assert_eq!(transaction_count(&bus.ops), 1);
    }

    proptest! {
        /// Stripped of point and padding, the rendered text parses back to
        /// the input, and the digit ahead of the point is never blank.
        #[test]
        fn print_val_round_trips(value in any::<u16>(), decimal in 0u8..5) {
            let text = format_val(value, 5, decimal);
            prop_assert_eq!(text.len(), if decimal == 0 { 5 } else { 6 });

            let digit_ahead = text.chars().nth(4 - decimal as usize).unwrap();
            prop_assert!(digit_ahead.is_ascii_digit());

            let stripped: String = text.chars().filter(|c| *c != '.' && *c != ' ').collect();
            prop_assert_eq!(stripped.parse::<u16>().unwrap(), value);
        }
    }
}

//! RDS station name capture
//!
//! Group 0A/0B broadcasts carry the 8-character program service name, two
//! characters per group, addressed by a 2-bit segment index. Reception is
//! noisy and there is no checksum on our side of the chip, so a character
//! only becomes visible after it has been received twice with the same
//! value at the same position.

/// Length of the program service name
pub const NAME_LEN: usize = 8;

/// Double-receive station name buffer
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StationName {
    /// Last received value per position, not yet confirmed
    candidate: [u8; NAME_LEN],
    /// Confirmed, displayable name
    name: [u8; NAME_LEN],
}

impl Default for StationName {
    fn default() -> Self {
        Self::new()
    }
}

impl StationName {
    /// Create an empty (all spaces) name buffer
    pub fn new() -> Self {
        Self {
            candidate: [0; NAME_LEN],
            name: [b' '; NAME_LEN],
        }
    }

    /// Drop all received characters, e.g. after retuning
    pub fn clear(&mut self) {
        self.candidate = [0; NAME_LEN];
        self.name = [b' '; NAME_LEN];
    }

    /// Feed one RDS group (blocks B and D)
    ///
    /// Groups other than type 0 are ignored.
    pub fn feed(&mut self, block_b: u16, block_d: u16) {
        let group_type = (block_b >> 12) & 0x0F;
        if group_type != 0 {
            return;
        }
        let segment = (block_b & 0x03) as usize;
        let chars = [(block_d >> 8) as u8, block_d as u8];
        for (offset, &c) in chars.iter().enumerate() {
            let position = segment * 2 + offset;
            if self.candidate[position] == c {
                // Seen twice: commit, replacing anything unprintable
                self.name[position] = if (32..127).contains(&c) { c } else { b' ' };
            } else {
                self.candidate[position] = c;
            }
        }
    }

    /// The confirmed name, space-padded to 8 characters
    pub fn as_str(&self) -> &str {
        // Committed bytes are printable ASCII by construction
        core::str::from_utf8(&self.name).unwrap_or("")
    }
}

//! Assembles program bytes out of three-bit groups.
//!
//! A byte arrives as three groups of three bits, least significant group
//! first, so `42` is sent as `2, 5, 0`. A group is only handed to the
//! decoder once it has been confirmed; anything not yet pushed can simply
//! be read again.

use crate::bytecode::{ParseError, ParseResult};

const GROUPS_PER_BYTE: u8 = 3;
const BITS_PER_GROUP: u8 = 3;

#[derive(Debug, Default, Clone)]
pub struct TripletDecoder {
    value: u16,
    groups: u8,
}

impl TripletDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept one confirmed group. Returns the byte once its third group arrives.
    ///
    /// Three groups can describe values up to 511; anything above 255 is
    /// rejected and the partial byte is discarded.
    pub fn push(&mut self, bits: u8) -> ParseResult<Option<u8>> {
        if bits > 0b111 {
            return Err(ParseError::InvalidTriplet(bits));
        }

        self.value |= (bits as u16) << (self.groups * BITS_PER_GROUP);
        self.groups += 1;

        if self.groups < GROUPS_PER_BYTE {
            return Ok(None);
        }

        let value = self.value;
        self.reset();
        u8::try_from(value)
            .map(Some)
            .map_err(|_| ParseError::TripletOverflow(value))
    }

    /// Drop any groups collected for the current byte
    pub fn reset(&mut self) {
        self.value = 0;
        self.groups = 0;
    }

    /// Groups collected towards the byte in progress
    pub fn groups_pending(&self) -> u8 {
        self.groups
    }

    /// Split a byte into the groups `push` expects, in sending order
    pub fn encode(byte: u8) -> [u8; 3] {
        [byte & 0b111, (byte >> 3) & 0b111, byte >> 6]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_forty_two() {
        let mut decoder = TripletDecoder::new();
        assert_eq!(decoder.push(2).unwrap(), None);
        assert_eq!(decoder.push(5).unwrap(), None);
        assert_eq!(decoder.groups_pending(), 2);
        assert_eq!(decoder.push(0).unwrap(), Some(42));
        assert_eq!(decoder.groups_pending(), 0);
    }

    #[test]
    fn test_encode_matches_push_order() {
        assert_eq!(TripletDecoder::encode(42), [2, 5, 0]);
        assert_eq!(TripletDecoder::encode(0xFF), [7, 7, 3]);

        let mut decoder = TripletDecoder::new();
        let mut out = None;
        for bits in TripletDecoder::encode(0x13) {
            out = decoder.push(bits).unwrap();
        }
        assert_eq!(out, Some(0x13));
    }

    #[test]
    fn test_rejects_wide_group() {
        let mut decoder = TripletDecoder::new();
        match decoder.push(8) {
            Err(ParseError::InvalidTriplet(8)) => {},
            other => panic!("Expected InvalidTriplet, got {:?}", other),
        }
        assert_eq!(decoder.groups_pending(), 0);
    }

    #[test]
    fn test_overflow_discards_partial_byte() {
        let mut decoder = TripletDecoder::new();
        decoder.push(7).unwrap();
        decoder.push(7).unwrap();
        match decoder.push(7) {
            Err(ParseError::TripletOverflow(511)) => {},
            other => panic!("Expected TripletOverflow(511), got {:?}", other),
        }
        assert_eq!(decoder.groups_pending(), 0);

        // Decoder is usable again afterwards
        decoder.push(1).unwrap();
        decoder.push(0).unwrap();
        assert_eq!(decoder.push(0).unwrap(), Some(1));
    }

    #[test]
    fn test_reset_discards_groups() {
        let mut decoder = TripletDecoder::new();
        decoder.push(3).unwrap();
        decoder.reset();
        decoder.push(0).unwrap();
        decoder.push(0).unwrap();
        assert_eq!(decoder.push(0).unwrap(), Some(0));
    }
}

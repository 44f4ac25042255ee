use crate::errors;

use byteorder::{BigEndian, ByteOrder};

pub const MAX_UINT8: usize = 0xff;
pub const MAX_UINT16: usize = 0xffff;
pub const MAX_UINT24: usize = 0xff_ffff;
pub const MAX_UINT32: usize = 0xffff_ffff;

/// Largest value a big-endian integer of `width` bytes can hold.
pub fn max_for_width(width: usize) -> u64 {
    match width {
        0 => 0,
        1..=7 => (1u64 << (8 * width)) - 1,
        _ => u64::MAX,
    }
}

// In network order (Big Endian)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Uint24([u8; 3]);

impl Uint24 {
    pub fn new(value: u32) -> Result<Self, errors::TLSError> {
        if value as usize > MAX_UINT24 {
            return Err(errors::TLSError::ValueOutOfRange {
                value: u64::from(value),
                max: MAX_UINT24 as u64,
            });
        }
        let mut bytes = [0; 3];
        BigEndian::write_u24(&mut bytes, value);
        Ok(Uint24(bytes))
    }

    pub fn from_be_bytes(bytes: [u8; 3]) -> Self {
        Uint24(bytes)
    }

    pub fn to_be_bytes(self) -> [u8; 3] {
        self.0
    }

    pub fn to_u32(self) -> u32 {
        BigEndian::read_u24(&self.0)
    }
}

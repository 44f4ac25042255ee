use crate::errors;
use crate::fields;

use byteorder::{BigEndian, ByteOrder};

/// Wire encoding for a protocol structure.
///
/// `unpack` reads one value starting at `offset` and returns it together with the offset
/// just past it, so structures can be decoded in sequence out of one buffer without copying.
/// Length prefixes are never stored in implementors; `pack_into` derives them.
pub trait Pack: Sized {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError>;

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError>;

    fn pack(&self) -> Result<Vec<u8>, errors::TLSError> {
        let mut v = Vec::new();
        self.pack_into(&mut v)?;
        Ok(v)
    }
}

/// Borrow exactly `n` bytes at `offset`, or report how many are missing.
pub fn take(buffer: &[u8], offset: usize, n: usize) -> Result<&[u8], errors::TLSError> {
    let remaining = buffer.len().saturating_sub(offset);
    if remaining < n {
        return Err(errors::TLSError::Truncated(n - remaining));
    }
    Ok(&buffer[offset..offset + n])
}

fn check_width(width: usize) -> Result<(), errors::TLSError> {
    match width {
        1..=4 => Ok(()),
        _ => Err(errors::TLSError::ValueOutOfRange {
            value: width as u64,
            max: 4,
        }),
    }
}

pub fn encode_uint(value: u64, width: usize, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
    check_width(width)?;
    let max = fields::max_for_width(width);
    if value > max {
        return Err(errors::TLSError::ValueOutOfRange { value, max });
    }
    let mut bytes = [0; 4];
    BigEndian::write_uint(&mut bytes[..width], value, width);
    v.extend_from_slice(&bytes[..width]);
    Ok(())
}

pub fn decode_uint(buffer: &[u8], offset: usize, width: usize) -> Result<(u64, usize), errors::TLSError> {
    check_width(width)?;
    let bytes = take(buffer, offset, width)?;
    Ok((BigEndian::read_uint(bytes, width), offset + width))
}

pub fn encode_uint8(value: u8) -> Vec<u8> {
    vec![value]
}

pub fn encode_uint16(value: u16) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn encode_uint24(value: u32) -> Result<Vec<u8>, errors::TLSError> {
    Ok(fields::Uint24::new(value)?.to_be_bytes().to_vec())
}

pub fn encode_uint32(value: u32) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn decode_uint8(buffer: &[u8], offset: usize) -> Result<(u8, usize), errors::TLSError> {
    let bytes = take(buffer, offset, 1)?;
    Ok((bytes[0], offset + 1))
}

pub fn decode_uint16(buffer: &[u8], offset: usize) -> Result<(u16, usize), errors::TLSError> {
    let bytes = take(buffer, offset, 2)?;
    Ok((BigEndian::read_u16(bytes), offset + 2))
}

pub fn decode_uint24(buffer: &[u8], offset: usize) -> Result<(u32, usize), errors::TLSError> {
    let bytes = take(buffer, offset, 3)?;
    Ok((BigEndian::read_u24(bytes), offset + 3))
}

pub fn decode_uint32(buffer: &[u8], offset: usize) -> Result<(u32, usize), errors::TLSError> {
    let bytes = take(buffer, offset, 4)?;
    Ok((BigEndian::read_u32(bytes), offset + 4))
}

/// Encode `items` behind a `prefix_width`-byte prefix holding their total encoded byte length.
pub fn encode_vector<T, F>(items: &[T], prefix_width: usize, mut item_encoder: F) -> Result<Vec<u8>, errors::TLSError>
where
    F: FnMut(&T, &mut Vec<u8>) -> Result<(), errors::TLSError>,
{
    check_width(prefix_width)?;
    let mut payload = Vec::new();
    for item in items {
        item_encoder(item, &mut payload)?;
    }

    let max = fields::max_for_width(prefix_width);
    if payload.len() as u64 > max {
        return Err(errors::TLSError::LengthExceedsMax {
            length: payload.len(),
            max: max as usize,
        });
    }

    let mut v = Vec::with_capacity(prefix_width + payload.len());
    encode_uint(payload.len() as u64, prefix_width, &mut v)?;
    v.extend_from_slice(&payload);
    Ok(v)
}

/// Decode a length-prefixed vector. `item_decoder` sees only the vector's payload, so an item
/// running past the declared length is malformed input rather than a truncation.
pub fn decode_vector<T, F>(
    buffer: &[u8],
    offset: usize,
    prefix_width: usize,
    mut item_decoder: F,
    max_len: usize,
) -> Result<(Vec<T>, usize), errors::TLSError>
where
    F: FnMut(&[u8], usize) -> Result<(T, usize), errors::TLSError>,
{
    let (length, offset) = decode_uint(buffer, offset, prefix_width)?;
    let length = length as usize;
    if length > max_len {
        return Err(errors::TLSError::LengthExceedsMax { length, max: max_len });
    }
    let payload = take(buffer, offset, length)?;

    let mut items = Vec::new();
    let mut pos = 0;
    while pos < payload.len() {
        let (item, next) = item_decoder(payload, pos).map_err(|e| match e {
            errors::TLSError::Truncated(_) => errors::TLSError::Malformed("vector payload does not divide into whole items"),
            e => e,
        })?;
        if next <= pos {
            return Err(errors::TLSError::Malformed("vector item decoder made no progress"));
        }
        items.push(item);
        pos = next;
    }
    Ok((items, offset + length))
}

pub fn encode_opaque(bytes: &[u8], prefix_width: usize) -> Result<Vec<u8>, errors::TLSError> {
    encode_vector(bytes, prefix_width, |b, v| {
        v.push(*b);
        Ok(())
    })
}

pub fn decode_opaque(buffer: &[u8], offset: usize, prefix_width: usize, max_len: usize) -> Result<(Vec<u8>, usize), errors::TLSError> {
    let (length, offset) = decode_uint(buffer, offset, prefix_width)?;
    let length = length as usize;
    if length > max_len {
        return Err(errors::TLSError::LengthExceedsMax { length, max: max_len });
    }
    let payload = take(buffer, offset, length)?;
    Ok((payload.to_vec(), offset + length))
}

impl Pack for u8 {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.push(*self);
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        decode_uint8(v, offset)
    }
}

impl Pack for u16 {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.extend_from_slice(&self.to_be_bytes());
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        decode_uint16(v, offset)
    }
}

impl Pack for fields::Uint24 {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.extend_from_slice(&self.to_be_bytes());
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let bytes = take(v, offset, 3)?;
        Ok((fields::Uint24::from_be_bytes([bytes[0], bytes[1], bytes[2]]), offset + 3))
    }
}

impl Pack for u32 {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.extend_from_slice(&self.to_be_bytes());
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        decode_uint32(v, offset)
    }
}

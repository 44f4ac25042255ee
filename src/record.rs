use crate::errors;
use crate::pack;
use crate::pack::Pack;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
}

impl ProtocolVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.major, self.minor) {
            (3, 0) => write!(f, "SSL 3.0"),
            (3, 1) => write!(f, "TLS 1.0"),
            (3, 2) => write!(f, "TLS 1.1"),
            (3, 3) => write!(f, "TLS 1.2"),
            (major, minor) => write!(f, "version {}.{}", major, minor),
        }
    }
}

impl Pack for ProtocolVersion {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.push(self.major);
        v.push(self.minor);
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let bytes = pack::take(v, offset, 2)?;
        Ok((ProtocolVersion::new(bytes[0], bytes[1]), offset + 2))
    }
}

pub const SSL_3_0: ProtocolVersion = ProtocolVersion::new(3, 0);
pub const TLS_1_0: ProtocolVersion = ProtocolVersion::new(3, 1);
pub const TLS_1_1: ProtocolVersion = ProtocolVersion::new(3, 2);
pub const TLS_1_2: ProtocolVersion = ProtocolVersion::new(3, 3);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    ChangeCipherSpec,
    Alert,
    Handshake,
    ApplicationData,
    Unknown(u8),
}

impl From<u8> for ContentType {
    fn from(code: u8) -> Self {
        match code {
            20 => ContentType::ChangeCipherSpec,
            21 => ContentType::Alert,
            22 => ContentType::Handshake,
            23 => ContentType::ApplicationData,
            code => ContentType::Unknown(code),
        }
    }
}

impl From<ContentType> for u8 {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::ChangeCipherSpec => 20,
            ContentType::Alert => 21,
            ContentType::Handshake => 22,
            ContentType::ApplicationData => 23,
            ContentType::Unknown(code) => code,
        }
    }
}

impl Pack for ContentType {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.push(u8::from(*self));
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (code, offset) = pack::decode_uint8(v, offset)?;
        Ok((ContentType::from(code), offset))
    }
}

/// type(1) + version(2) + length(2)
pub const RECORD_HEADER_LENGTH: usize = 5;
/// 2^14
pub const MAX_FRAGMENT_LENGTH: usize = 16384;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub r#type: ContentType,
    pub version: ProtocolVersion,
    pub length: u16,
}

impl RecordHeader {
    /// Reads a header and rejects fragment lengths over 2^14 without needing the fragment itself.
    pub fn parse(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (r#type, offset) = ContentType::unpack(v, offset)?;
        let (version, offset) = ProtocolVersion::unpack(v, offset)?;
        let (length, offset) = pack::decode_uint16(v, offset)?;
        if length as usize > MAX_FRAGMENT_LENGTH {
            return Err(errors::TLSError::RecordOverflow(length as usize));
        }
        Ok((RecordHeader { r#type, version, length }, offset))
    }
}

/// A record as it crosses the wire. The length field is always derived from `fragment`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TLSPlaintext {
    pub r#type: ContentType,
    pub version: ProtocolVersion,
    fragment: Vec<u8>,
}

impl TLSPlaintext {
    pub fn new(r#type: ContentType, version: ProtocolVersion, fragment: Vec<u8>) -> Result<TLSPlaintext, errors::TLSError> {
        if fragment.len() > MAX_FRAGMENT_LENGTH {
            return Err(errors::TLSError::RecordOverflow(fragment.len()));
        }
        Ok(TLSPlaintext { r#type, version, fragment })
    }

    pub fn length(&self) -> u16 {
        // bounded by MAX_FRAGMENT_LENGTH in new()
        self.fragment.len() as u16
    }

    pub fn fragment(&self) -> &[u8] {
        &self.fragment
    }

    pub fn into_fragment(self) -> Vec<u8> {
        self.fragment
    }
}

impl Pack for TLSPlaintext {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        self.r#type.pack_into(v)?;
        self.version.pack_into(v)?;
        self.length().pack_into(v)?;
        v.extend_from_slice(&self.fragment);
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (header, offset) = RecordHeader::parse(v, offset)?;
        let fragment = pack::take(v, offset, header.length as usize)?;
        Ok((
            TLSPlaintext {
                r#type: header.r#type,
                version: header.version,
                fragment: fragment.to_vec(),
            },
            offset + header.length as usize,
        ))
    }
}

use crate::errors;
use crate::pack;
use crate::pack::Pack;

use num_traits::FromPrimitive;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Primitive)]
#[repr(u8)]
pub enum AlertLevel {
    Warning = 1,
    Fatal = 2,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Primitive)]
#[repr(u8)]
pub enum AlertDescription {
    CloseNotify = 0,
    UnexpectedMessage = 10,
    BadRecordMac = 20,
    DecryptionFailedRESERVED = 21,
    RecordOverflow = 22,
    DecompressionFailure = 30,
    HandshakeFailure = 40,
    NoCertificateRESERVED = 41,
    BadCertificate = 42,
    UnsupportedCertificate = 43,
    CertificateRevoked = 44,
    CertificateExpired = 45,
    CertificateUnknown = 46,
    IllegalParameter = 47,
    UnknownCa = 48,
    AccessDenied = 49,
    DecodeError = 50,
    DecryptError = 51,
    ExportRestrictionRESERVED = 60,
    ProtocolVersion = 70,
    InsufficientSecurity = 71,
    InternalError = 80,
    UserCanceled = 90,
    NoRenegotiation = 100,
    UnsupportedExtension = 110,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub description: AlertDescription,
}

impl Alert {
    pub fn new(level: AlertLevel, description: AlertDescription) -> Alert {
        Alert { level, description }
    }

    pub fn is_fatal(&self) -> bool {
        self.level == AlertLevel::Fatal
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.level, self.description)
    }
}

impl Pack for Alert {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.push(self.level as u8);
        v.push(self.description as u8);
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (level, offset) = pack::decode_uint8(v, offset)?;
        let (description, offset) = pack::decode_uint8(v, offset)?;
        let level = AlertLevel::from_u8(level).ok_or(errors::TLSError::InvalidAlert)?;
        let description = AlertDescription::from_u8(description).ok_or(errors::TLSError::InvalidAlert)?;
        Ok((Alert::new(level, description), offset))
    }
}

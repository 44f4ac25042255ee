use crate::alert;
use crate::record;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TLSError {
    /// Not enough bytes yet. Carries how many more bytes the field needs.
    #[error("truncated: need {} more bytes", _0)]
    Truncated(usize),
    #[error("declared length {} exceeds maximum {}", length, max)]
    LengthExceedsMax { length: usize, max: usize },
    #[error("record fragment length {} exceeds 2^14", _0)]
    RecordOverflow(usize),
    #[error("invalid ClientHello: {}", _0)]
    InvalidClientHello(&'static str),
    #[error("value {} does not fit its wire width (max {})", value, max)]
    ValueOutOfRange { value: u64, max: u64 },
    #[error("malformed: {}", _0)]
    Malformed(&'static str),

    #[error("unsupported record version {:?}", _0)]
    UnsupportedVersion(record::ProtocolVersion),
    #[error("invalid alert")]
    InvalidAlert,
    #[error("peer sent alert: {:?}", _0)]
    AlertReceived(alert::Alert),
    #[error("connection closed")]
    ConnectionClosed,
    #[error("random source failed")]
    RandomSourceError,

    #[error("{}", _0)]
    TryFromIntError(#[from] std::num::TryFromIntError),
    #[error("{}", _0)]
    SystemTimeError(#[from] std::time::SystemTimeError),
    #[error("{}", _0)]
    StdIoError(#[from] std::io::Error),
}

impl TLSError {
    /// True when the error only means more input is needed. Everything else is fatal.
    pub fn is_truncated(&self) -> bool {
        matches!(self, TLSError::Truncated(_))
    }
}

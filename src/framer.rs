//! Record layer framing for one connection.
//!
//! `RecordSender` splits outgoing bytes into `TLSPlaintext` records of at most 2^14 bytes.
//! `RecordReceiver` is fed whatever the transport returns and hands back complete handshake
//! messages, carrying partial records and partial messages over to the next `push`.

use crate::errors;
use crate::handshake;
use crate::pack::Pack;
use crate::record;

use bytes::{Buf, BytesMut};
use log::{debug, trace, warn};

pub struct RecordSender {
    version: record::ProtocolVersion,
    max_fragment_length: usize,
}

impl RecordSender {
    pub fn new(version: record::ProtocolVersion) -> Self {
        Self {
            version,
            max_fragment_length: record::MAX_FRAGMENT_LENGTH,
        }
    }

    /// Caps fragments below 2^14, e.g. after a max_fragment_length negotiation.
    pub fn with_max_fragment_length(version: record::ProtocolVersion, max_fragment_length: usize) -> Result<Self, errors::TLSError> {
        if max_fragment_length == 0 || max_fragment_length > record::MAX_FRAGMENT_LENGTH {
            return Err(errors::TLSError::ValueOutOfRange {
                value: max_fragment_length as u64,
                max: record::MAX_FRAGMENT_LENGTH as u64,
            });
        }
        Ok(Self {
            version,
            max_fragment_length,
        })
    }

    pub fn version(&self) -> record::ProtocolVersion {
        self.version
    }

    /// Splits `payload` into records in order. An empty payload yields no records.
    pub fn fragment(&self, content_type: record::ContentType, payload: &[u8]) -> Result<Vec<record::TLSPlaintext>, errors::TLSError> {
        payload
            .chunks(self.max_fragment_length)
            .map(|chunk| record::TLSPlaintext::new(content_type, self.version, chunk.to_vec()))
            .collect()
    }

    pub fn frame(&self, content_type: record::ContentType, payload: &[u8]) -> Result<Vec<u8>, errors::TLSError> {
        let mut v = Vec::with_capacity(payload.len() + record::RECORD_HEADER_LENGTH);
        for record in self.fragment(content_type, payload)? {
            debug!("record out: {:?} {} length {}", record.r#type, record.version, record.length());
            record.pack_into(&mut v)?;
        }
        Ok(v)
    }

    /// Frames an already encoded handshake byte stream, which may hold several messages.
    pub fn frame_handshake(&self, handshake_bytes: &[u8]) -> Result<Vec<u8>, errors::TLSError> {
        self.frame(record::ContentType::Handshake, handshake_bytes)
    }
}

pub struct RecordReceiver {
    /// Bytes read from the transport that do not yet form a whole record.
    records: BytesMut,
    /// Handshake-typed fragments, concatenated.
    handshakes: BytesMut,
    /// Complete records of other content types, in arrival order. Nothing bounds this queue
    /// except `take_records`, so callers that ignore application_data must still drain it.
    others: Vec<record::TLSPlaintext>,
    max_handshake_length: usize,
}

impl Default for RecordReceiver {
    fn default() -> Self {
        RecordReceiver::new()
    }
}

impl RecordReceiver {
    pub fn new() -> Self {
        RecordReceiver::with_max_handshake_length(handshake::MAX_HANDSHAKE_LENGTH)
    }

    pub fn with_max_handshake_length(max_handshake_length: usize) -> Self {
        Self {
            records: BytesMut::with_capacity(record::RECORD_HEADER_LENGTH + record::MAX_FRAGMENT_LENGTH),
            handshakes: BytesMut::new(),
            others: Vec::new(),
            max_handshake_length,
        }
    }

    /// Appends `data` and returns every handshake message completed by it, possibly none.
    ///
    /// Any error is fatal for the connection; the receiver should be dropped.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<handshake::Handshake>, errors::TLSError> {
        self.records.extend_from_slice(data);

        while let Some(record) = self.try_extract_record()? {
            match record.r#type {
                record::ContentType::Handshake => self.handshakes.extend_from_slice(record.fragment()),
                other => {
                    warn!("record in: non-handshake content type {:?}, length {}", other, record.length());
                    self.others.push(record);
                }
            }
        }

        let mut messages = Vec::new();
        while let Some(message) = self.try_extract_handshake()? {
            messages.push(message);
        }
        Ok(messages)
    }

    /// Drains the non-handshake records seen so far.
    pub fn take_records(&mut self) -> Vec<record::TLSPlaintext> {
        std::mem::replace(&mut self.others, Vec::new())
    }

    /// Non-handshake records held until the next `take_records`.
    pub fn pending_records(&self) -> usize {
        self.others.len()
    }

    /// Bytes held that have not yet produced a record or a message.
    pub fn buffered_len(&self) -> usize {
        self.records.len() + self.handshakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffered_len() == 0
    }

    fn try_extract_record(&mut self) -> Result<Option<record::TLSPlaintext>, errors::TLSError> {
        let (header, _) = match record::RecordHeader::parse(&self.records, 0) {
            Ok(parsed) => parsed,
            Err(e) if e.is_truncated() => return Ok(None),
            Err(e) => return Err(e),
        };
        if header.version.major != record::TLS_1_2.major {
            return Err(errors::TLSError::UnsupportedVersion(header.version));
        }

        let length = header.length as usize;
        if self.records.len() < record::RECORD_HEADER_LENGTH + length {
            return Ok(None);
        }

        self.records.advance(record::RECORD_HEADER_LENGTH);
        let fragment = self.records.split_to(length);
        trace!("record in: {:?} {} length {}", header.r#type, header.version, length);
        record::TLSPlaintext::new(header.r#type, header.version, fragment.to_vec()).map(Some)
    }

    fn try_extract_handshake(&mut self) -> Result<Option<handshake::Handshake>, errors::TLSError> {
        let (msg_type, length, _) = match handshake::decode_header(&self.handshakes, 0) {
            Ok(parsed) => parsed,
            Err(e) if e.is_truncated() => return Ok(None),
            Err(e) => return Err(e),
        };
        if length > self.max_handshake_length {
            return Err(errors::TLSError::LengthExceedsMax {
                length,
                max: self.max_handshake_length,
            });
        }
        if self.handshakes.len() < handshake::HANDSHAKE_HEADER_LENGTH + length {
            return Ok(None);
        }

        self.handshakes.advance(handshake::HANDSHAKE_HEADER_LENGTH);
        let body = self.handshakes.split_to(length);
        trace!("handshake in: {:?} length {}", msg_type, length);
        handshake::Handshake::new(msg_type, body.to_vec()).map(Some)
    }
}

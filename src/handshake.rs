use crate::cipher;
use crate::entropy;
use crate::errors;
use crate::extensions;
use crate::fields;
use crate::pack;
use crate::pack::Pack;
use crate::record;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HandshakeType {
    HelloRequest,
    ClientHello,
    ServerHello,
    Certificate,
    ServerKeyExchange,
    CertificateRequest,
    ServerHelloDone,
    CertificateVerify,
    ClientKeyExchange,
    Finished,
    Unknown(u8),
}

impl From<u8> for HandshakeType {
    fn from(code: u8) -> Self {
        match code {
            0 => HandshakeType::HelloRequest,
            1 => HandshakeType::ClientHello,
            2 => HandshakeType::ServerHello,
            11 => HandshakeType::Certificate,
            12 => HandshakeType::ServerKeyExchange,
            13 => HandshakeType::CertificateRequest,
            14 => HandshakeType::ServerHelloDone,
            15 => HandshakeType::CertificateVerify,
            16 => HandshakeType::ClientKeyExchange,
            20 => HandshakeType::Finished,
            code => HandshakeType::Unknown(code),
        }
    }
}

impl From<HandshakeType> for u8 {
    fn from(msg_type: HandshakeType) -> Self {
        match msg_type {
            HandshakeType::HelloRequest => 0,
            HandshakeType::ClientHello => 1,
            HandshakeType::ServerHello => 2,
            HandshakeType::Certificate => 11,
            HandshakeType::ServerKeyExchange => 12,
            HandshakeType::CertificateRequest => 13,
            HandshakeType::ServerHelloDone => 14,
            HandshakeType::CertificateVerify => 15,
            HandshakeType::ClientKeyExchange => 16,
            HandshakeType::Finished => 20,
            HandshakeType::Unknown(code) => code,
        }
    }
}

pub trait ValidMessage {
    fn into_handshake_type() -> HandshakeType;
}

impl ValidMessage for ClientHello {
    fn into_handshake_type() -> HandshakeType {
        HandshakeType::ClientHello
    }
}

/// msg_type(1) + length(3)
pub const HANDSHAKE_HEADER_LENGTH: usize = 4;
pub const MAX_HANDSHAKE_LENGTH: usize = fields::MAX_UINT24;

fn body_length(body: &[u8]) -> Result<fields::Uint24, errors::TLSError> {
    if body.len() > fields::MAX_UINT24 {
        return Err(errors::TLSError::ValueOutOfRange {
            value: body.len() as u64,
            max: fields::MAX_UINT24 as u64,
        });
    }
    fields::Uint24::new(body.len() as u32)
}

/// Frames `body` as a handshake message. The 24-bit length is always computed here.
pub fn encode(msg_type: HandshakeType, body: &[u8]) -> Result<Vec<u8>, errors::TLSError> {
    let length = body_length(body)?;
    let mut v = Vec::with_capacity(HANDSHAKE_HEADER_LENGTH + body.len());
    v.push(u8::from(msg_type));
    length.pack_into(&mut v)?;
    v.extend_from_slice(body);
    Ok(v)
}

/// Reads just the type and declared body length.
pub fn decode_header(buffer: &[u8], offset: usize) -> Result<(HandshakeType, usize, usize), errors::TLSError> {
    let (msg_type, offset) = pack::decode_uint8(buffer, offset)?;
    let (length, offset) = pack::decode_uint24(buffer, offset)?;
    Ok((HandshakeType::from(msg_type), length as usize, offset))
}

pub fn decode(buffer: &[u8], offset: usize) -> Result<(HandshakeType, Vec<u8>, usize), errors::TLSError> {
    let (msg_type, length, offset) = decode_header(buffer, offset)?;
    let body = pack::take(buffer, offset, length)?;
    Ok((msg_type, body.to_vec(), offset + length))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Handshake {
    pub msg_type: HandshakeType,
    body: Vec<u8>,
}

impl Handshake {
    pub fn new(msg_type: HandshakeType, body: Vec<u8>) -> Result<Handshake, errors::TLSError> {
        body_length(&body)?;
        Ok(Handshake { msg_type, body })
    }

    pub fn from_message<Body>(body: &Body) -> Result<Handshake, errors::TLSError>
    where
        Body: ValidMessage + Pack,
    {
        Handshake::new(Body::into_handshake_type(), body.pack()?)
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body of message types this crate understands. Everything else stays opaque.
    pub fn parse(&self) -> Result<HandshakeMessage, errors::TLSError> {
        match self.msg_type {
            HandshakeType::ClientHello => {
                let (client_hello, offset) = ClientHello::unpack(&self.body, 0)?;
                if offset != self.body.len() {
                    return Err(errors::TLSError::Malformed("trailing bytes after ClientHello"));
                }
                Ok(HandshakeMessage::ClientHello(client_hello))
            }
            _ => Ok(HandshakeMessage::Opaque(self.clone())),
        }
    }
}

impl Pack for Handshake {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.extend_from_slice(&encode(self.msg_type, &self.body)?);
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (msg_type, body, offset) = decode(v, offset)?;
        Ok((Handshake { msg_type, body }, offset))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandshakeMessage {
    ClientHello(ClientHello),
    Opaque(Handshake),
}

pub const RANDOM_BYTES_LENGTH: usize = 28;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Random {
    pub gmt_unix_time: u32,
    pub random_bytes: [u8; RANDOM_BYTES_LENGTH],
}

impl Random {
    pub fn new(gmt_unix_time: u32, random_bytes: [u8; RANDOM_BYTES_LENGTH]) -> Random {
        Random { gmt_unix_time, random_bytes }
    }

    pub fn generate(clock: &dyn entropy::Clock, rand: &dyn entropy::RandomSource) -> Result<Random, errors::TLSError> {
        let mut random_bytes = [0; RANDOM_BYTES_LENGTH];
        rand.fill(&mut random_bytes)?;
        Ok(Random::new(clock.now()?, random_bytes))
    }
}

impl Pack for Random {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        self.gmt_unix_time.pack_into(v)?;
        v.extend_from_slice(&self.random_bytes);
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (gmt_unix_time, offset) = pack::decode_uint32(v, offset)?;
        let bytes = pack::take(v, offset, RANDOM_BYTES_LENGTH)?;
        let mut random_bytes = [0; RANDOM_BYTES_LENGTH];
        random_bytes.copy_from_slice(bytes);
        Ok((Random::new(gmt_unix_time, random_bytes), offset + RANDOM_BYTES_LENGTH))
    }
}

pub const MAX_SESSION_ID_LENGTH: usize = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    Null,
    Deflate,
    Unknown(u8),
}

impl From<u8> for CompressionMethod {
    fn from(code: u8) -> Self {
        match code {
            0 => CompressionMethod::Null,
            1 => CompressionMethod::Deflate,
            code => CompressionMethod::Unknown(code),
        }
    }
}

impl From<CompressionMethod> for u8 {
    fn from(method: CompressionMethod) -> Self {
        match method {
            CompressionMethod::Null => 0,
            CompressionMethod::Deflate => 1,
            CompressionMethod::Unknown(code) => code,
        }
    }
}

impl Pack for CompressionMethod {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        v.push(u8::from(*self));
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (code, offset) = pack::decode_uint8(v, offset)?;
        Ok((CompressionMethod::from(code), offset))
    }
}

//
// Handshake messages
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientHello {
    pub client_version: record::ProtocolVersion,
    pub random: Random,
    pub session_id: Vec<u8>,
    pub cipher_suites: Vec<cipher::CipherSuite>,
    pub compression_methods: Vec<CompressionMethod>,
    /// `None` leaves the block off the wire; `Some(vec![])` writes an explicit empty block.
    pub extensions: Option<Vec<extensions::Extension>>,
}

impl ClientHello {
    pub fn validate(&self) -> Result<(), errors::TLSError> {
        if self.cipher_suites.is_empty() {
            return Err(errors::TLSError::InvalidClientHello("no cipher suites"));
        }
        if self.compression_methods.is_empty() {
            return Err(errors::TLSError::InvalidClientHello("no compression methods"));
        }
        if self.session_id.len() > MAX_SESSION_ID_LENGTH {
            return Err(errors::TLSError::InvalidClientHello("session id longer than 32 bytes"));
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, errors::TLSError> {
        self.pack()
    }

    /// Reads a ClientHello body. `buffer` must end exactly where the handshake body ends: that is
    /// how an absent extension block is told apart from an empty one, so a body cut off right
    /// after compression_methods decodes with `extensions: None` instead of `Truncated`.
    /// Use `Handshake::parse` when the bytes come off the wire.
    pub fn decode(buffer: &[u8], offset: usize) -> Result<(ClientHello, usize), errors::TLSError> {
        ClientHello::unpack(buffer, offset)
    }
}

impl Pack for ClientHello {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        self.validate()?;
        self.client_version.pack_into(v)?;
        self.random.pack_into(v)?;
        v.extend_from_slice(&pack::encode_opaque(&self.session_id, 1)?);
        v.extend_from_slice(&pack::encode_vector(&self.cipher_suites, 2, |s, v| s.pack_into(v))?);
        v.extend_from_slice(&pack::encode_vector(&self.compression_methods, 1, |m, v| m.pack_into(v))?);
        if let Some(extensions) = &self.extensions {
            v.extend_from_slice(&extensions::pack_extension_list(extensions)?);
        }
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (client_version, offset) = record::ProtocolVersion::unpack(v, offset)?;
        let (random, offset) = Random::unpack(v, offset)?;
        let (session_id, offset) = pack::decode_opaque(v, offset, 1, MAX_SESSION_ID_LENGTH)?;
        let (cipher_suites, offset) = pack::decode_vector(v, offset, 2, cipher::CipherSuite::unpack, fields::MAX_UINT16)?;
        let (compression_methods, offset) = pack::decode_vector(v, offset, 1, CompressionMethod::unpack, fields::MAX_UINT8)?;
        let (extensions, offset) = if offset == v.len() {
            (None, offset)
        } else {
            let (extensions, offset) = extensions::unpack_extension_list(v, offset)?;
            (Some(extensions), offset)
        };

        Ok((
            ClientHello {
                client_version,
                random,
                session_id,
                cipher_suites,
                compression_methods,
                extensions,
            },
            offset,
        ))
    }
}

use crate::errors;
use crate::fields;
use crate::pack;
use crate::pack::Pack;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ExtensionType {
    ServerName,
    MaxFragmentLength,
    ClientCertificateUrl,
    TrustedCaKeys,
    TruncatedHmac,
    StatusRequest,
    SupportedGroups,
    EcPointFormats,
    SignatureAlgorithms,
    EncryptThenMac,
    ExtendedMasterSecret,
    SessionTicket,
    RenegotiationInfo,
    Unknown(u16),
}

impl From<u16> for ExtensionType {
    fn from(code: u16) -> Self {
        match code {
            0 => ExtensionType::ServerName,
            1 => ExtensionType::MaxFragmentLength,
            2 => ExtensionType::ClientCertificateUrl,
            3 => ExtensionType::TrustedCaKeys,
            4 => ExtensionType::TruncatedHmac,
            5 => ExtensionType::StatusRequest,
            10 => ExtensionType::SupportedGroups,
            11 => ExtensionType::EcPointFormats,
            13 => ExtensionType::SignatureAlgorithms,
            22 => ExtensionType::EncryptThenMac,
            23 => ExtensionType::ExtendedMasterSecret,
            35 => ExtensionType::SessionTicket,
            0xff01 => ExtensionType::RenegotiationInfo,
            code => ExtensionType::Unknown(code),
        }
    }
}

impl From<ExtensionType> for u16 {
    fn from(extension_type: ExtensionType) -> Self {
        match extension_type {
            ExtensionType::ServerName => 0,
            ExtensionType::MaxFragmentLength => 1,
            ExtensionType::ClientCertificateUrl => 2,
            ExtensionType::TrustedCaKeys => 3,
            ExtensionType::TruncatedHmac => 4,
            ExtensionType::StatusRequest => 5,
            ExtensionType::SupportedGroups => 10,
            ExtensionType::EcPointFormats => 11,
            ExtensionType::SignatureAlgorithms => 13,
            ExtensionType::EncryptThenMac => 22,
            ExtensionType::ExtendedMasterSecret => 23,
            ExtensionType::SessionTicket => 35,
            ExtensionType::RenegotiationInfo => 0xff01,
            ExtensionType::Unknown(code) => code,
        }
    }
}

/// One extension. The data length on the wire is derived from `extension_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub extension_type: ExtensionType,
    pub extension_data: Vec<u8>,
}

impl Extension {
    pub fn new(extension_type: ExtensionType, extension_data: Vec<u8>) -> Self {
        Self {
            extension_type,
            extension_data,
        }
    }
}

impl Pack for Extension {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        u16::from(self.extension_type).pack_into(v)?;
        v.extend_from_slice(&pack::encode_opaque(&self.extension_data, 2)?);
        Ok(())
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (extension_type, offset) = pack::decode_uint16(v, offset)?;
        let (extension_data, offset) = pack::decode_opaque(v, offset, 2, fields::MAX_UINT16)?;
        Ok((Extension::new(ExtensionType::from(extension_type), extension_data), offset))
    }
}

/// The ClientHello extension block: a 2-byte byte-count prefix followed by the extensions.
pub fn pack_extension_list(extensions: &[Extension]) -> Result<Vec<u8>, errors::TLSError> {
    pack::encode_vector(extensions, 2, |e, v| e.pack_into(v))
}

pub fn unpack_extension_list(v: &[u8], offset: usize) -> Result<(Vec<Extension>, usize), errors::TLSError> {
    pack::decode_vector(v, offset, 2, Extension::unpack, fields::MAX_UINT16)
}

const HOST_NAME: u8 = 0;

pub fn server_name(host: &str) -> Result<Extension, errors::TLSError> {
    let mut entry = vec![HOST_NAME];
    entry.extend_from_slice(&pack::encode_opaque(host.as_bytes(), 2)?);
    let server_name_list = pack::encode_opaque(&entry, 2)?;
    Ok(Extension::new(ExtensionType::ServerName, server_name_list))
}

pub const X25519: u16 = 0x001d;
pub const SECP256R1: u16 = 0x0017;
pub const X448: u16 = 0x001e;
pub const SECP521R1: u16 = 0x0019;
pub const SECP384R1: u16 = 0x0018;

pub fn supported_groups() -> Result<Extension, errors::TLSError> {
    let groups = [X25519, SECP256R1, X448, SECP521R1, SECP384R1];
    let data = pack::encode_vector(&groups, 2, |g, v| g.pack_into(v))?;
    Ok(Extension::new(ExtensionType::SupportedGroups, data))
}

pub const UNCOMPRESSED: u8 = 0;
pub const ANSIX962_COMPRESSED_PRIME: u8 = 1;
pub const ANSIX962_COMPRESSED_CHAR2: u8 = 2;

pub fn ec_point_formats() -> Result<Extension, errors::TLSError> {
    let data = pack::encode_opaque(&[UNCOMPRESSED, ANSIX962_COMPRESSED_PRIME, ANSIX962_COMPRESSED_CHAR2], 1)?;
    Ok(Extension::new(ExtensionType::EcPointFormats, data))
}

// SignatureAndHashAlgorithm pairs, hash byte first (RFC 5246 7.4.1.4.1)
pub const RSA_PKCS1_SHA256: u16 = 0x0401;
pub const RSA_PKCS1_SHA384: u16 = 0x0501;
pub const RSA_PKCS1_SHA512: u16 = 0x0601;
pub const ECDSA_SECP256R1_SHA256: u16 = 0x0403;
pub const ECDSA_SECP384R1_SHA384: u16 = 0x0503;
pub const RSA_PKCS1_SHA1: u16 = 0x0201;
pub const ECDSA_SHA1: u16 = 0x0203;

pub fn signature_algorithms() -> Result<Extension, errors::TLSError> {
    let algorithms = [
        ECDSA_SECP256R1_SHA256,
        RSA_PKCS1_SHA256,
        ECDSA_SECP384R1_SHA384,
        RSA_PKCS1_SHA384,
        RSA_PKCS1_SHA512,
        ECDSA_SHA1,
        RSA_PKCS1_SHA1,
    ];
    let data = pack::encode_vector(&algorithms, 2, |a, v| a.pack_into(v))?;
    Ok(Extension::new(ExtensionType::SignatureAlgorithms, data))
}

pub fn encrypt_then_mac() -> Extension {
    Extension::new(ExtensionType::EncryptThenMac, Vec::new())
}

/// Initial handshake form: an empty renegotiated_connection.
pub fn renegotiation_info() -> Extension {
    Extension::new(ExtensionType::RenegotiationInfo, vec![0])
}

use crate::errors;
use crate::pack;
use crate::pack::Pack;

use num_traits::FromPrimitive;

/// Cipher suites this crate knows by name (RFC 5246 Appendix A.5, RFC 5289, RFC 5746).
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Primitive)]
#[repr(u16)]
pub enum NamedCipherSuite {
    TLS_NULL_WITH_NULL_NULL = 0x0000,
    TLS_RSA_WITH_NULL_MD5 = 0x0001,
    TLS_RSA_WITH_NULL_SHA = 0x0002,
    TLS_RSA_WITH_RC4_128_MD5 = 0x0004,
    TLS_RSA_WITH_RC4_128_SHA = 0x0005,
    TLS_RSA_WITH_3DES_EDE_CBC_SHA = 0x000a,
    TLS_DH_DSS_WITH_3DES_EDE_CBC_SHA = 0x000d,
    TLS_DH_RSA_WITH_3DES_EDE_CBC_SHA = 0x0010,
    TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA = 0x0013,
    TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA = 0x0016,
    TLS_DH_anon_WITH_RC4_128_MD5 = 0x0018,
    TLS_DH_anon_WITH_3DES_EDE_CBC_SHA = 0x001b,
    TLS_RSA_WITH_AES_128_CBC_SHA = 0x002f,
    TLS_DH_DSS_WITH_AES_128_CBC_SHA = 0x0030,
    TLS_DH_RSA_WITH_AES_128_CBC_SHA = 0x0031,
    TLS_DHE_DSS_WITH_AES_128_CBC_SHA = 0x0032,
    TLS_DHE_RSA_WITH_AES_128_CBC_SHA = 0x0033,
    TLS_DH_anon_WITH_AES_128_CBC_SHA = 0x0034,
    TLS_RSA_WITH_AES_256_CBC_SHA = 0x0035,
    TLS_DH_DSS_WITH_AES_256_CBC_SHA = 0x0036,
    TLS_DH_RSA_WITH_AES_256_CBC_SHA = 0x0037,
    TLS_DHE_DSS_WITH_AES_256_CBC_SHA = 0x0038,
    TLS_DHE_RSA_WITH_AES_256_CBC_SHA = 0x0039,
    TLS_DH_anon_WITH_AES_256_CBC_SHA = 0x003a,
    TLS_RSA_WITH_NULL_SHA256 = 0x003b,
    TLS_RSA_WITH_AES_128_CBC_SHA256 = 0x003c,
    TLS_RSA_WITH_AES_256_CBC_SHA256 = 0x003d,
    TLS_DH_DSS_WITH_AES_128_CBC_SHA256 = 0x003e,
    TLS_DH_RSA_WITH_AES_128_CBC_SHA256 = 0x003f,
    TLS_DHE_DSS_WITH_AES_128_CBC_SHA256 = 0x0040,
    TLS_DHE_RSA_WITH_AES_128_CBC_SHA256 = 0x0067,
    TLS_DH_DSS_WITH_AES_256_CBC_SHA256 = 0x0068,
    TLS_DH_RSA_WITH_AES_256_CBC_SHA256 = 0x0069,
    TLS_DHE_DSS_WITH_AES_256_CBC_SHA256 = 0x006a,
    TLS_DHE_RSA_WITH_AES_256_CBC_SHA256 = 0x006b,
    TLS_DH_anon_WITH_AES_128_CBC_SHA256 = 0x006c,
    TLS_DH_anon_WITH_AES_256_CBC_SHA256 = 0x006d,
    TLS_RSA_WITH_AES_128_GCM_SHA256 = 0x009c,
    TLS_RSA_WITH_AES_256_GCM_SHA384 = 0x009d,
    TLS_EMPTY_RENEGOTIATION_INFO_SCSV = 0x00ff,
    TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA = 0xc009,
    TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA = 0xc00a,
    TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA = 0xc013,
    TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA = 0xc014,
    TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 = 0xc02b,
    TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 = 0xc02c,
    TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 = 0xc02f,
    TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 = 0xc030,
}

/// A 2-byte cipher suite code. Codes outside the registry are kept as `Unknown`
/// so a peer advertising newer suites still parses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    Named(NamedCipherSuite),
    Unknown(u16),
}

impl From<u16> for CipherSuite {
    fn from(code: u16) -> Self {
        match NamedCipherSuite::from_u16(code) {
            Some(named) => CipherSuite::Named(named),
            None => CipherSuite::Unknown(code),
        }
    }
}

impl From<CipherSuite> for u16 {
    fn from(suite: CipherSuite) -> Self {
        match suite {
            CipherSuite::Named(named) => named as u16,
            CipherSuite::Unknown(code) => code,
        }
    }
}

impl From<NamedCipherSuite> for CipherSuite {
    fn from(named: NamedCipherSuite) -> Self {
        CipherSuite::Named(named)
    }
}

impl Pack for CipherSuite {
    fn pack_into(&self, v: &mut Vec<u8>) -> Result<(), errors::TLSError> {
        u16::from(*self).pack_into(v)
    }

    fn unpack(v: &[u8], offset: usize) -> Result<(Self, usize), errors::TLSError> {
        let (code, offset) = pack::decode_uint16(v, offset)?;
        Ok((CipherSuite::from(code), offset))
    }
}

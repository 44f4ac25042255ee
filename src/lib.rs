//!# tlswire
//! TLS 1.2 handshake framing without a TLS library.
//!
//! `tlswire` encodes and decodes ClientHello, handshake messages and `TLSPlaintext`
//! records, and reassembles handshake messages from a byte stream split at arbitrary
//! read boundaries.
//!
//! There is no negotiation or record protection here; it stops at the wire format.
//!

#[macro_use]
extern crate enum_primitive_derive;
extern crate num_traits;

pub mod alert;
pub mod cipher;
pub mod client;
pub mod entropy;
pub mod errors;
pub mod extensions;
pub mod fields;
pub mod framer;
pub mod handshake;
pub mod handshaker;
pub mod pack;
pub mod record;
pub mod transport {
    pub mod tcp;
    pub mod transport;
}

//! Property tests for the codecs and the receive framer.

use proptest::prelude::*;

use tlswire::cipher::CipherSuite;
use tlswire::errors::TLSError;
use tlswire::extensions::{Extension, ExtensionType};
use tlswire::framer::{RecordReceiver, RecordSender};
use tlswire::handshake::{self, ClientHello, CompressionMethod, Handshake, HandshakeMessage, HandshakeType, Random};
use tlswire::pack::Pack;
use tlswire::record::{self, ContentType, ProtocolVersion, TLSPlaintext};

fn arb_random() -> impl Strategy<Value = Random> {
    (any::<u32>(), any::<[u8; 28]>()).prop_map(|(gmt_unix_time, random_bytes)| Random::new(gmt_unix_time, random_bytes))
}

fn arb_extension() -> impl Strategy<Value = Extension> {
    (any::<u16>(), proptest::collection::vec(any::<u8>(), 0..40))
        .prop_map(|(code, data)| Extension::new(ExtensionType::from(code), data))
}

fn arb_client_hello() -> impl Strategy<Value = ClientHello> {
    (
        (any::<u8>(), any::<u8>()),
        arb_random(),
        proptest::collection::vec(any::<u8>(), 0..=32),
        proptest::collection::vec(any::<u16>(), 1..60),
        proptest::collection::vec(any::<u8>(), 1..4),
        proptest::option::of(proptest::collection::vec(arb_extension(), 0..6)),
    )
        .prop_map(|((major, minor), random, session_id, suites, compression, extensions)| ClientHello {
            client_version: ProtocolVersion::new(major, minor),
            random,
            session_id,
            cipher_suites: suites.into_iter().map(CipherSuite::from).collect(),
            compression_methods: compression.into_iter().map(CompressionMethod::from).collect(),
            extensions,
        })
}

/// A handshake byte stream of one to four messages with assorted body sizes.
fn arb_handshake_stream() -> impl Strategy<Value = Vec<(u8, Vec<u8>)>> {
    proptest::collection::vec(
        (any::<u8>(), prop_oneof![
            proptest::collection::vec(any::<u8>(), 0..64),
            proptest::collection::vec(any::<u8>(), 16_000..20_000),
        ]),
        1..4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn client_hello_round_trip(client_hello in arb_client_hello()) {
        let body = client_hello.encode().expect("encoding ClientHello failed");
        let (decoded, offset) = ClientHello::decode(&body, 0).expect("decoding ClientHello failed");
        prop_assert_eq!(offset, body.len());
        prop_assert_eq!(&decoded, &client_hello);

        let msg = Handshake::from_message(&client_hello).expect("building Handshake failed");
        match msg.parse().expect("parsing Handshake failed") {
            HandshakeMessage::ClientHello(parsed) => prop_assert_eq!(&parsed, &client_hello),
            other => prop_assert!(false, "expected ClientHello, got {:?}", other),
        }
    }

    #[test]
    fn length_fields_match_payloads(msg_type in any::<u8>(), body in proptest::collection::vec(any::<u8>(), 0..20_000)) {
        let msg = handshake::encode(HandshakeType::from(msg_type), &body).expect("encoding Handshake failed");
        let declared = (usize::from(msg[1]) << 16) | (usize::from(msg[2]) << 8) | usize::from(msg[3]);
        prop_assert_eq!(declared, msg.len() - handshake::HANDSHAKE_HEADER_LENGTH);

        let records = RecordSender::new(record::TLS_1_2).fragment(ContentType::Handshake, &msg).expect("fragmenting failed");
        for r in records {
            let bytes = r.pack().expect("packing record failed");
            let declared = (usize::from(bytes[3]) << 8) | usize::from(bytes[4]);
            prop_assert_eq!(declared, bytes.len() - record::RECORD_HEADER_LENGTH);
            prop_assert!(declared <= record::MAX_FRAGMENT_LENGTH);
        }
    }

    #[test]
    fn strict_prefixes_are_truncated(client_hello in arb_client_hello()) {
        let msg = Handshake::from_message(&client_hello).expect("building Handshake failed").pack().expect("packing Handshake failed");
        let record = TLSPlaintext::new(ContentType::Handshake, record::TLS_1_2, msg.clone())
            .expect("building record failed")
            .pack()
            .expect("packing record failed");

        for n in 0..msg.len() {
            match Handshake::unpack(&msg[..n], 0) {
                Err(TLSError::Truncated(_)) => (),
                other => prop_assert!(false, "handshake prefix {}: {:?}", n, other),
            }
        }
        for n in 0..record.len() {
            match TLSPlaintext::unpack(&record[..n], 0) {
                Err(TLSError::Truncated(_)) => (),
                other => prop_assert!(false, "record prefix {}: {:?}", n, other),
            }
        }
    }

    #[test]
    fn reassembly_ignores_read_boundaries(
        stream in arb_handshake_stream(),
        chunk_sizes in proptest::collection::vec(1usize..3000, 1..50),
    ) {
        let mut handshake_bytes = Vec::new();
        for (msg_type, body) in stream.iter() {
            handshake_bytes.extend(handshake::encode(HandshakeType::from(*msg_type), body).expect("encoding Handshake failed"));
        }
        let wire = RecordSender::new(record::TLS_1_2).frame_handshake(&handshake_bytes).expect("framing failed");

        let whole = RecordReceiver::new().push(&wire).expect("push of whole stream failed");

        let mut receiver = RecordReceiver::new();
        let mut chunked = Vec::new();
        let mut offset = 0;
        for size in chunk_sizes.iter().cycle() {
            if offset >= wire.len() {
                break;
            }
            let end = (offset + size).min(wire.len());
            chunked.extend(receiver.push(&wire[offset..end]).expect("push of chunk failed"));
            offset = end;
        }

        prop_assert_eq!(whole.len(), stream.len());
        prop_assert_eq!(&chunked, &whole);
        for (msg, (msg_type, body)) in chunked.iter().zip(stream.iter()) {
            prop_assert_eq!(msg.msg_type, HandshakeType::from(*msg_type));
            prop_assert_eq!(msg.body(), &body[..]);
        }
        prop_assert!(receiver.is_empty());
    }
}

#[test]
fn client_hello_record_byte_at_a_time() {
    let client_hello = ClientHello {
        client_version: record::TLS_1_2,
        random: Random::new(0x5abc_de01, [0; 28]),
        session_id: Vec::new(),
        cipher_suites: vec![CipherSuite::from(0x0001), CipherSuite::from(0x0005)],
        compression_methods: vec![CompressionMethod::Null],
        extensions: None,
    };
    let msg = Handshake::from_message(&client_hello).expect("building Handshake failed").pack().expect("packing Handshake failed");
    let wire = RecordSender::new(record::TLS_1_2).frame_handshake(&msg).expect("framing failed");
    assert_eq!(wire.len(), 52);
    assert_eq!(&wire[..5], &[0x16, 0x03, 0x03, 0x00, 0x2f]);

    let mut receiver = RecordReceiver::new();
    let mut messages = Vec::new();
    for b in wire.iter() {
        messages.extend(receiver.push(&[*b]).expect("push failed"));
    }
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].msg_type, HandshakeType::ClientHello);
    assert_eq!(messages[0].body(), &msg[4..]);
}

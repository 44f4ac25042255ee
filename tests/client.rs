extern crate tlswire;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use tlswire::client::{Client, ClientConfig};
use tlswire::errors::TLSError;
use tlswire::framer::{RecordReceiver, RecordSender};
use tlswire::handshake::{self, HandshakeMessage, HandshakeType};
use tlswire::record;
use tlswire::transport::tcp::Tcp;

/// Reads from `stream` until one handshake message has been reassembled.
fn read_one_handshake(stream: &mut std::net::TcpStream) -> handshake::Handshake {
    let mut receiver = RecordReceiver::new();
    let mut buf = [0; 7];
    loop {
        let n = stream.read(&mut buf).expect("peer read failed");
        assert!(n > 0, "client closed before sending a handshake message");
        let mut messages = receiver.push(&buf[..n]).expect("peer push failed");
        if !messages.is_empty() {
            assert_eq!(messages.len(), 1);
            return messages.remove(0);
        }
    }
}

/// Sends a ClientHello to an in-process peer, which answers with a server flight written in
/// small pieces.
#[test]
fn client_hello_against_loopback_peer() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("local_addr failed");

    let peer = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept failed");
        let hello = read_one_handshake(&mut stream);

        let mut flight = handshake::encode(HandshakeType::ServerHello, &[0x03, 0x03]).expect("encode failed");
        flight.extend(handshake::encode(HandshakeType::Certificate, &vec![0x30; 20_000]).expect("encode failed"));
        flight.extend(handshake::encode(HandshakeType::ServerHelloDone, &[]).expect("encode failed"));
        let wire = RecordSender::new(record::TLS_1_2).frame_handshake(&flight).expect("framing failed");
        for chunk in wire.chunks(333) {
            stream.write_all(chunk).expect("peer write failed");
        }
        hello
    });

    let tcp = Tcp::connect(addr).expect("connect failed");
    let config = ClientConfig::default()
        .with_server_name("localhost")
        .expect("with_server_name failed")
        .with_default_extensions()
        .expect("with_default_extensions failed");
    let mut client = Client::new(&tcp, config);
    let sent = client.send_client_hello().expect("send_client_hello failed");

    let mut received = Vec::new();
    while received.len() < 3 {
        received.extend(client.recv_handshake().expect("recv_handshake failed"));
    }
    let types: Vec<HandshakeType> = received.iter().map(|m| m.msg_type).collect();
    assert_eq!(
        types,
        vec![HandshakeType::ServerHello, HandshakeType::Certificate, HandshakeType::ServerHelloDone]
    );
    assert_eq!(received[1].length(), 20_000);

    let hello = peer.join().expect("peer panicked");
    match hello.parse().expect("peer failed to parse ClientHello") {
        HandshakeMessage::ClientHello(parsed) => assert_eq!(parsed, sent),
        other => panic!("expected ClientHello, got {:?}", other),
    }

    // ClientHello + the three server messages
    let transcript_len = 4 + hello.length() + (4 + 2) + (4 + 20_000) + 4;
    assert_eq!(client.handshake_messages().len(), transcript_len);
}

#[test]
fn fatal_alert_from_peer() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("local_addr failed");

    let peer = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept failed");
        let _ = read_one_handshake(&mut stream);
        // fatal handshake_failure
        stream.write_all(&[0x15, 0x03, 0x03, 0x00, 0x02, 0x02, 0x28]).expect("peer write failed");
    });

    let tcp = Tcp::connect(addr).expect("connect failed");
    let mut client = Client::new(&tcp, ClientConfig::default());
    client.send_client_hello().expect("send_client_hello failed");
    match client.recv_handshake() {
        Err(TLSError::AlertReceived(alert)) => assert!(alert.is_fatal()),
        other => panic!("expected AlertReceived, got {:?}", other),
    }
    peer.join().expect("peer panicked");
}

#[test]
fn peer_hangs_up() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let addr = listener.local_addr().expect("local_addr failed");

    let peer = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept failed");
        let _ = read_one_handshake(&mut stream);
    });

    let tcp = Tcp::connect(addr).expect("connect failed");
    let mut client = Client::new(&tcp, ClientConfig::default());
    client.send_client_hello().expect("send_client_hello failed");
    peer.join().expect("peer panicked");
    match client.recv_handshake() {
        Err(TLSError::ConnectionClosed) => (),
        other => panic!("expected ConnectionClosed, got {:?}", other),
    }
}

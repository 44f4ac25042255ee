use crate::alert;
use crate::cipher;
use crate::entropy;
use crate::errors;
use crate::extensions;
use crate::framer;
use crate::handshake;
use crate::handshaker;
use crate::pack::Pack;
use crate::record;
use crate::transport::transport::Transport;

use log::{debug, warn};
use ring::rand::SystemRandom;

/// What the client advertises and how it reads. The caller picks the suites; nothing here
/// negotiates.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub version: record::ProtocolVersion,
    pub cipher_suites: Vec<cipher::CipherSuite>,
    pub compression_methods: Vec<handshake::CompressionMethod>,
    pub extensions: Option<Vec<extensions::Extension>>,
    pub session_id: Vec<u8>,
    /// Bytes requested from the transport per read.
    pub read_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            version: record::TLS_1_2,
            cipher_suites: vec![
                cipher::NamedCipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA.into(),
                cipher::NamedCipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.into(),
                cipher::NamedCipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA.into(),
                cipher::NamedCipherSuite::TLS_EMPTY_RENEGOTIATION_INFO_SCSV.into(),
            ],
            compression_methods: vec![handshake::CompressionMethod::Null],
            extensions: None,
            session_id: Vec::new(),
            read_size: 1024,
        }
    }
}

impl ClientConfig {
    /// Adds the extensions most TLS 1.2 servers expect from an ECDHE client.
    pub fn with_default_extensions(mut self) -> Result<Self, errors::TLSError> {
        let list = self.extensions.get_or_insert_with(Vec::new);
        list.push(extensions::supported_groups()?);
        list.push(extensions::ec_point_formats()?);
        list.push(extensions::signature_algorithms()?);
        list.push(extensions::encrypt_then_mac());
        Ok(self)
    }

    pub fn with_server_name(mut self, host: &str) -> Result<Self, errors::TLSError> {
        self.extensions.get_or_insert_with(Vec::new).push(extensions::server_name(host)?);
        Ok(self)
    }
}

pub struct Client<'a> {
    transport: &'a dyn Transport,
    config: ClientConfig,
    clock: Box<dyn entropy::Clock>,
    rand: Box<dyn entropy::RandomSource>,

    sender: framer::RecordSender,
    receiver: framer::RecordReceiver,
    handshake_messages: Vec<u8>,
    /// Non-handshake records from the peer, alerts included, waiting for `take_records`.
    records: Vec<record::TLSPlaintext>,

    client_random: Option<handshake::Random>,
}

impl<'a> Client<'a> {
    pub fn new(transport: &'a dyn Transport, config: ClientConfig) -> Client<'a> {
        Client::with_entropy(transport, config, Box::new(entropy::SystemClock), Box::new(SystemRandom::new()))
    }

    pub fn with_entropy(
        transport: &'a dyn Transport,
        config: ClientConfig,
        clock: Box<dyn entropy::Clock>,
        rand: Box<dyn entropy::RandomSource>,
    ) -> Client<'a> {
        Client {
            transport,
            sender: framer::RecordSender::new(config.version),
            receiver: framer::RecordReceiver::new(),
            config,
            clock,
            rand,
            handshake_messages: Vec::new(),
            records: Vec::new(),
            client_random: None,
        }
    }

    pub fn send_client_hello(&mut self) -> Result<handshake::ClientHello, errors::TLSError> {
        let client_hello = handshaker::client_hello(&self.config, self.clock.as_ref(), self.rand.as_ref())?;
        let msg = handshake::Handshake::from_message(&client_hello)?.pack()?;
        let buf = self.sender.frame_handshake(&msg)?;

        debug!("ClientHello out: {}", hex::encode(&buf));
        self.transport.write(&buf)?;

        self.handshake_messages.extend_from_slice(&msg); // STATE CHANGE
        self.client_random = Some(client_hello.random);
        Ok(client_hello)
    }

    /// Reads until at least one complete handshake message is available and returns every
    /// message completed by the last read.
    ///
    /// A fatal alert ends the call with `AlertReceived`; messages completed by the same read are
    /// still in the transcript. Warning alerts are logged and reading continues.
    pub fn recv_handshake(&mut self) -> Result<Vec<handshake::Handshake>, errors::TLSError> {
        let mut buf = vec![0; self.config.read_size.max(1)];
        loop {
            let n = self.transport.read(&mut buf)?;
            if n == 0 {
                return Err(errors::TLSError::ConnectionClosed);
            }
            debug!("read {} bytes: {}", n, hex::encode(&buf[..n]));

            let messages = self.receiver.push(&buf[..n])?;
            for message in messages.iter() {
                message.pack_into(&mut self.handshake_messages)?; // STATE CHANGE
            }
            self.check_alerts()?;
            if !messages.is_empty() {
                return Ok(messages);
            }
        }
    }

    /// Moves the receiver's non-handshake records into the client's queue, failing on the first
    /// fatal alert.
    fn check_alerts(&mut self) -> Result<(), errors::TLSError> {
        let mut fatal = None;
        for record in self.receiver.take_records() {
            if record.r#type == record::ContentType::Alert && fatal.is_none() {
                let (alert, _) = alert::Alert::unpack(record.fragment(), 0).map_err(|e| match e {
                    errors::TLSError::Truncated(_) => errors::TLSError::InvalidAlert,
                    e => e,
                })?;
                warn!("alert from peer: {}", alert);
                if alert.is_fatal() {
                    fatal = Some(alert);
                }
            }
            self.records.push(record); // STATE CHANGE
        }
        match fatal {
            Some(alert) => Err(errors::TLSError::AlertReceived(alert)),
            None => Ok(()),
        }
    }

    /// Drains the non-handshake records received so far, in arrival order.
    pub fn take_records(&mut self) -> Vec<record::TLSPlaintext> {
        std::mem::replace(&mut self.records, Vec::new())
    }

    /// Every handshake message sent and received so far, as encoded on the wire.
    pub fn handshake_messages(&self) -> &[u8] {
        &self.handshake_messages
    }

    pub fn client_random(&self) -> Option<handshake::Random> {
        self.client_random
    }
}

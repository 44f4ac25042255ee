use crate::client;
use crate::entropy;
use crate::errors;
use crate::handshake;

/// Builds the first flight's ClientHello. The config decides what is advertised; only the
/// `Random` comes from `clock` and `rand`.
pub fn client_hello(
    config: &client::ClientConfig,
    clock: &dyn entropy::Clock,
    rand: &dyn entropy::RandomSource,
) -> Result<handshake::ClientHello, errors::TLSError> {
    let random = handshake::Random::generate(clock, rand)?;

    let client_hello = handshake::ClientHello {
        client_version: config.version,
        random,
        session_id: config.session_id.clone(),
        cipher_suites: config.cipher_suites.clone(),
        compression_methods: config.compression_methods.clone(),
        extensions: config.extensions.clone(),
    };
    client_hello.validate()?;
    Ok(client_hello)
}

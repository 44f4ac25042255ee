use crate::errors::TLSError;
use crate::transport::transport::Transport;

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

pub struct Tcp {
    stream: TcpStream,
}

impl Tcp {
    pub fn connect<A: ToSocketAddrs>(server: A) -> Result<Self, TLSError> {
        let stream = TcpStream::connect(server)?;
        Ok(Self { stream })
    }

    pub fn from_stream(stream: TcpStream) -> Self {
        Self { stream }
    }

    pub fn peer_addr(&self) -> Result<SocketAddr, TLSError> {
        Ok(self.stream.peer_addr()?)
    }

    pub fn shutdown(&self) -> Result<(), TLSError> {
        Ok(self.stream.shutdown(Shutdown::Both)?)
    }
}

impl Transport for Tcp {
    fn write(&self, buf: &[u8]) -> Result<(), TLSError> {
        (&self.stream).write_all(buf)?;
        (&self.stream).flush()?;
        Ok(())
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, TLSError> {
        Ok((&self.stream).read(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::transport::tcp::Tcp;
    use crate::transport::transport::Transport;

    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    #[test]
    fn echo_over_loopback() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
        let addr = listener.local_addr().expect("local_addr failed");
        let peer = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept failed");
            let mut buf = [0; 4];
            stream.read_exact(&mut buf).expect("peer read failed");
            stream.write_all(&buf).expect("peer write failed");
        });

        let tcp = Tcp::connect(addr).expect("connect failed");
        assert_eq!(tcp.peer_addr().expect("peer_addr failed"), addr);
        tcp.write(&[1, 2, 3, 4]).expect("write failed");

        let mut got = Vec::new();
        let mut buf = [0; 16];
        while got.len() < 4 {
            let n = tcp.read(&mut buf).expect("read failed");
            assert!(n > 0);
            got.extend_from_slice(&buf[..n]);
        }
        assert_eq!(got, vec![1, 2, 3, 4]);
        peer.join().expect("peer panicked");
        assert_eq!(tcp.read(&mut buf).expect("read at eof failed"), 0);
    }

    #[test]
    fn accepted_stream_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
        let addr = listener.local_addr().expect("local_addr failed");
        let peer = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).expect("connect failed");
            let mut got = Vec::new();
            stream.read_to_end(&mut got).expect("peer read failed");
            got
        });

        let (stream, _) = listener.accept().expect("accept failed");
        let tcp = Tcp::from_stream(stream);
        tcp.write(&[0x16, 0x03, 0x03]).expect("write failed");
        tcp.shutdown().expect("shutdown failed");
        assert_eq!(peer.join().expect("peer panicked"), vec![0x16, 0x03, 0x03]);
    }
}

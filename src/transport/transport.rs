use crate::errors::TLSError;

/// A reliable, ordered byte stream.
pub trait Transport {
    /// Writes all of `buf`.
    fn write(&self, buf: &[u8]) -> Result<(), TLSError>;
    /// Reads whatever is available, up to `buf.len()` bytes. `Ok(0)` means end of stream.
    fn read(&self, buf: &mut [u8]) -> Result<usize, TLSError>;
}

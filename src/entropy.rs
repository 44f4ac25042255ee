//! Time and randomness sources consulted when building a `Random`.
//!
//! The codecs never produce either value on their own; callers pass these in.

use crate::errors;

use ring::rand::SecureRandom;
use std::convert::TryFrom;
use std::time::SystemTime;

pub trait Clock {
    /// Seconds since the unix epoch.
    fn now(&self) -> Result<u32, errors::TLSError>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u32, errors::TLSError> {
        let gmt_unix_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;
        Ok(u32::try_from(gmt_unix_time.as_secs())?)
    }
}

pub trait RandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), errors::TLSError>;
}

impl<T: SecureRandom> RandomSource for T {
    fn fill(&self, dest: &mut [u8]) -> Result<(), errors::TLSError> {
        SecureRandom::fill(self, dest).map_err(|_| errors::TLSError::RandomSourceError)
    }
}

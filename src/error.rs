use thiserror::Error;

/// Errors raised while configuring or reading a sensor.
///
/// [`Dht11::read`](crate::dht11::Dht11::read) recovers all of these internally and serves the last
/// good reading instead. Use [`Dht11::read_detailed`](crate::dht11::Dht11::read_detailed) to see
/// them.
#[derive(Debug, PartialEq, Error)]
pub enum Error<TIoError> {
    /// Wrapped error from the line implementation.
    #[error("line error: {0:?}")]
    Wrapped(TIoError),
    /// Invalid argument was provided.
    #[error("invalid argument")]
    InvalidArgument,
    /// The sensor did not produce its acknowledgment pulses in time.
    #[error("no response from sensor")]
    ResponseTimeout,
    /// The start marker or data pulse of the given bit took too long.
    #[error("timed out while sampling bit {bit}")]
    BitTimeout { bit: u8 },
    /// All 40 bits arrived but the checksum byte does not match the data.
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

impl<TIoError> From<TIoError> for Error<TIoError> {
    fn from(error: TIoError) -> Error<TIoError> {
        Error::Wrapped(error)
    }
}

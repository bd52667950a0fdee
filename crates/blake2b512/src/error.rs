use core::fmt::Display;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The key passed to a keyed constructor is longer than [`MAX_KEY_LENGTH`](crate::MAX_KEY_LENGTH).
    InvalidKeyLength { length: usize, max: usize },
    /// Data was written to a state which has already produced its digest.
    WriteAfterFinalize,
    /// A digest was requested twice without an intervening reset.
    AlreadyFinalized,
}

impl Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Error::InvalidKeyLength { length, max } => {
                write!(fmt, "invalid key length: got {length} bytes, the maximum is {max}")
            }
            Error::WriteAfterFinalize => fmt.write_str("cannot write to a finalized hash state; reset it first"),
            Error::AlreadyFinalized => fmt.write_str("hash state was already finalized; reset it first"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        std::io::Error::other(error)
    }
}

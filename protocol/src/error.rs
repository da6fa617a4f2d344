//! The protocol error type.

use thiserror::Error;

/// Returned by the message encoder and decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("The packet is too small or has an invalid length octet")]
    Truncated,
    #[error("The magic cookie is invalid")]
    MagicCookie,
    #[error("Option {tag} has invalid length {length}")]
    InvalidOptionLength { tag: u8, length: usize },
    #[error("Option {tag} value of {length} bytes does not fit into the length octet")]
    OptionTooLong { tag: u8, length: usize },
    #[error("Option {tag} cannot hold the given value")]
    InvalidOptionValue { tag: u8 },
    #[error("Option code {0} is reserved")]
    ReservedOptionCode(u8),
    #[error("The transaction ID is not set")]
    MissingTransactionId,
    #[error("The client hardware address is not set")]
    MissingHardwareAddress,
}

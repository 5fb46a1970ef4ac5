use std::io;

use thiserror::Error;

/// Failure reported by a digest provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Outcome of a hash run that did not produce a digest.
///
/// `Canceled` is a regular terminal outcome and is never shown as a failure.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to open the selected file! ({0})")]
    Open(#[source] io::Error),
    #[error("Failed to get the size of the selected file! ({0})")]
    Size(#[source] io::Error),
    #[error("The selected file is too big ({size} bytes) to track its progress!")]
    TooLarge { size: u64 },
    #[error("Failed to open the {algorithm} hashing algorithm provider! ({source})")]
    Provider {
        algorithm: &'static str,
        #[source]
        source: ProviderError,
    },
    #[error("Failed to read the selected file! ({0})")]
    Read(#[source] io::Error),
    #[error("Internal error: Failed to hash the selected file. Finishing the digest failed! ({0})")]
    Finalize(#[source] ProviderError),
    #[error(
        "Internal error: Failed to hash the selected file. Encoding the hash result to hex failed! \
         ({digest_len} digest bytes, capacity {capacity})"
    )]
    EncodeOverflow { digest_len: usize, capacity: usize },
    #[error("Received cancel request!")]
    Canceled,
}

impl HashError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, HashError::Canceled)
    }
}

/// Returned by a mailbox send once the receiving side has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("mailbox receiver has been dropped")]
pub struct MailboxClosed;

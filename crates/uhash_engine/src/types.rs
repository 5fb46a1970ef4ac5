use std::fmt;
use std::path::PathBuf;

pub type JobId = u64;

/// Capacity of the digest text carried by [`WorkerEvent::Complete`].
pub const HASH_RESULT_CAPACITY: usize = 256;
/// Capacity of the error text carried by [`WorkerEvent::Failed`].
pub const MESSAGE_CAPACITY: usize = 512;

pub type DigestHex = BoundedText<HASH_RESULT_CAPACITY>;
pub type ErrorText = BoundedText<MESSAGE_CAPACITY>;

/// One hashing attempt. Moved into the worker thread once started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub path: PathBuf,
}

impl Job {
    pub fn new(id: JobId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }
}

/// Lifecycle events a worker reports for its job, in send order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerEvent {
    Initialized,
    ProgressChanged { percent: u32 },
    Canceled,
    Complete { digest_hex: DigestHex },
    Failed { error_text: ErrorText },
}

impl WorkerEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkerEvent::Canceled | WorkerEvent::Complete { .. } | WorkerEvent::Failed { .. }
        )
    }
}

/// A worker event tagged with the job it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    pub job_id: JobId,
    pub event: WorkerEvent,
}

/// Inline UTF-8 text with a fixed capacity and no heap storage.
///
/// Holds at most `CAP - 1` bytes, mirroring a NUL-terminated buffer of `CAP`
/// elements. Longer input is cut at the last char boundary that fits.
#[derive(Clone, Copy)]
pub struct BoundedText<const CAP: usize> {
    buf: [u8; CAP],
    len: usize,
}

impl<const CAP: usize> BoundedText<CAP> {
    pub const fn new() -> Self {
        Self {
            buf: [0; CAP],
            len: 0,
        }
    }

    /// Maximum number of bytes this text can hold.
    pub const fn capacity() -> usize {
        CAP.saturating_sub(1)
    }

    pub fn truncated(text: &str) -> Self {
        let mut cut = text.len().min(Self::capacity());
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        let mut out = Self::new();
        out.buf[..cut].copy_from_slice(&text.as_bytes()[..cut]);
        out.len = cut;
        out
    }

    /// Lets `write` fill the raw buffer; `write` returns the number of bytes
    /// it produced, which must be ASCII.
    pub(crate) fn try_write_with<E>(
        write: impl FnOnce(&mut [u8]) -> Result<usize, E>,
    ) -> Result<Self, E> {
        let mut out = Self::new();
        let cap = Self::capacity();
        let written = write(&mut out.buf[..cap])?;
        out.len = written.min(cap);
        debug_assert!(out.buf[..out.len].is_ascii());
        Ok(out)
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const CAP: usize> Default for BoundedText<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> PartialEq for BoundedText<CAP> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const CAP: usize> Eq for BoundedText<CAP> {}

impl<const CAP: usize> PartialEq<&str> for BoundedText<CAP> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const CAP: usize> fmt::Debug for BoundedText<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const CAP: usize> fmt::Display for BoundedText<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

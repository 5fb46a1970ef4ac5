//! uhash engine: streaming file hashing, the worker thread and its mailbox.
mod digest;
mod error;
mod hasher;
mod hex;
pub mod mailbox;
mod types;
mod worker;

pub use digest::{Algorithm, DigestProvider, DigestSource};
pub use error::{HashError, MailboxClosed, ProviderError};
pub use hasher::{progress_percent, HashSettings, StreamingHasher, DEFAULT_CHUNK_SIZE};
pub use hex::{encode_hex_into, MAX_DIGEST_BYTES};
pub use mailbox::{MailboxReceiver, MailboxSender, Notify};
pub use types::{
    BoundedText, DigestHex, Envelope, ErrorText, Job, JobId, WorkerEvent, HASH_RESULT_CAPACITY,
    MESSAGE_CAPACITY,
};
pub use worker::{terminal_event, Worker, WorkerHandle};

//! Digest providers.
//!
//! The hasher only talks to [`DigestSource`] and [`DigestProvider`]; the
//! algorithm behind them is opaque. [`Algorithm`] is the production source,
//! backed by the RustCrypto hash crates.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::ProviderError;

/// An initialized, incremental digest computation.
pub trait DigestProvider: Send {
    /// Feeds the next block of input.
    fn update(&mut self, data: &[u8]);

    /// Finishes the computation and returns the raw digest bytes.
    fn finalize(self: Box<Self>) -> Result<Vec<u8>, ProviderError>;

    /// Digest length in bytes.
    fn output_size(&self) -> usize;
}

/// Creates fresh providers, one per hash run.
pub trait DigestSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn open(&self) -> Result<Box<dyn DigestProvider>, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Sha256 => "SHA-256",
        }
    }
}

impl DigestSource for Algorithm {
    fn name(&self) -> &'static str {
        self.label()
    }

    fn open(&self) -> Result<Box<dyn DigestProvider>, ProviderError> {
        Ok(match self {
            Algorithm::Md5 => Box::new(RustCryptoProvider(Md5::new())),
            Algorithm::Sha1 => Box::new(RustCryptoProvider(Sha1::new())),
            Algorithm::Sha256 => Box::new(RustCryptoProvider(Sha256::new())),
        })
    }
}

struct RustCryptoProvider<D>(D);

impl<D> DigestProvider for RustCryptoProvider<D>
where
    D: Digest + Send,
{
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Result<Vec<u8>, ProviderError> {
        Ok(self.0.finalize().to_vec())
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

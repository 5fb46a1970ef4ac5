use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use uhash_logging::{uhash_debug, uhash_info};

use crate::hex::encode_hex_into;
use crate::{Algorithm, DigestHex, DigestSource, HashError, ProviderError};

/// Bytes read and hashed between two progress/cancellation checkpoints.
pub const DEFAULT_CHUNK_SIZE: usize = 512 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSettings {
    pub algorithm: Algorithm,
    pub chunk_size: usize,
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Streams a file through a digest provider in fixed-size chunks.
///
/// The chunk buffer is allocated once and reused by every run.
pub struct StreamingHasher<S = Algorithm> {
    source: S,
    buffer: Vec<u8>,
}

impl StreamingHasher<Algorithm> {
    pub fn from_settings(settings: &HashSettings) -> Self {
        Self::new(settings.algorithm, settings.chunk_size)
    }
}

impl<S: DigestSource> StreamingHasher<S> {
    pub fn new(source: S, chunk_size: usize) -> Self {
        Self {
            source,
            buffer: vec![0; chunk_size.max(1)],
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.source.name()
    }

    /// Hashes the file at `path`.
    ///
    /// `cancel_poll` is consulted before the first read and after every chunk
    /// that did not end the file, as long as bytes are still expected.
    /// `on_progress` only sees strictly increasing percentages.
    pub fn hash<C, P>(
        &mut self,
        path: &Path,
        cancel_poll: C,
        on_progress: P,
    ) -> Result<DigestHex, HashError>
    where
        C: FnMut() -> bool,
        P: FnMut(u32),
    {
        let file = File::open(path).map_err(HashError::Open)?;
        let total_bytes = file.metadata().map_err(HashError::Size)?.len();
        uhash_debug!("Opened {:?} with a size of {} bytes", path, total_bytes);
        self.hash_reader(file, total_bytes, cancel_poll, on_progress)
    }

    /// Hashes everything `reader` yields; `total_bytes` is the expected length
    /// used for progress math.
    pub fn hash_reader<R, C, P>(
        &mut self,
        mut reader: R,
        total_bytes: u64,
        mut cancel_poll: C,
        mut on_progress: P,
    ) -> Result<DigestHex, HashError>
    where
        R: Read,
        C: FnMut() -> bool,
        P: FnMut(u32),
    {
        if total_bytes > u64::MAX / 100 {
            return Err(HashError::TooLarge { size: total_bytes });
        }

        let mut provider = self
            .source
            .open()
            .map_err(|source| HashError::Provider {
                algorithm: self.source.name(),
                source,
            })?;

        if cancel_poll() {
            uhash_info!("Cancel request seen before the first chunk");
            return Err(HashError::Canceled);
        }

        let mut processed_bytes: u64 = 0;
        let mut watermark: u32 = 0;
        loop {
            let read = read_chunk(&mut reader, &mut self.buffer).map_err(HashError::Read)?;
            let reached_eof = read < self.buffer.len();

            provider.update(&self.buffer[..read]);
            processed_bytes += read as u64;

            let percent = progress_percent(total_bytes, processed_bytes);
            if percent > watermark {
                on_progress(percent);
                watermark = percent;
            }

            if reached_eof {
                uhash_debug!(
                    "Reached end of input after {} bytes, finishing {} digest",
                    processed_bytes,
                    self.source.name()
                );
                let expected_len = provider.output_size();
                let digest = provider.finalize().map_err(HashError::Finalize)?;
                if digest.len() != expected_len {
                    return Err(HashError::Finalize(ProviderError::new(format!(
                        "provider returned {} digest bytes instead of {}",
                        digest.len(),
                        expected_len
                    ))));
                }
                return encode_hex_into(&digest);
            }

            // Once the announced length is consumed only the EOF read is left.
            if processed_bytes < total_bytes && cancel_poll() {
                uhash_info!("Cancel request seen after {} bytes", processed_bytes);
                return Err(HashError::Canceled);
            }
        }
    }
}

/// Percentage of `processed_bytes` relative to `total_bytes`, floored.
///
/// An empty input counts as complete. Callers keep `total_bytes` at or below
/// `u64::MAX / 100`.
pub fn progress_percent(total_bytes: u64, processed_bytes: u64) -> u32 {
    if total_bytes == 0 || processed_bytes >= total_bytes {
        return 100;
    }
    match processed_bytes.checked_mul(100) {
        Some(scaled) => (scaled / total_bytes) as u32,
        None => 100,
    }
}

/// Fills `buf` unless the reader runs dry first; returns the bytes read.
fn read_chunk(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_handles_empty_and_partial_inputs() {
        assert_eq!(progress_percent(0, 0), 100);
        assert_eq!(progress_percent(1000, 0), 0);
        assert_eq!(progress_percent(1000, 335), 33);
        assert_eq!(progress_percent(1000, 999), 99);
        assert_eq!(progress_percent(1000, 1000), 100);
        assert_eq!(progress_percent(1000, 5000), 100);
    }

    #[test]
    fn progress_is_exact_at_the_overflow_limit() {
        let total = u64::MAX / 100;
        assert_eq!(progress_percent(total, total / 2), 50);
        assert_eq!(progress_percent(total, total - 1), 99);
    }
}

use std::io::{self, Read, Write};
use std::sync::Once;

use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use uhash_engine::{
    Algorithm, DigestProvider, DigestSource, HashError, ProviderError, StreamingHasher,
};

const KIB: usize = 1024;
const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const EMPTY_SHA1: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(uhash_logging::initialize_for_tests);
}

fn temp_file_with(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn empty_file_reports_full_progress_and_known_digests() {
    init_logging();
    let file = temp_file_with(b"");

    for (algorithm, expected) in [
        (Algorithm::Sha256, EMPTY_SHA256),
        (Algorithm::Sha1, EMPTY_SHA1),
        (Algorithm::Md5, EMPTY_MD5),
    ] {
        let mut hasher = StreamingHasher::new(algorithm, 512 * KIB);
        let mut progress = Vec::new();
        let digest = hasher
            .hash(file.path(), || false, |p| progress.push(p))
            .unwrap();
        assert_eq!(digest.as_str(), expected);
        assert_eq!(progress, vec![100]);
    }
}

#[test]
fn small_file_matches_reference_digest() {
    init_logging();
    let file = temp_file_with(b"abc");
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, 512 * KIB);

    let digest = hasher.hash(file.path(), || false, |_| {}).unwrap();
    assert_eq!(
        digest.as_str(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn chunked_file_reports_throttled_progress() {
    init_logging();
    let content = patterned(1536 * KIB);
    let file = temp_file_with(&content);
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, 512 * KIB);

    let mut progress = Vec::new();
    let digest = hasher
        .hash(file.path(), || false, |p| progress.push(p))
        .unwrap();

    assert_eq!(progress, vec![33, 66, 100]);
    assert_eq!(digest.as_str(), hex::encode(Sha256::digest(&content)));
}

#[test]
fn progress_is_strictly_increasing_with_tiny_chunks() {
    init_logging();
    let content = patterned(10_000);
    let file = temp_file_with(&content);
    let mut hasher = StreamingHasher::new(Algorithm::Md5, 7);

    let mut progress = Vec::new();
    hasher
        .hash(file.path(), || false, |p| progress.push(p))
        .unwrap();

    assert!(progress.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(progress.last(), Some(&100));
    assert_eq!(progress.len(), 100);
}

#[test]
fn hashing_twice_is_deterministic() {
    init_logging();
    let file = temp_file_with(&patterned(300 * KIB));
    let mut hasher = StreamingHasher::new(Algorithm::Sha1, 64 * KIB);

    let first = hasher.hash(file.path(), || false, |_| {}).unwrap();
    let second = hasher.hash(file.path(), || false, |_| {}).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cancellation_stops_before_the_end() {
    init_logging();
    let file = temp_file_with(&patterned(64 * KIB));
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, 4 * KIB);

    let mut polls = 0;
    let mut progress = Vec::new();
    let result = hasher.hash(
        file.path(),
        || {
            polls += 1;
            polls >= 3
        },
        |p| progress.push(p),
    );

    assert!(matches!(result, Err(HashError::Canceled)));
    // One poll before the first chunk, then one after each of two chunks.
    assert_eq!(progress, vec![6, 12]);
}

#[test]
fn cancel_after_the_last_full_chunk_still_completes() {
    init_logging();
    let content = vec![7u8; 1024];
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, 512);

    let mut polls = 0;
    let mut progress = Vec::new();
    let result = hasher.hash_reader(
        io::Cursor::new(content.clone()),
        1024,
        || {
            polls += 1;
            polls >= 3
        },
        |p| progress.push(p),
    );

    assert_eq!(progress, vec![50, 100]);
    assert_eq!(polls, 2);
    assert_eq!(
        result.unwrap().as_str(),
        hex::encode(Sha256::digest(&content))
    );
}

#[test]
fn cancellation_before_first_chunk_reads_nothing() {
    init_logging();
    let file = temp_file_with(&patterned(8 * KIB));
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, KIB);

    let mut progress = Vec::new();
    let result = hasher.hash(file.path(), || true, |p| progress.push(p));

    assert!(result.unwrap_err().is_canceled());
    assert!(progress.is_empty());
}

#[test]
fn missing_file_is_an_open_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, KIB);

    let result = hasher.hash(&dir.path().join("missing.bin"), || false, |_| {});
    let err = result.unwrap_err();
    assert!(matches!(err, HashError::Open(_)));
    assert!(err
        .to_string()
        .starts_with("Failed to open the selected file!"));
}

#[cfg(unix)]
#[test]
fn directory_fails_while_reading() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, KIB);

    let result = hasher.hash(dir.path(), || false, |_| {});
    assert!(matches!(result, Err(HashError::Read(_))));
}

struct FailingReader {
    served: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served >= 2048 {
            return Err(io::Error::other("disk went away"));
        }
        let n = buf.len().min(512);
        buf[..n].fill(0xaa);
        self.served += n;
        Ok(n)
    }
}

#[test]
fn read_error_mid_stream_is_terminal() {
    init_logging();
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, KIB);

    let mut progress = Vec::new();
    let result = hasher.hash_reader(
        FailingReader { served: 0 },
        8192,
        || false,
        |p| progress.push(p),
    );

    assert!(matches!(result, Err(HashError::Read(_))));
    assert_eq!(progress, vec![12, 25]);
}

#[test]
fn oversized_length_is_rejected_before_reading() {
    init_logging();
    let mut hasher = StreamingHasher::new(Algorithm::Sha256, KIB);

    let result = hasher.hash_reader(io::empty(), u64::MAX / 100 + 1, || false, |_| {});
    assert!(matches!(result, Err(HashError::TooLarge { .. })));
}

struct BrokenSource;

impl DigestSource for BrokenSource {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn open(&self) -> Result<Box<dyn DigestProvider>, ProviderError> {
        Err(ProviderError::new("algorithm not available"))
    }
}

#[test]
fn provider_init_failure_is_reported() {
    init_logging();
    let file = temp_file_with(b"data");
    let mut hasher = StreamingHasher::new(BrokenSource, KIB);

    let result = hasher.hash(file.path(), || false, |_| {});
    assert!(matches!(
        result,
        Err(HashError::Provider {
            algorithm: "broken",
            ..
        })
    ));
}

struct FakeSource {
    digest_len: usize,
    fail_finalize: bool,
}

struct FakeProvider {
    digest_len: usize,
    fail_finalize: bool,
}

impl DigestSource for FakeSource {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn open(&self) -> Result<Box<dyn DigestProvider>, ProviderError> {
        Ok(Box::new(FakeProvider {
            digest_len: self.digest_len,
            fail_finalize: self.fail_finalize,
        }))
    }
}

impl DigestProvider for FakeProvider {
    fn update(&mut self, _data: &[u8]) {}

    fn finalize(self: Box<Self>) -> Result<Vec<u8>, ProviderError> {
        if self.fail_finalize {
            return Err(ProviderError::new("finish failed"));
        }
        Ok(vec![0x5a; self.digest_len])
    }

    fn output_size(&self) -> usize {
        self.digest_len
    }
}

#[test]
fn finalize_failure_is_reported() {
    init_logging();
    let file = temp_file_with(b"data");
    let mut hasher = StreamingHasher::new(
        FakeSource {
            digest_len: 32,
            fail_finalize: true,
        },
        KIB,
    );

    let result = hasher.hash(file.path(), || false, |_| {});
    assert!(matches!(result, Err(HashError::Finalize(_))));
}

#[test]
fn digest_too_long_for_result_buffer_is_an_encode_overflow() {
    init_logging();
    let file = temp_file_with(b"data");
    // 128 bytes need 257 slots, one more than the result buffer offers.
    let mut hasher = StreamingHasher::new(
        FakeSource {
            digest_len: 128,
            fail_finalize: false,
        },
        KIB,
    );

    let result = hasher.hash(file.path(), || false, |_| {});
    assert!(matches!(
        result,
        Err(HashError::EncodeOverflow {
            digest_len: 128,
            capacity: 256
        })
    ));

    let mut fits = StreamingHasher::new(
        FakeSource {
            digest_len: 127,
            fail_finalize: false,
        },
        KIB,
    );
    let digest = fits.hash(file.path(), || false, |_| {}).unwrap();
    assert_eq!(digest.len(), 254);
}

struct MismatchSource;

struct MismatchProvider;

impl DigestSource for MismatchSource {
    fn name(&self) -> &'static str {
        "mismatch"
    }

    fn open(&self) -> Result<Box<dyn DigestProvider>, ProviderError> {
        Ok(Box::new(MismatchProvider))
    }
}

impl DigestProvider for MismatchProvider {
    fn update(&mut self, _data: &[u8]) {}

    fn finalize(self: Box<Self>) -> Result<Vec<u8>, ProviderError> {
        Ok(vec![1; 16])
    }

    fn output_size(&self) -> usize {
        32
    }
}

#[test]
fn digest_shorter_than_announced_is_a_finalize_error() {
    init_logging();
    let file = temp_file_with(b"data");
    let mut hasher = StreamingHasher::new(MismatchSource, KIB);

    let err = hasher.hash(file.path(), || false, |_| {}).unwrap_err();
    assert!(matches!(err, HashError::Finalize(_)));
    assert!(err.to_string().contains("16 digest bytes instead of 32"));
}

use crate::{BoundedText, HashError};

/// Digests longer than this are treated as a provider bug, not as data.
pub const MAX_DIGEST_BYTES: usize = 2000;

/// Lowercase hex encoding of `bytes` into a bounded text of capacity `CAP`.
///
/// Refuses when `bytes.len() * 2 + 1 > CAP` or when the digest is
/// implausibly long.
pub fn encode_hex_into<const CAP: usize>(bytes: &[u8]) -> Result<BoundedText<CAP>, HashError> {
    let overflow = HashError::EncodeOverflow {
        digest_len: bytes.len(),
        capacity: CAP,
    };
    if bytes.len() >= MAX_DIGEST_BYTES || bytes.len() * 2 + 1 > CAP {
        return Err(overflow);
    }

    let hex_len = bytes.len() * 2;
    BoundedText::try_write_with(|buf| {
        ::hex::encode_to_slice(bytes, &mut buf[..hex_len]).map(|()| hex_len)
    })
    .map_err(|_| overflow)
}

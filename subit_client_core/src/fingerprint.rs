//! Content fingerprint of a video file
//!
//! The fingerprint identifies a video independently of its name: the file
//! size plus the sum of every little-endian 64-bit word of the first and last
//! 64 KiB of the file, wrapping at 64 bits. The remote service matches on the
//! exact value, so the arithmetic here must stay bit-exact.

use crate::error::IoError;
use log::{debug, trace};
use std::fmt;
use std::io::SeekFrom;
use std::path::Path;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Bytes read from each end of the file
pub const CHUNK_SIZE: u64 = 65536;

/// Files below this size cannot be fingerprinted
pub const MIN_FILE_SIZE: u64 = 2 * CHUNK_SIZE;

/// Width of one summed word
const WORD_SIZE: usize = 8;

/// 64-bit content fingerprint, rendered as 16 lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Wrap a raw fingerprint value
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Raw 64-bit value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Zero-padded lowercase hex form sent to the service
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Fingerprint together with the byte size it was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFingerprint {
    pub fingerprint: Fingerprint,
    pub byte_size: u64,
}

/// The two ways fingerprinting can fail
///
/// Both are recoverable: the search client reacts by falling back to a
/// name-based query. The type has no textual fingerprint form, so a failure
/// can never be sent to the service as if it were a hash.
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// File is shorter than two chunks
    #[error("File too small to fingerprint: {size} bytes (minimum {MIN_FILE_SIZE})")]
    TooSmall { size: u64 },

    /// File could not be opened or read
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Add every 8-byte little-endian word of `chunk` to `hash`, wrapping at 64 bits
///
/// Adding the two's-complement signed word and masking to 64 bits is the same
/// as a wrapping add of its unsigned reinterpretation.
pub fn sum_words(hash: u64, chunk: &[u8]) -> u64 {
    chunk.chunks_exact(WORD_SIZE).fold(hash, |acc, word| {
        let mut buf = [0u8; WORD_SIZE];
        buf.copy_from_slice(word);
        acc.wrapping_add(u64::from_le_bytes(buf))
    })
}

/// Fingerprint from an in-memory head chunk, tail chunk and total size
pub fn fingerprint_parts(byte_size: u64, head: &[u8], tail: &[u8]) -> Fingerprint {
    let hash = sum_words(byte_size, head);
    Fingerprint(sum_words(hash, tail))
}

/// Compute the fingerprint of the file at `path`
pub async fn compute_fingerprint(path: &Path) -> Result<FileFingerprint, FingerprintError> {
    let io_err = |e: std::io::Error| FingerprintError::Io(IoError::from_std(e).with_path(path));

    let mut file = tokio::fs::File::open(path).await.map_err(io_err)?;
    let byte_size = file.metadata().await.map_err(io_err)?.len();
    trace!("Fingerprinting {} ({byte_size} bytes)", path.display());

    if byte_size < MIN_FILE_SIZE {
        debug!(
            "{} is too small to fingerprint ({byte_size} bytes)",
            path.display()
        );
        return Err(FingerprintError::TooSmall { size: byte_size });
    }

    let mut head = vec![0u8; CHUNK_SIZE as usize];
    file.read_exact(&mut head).await.map_err(io_err)?;

    let mut tail = vec![0u8; CHUNK_SIZE as usize];
    file.seek(SeekFrom::Start(byte_size.saturating_sub(CHUNK_SIZE)))
        .await
        .map_err(io_err)?;
    file.read_exact(&mut tail).await.map_err(io_err)?;

    let fingerprint = fingerprint_parts(byte_size, &head, &tail);
    debug!("Fingerprint of {}: {fingerprint}", path.display());

    Ok(FileFingerprint {
        fingerprint,
        byte_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    /// Straightforward reference: signed words summed in 128-bit, masked at the end
    fn reference_fingerprint(data: &[u8]) -> u64 {
        let size = data.len();
        let mut sum = size as i128;
        let chunk = CHUNK_SIZE as usize;
        for range in [0..chunk, size - chunk..size] {
            for word in data[range].chunks_exact(8) {
                sum += i64::from_le_bytes(word.try_into().unwrap()) as i128;
            }
        }
        (sum & 0xFFFF_FFFF_FFFF_FFFF) as u64
    }

    fn pseudo_random_bytes(seed: u64, len: usize) -> Vec<u8> {
        let mut state = seed | 1;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 24) as u8
            })
            .collect()
    }

    #[test]
    fn test_display_is_zero_padded_lowercase_hex() {
        let fingerprint = Fingerprint::from_raw(0xABC);
        assert_eq!(fingerprint.to_hex(), "0000000000000abc");
        assert_eq!(fingerprint.to_string(), "0000000000000abc");
        assert_eq!(Fingerprint::from_raw(u64::MAX).to_hex(), "ffffffffffffffff");
    }

    #[test]
    fn test_sum_words_wraps() {
        let words = [0xFFu8; 16];
        // 2 + (-1) + (-1) == 0
        assert_eq!(sum_words(2, &words), 0);
    }

    #[tokio::test]
    async fn test_all_zero_file_is_its_size() {
        let file = write_temp(&vec![0u8; 131072]);
        let result = compute_fingerprint(file.path()).await.unwrap();

        assert_eq!(result.byte_size, 131072);
        assert_eq!(result.fingerprint.to_hex(), "0000000000020000");
    }

    #[tokio::test]
    async fn test_accumulator_wraps_at_64_bits() {
        // Every word is -1: 131072 + 16384 * (2^64 - 1) overflows many times
        let file = write_temp(&vec![0xFFu8; 131072]);
        let result = compute_fingerprint(file.path()).await.unwrap();

        assert_eq!(result.fingerprint.value(), 131072 - 16384);
        assert_eq!(result.fingerprint.to_hex(), "000000000001c000");
    }

    #[tokio::test]
    async fn test_only_head_and_tail_are_read() {
        let mut data = vec![0u8; 200000];
        // Bytes in the middle must not influence the result
        data[100000] = 0x7F;
        let with_middle = write_temp(&data);
        data[100000] = 0;
        let without_middle = write_temp(&data);

        let a = compute_fingerprint(with_middle.path()).await.unwrap();
        let b = compute_fingerprint(without_middle.path()).await.unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[tokio::test]
    async fn test_file_below_minimum_is_size_error() {
        let file = write_temp(&vec![1u8; (MIN_FILE_SIZE - 1) as usize]);
        let result = compute_fingerprint(file.path()).await;

        assert!(matches!(
            result,
            Err(FingerprintError::TooSmall { size }) if size == MIN_FILE_SIZE - 1
        ));
    }

    #[tokio::test]
    async fn test_empty_file_is_size_error() {
        let file = write_temp(&[]);
        let result = compute_fingerprint(file.path()).await;
        assert!(matches!(
            result,
            Err(FingerprintError::TooSmall { size: 0 })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = compute_fingerprint(Path::new("/definitely/not/here.mkv")).await;

        match result {
            Err(FingerprintError::Io(err)) => {
                assert!(err.to_string().contains("/definitely/not/here.mkv"));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_computation_is_identical() {
        let file = write_temp(&pseudo_random_bytes(42, 150_001));
        let first = compute_fingerprint(file.path()).await.unwrap();
        let second = compute_fingerprint(file.path()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.fingerprint.to_hex().len(), 16);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn prop_matches_reference(seed in any::<u64>(), extra in 0usize..100_000) {
            let data = pseudo_random_bytes(seed, MIN_FILE_SIZE as usize + extra);
            let expected = reference_fingerprint(&data);

            let file = write_temp(&data);
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime.block_on(compute_fingerprint(file.path())).unwrap();

            prop_assert_eq!(result.fingerprint.value(), expected);
            prop_assert_eq!(result.byte_size, data.len() as u64);
        }
    }
}

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{DigestError, Result};
use crate::{
    DigestAlgorithm, DigestEngine, DigestResult, Flow, Hasher, ProgressEvent, ProgressObserver,
    digests_equal,
};

/// Default read size for incremental hashing.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Tuning for chunked hashing.
///
/// # Examples
///
/// ```
/// use hashlab_digest::StreamOptions;
///
/// let options = StreamOptions::default().chunk_size(8192).total_bytes(1_000_000);
/// assert_eq!(options.chunk_size, 8192);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// Upper bound on bytes read per call; also bounds memory use.
    ///
    /// Default: 64 KiB
    pub chunk_size: usize,

    /// Expected total length, reported back in progress events.
    ///
    /// Default: None
    pub total_bytes: Option<u64>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            chunk_size:  DEFAULT_CHUNK_SIZE,
            total_bytes: None,
        }
    }
}

impl StreamOptions {
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn total_bytes(mut self, total_bytes: u64) -> Self {
        self.total_bytes = Some(total_bytes);
        self
    }
}

/// Streaming reader that hashes data as it passes through.
/// Wraps any `Read` source, so content can be copied and digested in one pass.
pub struct DigestReader<R, H> {
    reader: R,
    hasher: H,
    bytes_read: u64,
}

impl<R, H> DigestReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self {
            reader,
            hasher,
            bytes_read: 0,
        }
    }

    pub fn bytes_read(&self) -> u64 { self.bytes_read }
}

impl<R: Read, H: Hasher> Read for DigestReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
            self.bytes_read += n as u64;
        }
        Ok(n)
    }
}

impl<R, H: Hasher> DigestReader<R, H> {
    /// Finalize the digest of everything read so far.
    pub fn finish(self) -> DigestResult {
        DigestResult::new(self.hasher.algorithm(), self.hasher.finalize(), self.bytes_read)
    }

    /// Finalize and compare against `expected` in constant time.
    pub fn verify(self, expected: &DigestResult) -> bool { digests_equal(&self.finish(), expected) }
}

/// Hash `source` chunk by chunk, reporting progress after each chunk.
///
/// The observer may return [`Flow::Cancel`]; the call then fails with
/// [`DigestError::Cancelled`] and the partial state is dropped.
///
/// # Examples
///
/// ```
/// use hashlab_digest::{DigestAlgorithm, NoProgress, StreamOptions, hash_stream};
///
/// let data: &[u8] = b"hola mundo";
/// let options = StreamOptions::default().chunk_size(3);
/// let result = hash_stream(DigestAlgorithm::Sha256, data, &options, &mut NoProgress).unwrap();
/// assert_eq!(result.byte_count(), 10);
/// ```
pub fn hash_stream<R, O>(
    algorithm: DigestAlgorithm,
    source: R,
    options: &StreamOptions,
    observer: &mut O,
) -> Result<DigestResult>
where
    R: Read,
    O: ProgressObserver + ?Sized,
{
    debug!(%algorithm, chunk_size = options.chunk_size, total = ?options.total_bytes, "hashing stream");
    drain(DigestReader::new(source, DigestEngine::new(algorithm)), options, observer)
}

/// Hash the file at `path`, taking the progress total from its metadata
/// unless `options` already carries one.
pub fn hash_file<O>(
    algorithm: DigestAlgorithm,
    path: impl AsRef<Path>,
    options: &StreamOptions,
    observer: &mut O,
) -> Result<DigestResult>
where
    O: ProgressObserver + ?Sized,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(DigestError::SourceReadError)?;

    let mut options = *options;
    if options.total_bytes.is_none() {
        if let Ok(metadata) = file.metadata() {
            options.total_bytes = Some(metadata.len());
        }
    }

    debug!(path = %path.display(), "hashing file");
    hash_stream(algorithm, file, &options, observer)
}

pub(crate) fn drain<R, H, O>(
    mut reader: DigestReader<R, H>,
    options: &StreamOptions,
    observer: &mut O,
) -> Result<DigestResult>
where
    R: Read,
    H: Hasher,
    O: ProgressObserver + ?Sized,
{
    if options.chunk_size == 0 {
        return Err(DigestError::InvalidChunkSize);
    }

    let mut buf = vec![0u8; options.chunk_size];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(bytes_read = reader.bytes_read(), error = %e, "read failed, discarding digest state");
                return Err(DigestError::SourceReadError(e));
            }
        };

        let event = ProgressEvent {
            bytes_processed: reader.bytes_read(),
            total_bytes: options.total_bytes,
        };
        trace!(chunk = n, bytes_processed = event.bytes_processed, "chunk hashed");

        if observer.on_progress(&event) == Flow::Cancel {
            debug!(bytes_processed = event.bytes_processed, "hashing cancelled by observer");
            return Err(DigestError::Cancelled {
                bytes_processed: event.bytes_processed,
            });
        }
    }

    Ok(reader.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::{NoProgress, compute_digest};

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "disk vanished"))
            } else {
                self.served = true;
                buf[0] = b'x';
                Ok(1)
            }
        }
    }

    struct InterruptingReader<R> {
        inner: R,
        interrupt_next: bool,
    }

    impl<R: Read> Read for InterruptingReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt_next = !self.interrupt_next;
            if self.interrupt_next {
                Err(io::Error::from(io::ErrorKind::Interrupted))
            } else {
                self.inner.read(buf)
            }
        }
    }

    #[test]
    fn test_digest_reader_passthrough() {
        let data = b"test data for verification";
        let expected = compute_digest(DigestAlgorithm::Sha256, data);

        let mut verified =
            DigestReader::new(Cursor::new(data), DigestEngine::new(DigestAlgorithm::Sha256));
        let mut copied = Vec::new();
        io::copy(&mut verified, &mut copied).unwrap();

        assert_eq!(copied, data);
        assert_eq!(verified.bytes_read(), data.len() as u64);
        assert!(verified.verify(&expected));
    }

    #[test]
    fn test_digest_reader_mismatch() {
        let data = b"test data";
        let mut verified =
            DigestReader::new(Cursor::new(data), DigestEngine::new(DigestAlgorithm::Sha256));

        let mut buffer = [0; 32];
        let _ = verified.read(&mut buffer).unwrap();

        let other = compute_digest(DigestAlgorithm::Sha256, b"other data");
        assert!(!verified.verify(&other));
    }

    #[test]
    fn test_progress_events_are_cumulative() {
        let data = vec![7u8; 10];
        let options = StreamOptions::default().chunk_size(4).total_bytes(10);
        let mut events = Vec::new();

        let result = hash_stream(
            DigestAlgorithm::Sha256,
            Cursor::new(&data),
            &options,
            &mut |event: &ProgressEvent| {
                events.push(*event);
                Flow::Continue
            },
        )
        .unwrap();

        let processed: Vec<u64> = events.iter().map(|e| e.bytes_processed).collect();
        assert_eq!(processed, vec![4, 8, 10]);
        assert!(events.iter().all(|e| e.total_bytes == Some(10)));
        assert_eq!(result.byte_count(), 10);
    }

    #[test]
    fn test_empty_source_emits_no_events() {
        let mut calls = 0;
        let result = hash_stream(
            DigestAlgorithm::Sha256,
            io::empty(),
            &StreamOptions::default(),
            &mut |_: &ProgressEvent| {
                calls += 1;
                Flow::Continue
            },
        )
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(
            result.hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let options = StreamOptions::default().chunk_size(0);
        let err =
            hash_stream(DigestAlgorithm::Sha256, io::empty(), &options, &mut NoProgress).unwrap_err();
        assert!(matches!(err, DigestError::InvalidChunkSize));
    }

    #[test]
    fn test_cancel_returns_no_digest() {
        let data = vec![0u8; 1024];
        let options = StreamOptions::default().chunk_size(100);

        let err = hash_stream(
            DigestAlgorithm::Sha512,
            Cursor::new(&data),
            &options,
            &mut |event: &ProgressEvent| {
                if event.bytes_processed >= 300 { Flow::Cancel } else { Flow::Continue }
            },
        )
        .unwrap_err();

        assert!(matches!(err, DigestError::Cancelled { bytes_processed: 300 }));
    }

    #[test]
    fn test_read_error_is_source_error() {
        let err = hash_stream(
            DigestAlgorithm::Sha256,
            FailingReader { served: false },
            &StreamOptions::default(),
            &mut NoProgress,
        )
        .unwrap_err();

        match err {
            DigestError::SourceReadError(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected SourceReadError, got {other:?}"),
        }
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let reader = InterruptingReader {
            inner: Cursor::new(b"hola mundo".to_vec()),
            interrupt_next: false,
        };
        let options = StreamOptions::default().chunk_size(3);
        let result = hash_stream(DigestAlgorithm::Sha256, reader, &options, &mut NoProgress).unwrap();

        assert_eq!(result.hex(), compute_digest(DigestAlgorithm::Sha256, b"hola mundo").hex());
    }
}

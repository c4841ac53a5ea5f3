//! Keyed digests (HMAC, RFC 2104).
//!
//! HMAC mixes the key into the inner and outer hash states, which is not the
//! same as hashing `key || message`; that is why this lives apart from the
//! salt and pepper transforms.

use std::fmt;
use std::io::Read;

use blake2::{Blake2b512, Blake2s256};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac, SimpleHmac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{DigestError, Result};
use crate::reader::{DigestReader, drain};
use crate::{DigestAlgorithm, DigestResult, Hasher, ProgressObserver, StreamOptions};

/// Secret HMAC key. Redacted in `Debug`, wiped on drop, never serialized.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacKey(Vec<u8>);

impl HmacKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self { Self(secret.into()) }

    /// Turn an optional secret-store lookup into a usable key.
    pub fn require(secret: Option<HmacKey>) -> Result<HmacKey> {
        secret.filter(|k| !k.is_empty()).ok_or(DigestError::MissingKey)
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("HmacKey(<redacted>)") }
}

impl From<&str> for HmacKey {
    fn from(secret: &str) -> Self { Self::new(secret.as_bytes()) }
}

impl From<String> for HmacKey {
    fn from(secret: String) -> Self { Self::new(secret.into_bytes()) }
}

enum MacState {
    Sha1(Hmac<Sha1>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
    Blake2b(SimpleHmac<Blake2b512>),
    Blake2s(SimpleHmac<Blake2s256>),
}

/// Running HMAC computation.
pub struct HmacEngine {
    algorithm: DigestAlgorithm,
    state: MacState,
}

impl HmacEngine {
    /// Key a new HMAC state. The key is only borrowed for initialization.
    pub fn new(algorithm: DigestAlgorithm, key: &HmacKey) -> Result<Self> {
        if key.is_empty() {
            return Err(DigestError::MissingKey);
        }

        let key = key.0.as_slice();
        let state = match algorithm {
            DigestAlgorithm::Sha1 => MacState::Sha1(keyed(key)?),
            DigestAlgorithm::Sha256 => MacState::Sha256(keyed(key)?),
            DigestAlgorithm::Sha384 => MacState::Sha384(keyed(key)?),
            DigestAlgorithm::Sha512 => MacState::Sha512(keyed(key)?),
            DigestAlgorithm::Blake2b => MacState::Blake2b(keyed(key)?),
            DigestAlgorithm::Blake2s => MacState::Blake2s(keyed(key)?),
            DigestAlgorithm::Blake3 => {
                return Err(DigestError::UnsupportedAlgorithm(format!("hmac-{algorithm}")));
            }
        };

        Ok(Self { algorithm, state })
    }
}

// HMAC accepts keys of any length, so this only fails if a backend changes that.
fn keyed<M: KeyInit>(key: &[u8]) -> Result<M> {
    <M as KeyInit>::new_from_slice(key).map_err(|_| DigestError::MissingKey)
}

impl Hasher for HmacEngine {
    fn algorithm(&self) -> DigestAlgorithm { self.algorithm }

    fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            MacState::Sha1(m) => Mac::update(m, data),
            MacState::Sha256(m) => Mac::update(m, data),
            MacState::Sha384(m) => Mac::update(m, data),
            MacState::Sha512(m) => Mac::update(m, data),
            MacState::Blake2b(m) => Mac::update(m, data),
            MacState::Blake2s(m) => Mac::update(m, data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self.state {
            MacState::Sha1(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha256(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha384(m) => m.finalize().into_bytes().to_vec(),
            MacState::Sha512(m) => m.finalize().into_bytes().to_vec(),
            MacState::Blake2b(m) => m.finalize().into_bytes().to_vec(),
            MacState::Blake2s(m) => m.finalize().into_bytes().to_vec(),
        }
    }
}

/// HMAC tag of `input` under `key`.
///
/// # Examples
///
/// ```
/// use hashlab_digest::{DigestAlgorithm, HmacKey, compute_hmac};
///
/// let key = HmacKey::from("key");
/// let tag = compute_hmac(
///     DigestAlgorithm::Sha256,
///     &key,
///     b"The quick brown fox jumps over the lazy dog",
/// )
/// .unwrap();
/// assert_eq!(
///     tag.hex(),
///     "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
/// );
/// ```
pub fn compute_hmac(
    algorithm: DigestAlgorithm,
    key: &HmacKey,
    input: impl AsRef<[u8]>,
) -> Result<DigestResult> {
    let input = input.as_ref();
    let mut engine = HmacEngine::new(algorithm, key)?;
    debug!(%algorithm, bytes = input.len(), "computing hmac");
    engine.update(input);
    Ok(DigestResult::new(algorithm, engine.finalize(), input.len() as u64))
}

/// Chunked HMAC over a reader, with the same progress and cancellation
/// behavior as [`hash_stream`](crate::hash_stream).
pub fn hmac_stream<R, O>(
    algorithm: DigestAlgorithm,
    key: &HmacKey,
    source: R,
    options: &StreamOptions,
    observer: &mut O,
) -> Result<DigestResult>
where
    R: Read,
    O: ProgressObserver + ?Sized,
{
    let engine = HmacEngine::new(algorithm, key)?;
    debug!(%algorithm, chunk_size = options.chunk_size, "computing hmac over stream");
    drain(DigestReader::new(source, engine), options, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Flow, NoProgress, ProgressEvent, compute_digest};

    const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_reference_vectors() {
        let key = HmacKey::from("key");
        let cases = [
            (DigestAlgorithm::Sha256, "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"),
            (DigestAlgorithm::Sha1, "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9"),
            (
                DigestAlgorithm::Sha512,
                "b42af09057bac1e2d41708e48a902e09b5ff7f12ab428a4fe86653c73dd248fb82f948a549f7b791a5b41915ee4d1ec3935357e4e2317250d0372afa2ebeeb3a",
            ),
            (
                DigestAlgorithm::Blake2b,
                "92294f92c0dfb9b00ec9ae8bd94d7e7d8a036b885a499f149dfe2fd2199394aaaf6b8894a1730cccb2cd050f9bcf5062a38b51b0dab33207f8ef35ae2c9df51b",
            ),
        ];

        for (algorithm, expected) in cases {
            let tag = compute_hmac(algorithm, &key, FOX).unwrap();
            assert_eq!(tag.hex(), expected, "{algorithm}");
            assert_eq!(tag.byte_count(), FOX.len() as u64);
        }
    }

    #[test]
    fn test_spanish_message() {
        let tag = compute_hmac(DigestAlgorithm::Sha256, &HmacKey::from("secreto"), "mensaje").unwrap();
        assert_eq!(
            tag.hex(),
            "56606836e48f69ac78477a77afe0321b1849a125021ba8f4217dd3f116a364c2"
        );
    }

    #[test]
    fn test_hmac_differs_from_prefixed_hash() {
        let key = HmacKey::from("key");
        let tag = compute_hmac(DigestAlgorithm::Sha256, &key, FOX).unwrap();

        let mut concatenated = b"key".to_vec();
        concatenated.extend_from_slice(FOX);
        assert_ne!(tag.hex(), compute_digest(DigestAlgorithm::Sha256, concatenated).hex());
    }

    #[test]
    fn test_empty_key_is_missing() {
        let err = compute_hmac(DigestAlgorithm::Sha256, &HmacKey::from(""), FOX).unwrap_err();
        assert!(matches!(err, DigestError::MissingKey));
        assert!(matches!(HmacKey::require(None), Err(DigestError::MissingKey)));
    }

    #[test]
    fn test_blake3_has_no_hmac() {
        let err = compute_hmac(DigestAlgorithm::Blake3, &HmacKey::from("key"), FOX).unwrap_err();
        assert!(matches!(err, DigestError::UnsupportedAlgorithm(_)));
        assert!(!DigestAlgorithm::Blake3.supports_hmac());
    }

    #[test]
    fn test_stream_matches_one_shot() {
        let key = HmacKey::from("key");
        let options = StreamOptions::default().chunk_size(5);
        let streamed = hmac_stream(DigestAlgorithm::Sha384, &key, FOX, &options, &mut NoProgress).unwrap();
        let one_shot = compute_hmac(DigestAlgorithm::Sha384, &key, FOX).unwrap();

        assert_eq!(streamed.hex(), one_shot.hex());
        assert_eq!(streamed.byte_count(), one_shot.byte_count());
    }

    #[test]
    fn test_stream_cancellation() {
        let key = HmacKey::from("key");
        let options = StreamOptions::default().chunk_size(8);
        let err = hmac_stream(
            DigestAlgorithm::Sha256,
            &key,
            FOX,
            &options,
            &mut |_: &ProgressEvent| Flow::Cancel,
        )
        .unwrap_err();

        assert!(matches!(err, DigestError::Cancelled { bytes_processed: 8 }));
    }

    #[test]
    fn test_key_debug_is_redacted() {
        assert_eq!(format!("{:?}", HmacKey::from("hunter2")), "HmacKey(<redacted>)");
    }
}

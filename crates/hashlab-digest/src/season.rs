//! Salt and pepper input transforms.
//!
//! Both transforms prefix the input with the material and a `$` separator:
//!
//! - `apply_salt(input, salt)` yields `salt$input`
//! - `apply_pepper(input, pepper)` yields `pepper$input`
//!
//! Applying both (salt first) yields `pepper$salt$input`. Learners can
//! reproduce any digest from that layout. No hashing happens here; the
//! prepared bytes go to the digest engine unchanged.

use std::fmt;
use std::io::{Cursor, Read};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{DigestError, Result};
use crate::{
    DigestAlgorithm, DigestRecord, DigestResult, Flow, ProgressEvent, ProgressObserver, StreamOptions,
    compute_digest, hash_stream,
};

/// Separator placed between the salt or pepper and the input.
pub const SEPARATOR: u8 = b'$';

/// Salt length used when none is specified.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Largest salt [`generate_salt`] will produce.
pub const MAX_SALT_LENGTH: usize = 1024;

/// Public per-record value. Store it next to the digest it produced.
///
/// Never empty: an empty salt would hash as `$input` yet export like no salt at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Salt(String);

impl Salt {
    /// Wrap a user-supplied salt. Any non-empty text is accepted.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DigestError::EmptySalt);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn as_bytes(&self) -> &[u8] { self.0.as_bytes() }

    /// Raw random bytes behind a generated (base64) salt.
    pub fn decode(&self) -> Result<Vec<u8>> { STANDARD.decode(&self.0).map_err(DigestError::InvalidSalt) }
}

impl TryFrom<String> for Salt {
    type Error = DigestError;

    fn try_from(value: String) -> Result<Self> { Self::new(value) }
}

impl From<Salt> for String {
    fn from(salt: Salt) -> Self { salt.0 }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Secret mixed into the input. Redacted in `Debug`, wiped on drop, never serialized.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Pepper(Vec<u8>);

impl Pepper {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self { Self(secret.into()) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub(crate) fn expose(&self) -> &[u8] { &self.0 }
}

impl fmt::Debug for Pepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Pepper(<redacted>)") }
}

impl From<&str> for Pepper {
    fn from(secret: &str) -> Self { Self::new(secret.as_bytes()) }
}

impl From<String> for Pepper {
    fn from(secret: String) -> Self { Self::new(secret.into_bytes()) }
}

/// Generate `length` random bytes from the OS CSPRNG, base64 encoded.
///
/// `length` must be within `1..=MAX_SALT_LENGTH`.
pub fn generate_salt(length: usize) -> Result<Salt> {
    if !(1..=MAX_SALT_LENGTH).contains(&length) {
        return Err(DigestError::InvalidSaltLength {
            length,
            max: MAX_SALT_LENGTH,
        });
    }

    let mut bytes = Zeroizing::new(vec![0u8; length]);
    OsRng.fill_bytes(&mut bytes);
    Ok(Salt(STANDARD.encode(bytes.as_slice())))
}

/// `salt$input`
pub fn apply_salt(input: &[u8], salt: &Salt) -> Vec<u8> { prefixed(salt.as_bytes(), input) }

/// `pepper$input`. The returned buffer contains the secret and is wiped on drop.
pub fn apply_pepper(input: &[u8], pepper: &Pepper) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(prefixed(pepper.expose(), input))
}

/// Fail with [`DigestError::MissingPepper`] unless a non-empty pepper was supplied.
pub fn require_pepper(pepper: Option<Pepper>) -> Result<Pepper> {
    pepper.filter(|p| !p.is_empty()).ok_or(DigestError::MissingPepper)
}

fn prefixed(prefix: &[u8], input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + 1 + input.len());
    out.extend_from_slice(prefix);
    out.push(SEPARATOR);
    out.extend_from_slice(input);
    out
}

/// Salt and pepper to apply before hashing.
///
/// # Examples
///
/// ```
/// use hashlab_digest::{DigestAlgorithm, Salt, Seasoning};
///
/// let seasoned = Seasoning::new()
///     .salt(Salt::new("c2FsdA==").unwrap())
///     .digest(DigestAlgorithm::Sha256, b"hola mundo")
///     .unwrap();
/// assert_eq!(seasoned.salt.unwrap().as_str(), "c2FsdA==");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Seasoning {
    salt: Option<Salt>,
    pepper: Option<Pepper>,
    pepper_required: bool,
}

impl Seasoning {
    pub fn new() -> Self { Self::default() }

    pub fn salt(mut self, salt: Salt) -> Self {
        self.salt = Some(salt);
        self
    }

    /// Pepper as resolved by the caller's secret store, possibly absent.
    pub fn pepper(mut self, pepper: Option<Pepper>) -> Self {
        self.pepper = pepper.filter(|p| !p.is_empty());
        self
    }

    /// Make an absent pepper an error instead of silently skipping it.
    pub fn require_pepper(mut self) -> Self {
        self.pepper_required = true;
        self
    }

    fn checked_pepper(&self) -> Result<Option<&Pepper>> {
        match (&self.pepper, self.pepper_required) {
            (None, true) => Err(DigestError::MissingPepper),
            (pepper, _) => Ok(pepper.as_ref()),
        }
    }

    /// Everything that goes in front of the input.
    fn prefix(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut prefix = Zeroizing::new(Vec::new());
        if let Some(pepper) = self.checked_pepper()? {
            prefix.extend_from_slice(pepper.expose());
            prefix.push(SEPARATOR);
        }
        if let Some(salt) = &self.salt {
            prefix.extend_from_slice(salt.as_bytes());
            prefix.push(SEPARATOR);
        }
        Ok(prefix)
    }

    /// The exact bytes that get hashed.
    pub fn prepare(&self, input: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let mut prepared = self.prefix()?;
        prepared.extend_from_slice(input);
        Ok(prepared)
    }

    /// Digest of the prepared input. The result counts only the caller's
    /// bytes, so a record never reveals how long the salt or pepper is.
    pub fn digest(&self, algorithm: DigestAlgorithm, input: &[u8]) -> Result<SeasonedDigest> {
        let prepared = self.prepare(input)?;
        debug!(
            %algorithm,
            salted = self.salt.is_some(),
            peppered = self.pepper.is_some(),
            "digesting seasoned input"
        );
        let result = compute_digest(algorithm, prepared.as_slice()).with_byte_count(input.len() as u64);
        Ok(self.seasoned(result))
    }

    /// Chunked variant of [`Seasoning::digest`] for large sources.
    ///
    /// Progress events and cancellation counts also exclude the prefix.
    pub fn hash_stream<R, O>(
        &self,
        algorithm: DigestAlgorithm,
        source: R,
        options: &StreamOptions,
        observer: &mut O,
    ) -> Result<SeasonedDigest>
    where
        R: Read,
        O: ProgressObserver + ?Sized,
    {
        let prefix = self.prefix()?;
        let prefix_len = prefix.len() as u64;

        let mut observer = SkipPrefix {
            inner: observer,
            prefix_len,
        };
        let source = Cursor::new(prefix.as_slice()).chain(source);
        let result = hash_stream(algorithm, source, options, &mut observer).map_err(|e| match e {
            DigestError::Cancelled { bytes_processed } => DigestError::Cancelled {
                bytes_processed: bytes_processed.saturating_sub(prefix_len),
            },
            other => other,
        })?;

        let byte_count = result.byte_count().saturating_sub(prefix_len);
        Ok(self.seasoned(result.with_byte_count(byte_count)))
    }

    fn seasoned(&self, result: DigestResult) -> SeasonedDigest {
        SeasonedDigest {
            result,
            salt: self.salt.clone(),
        }
    }
}

/// Reports progress over the caller's bytes only.
struct SkipPrefix<'a, O: ?Sized> {
    inner: &'a mut O,
    prefix_len: u64,
}

impl<O: ProgressObserver + ?Sized> ProgressObserver for SkipPrefix<'_, O> {
    fn on_progress(&mut self, event: &ProgressEvent) -> Flow {
        self.inner.on_progress(&ProgressEvent {
            bytes_processed: event.bytes_processed.saturating_sub(self.prefix_len),
            total_bytes:     event.total_bytes,
        })
    }
}

/// Digest of seasoned input, kept together with the salt that produced it.
#[derive(Debug, Clone)]
pub struct SeasonedDigest {
    pub result: DigestResult,
    pub salt: Option<Salt>,
}

impl SeasonedDigest {
    pub fn record(&self, input_label: impl Into<String>) -> DigestRecord {
        DigestRecord::new(input_label, &self.result, self.salt.as_ref())
    }
}

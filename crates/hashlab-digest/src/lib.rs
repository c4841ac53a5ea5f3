//! Digest, salt/pepper and HMAC primitives for hashing demonstrations.
//!
//! Computes digests over in-memory text or arbitrarily large readers, shows
//! how salts and peppers change the hashed input, and produces HMAC tags.
//! Secrets are always explicit arguments; nothing here reads configuration
//! or the environment.
//!
//! # Key Features
//!
//! - **Closed algorithm set**: SHA-1, SHA-2, BLAKE2 and BLAKE3 behind [`DigestAlgorithm`]
//! - **Incremental**: [`hash_stream`] reads in bounded chunks and reports progress
//! - **Cancellable**: a [`ProgressObserver`] can stop hashing; no partial digest is returned
//! - **Secret hygiene**: [`Pepper`] and [`HmacKey`] are redacted, wiped on drop and
//!   have no place in a [`DigestRecord`]
//!
//! # Example
//!
//! ```
//! use hashlab_digest::{DigestAlgorithm, TextEncoding, digest_text};
//!
//! let result = digest_text(DigestAlgorithm::Sha256, "hola mundo", TextEncoding::Utf8).unwrap();
//! assert_eq!(
//!     result.hex(),
//!     "0b894166d3336435c800bea36ff21b29eaa801a52f584c006c49289a0dcf6e2f"
//! );
//! ```

pub use self::algorithm::DigestAlgorithm;
pub use self::compare::{digests_equal, hex_digests_equal};
pub use self::compute::{compute_digest, compute_digest_chunks, digest_text};
pub use self::encoding::TextEncoding;
pub use self::error::{DigestError, Result};
pub use self::hasher::{DigestEngine, Hasher};
pub use self::mac::{HmacEngine, HmacKey, compute_hmac, hmac_stream};
pub use self::progress::{Flow, NoProgress, ProgressEvent, ProgressObserver};
pub use self::reader::{DEFAULT_CHUNK_SIZE, DigestReader, StreamOptions, hash_file, hash_stream};
pub use self::result::{DigestRecord, DigestResult};
pub use self::season::{
    DEFAULT_SALT_LENGTH, MAX_SALT_LENGTH, Pepper, SEPARATOR, Salt, SeasonedDigest, Seasoning, apply_pepper,
    apply_salt, generate_salt, require_pepper,
};

mod algorithm;
mod compare;
mod compute;
mod encoding;
mod error;
mod hasher;
mod mac;
mod progress;
mod reader;
mod result;
mod season;

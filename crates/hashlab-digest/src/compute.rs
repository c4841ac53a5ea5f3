//! One-shot digest helpers over in-memory input.

use tracing::debug;

use crate::error::Result;
use crate::{DigestAlgorithm, DigestEngine, DigestResult, Hasher, TextEncoding};

/// Digest a single buffer.
///
/// Unknown algorithm names are rejected when parsing a [`DigestAlgorithm`],
/// so this cannot fail.
pub fn compute_digest(algorithm: DigestAlgorithm, data: impl AsRef<[u8]>) -> DigestResult {
    let mut engine = DigestEngine::new(algorithm);
    engine.update(data.as_ref());
    engine.finish()
}

/// Digest a sequence of chunks in order.
pub fn compute_digest_chunks<I, C>(algorithm: DigestAlgorithm, chunks: I) -> DigestResult
where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let mut engine = DigestEngine::new(algorithm);
    for chunk in chunks {
        engine.update(chunk.as_ref());
    }
    engine.finish()
}

/// Encode `text` with `encoding` and digest the resulting bytes.
pub fn digest_text(
    algorithm: DigestAlgorithm,
    text: &str,
    encoding: TextEncoding,
) -> Result<DigestResult> {
    let bytes = encoding.encode(text)?;
    debug!(%algorithm, %encoding, bytes = bytes.len(), "digesting text");
    Ok(compute_digest(algorithm, bytes))
}

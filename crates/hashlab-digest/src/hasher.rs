use blake2::{Blake2b512, Blake2s256};
use digest::Digest;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::{DigestAlgorithm, DigestResult};

/// Incremental hash state.
///
/// Implemented by the plain [`DigestEngine`] and by [`HmacEngine`](crate::HmacEngine),
/// so chunked readers can drive either one.
pub trait Hasher: Send {
    fn algorithm(&self) -> DigestAlgorithm;
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

enum EngineState {
    Sha1(Sha1),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Blake2b(Blake2b512),
    Blake2s(Blake2s256),
    Blake3(Box<blake3::Hasher>),
}

/// Running digest for one algorithm.
///
/// Every call owns its engine; nothing is shared between computations.
pub struct DigestEngine {
    algorithm: DigestAlgorithm,
    state: EngineState,
    bytes_processed: u64,
}

impl DigestEngine {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        let state = match algorithm {
            DigestAlgorithm::Sha1 => EngineState::Sha1(Sha1::new()),
            DigestAlgorithm::Sha256 => EngineState::Sha256(Sha256::new()),
            DigestAlgorithm::Sha384 => EngineState::Sha384(Sha384::new()),
            DigestAlgorithm::Sha512 => EngineState::Sha512(Sha512::new()),
            DigestAlgorithm::Blake2b => EngineState::Blake2b(Blake2b512::new()),
            DigestAlgorithm::Blake2s => EngineState::Blake2s(Blake2s256::new()),
            DigestAlgorithm::Blake3 => EngineState::Blake3(Box::new(blake3::Hasher::new())),
        };

        Self {
            algorithm,
            state,
            bytes_processed: 0,
        }
    }

    pub fn bytes_processed(&self) -> u64 { self.bytes_processed }

    /// Finalize into a [`DigestResult`] carrying the byte count.
    pub fn finish(self) -> DigestResult {
        let algorithm = self.algorithm;
        let bytes_processed = self.bytes_processed;
        DigestResult::new(algorithm, Hasher::finalize(self), bytes_processed)
    }
}

impl Hasher for DigestEngine {
    fn algorithm(&self) -> DigestAlgorithm { self.algorithm }

    fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            EngineState::Sha1(h) => Digest::update(h, data),
            EngineState::Sha256(h) => Digest::update(h, data),
            EngineState::Sha384(h) => Digest::update(h, data),
            EngineState::Sha512(h) => Digest::update(h, data),
            EngineState::Blake2b(h) => Digest::update(h, data),
            EngineState::Blake2s(h) => Digest::update(h, data),
            EngineState::Blake3(h) => {
                h.update(data);
            }
        }
        self.bytes_processed += data.len() as u64;
    }

    fn finalize(self) -> Vec<u8> {
        match self.state {
            EngineState::Sha1(h) => h.finalize().to_vec(),
            EngineState::Sha256(h) => h.finalize().to_vec(),
            EngineState::Sha384(h) => h.finalize().to_vec(),
            EngineState::Sha512(h) => h.finalize().to_vec(),
            EngineState::Blake2b(h) => h.finalize().to_vec(),
            EngineState::Blake2s(h) => h.finalize().to_vec(),
            EngineState::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_engine() {
        let mut engine = DigestEngine::new(DigestAlgorithm::Sha256);
        engine.update(b"hello world");
        let result = engine.finish();

        let expected =
            hex::decode("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9")
                .unwrap();
        assert_eq!(result.as_bytes(), expected.as_slice());
        assert_eq!(result.byte_count(), 11);
    }

    #[test]
    fn test_split_updates_match_single_update() {
        for algorithm in DigestAlgorithm::ALL {
            let mut whole = DigestEngine::new(algorithm);
            whole.update(b"hola mundo");

            let mut split = DigestEngine::new(algorithm);
            split.update(b"hola");
            split.update(b"");
            split.update(b" mundo");

            assert_eq!(whole.finish().hex(), split.finish().hex(), "{algorithm}");
        }
    }

    #[test]
    fn test_output_lengths_match_algorithm() {
        for algorithm in DigestAlgorithm::ALL {
            let result = DigestEngine::new(algorithm).finish();
            assert_eq!(result.as_bytes().len(), algorithm.digest_length(), "{algorithm}");
        }
    }

    #[test]
    fn test_blake3_empty() {
        let result = DigestEngine::new(DigestAlgorithm::Blake3).finish();
        assert_eq!(
            result.hex(),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }
}

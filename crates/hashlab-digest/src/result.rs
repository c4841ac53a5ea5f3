use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DigestError, Result};
use crate::{DigestAlgorithm, Salt};

/// Output of one completed hash or HMAC computation.
#[derive(Debug, Clone)]
pub struct DigestResult {
    algorithm: DigestAlgorithm,
    digest: Vec<u8>,
    byte_count: u64,
}

impl DigestResult {
    pub(crate) fn new(algorithm: DigestAlgorithm, digest: Vec<u8>, byte_count: u64) -> Self {
        Self {
            algorithm,
            digest,
            byte_count,
        }
    }

    /// Same digest, reporting `byte_count` instead of what the engine counted.
    pub(crate) fn with_byte_count(mut self, byte_count: u64) -> Self {
        self.byte_count = byte_count;
        self
    }

    /// Rebuild a result from a published hex digest, e.g. to check a download
    /// against its advertised checksum.
    ///
    /// No input was processed, so the byte count is zero.
    pub fn from_hex(algorithm: DigestAlgorithm, hex_digest: &str) -> Result<Self> {
        let hex_digest = hex_digest.trim();
        if hex_digest.len() != algorithm.hex_length() {
            return Err(DigestError::InvalidDigest {
                algorithm: algorithm.as_str(),
                reason:    format!(
                    "expected {} hex characters, got {}",
                    algorithm.hex_length(),
                    hex_digest.len()
                ),
            });
        }

        let digest = hex::decode(hex_digest).map_err(|e| DigestError::InvalidDigest {
            algorithm: algorithm.as_str(),
            reason:    e.to_string(),
        })?;

        Ok(Self::new(algorithm, digest, 0))
    }

    pub fn algorithm(&self) -> DigestAlgorithm { self.algorithm }

    pub fn as_bytes(&self) -> &[u8] { &self.digest }

    /// Number of input bytes fed into the hash.
    pub fn byte_count(&self) -> u64 { self.byte_count }

    /// Lowercase hexadecimal digest.
    pub fn hex(&self) -> String { hex::encode(&self.digest) }
}

impl fmt::Display for DigestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex())
    }
}

/// Flat export row for a computed digest.
///
/// Holds the salt when one was used. Secrets have no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestRecord {
    pub input_label: String,
    pub algorithm: DigestAlgorithm,
    pub salt: Option<String>,
    pub digest_hex: String,
    pub byte_count: u64,
}

impl DigestRecord {
    pub fn new(input_label: impl Into<String>, result: &DigestResult, salt: Option<&Salt>) -> Self {
        Self {
            input_label: input_label.into(),
            algorithm:   result.algorithm(),
            salt:        salt.map(|s| s.as_str().to_string()),
            digest_hex:  result.hex(),
            byte_count:  result.byte_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_digest;

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        let err = DigestResult::from_hex(DigestAlgorithm::Sha256, "abcd").unwrap_err();
        assert!(matches!(err, DigestError::InvalidDigest { algorithm: "sha256", .. }));
        assert_eq!(err.to_string(), "invalid sha256 digest: expected 64 hex characters, got 4");
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        let bogus = "zz".repeat(32);
        assert!(DigestResult::from_hex(DigestAlgorithm::Sha256, &bogus).is_err());
    }

    #[test]
    fn test_from_hex_accepts_uppercase() {
        let result = DigestResult::from_hex(
            DigestAlgorithm::Sha256,
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855\n",
        )
        .unwrap();
        assert_eq!(result.hex(), compute_digest(DigestAlgorithm::Sha256, b"").hex());
        assert_eq!(result.byte_count(), 0);
    }

    #[test]
    fn test_display_prefixes_algorithm() {
        let result = compute_digest(DigestAlgorithm::Sha1, b"hola mundo");
        assert_eq!(result.to_string(), "sha1:459567d3bde4418b7fe302ff9809c4b0befaf7dd");
    }

    #[test]
    fn test_record_without_salt() {
        let result = compute_digest(DigestAlgorithm::Sha256, b"hola mundo");
        let record = DigestRecord::new("greeting", &result, None);

        assert_eq!(record.input_label, "greeting");
        assert_eq!(record.salt, None);
        assert_eq!(record.byte_count, 10);
        assert_eq!(record.digest_hex, result.hex());
    }
}

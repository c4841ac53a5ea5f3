//! Supported digest algorithms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DigestError;

/// Hash function selected for a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    /// SHA-1. Broken for collision resistance, kept for comparison only.
    Sha1,
    /// SHA-256
    #[default]
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// BLAKE2b with a 512-bit output.
    Blake2b,
    /// BLAKE2s with a 256-bit output.
    Blake2s,
    /// BLAKE3 with the default 256-bit output.
    Blake3,
}

impl DigestAlgorithm {
    /// Every supported algorithm, default first.
    pub const ALL: [DigestAlgorithm; 7] = [
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Blake2b,
        DigestAlgorithm::Blake2s,
        DigestAlgorithm::Blake3,
    ];

    /// Canonical lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
            DigestAlgorithm::Blake2b => "blake2b",
            DigestAlgorithm::Blake2s => "blake2s",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes.
    pub fn digest_length(&self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
            DigestAlgorithm::Blake2b => 64,
            DigestAlgorithm::Blake2s => 32,
            DigestAlgorithm::Blake3 => 32,
        }
    }

    /// Length of the lowercase hex rendering.
    pub fn hex_length(&self) -> usize { self.digest_length() * 2 }

    /// Whether finding two inputs with the same digest is still considered infeasible.
    pub fn is_collision_resistant(&self) -> bool { !matches!(self, DigestAlgorithm::Sha1) }

    /// Whether [`compute_hmac`](crate::compute_hmac) accepts this algorithm.
    pub fn supports_hmac(&self) -> bool { !matches!(self, DigestAlgorithm::Blake3) }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DigestAlgorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "sha1" => Ok(DigestAlgorithm::Sha1),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha384" => Ok(DigestAlgorithm::Sha384),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            "blake2b" | "blake2b512" => Ok(DigestAlgorithm::Blake2b),
            "blake2s" | "blake2s256" => Ok(DigestAlgorithm::Blake2s),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            _ => Err(DigestError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl Serialize for DigestAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DigestAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

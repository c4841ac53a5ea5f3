use subtle::ConstantTimeEq;

use crate::DigestResult;

/// Constant-time equality of two digests.
///
/// Equal only when both the algorithm and every digest byte match. Byte
/// counts are ignored, so a parsed published digest compares equal to a
/// freshly computed one.
pub fn digests_equal(a: &DigestResult, b: &DigestResult) -> bool {
    if a.algorithm() != b.algorithm() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Constant-time equality of two pasted hex digests, ignoring surrounding
/// whitespace and letter case.
pub fn hex_digests_equal(a: &str, b: &str) -> bool {
    let a = a.trim().to_ascii_lowercase();
    let b = b.trim().to_ascii_lowercase();
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DigestAlgorithm, HmacKey, compute_digest, compute_hmac};

    #[test]
    fn test_reflexive_and_symmetric() {
        let a = compute_digest(DigestAlgorithm::Sha256, b"a");
        let b = compute_digest(DigestAlgorithm::Sha256, b"b");

        assert!(digests_equal(&a, &a));
        assert_eq!(digests_equal(&a, &b), digests_equal(&b, &a));
        assert!(!digests_equal(&a, &b));
    }

    #[test]
    fn test_algorithm_must_match() {
        // BLAKE2s and BLAKE3 both produce 32 bytes; force equal bytes through from_hex.
        let hex = compute_digest(DigestAlgorithm::Blake2s, b"x").hex();
        let as_blake2s = DigestResult::from_hex(DigestAlgorithm::Blake2s, &hex).unwrap();
        let as_blake3 = DigestResult::from_hex(DigestAlgorithm::Blake3, &hex).unwrap();

        assert!(!digests_equal(&as_blake2s, &as_blake3));
    }

    #[test]
    fn test_parsed_tag_matches_computed_tag() {
        let computed = compute_hmac(DigestAlgorithm::Sha256, &HmacKey::from("key"), b"msg").unwrap();
        let parsed = DigestResult::from_hex(DigestAlgorithm::Sha256, &computed.hex()).unwrap();

        assert!(digests_equal(&computed, &parsed));
    }

    #[test]
    fn test_hex_normalization() {
        assert!(hex_digests_equal("  ABCDEF\n", "abcdef"));
        assert!(!hex_digests_equal("abcdef", "abcdee"));
        assert!(!hex_digests_equal("abcdef", "abcdef00"));
    }
}

use std::fmt;

/// BLAKE3 digest of a canonical serialization.
///
/// Diffing and merging are deterministic, so two peers that compute the same
/// merge from the same inputs obtain the same digest. Comparing digests is a
/// cheap convergence check; it is not an integrity mechanism.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Hash raw bytes.
    pub fn of(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 hex characters.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.short_hex())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_same_digest() {
        assert_eq!(ContentDigest::of(b"merge"), ContentDigest::of(b"merge"));
        assert_ne!(ContentDigest::of(b"merge"), ContentDigest::of(b"diff"));
    }

    #[test]
    fn display_is_full_blake3_hex() {
        let digest = ContentDigest::of(b"head");
        assert_eq!(digest.to_string(), blake3::hash(b"head").to_hex().as_str());
        assert_eq!(digest.to_hex().len(), 64);
    }

    #[test]
    fn short_hex_prefixes_full_hex() {
        let digest = ContentDigest::of(b"x");
        assert_eq!(digest.short_hex().len(), 8);
        assert!(digest.to_hex().starts_with(&digest.short_hex()));
    }
}

//! Artifact content fingerprinting
//!
//! A 32-byte Blake3 digest over an artifact's wire encoding. Used for log
//! lines and version bookkeeping; history matching uses field equality,
//! not fingerprints.

use std::fmt::{self, Display, Formatter};

use crate::artifact::UiArtifact;

/// A 32-byte Blake3 content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFingerprint([u8; 32]);

impl ContentFingerprint {
    /// Wrap raw digest bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Digest arbitrary bytes.
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self::new(*blake3::hash(data).as_bytes())
    }

    /// Digest an artifact's wire encoding.
    #[must_use]
    pub fn of(artifact: &UiArtifact) -> Self {
        let encoded = serde_json::to_vec(artifact).unwrap_or_default();
        Self::compute(&encoded)
    }

    /// Reference to the raw digest bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short form for log lines (first 16 hex chars).
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Width in bytes of a [`ContentId`].
pub const CONTENT_ID_LEN: usize = 20;

/// Fixed-width identifier for a commit or any other stored object.
///
/// Equality is byte-for-byte. A `ContentId` is never partially valid: the
/// only way to build one from untrusted input is [`ContentId::from_hex`],
/// which rejects anything that is not exactly [`CONTENT_ID_LEN`] bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId([u8; CONTENT_ID_LEN]);

impl ContentId {
    /// Compute a `ContentId` from raw content.
    ///
    /// Uses the BLAKE3 extendable output truncated to [`CONTENT_ID_LEN`]
    /// bytes, so identical content always yields the same id.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(data);
        let mut out = [0u8; CONTENT_ID_LEN];
        hasher.finalize_xof().fill(&mut out);
        Self(out)
    }

    /// Create a `ContentId` from a pre-computed hash.
    pub fn from_hash(hash: [u8; CONTENT_ID_LEN]) -> Self {
        Self(hash)
    }

    /// The null id (all zeros). Represents "no object".
    pub const fn null() -> Self {
        Self([0u8; CONTENT_ID_LEN])
    }

    /// Returns `true` if this is the null id.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; CONTENT_ID_LEN]
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; CONTENT_ID_LEN] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Abbreviated hex representation (first 7 characters).
    pub fn short_hex(&self) -> String {
        let mut s = self.to_hex();
        s.truncate(7);
        s
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != CONTENT_ID_LEN {
            return Err(TypeError::InvalidLength {
                expected: CONTENT_ID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; CONTENT_ID_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.short_hex())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for ContentId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; CONTENT_ID_LEN]> for ContentId {
    fn from(bytes: [u8; CONTENT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<ContentId> for [u8; CONTENT_ID_LEN] {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

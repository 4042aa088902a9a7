//! Opaque identifiers used throughout the engine.
//!
//! Three identifier families exist:
//! - [`SourceId`]: keys the external yield source whose accrual is liquidated
//! - [`Address`]: account identity (owner, manager, recipient, caller)
//! - [`AssetId`]: token identity (payment asset, awarded "ticket" asset)
//!
//! All serialize as hex strings for readable snapshots and event exports.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::utils::constants::{ADDRESS_LENGTH, ASSET_ID_LENGTH, SOURCE_ID_LENGTH};

// ═══════════════════════════════════════════════════════════════════════════════
// HEX SERDE HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

mod hex_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != N {
            return Err(serde::de::Error::custom(format!(
                "expected {} bytes, got {}",
                N,
                bytes.len()
            )));
        }
        let mut arr = [0u8; N];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE ID
// ═══════════════════════════════════════════════════════════════════════════════

/// Opaque key identifying the external yield source whose liquidation
/// config/state is referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceId(#[serde(with = "hex_serde")] [u8; SOURCE_ID_LENGTH]);

impl SourceId {
    /// The all-zero identifier
    pub const ZERO: Self = Self([0u8; SOURCE_ID_LENGTH]);

    /// Create from raw bytes
    pub const fn new(bytes: [u8; SOURCE_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derive a stable identifier from a label
    pub fn derive(label: &[u8]) -> Self {
        let digest = Sha256::digest(label);
        let mut bytes = [0u8; SOURCE_ID_LENGTH];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SOURCE_ID_LENGTH] {
        &self.0
    }

    /// Short hex form for logging (first 8 hex chars)
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// Account identity for owner, manager, recipients and swap callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex_serde")] [u8; ADDRESS_LENGTH]);

impl Address {
    /// The null address
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// Create from raw bytes
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derive a stable address from a label (test/demo convenience)
    pub fn derive(label: &[u8]) -> Self {
        let digest = Sha256::digest(label);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[..ADDRESS_LENGTH]);
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Whether this is the null address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ASSET ID
// ═══════════════════════════════════════════════════════════════════════════════

/// Token identity for the payment asset and the awarded asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(#[serde(with = "hex_serde")] [u8; ASSET_ID_LENGTH]);

impl AssetId {
    /// The null asset identity
    pub const ZERO: Self = Self([0u8; ASSET_ID_LENGTH]);

    /// Create from raw bytes
    pub const fn new(bytes: [u8; ASSET_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derive a stable asset identity from a label (test/demo convenience)
    pub fn derive(label: &[u8]) -> Self {
        let digest = Sha256::digest(label);
        let mut bytes = [0u8; ASSET_ID_LENGTH];
        bytes.copy_from_slice(&digest[..ASSET_ID_LENGTH]);
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; ASSET_ID_LENGTH] {
        &self.0
    }

    /// Whether this is the null asset identity
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ASSET_ID_LENGTH]
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

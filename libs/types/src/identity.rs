//! Identity types for vault participants
//!
//! Two key families appear in the system: 32-byte edwards-curve public keys
//! (the chain-native identity used for the authority, depositors, recipients,
//! and holding-account owners) and 20-byte Ethereum-style addresses derived
//! from secp256k1 public keys (external co-signers). All identities are
//! compared byte-for-byte and rendered as lowercase hex.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

/// Chain-native identity: a 32-byte edwards-curve public key.
///
/// Doubles as the verifying key for the edwards-direct signature scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

impl Address {
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| ParseError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

/// External co-signer identity: a 20-byte Ethereum-style address.
///
/// Derived from a secp256k1 public key as the trailing 20 bytes of the
/// Keccak-256 hash of the uncompressed point (tag byte stripped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EthAddress([u8; 20]);

impl EthAddress {
    pub const LEN: usize = 20;

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let arr: [u8; 20] = bytes.try_into().map_err(|_| ParseError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        // Accept the conventional 0x prefix.
        let s = s.strip_prefix("0x").unwrap_or(s);
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl FromStr for EthAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for EthAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EthAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

/// A signer identity as stored in the vault's signer set and as claimed by
/// authorization proofs. The variant selects the signature scheme used to
/// verify proofs from this signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignerId {
    /// Edwards-direct scheme: the identity is the verifying key itself.
    Ed25519(Address),
    /// Ec-recoverable scheme: the identity is the derived Ethereum address.
    Secp256k1(EthAddress),
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerId::Ed25519(addr) => write!(f, "ed25519:{}", addr),
            SignerId::Secp256k1(addr) => write!(f, "secp256k1:{}", addr),
        }
    }
}

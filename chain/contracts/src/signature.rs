//! Dual-scheme signature verification
//!
//! Two signer key families are supported: secp256k1 with recoverable
//! signatures matched against a derived Ethereum-style address, and ed25519
//! verified directly against the public key. Verification is always
//! recomputed from the raw signature, key, and digest bytes; no
//! caller-asserted "verified" flag is ever trusted.

use ed25519_dalek::{Signature as Ed25519Signature, Verifier, VerifyingKey as Ed25519VerifyingKey};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey as EcdsaVerifyingKey};
use sha3::{Digest, Keccak256};
use types::identity::{Address, EthAddress, SignerId};

use crate::errors::SignatureError;

/// Ed25519 signature length: `r ‖ s`.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Recoverable secp256k1 signature length: `r ‖ s ‖ v`.
pub const SECP256K1_SIGNATURE_LEN: usize = 65;

/// The two interchangeable signature schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    /// Edwards-direct: verified against the public key, no recovery step.
    /// Consumes the asset-binding payload encoding.
    Ed25519,
    /// Ec-recoverable: signed over a Keccak-256 prehash, recovered and
    /// matched against a compact address. Consumes the base encoding.
    Secp256k1Recoverable,
}

impl SignatureScheme {
    /// The scheme implied by a signer identity's key type.
    pub fn of(signer: &SignerId) -> Self {
        match signer {
            SignerId::Ed25519(_) => SignatureScheme::Ed25519,
            SignerId::Secp256k1(_) => SignatureScheme::Secp256k1Recoverable,
        }
    }

    /// Expected raw signature length for this scheme.
    pub fn signature_len(&self) -> usize {
        match self {
            SignatureScheme::Ed25519 => ED25519_SIGNATURE_LEN,
            SignatureScheme::Secp256k1Recoverable => SECP256K1_SIGNATURE_LEN,
        }
    }
}

/// Keccak-256 hash of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Ethereum-style address of a secp256k1 verifying key: the trailing 20
/// bytes of the Keccak-256 hash of the uncompressed point (tag stripped).
pub fn eth_address(key: &EcdsaVerifyingKey) -> EthAddress {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    EthAddress::new(addr)
}

/// Verify `signature` over `digest` against the claimed signer identity.
///
/// The digest is the canonical payload encoding selected by the caller for
/// the signer's scheme: raw for ed25519, prehashed with Keccak-256 here for
/// secp256k1.
pub fn verify(digest: &[u8], signature: &[u8], signer: &SignerId) -> Result<(), SignatureError> {
    match signer {
        SignerId::Ed25519(key) => verify_ed25519(digest, signature, key),
        SignerId::Secp256k1(addr) => verify_secp256k1(digest, signature, addr),
    }
}

fn verify_ed25519(
    digest: &[u8],
    signature: &[u8],
    key: &Address,
) -> Result<(), SignatureError> {
    let sig_bytes: [u8; ED25519_SIGNATURE_LEN] =
        signature
            .try_into()
            .map_err(|_| SignatureError::MalformedSignature {
                expected: ED25519_SIGNATURE_LEN,
                actual: signature.len(),
            })?;

    let verifying_key = Ed25519VerifyingKey::from_bytes(key.as_bytes())
        .map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature = Ed25519Signature::from_bytes(&sig_bytes);

    verifying_key
        .verify(digest, &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}

fn verify_secp256k1(
    digest: &[u8],
    signature: &[u8],
    expected: &EthAddress,
) -> Result<(), SignatureError> {
    if signature.len() != SECP256K1_SIGNATURE_LEN {
        return Err(SignatureError::MalformedSignature {
            expected: SECP256K1_SIGNATURE_LEN,
            actual: signature.len(),
        });
    }

    // Accept both the raw 0/1 recovery id and the 27/28 transaction form.
    let (rs, v_byte) = signature.split_at(SECP256K1_SIGNATURE_LEN - 1);
    let mut v = v_byte[0];
    if v >= 27 {
        v -= 27;
    }

    let mut sig =
        EcdsaSignature::from_slice(rs).map_err(|_| SignatureError::VerificationFailed)?;
    if let Some(normalized) = sig.normalize_s() {
        // Normalizing s flips the recovered point's parity.
        sig = normalized;
        v ^= 1;
    }
    let recovery_id = RecoveryId::from_byte(v).ok_or(SignatureError::InvalidRecoveryId(v))?;

    let prehash = keccak256(digest);
    let recovered = EcdsaVerifyingKey::recover_from_prehash(&prehash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    if eth_address(&recovered) != *expected {
        return Err(SignatureError::VerificationFailed);
    }
    Ok(())
}

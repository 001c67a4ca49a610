//! Authorization gate — "is this action authorized right now"
//!
//! Combines expiry checking, canonical digest computation, signature
//! verification, and signer-set membership, short-circuiting on the first
//! failure. A successful pass yields a one-shot [`Authorization`] token
//! bound to the request; the gate itself mutates nothing.
//!
//! Bad signatures and unrecognized signers are deliberately conflated into
//! one externally visible `InvalidSignature`, so a probing caller cannot
//! distinguish the two.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use types::identity::SignerId;

use crate::actions::ActionRequest;
use crate::errors::VaultError;
use crate::signature::{self, SignatureScheme};
use crate::vault::RewardVault;

/// An out-of-band-produced signature plus the signer it is claimed to
/// belong to. The claimed identity selects the verification scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationProof {
    pub signer: SignerId,
    pub signature: Vec<u8>,
}

impl AuthorizationProof {
    pub fn new(signer: SignerId, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            signer,
            signature: signature.into(),
        }
    }
}

/// Proof that the gate accepted a specific request.
///
/// Not clonable and consumed by value: each token authorizes exactly one
/// transition. The token is bound to the asset-binding encoding of the
/// request it was issued for; presenting it with any other request fails.
#[derive(Debug)]
#[must_use = "an authorization must be consumed by the transition it was issued for"]
pub struct Authorization {
    binding: [u8; 32],
}

impl Authorization {
    pub(crate) fn bind(payload: &[u8]) -> Self {
        Self {
            binding: Sha256::digest(payload).into(),
        }
    }

    pub(crate) fn covers(&self, payload: &[u8]) -> bool {
        let digest: [u8; 32] = Sha256::digest(payload).into();
        self.binding == digest
    }
}

impl RewardVault {
    /// Authenticate a funds-movement request.
    ///
    /// Checks, in order: signature expiry, cryptographic verification of the
    /// proof over the request's canonical digest, and membership of the
    /// claimed signer in the authorized set (the authority counts as an
    /// implicit member).
    pub fn authorize(
        &self,
        request: &ActionRequest,
        proof: &AuthorizationProof,
        now: i64,
    ) -> Result<Authorization, VaultError> {
        let state = self.state()?;

        if request.expiration_time() < now {
            warn!(
                kind = ?request.kind(),
                expiration_time = request.expiration_time(),
                now,
                "authorization expired"
            );
            return Err(VaultError::ExpiredSignature);
        }

        let scheme = SignatureScheme::of(&proof.signer);
        let digest = request.signing_digest(scheme);
        if let Err(err) = signature::verify(&digest, &proof.signature, &proof.signer) {
            warn!(signer = %proof.signer, %err, "signature verification failed");
            return Err(VaultError::InvalidSignature);
        }

        if !state.is_authorized_signer(&proof.signer) {
            warn!(signer = %proof.signer, "signer not in authorized set");
            return Err(VaultError::InvalidSignature);
        }

        debug!(kind = ?request.kind(), signer = %proof.signer, "action authorized");
        Ok(Authorization::bind(&request.binding_bytes()))
    }
}

//! Funds-movement transitions — deposit, withdraw, claim
//!
//! Each transition is atomic: authorization gate, ledger transfer, event
//! emission, or no effect at all. Deposits pull funds from the depositor
//! (the funding party consents through the hosting environment, exactly as
//! governance callers do); withdrawals and claims pay out of the vault's
//! holding account on the strength of a co-signer's attestation — the
//! recipient never signs. Withdraw and claim are functionally identical and
//! differ only in the semantic id field and the emitted event name.

use serde::{Deserialize, Serialize};
use tracing::debug;
use types::asset::AssetId;
use types::identity::Address;
use types::ids::{ClaimId, DepositId, ProjectId, WithdrawalId};

use crate::authorize::{Authorization, AuthorizationProof};
use crate::errors::VaultError;
use crate::events::{TokenClaimed, TokenDeposited, TokenWithdrawed, VaultEvent};
use crate::ledger::TokenTransfer;
use crate::payload::{TypedPayload, ASSET_PAYLOAD_LEN};
use crate::signature::SignatureScheme;
use crate::vault::RewardVault;

/// The three funds-movement transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Deposit,
    Withdraw,
    Claim,
}

/// A transient funds-movement request. Not persisted; every invocation
/// carries a fresh request plus its authorization proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionRequest {
    Deposit {
        project_id: ProjectId,
        deposit_id: DepositId,
        token: AssetId,
        amount: u64,
        expiration_time: i64,
        depositor: Address,
    },
    Withdraw {
        project_id: ProjectId,
        withdrawal_id: WithdrawalId,
        token: AssetId,
        amount: u64,
        expiration_time: i64,
        recipient: Address,
    },
    Claim {
        project_id: ProjectId,
        claim_id: ClaimId,
        token: AssetId,
        amount: u64,
        expiration_time: i64,
        recipient: Address,
    },
}

impl ActionRequest {
    pub fn deposit(
        project_id: ProjectId,
        deposit_id: DepositId,
        token: AssetId,
        amount: u64,
        expiration_time: i64,
        depositor: Address,
    ) -> Self {
        Self::Deposit {
            project_id,
            deposit_id,
            token,
            amount,
            expiration_time,
            depositor,
        }
    }

    pub fn withdraw(
        project_id: ProjectId,
        withdrawal_id: WithdrawalId,
        token: AssetId,
        amount: u64,
        expiration_time: i64,
        recipient: Address,
    ) -> Self {
        Self::Withdraw {
            project_id,
            withdrawal_id,
            token,
            amount,
            expiration_time,
            recipient,
        }
    }

    pub fn claim(
        project_id: ProjectId,
        claim_id: ClaimId,
        token: AssetId,
        amount: u64,
        expiration_time: i64,
        recipient: Address,
    ) -> Self {
        Self::Claim {
            project_id,
            claim_id,
            token,
            amount,
            expiration_time,
            recipient,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Deposit { .. } => ActionKind::Deposit,
            Self::Withdraw { .. } => ActionKind::Withdraw,
            Self::Claim { .. } => ActionKind::Claim,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        match self {
            Self::Deposit { project_id, .. }
            | Self::Withdraw { project_id, .. }
            | Self::Claim { project_id, .. } => *project_id,
        }
    }

    /// Raw wire value of the action-scoped id.
    pub fn action_id(&self) -> u64 {
        match self {
            Self::Deposit { deposit_id, .. } => deposit_id.value(),
            Self::Withdraw { withdrawal_id, .. } => withdrawal_id.value(),
            Self::Claim { claim_id, .. } => claim_id.value(),
        }
    }

    pub fn token(&self) -> &AssetId {
        match self {
            Self::Deposit { token, .. }
            | Self::Withdraw { token, .. }
            | Self::Claim { token, .. } => token,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            Self::Deposit { amount, .. }
            | Self::Withdraw { amount, .. }
            | Self::Claim { amount, .. } => *amount,
        }
    }

    pub fn expiration_time(&self) -> i64 {
        match self {
            Self::Deposit {
                expiration_time, ..
            }
            | Self::Withdraw {
                expiration_time, ..
            }
            | Self::Claim {
                expiration_time, ..
            } => *expiration_time,
        }
    }

    /// The depositor for a deposit, the recipient otherwise.
    pub fn counterparty(&self) -> &Address {
        match self {
            Self::Deposit { depositor, .. } => depositor,
            Self::Withdraw { recipient, .. } | Self::Claim { recipient, .. } => recipient,
        }
    }

    pub(crate) fn payload(&self) -> TypedPayload {
        TypedPayload::new(
            self.project_id(),
            self.action_id(),
            self.amount(),
            self.expiration_time(),
        )
    }

    /// The canonical bytes a co-signer signs for this request under the
    /// given scheme: the base encoding for the ec-recoverable scheme (the
    /// verifier prehashes with Keccak-256), the asset-binding encoding for
    /// the edwards-direct scheme.
    pub fn signing_digest(&self, scheme: SignatureScheme) -> Vec<u8> {
        match scheme {
            SignatureScheme::Secp256k1Recoverable => self.payload().encode().to_vec(),
            SignatureScheme::Ed25519 => self.payload().encode_with_asset(self.token()).to_vec(),
        }
    }

    pub(crate) fn binding_bytes(&self) -> [u8; ASSET_PAYLOAD_LEN] {
        self.payload().encode_with_asset(self.token())
    }
}

impl RewardVault {
    /// Apply an authorized transition. The token must have been issued by
    /// [`RewardVault::authorize`] for this exact request.
    pub fn execute<L: TokenTransfer>(
        &mut self,
        ledger: &mut L,
        request: &ActionRequest,
        auth: Authorization,
    ) -> Result<VaultEvent, VaultError> {
        self.state()?;

        if !auth.covers(&request.binding_bytes()) {
            return Err(VaultError::InvalidSignature);
        }

        if let Some(guard) = self.replay_guard() {
            if guard.is_consumed(request.kind(), request.project_id(), request.action_id()) {
                return Err(VaultError::ActionIdConsumed {
                    project_id: request.project_id().value(),
                    action_id: request.action_id(),
                });
            }
        }

        let vault_address = *self.address();
        let event = match request {
            ActionRequest::Deposit {
                project_id,
                deposit_id,
                token,
                amount,
                depositor,
                ..
            } => {
                ledger.transfer(depositor, &vault_address, token, *amount)?;
                self.record_project_deposit(*project_id, token, *amount);
                debug!(
                    project_id = %project_id,
                    deposit_id = %deposit_id,
                    token = %token,
                    amount,
                    "deposit applied"
                );
                VaultEvent::TokenDeposited(TokenDeposited {
                    project_id: *project_id,
                    deposit_id: *deposit_id,
                    token: *token,
                    amount: *amount,
                })
            }
            ActionRequest::Withdraw {
                project_id,
                withdrawal_id,
                token,
                amount,
                recipient,
                ..
            } => {
                ledger.transfer(&vault_address, recipient, token, *amount)?;
                debug!(
                    project_id = %project_id,
                    withdrawal_id = %withdrawal_id,
                    token = %token,
                    amount,
                    "withdrawal applied"
                );
                VaultEvent::TokenWithdrawed(TokenWithdrawed {
                    project_id: *project_id,
                    withdrawal_id: *withdrawal_id,
                    amount: *amount,
                    token: *token,
                    recipient: *recipient,
                })
            }
            ActionRequest::Claim {
                project_id,
                claim_id,
                token,
                amount,
                recipient,
                ..
            } => {
                ledger.transfer(&vault_address, recipient, token, *amount)?;
                debug!(
                    project_id = %project_id,
                    claim_id = %claim_id,
                    token = %token,
                    amount,
                    "claim applied"
                );
                VaultEvent::TokenClaimed(TokenClaimed {
                    project_id: *project_id,
                    claim_id: *claim_id,
                    amount: *amount,
                    token: *token,
                    recipient: *recipient,
                })
            }
        };

        // Consume the id only after the transfer succeeded; a failed
        // invocation must not burn the id.
        if let Some(guard) = self.replay_guard_mut() {
            guard.mark_consumed(request.kind(), request.project_id(), request.action_id());
        }

        self.push_event(event.clone());
        Ok(event)
    }

    /// Authorize and apply in one step.
    pub fn process<L: TokenTransfer>(
        &mut self,
        ledger: &mut L,
        request: &ActionRequest,
        proof: &AuthorizationProof,
        now: i64,
    ) -> Result<VaultEvent, VaultError> {
        let auth = self.authorize(request, proof, now)?;
        self.execute(ledger, request, auth)
    }
}

//! Contract events
//!
//! Events are immutable records emitted by vault operations, appended to an
//! in-memory log and drained by external indexers. They exist for auditing,
//! not for replay protection.

use serde::{Deserialize, Serialize};
use types::asset::AssetId;
use types::identity::{Address, SignerId};
use types::ids::{ClaimId, DepositId, ProjectId, WithdrawalId};

/// Vault created with its initial authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardVaultInitialized {
    pub authority: Address,
}

/// Governance authority handed to a new identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    pub authority: Address,
}

/// Signer added to or removed from the authorized set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfigured {
    pub signer: SignerId,
    pub enabled: bool,
}

/// Funds moved from a depositor into the vault's holding account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDeposited {
    pub project_id: ProjectId,
    pub deposit_id: DepositId,
    pub token: AssetId,
    pub amount: u64,
}

/// Funds paid out from the vault to a recipient, attested by a signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWithdrawed {
    pub project_id: ProjectId,
    pub withdrawal_id: WithdrawalId,
    pub amount: u64,
    pub token: AssetId,
    pub recipient: Address,
}

/// Funds claimed from the vault by a recipient, attested by a signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaimed {
    pub project_id: ProjectId,
    pub claim_id: ClaimId,
    pub amount: u64,
    pub token: AssetId,
    pub recipient: Address,
}

/// Enum wrapper for all vault events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    RewardVaultInitialized(RewardVaultInitialized),
    OwnershipTransferred(OwnershipTransferred),
    SignerConfigured(SignerConfigured),
    TokenDeposited(TokenDeposited),
    TokenWithdrawed(TokenWithdrawed),
    TokenClaimed(TokenClaimed),
}

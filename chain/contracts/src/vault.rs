//! Reward vault — deployment slot, governance state, and event log
//!
//! One `RewardVault` models one deployment address. The slot starts empty
//! and is initialized exactly once with its admin authority; afterwards the
//! authority governs an unbounded, duplicate-free set of co-signers whose
//! signatures release funds. The vault owns *authorization* state only —
//! per-asset value state lives in the external token-transfer subsystem
//! under the vault's holding address.
//!
//! The authority is treated as an implicit co-signer for funds movement even
//! when absent from the signer set. That is a bootstrap convenience which
//! widens the trusted-key surface; review before reuse.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use types::asset::AssetId;
use types::identity::{Address, SignerId};
use types::ids::ProjectId;

use crate::errors::VaultError;
use crate::events::{
    OwnershipTransferred, RewardVaultInitialized, SignerConfigured, VaultEvent,
};
use crate::security::ActionIdRegistry;

/// Persistent governance state: one authority, a unique signer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    authority: Address,
    signers: Vec<SignerId>,
}

impl VaultState {
    /// The current administrative authority.
    pub fn authority(&self) -> &Address {
        &self.authority
    }

    /// The authorized co-signers, in insertion order.
    pub fn signers(&self) -> &[SignerId] {
        &self.signers
    }

    /// Whether `signer` may authorize funds movement: a member of the
    /// signer set, or the authority's own key.
    pub fn is_authorized_signer(&self, signer: &SignerId) -> bool {
        if self.signers.contains(signer) {
            return true;
        }
        matches!(signer, SignerId::Ed25519(key) if *key == self.authority)
    }
}

/// A reward vault deployment.
#[derive(Debug)]
pub struct RewardVault {
    /// Deployment address; owns the holding accounts in the ledger.
    address: Address,
    /// Governance state, `None` until `initialize`.
    state: Option<VaultState>,
    /// Opt-in consumed-id replay guard.
    replay_guard: Option<ActionIdRegistry>,
    /// Advisory per-(project, asset) deposit totals.
    project_totals: HashMap<(ProjectId, AssetId), u64>,
    /// Emitted events log (append-only)
    events: Vec<VaultEvent>,
}

impl RewardVault {
    /// Create an empty deployment slot at `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            state: None,
            replay_guard: None,
            project_totals: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// The deployment address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Governance state, or `NotInitialized`.
    pub fn state(&self) -> Result<&VaultState, VaultError> {
        self.state.as_ref().ok_or(VaultError::NotInitialized)
    }

    // ───────────────────────── Governance ─────────────────────────

    /// Initialize the vault with its first authority and an empty signer
    /// set. Fails on a second call against the same deployment.
    pub fn initialize(&mut self, authority: Address) -> Result<VaultEvent, VaultError> {
        if self.state.is_some() {
            warn!(address = %self.address, "initialize on existing vault");
            return Err(VaultError::AlreadyInitialized);
        }
        self.state = Some(VaultState {
            authority,
            signers: Vec::new(),
        });

        debug!(address = %self.address, %authority, "vault initialized");
        let event = VaultEvent::RewardVaultInitialized(RewardVaultInitialized { authority });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Hand the authority to a new identity. Authority-only; setting the
    /// current authority again is a permitted no-op in effect.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_authority: Address,
    ) -> Result<VaultEvent, VaultError> {
        self.require_authority(caller)?;
        // Option checked by require_authority
        let state = self.state.as_mut().ok_or(VaultError::NotInitialized)?;
        state.authority = new_authority;

        debug!(authority = %new_authority, "ownership transferred");
        let event = VaultEvent::OwnershipTransferred(OwnershipTransferred {
            authority: new_authority,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Add (`enable`) or remove a co-signer. Authority-only. Adding a
    /// present signer and removing an absent one both fail without
    /// mutating the set.
    pub fn config_signer(
        &mut self,
        caller: &Address,
        signer: SignerId,
        enable: bool,
    ) -> Result<VaultEvent, VaultError> {
        self.require_authority(caller)?;
        let state = self.state.as_mut().ok_or(VaultError::NotInitialized)?;

        if enable {
            if state.signers.contains(&signer) {
                return Err(VaultError::SignerAlreadyExists {
                    signer: signer.to_string(),
                });
            }
            state.signers.push(signer);
        } else {
            let position = state.signers.iter().position(|s| *s == signer).ok_or(
                VaultError::SignerNotFound {
                    signer: signer.to_string(),
                },
            )?;
            state.signers.remove(position);
        }

        debug!(signer = %signer, enabled = enable, "signer configured");
        let event = VaultEvent::SignerConfigured(SignerConfigured { signer, enabled: enable });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Whether `signer` may authorize funds movement right now.
    pub fn is_authorized_signer(&self, signer: &SignerId) -> bool {
        self.state
            .as_ref()
            .map_or(false, |state| state.is_authorized_signer(signer))
    }

    fn require_authority(&self, caller: &Address) -> Result<(), VaultError> {
        let state = self.state()?;
        if state.authority != *caller {
            warn!(caller = %caller, "governance call by non-authority");
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    // ───────────────────────── Replay guard ─────────────────────────

    /// Turn on consumed-id tracking for this vault. Off by default: the
    /// deployed protocol relies on signature expiry alone.
    pub fn enable_replay_guard(&mut self) {
        if self.replay_guard.is_none() {
            self.replay_guard = Some(ActionIdRegistry::new());
        }
    }

    pub(crate) fn replay_guard(&self) -> Option<&ActionIdRegistry> {
        self.replay_guard.as_ref()
    }

    pub(crate) fn replay_guard_mut(&mut self) -> Option<&mut ActionIdRegistry> {
        self.replay_guard.as_mut()
    }

    // ───────────────────────── Project totals ─────────────────────────

    /// Total deposited into a project for an asset. Advisory bookkeeping:
    /// payouts do not decrement it.
    pub fn project_deposited(&self, project_id: ProjectId, token: &AssetId) -> u64 {
        self.project_totals
            .get(&(project_id, *token))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn record_project_deposit(
        &mut self,
        project_id: ProjectId,
        token: &AssetId,
        amount: u64,
    ) {
        let total = self.project_totals.entry((project_id, *token)).or_insert(0);
        // Advisory tally; saturate rather than fail the deposit.
        *total = total.saturating_add(amount);
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<VaultEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: VaultEvent) {
        self.events.push(event);
    }
}

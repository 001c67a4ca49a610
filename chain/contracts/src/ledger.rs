//! Token-transfer subsystem seam
//!
//! The vault owns authorization state; value state lives in an external
//! token-transfer subsystem reached through the narrow [`TokenTransfer`]
//! interface. [`MemoryLedger`] is the in-process implementation used by
//! tests and demos: balances by (owner, asset) with checked arithmetic.

use std::collections::HashMap;

use types::asset::AssetId;
use types::identity::Address;

use crate::errors::LedgerError;

/// The external token-transfer subsystem.
///
/// `transfer` either moves the full amount or fails leaving both holding
/// accounts untouched; a short balance fails with
/// [`LedgerError::InsufficientFunds`] carrying the exact requested and
/// available amounts.
pub trait TokenTransfer {
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        token: &AssetId,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Current holding-account balance for (owner, token).
    fn balance(&self, owner: &Address, token: &AssetId) -> u64;
}

/// In-memory double-entry ledger.
///
/// Balances are stored as `HashMap<Address, HashMap<AssetId, u64>>`; missing
/// entries read as zero.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: HashMap<Address, HashMap<AssetId, u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air. Test/demo funding only; the
    /// production subsystem mints through its own issuance path.
    pub fn mint(
        &mut self,
        owner: &Address,
        token: &AssetId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let balance = self
            .balances
            .entry(*owner)
            .or_default()
            .entry(*token)
            .or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }
}

impl TokenTransfer for MemoryLedger {
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        token: &AssetId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let available = self.balance(from, token);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                token: token.to_string(),
                required: amount,
                available,
            });
        }

        // A self-transfer of an owned amount changes nothing.
        if from == to {
            return Ok(());
        }

        // Validate the credit side before touching either account so a
        // failure leaves both balances unchanged.
        let credited = self
            .balance(to, token)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balances
            .entry(*from)
            .or_default()
            .insert(*token, available - amount);
        self.balances.entry(*to).or_default().insert(*token, credited);
        Ok(())
    }

    fn balance(&self, owner: &Address, token: &AssetId) -> u64 {
        self.balances
            .get(owner)
            .and_then(|assets| assets.get(token))
            .copied()
            .unwrap_or(0)
    }
}

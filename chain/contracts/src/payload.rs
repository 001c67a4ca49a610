//! Typed payload encoding — the canonical byte form co-signers sign
//!
//! Fixed-order, fixed-width, little-endian, no padding, no variable-length
//! fields. Two encodings exist: the 32-byte base form binds the project id,
//! action id, amount, and expiry; the 64-byte asset-binding form appends the
//! asset selector so a signature cannot be replayed against a different
//! asset. Encoding is pure: identical fields always produce identical bytes.

use types::asset::AssetId;
use types::ids::ProjectId;

/// Length of the base encoding: four 8-byte fields.
pub const BASE_PAYLOAD_LEN: usize = 32;

/// Length of the asset-binding encoding: base plus the 32-byte selector.
pub const ASSET_PAYLOAD_LEN: usize = BASE_PAYLOAD_LEN + AssetId::LEN;

/// The signed fields of an action request, detached from the action kind.
///
/// The action-scoped id (deposit/withdrawal/claim id) is carried as its raw
/// wire value; the kind is implied by which vault operation the accompanying
/// request drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedPayload {
    pub project_id: ProjectId,
    pub action_id: u64,
    pub amount: u64,
    pub expiration_time: i64,
}

impl TypedPayload {
    pub fn new(project_id: ProjectId, action_id: u64, amount: u64, expiration_time: i64) -> Self {
        Self {
            project_id,
            action_id,
            amount,
            expiration_time,
        }
    }

    /// Base encoding: `project_id ‖ action_id ‖ amount ‖ expiration_time`,
    /// each 8 bytes little-endian.
    pub fn encode(&self) -> [u8; BASE_PAYLOAD_LEN] {
        let mut buf = [0u8; BASE_PAYLOAD_LEN];
        buf[0..8].copy_from_slice(&self.project_id.value().to_le_bytes());
        buf[8..16].copy_from_slice(&self.action_id.to_le_bytes());
        buf[16..24].copy_from_slice(&self.amount.to_le_bytes());
        buf[24..32].copy_from_slice(&self.expiration_time.to_le_bytes());
        buf
    }

    /// Asset-binding encoding: base encoding followed by the 32-byte asset
    /// selector.
    pub fn encode_with_asset(&self, token: &AssetId) -> [u8; ASSET_PAYLOAD_LEN] {
        let mut buf = [0u8; ASSET_PAYLOAD_LEN];
        buf[..BASE_PAYLOAD_LEN].copy_from_slice(&self.encode());
        buf[BASE_PAYLOAD_LEN..].copy_from_slice(token.as_bytes());
        buf
    }
}

//! Action-scoped identifier types for vault entities
//!
//! All ids are caller-chosen unsigned 64-bit values carried verbatim in the
//! signed payload and in emitted events. They partition actions, they do not
//! deduplicate them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier partitioning logical campaigns/pools.
///
/// Advisory: the vault records per-project deposit totals but does not
/// enforce uniqueness across projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw wire value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a single deposit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepositId(u64);

impl DepositId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DepositId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for DepositId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a single withdrawal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WithdrawalId(u64);

impl WithdrawalId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for WithdrawalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for WithdrawalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a single claim action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(u64);

impl ClaimId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ClaimId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_roundtrip() {
        let id = ProjectId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id, ProjectId::from(42));
    }

    #[test]
    fn test_project_id_serialization() {
        let id = ProjectId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let deserialized: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_deposit_id_display() {
        assert_eq!(DepositId::new(0).to_string(), "0");
        assert_eq!(DepositId::new(u64::MAX).to_string(), u64::MAX.to_string());
    }

    #[test]
    fn test_withdrawal_id_serialization() {
        let id = WithdrawalId::new(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: WithdrawalId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_claim_id_value() {
        assert_eq!(ClaimId::new(99).value(), 99);
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Same wire value, different meaning; equality only within a type.
        let d = DepositId::new(1);
        let w = WithdrawalId::new(1);
        assert_eq!(d.value(), w.value());
    }
}

//! Smart Contract Logic for Reward Vault Custody
//!
//! This crate implements the contract layer for the custodial reward vault:
//! signature-authorized deposits and payouts pooled across logical projects,
//! governed by a single authority and a configurable co-signer set.
//!
//! # Modules
//! - `events`: Vault events (deposits, payouts, governance)
//! - `errors`: Contract-specific error types
//! - `payload`: Canonical fixed-width payload encodings for signing
//! - `signature`: Dual-scheme signature verification (secp256k1, ed25519)
//! - `authorize`: Authorization gate and one-shot authorization tokens
//! - `vault`: Deployment slot, governance state, event log
//! - `actions`: Deposit / withdraw / claim transitions
//! - `ledger`: Token-transfer subsystem seam + in-memory implementation
//! - `security`: Optional consumed-id replay guard
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod errors;
pub mod events;
pub mod payload;
pub mod signature;
pub mod authorize;
pub mod vault;
pub mod actions;
pub mod ledger;
pub mod security;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";

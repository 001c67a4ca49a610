//! Contract-specific error types
//!
//! Comprehensive error taxonomy for governance, authorization, and
//! funds-movement operations. Every error is terminal for its invocation:
//! no partial state mutation survives a failure.

use thiserror::Error;

/// Vault-level errors surfaced to external callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Vault already initialized")]
    AlreadyInitialized,

    #[error("Vault not initialized")]
    NotInitialized,

    #[error("Unauthorized: caller is not the vault authority")]
    Unauthorized,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Expired signature")]
    ExpiredSignature,

    #[error("Signer already exists: {signer}")]
    SignerAlreadyExists { signer: String },

    #[error("Signer not found: {signer}")]
    SignerNotFound { signer: String },

    #[error("Insufficient funds for {token}: required {required}, available {available}")]
    InsufficientFunds {
        token: String,
        required: u64,
        available: u64,
    },

    #[error("Action id already consumed: project {project_id}, id {action_id}")]
    ActionIdConsumed { project_id: u64, action_id: u64 },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Errors raised by the token-transfer subsystem.
///
/// `InsufficientFunds` is propagated to callers unmodified: the requested
/// amount is never clipped to the available balance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds for {token}: required {required}, available {available}")]
    InsufficientFunds {
        token: String,
        required: u64,
        available: u64,
    },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

impl From<LedgerError> for VaultError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds {
                token,
                required,
                available,
            } => VaultError::InsufficientFunds {
                token,
                required,
                available,
            },
            LedgerError::Overflow => VaultError::Overflow,
        }
    }
}

/// Fine-grained verification failures, conflated to
/// [`VaultError::InvalidSignature`] at the authorization gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Malformed signature: expected {expected} bytes, got {actual}")]
    MalformedSignature { expected: usize, actual: usize },

    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Public key recovery failed")]
    RecoveryFailed,

    #[error("Signature verification failed")]
    VerificationFailed,
}

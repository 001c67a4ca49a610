//! End-to-end vault flows
//!
//! Drives the public surface the way a deployment harness would:
//! initialize, configure signers, then move funds under co-signer
//! authorization across both signature schemes and the native wrapped
//! asset, asserting exact balance deltas and the emitted event stream.

use chrono::Utc;
use contracts::actions::ActionRequest;
use contracts::authorize::AuthorizationProof;
use contracts::errors::VaultError;
use contracts::events::VaultEvent;
use contracts::ledger::{MemoryLedger, TokenTransfer};
use contracts::signature::{eth_address, keccak256, SignatureScheme};
use contracts::vault::RewardVault;
use ed25519_dalek::{Signer, SigningKey};
use k256::ecdsa::SigningKey as EcdsaSigningKey;
use types::asset::AssetId;
use types::identity::{Address, SignerId};
use types::ids::{ClaimId, DepositId, ProjectId, WithdrawalId};

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn addr(tag: u8) -> Address {
    Address::new([tag; 32])
}

fn ed_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

fn key_address(key: &SigningKey) -> Address {
    Address::new(key.verifying_key().to_bytes())
}

fn ed25519_proof(key: &SigningKey, request: &ActionRequest) -> AuthorizationProof {
    let digest = request.signing_digest(SignatureScheme::Ed25519);
    let signature = key.sign(&digest);
    AuthorizationProof::new(
        SignerId::Ed25519(key_address(key)),
        signature.to_bytes().to_vec(),
    )
}

fn secp256k1_proof(key: &EcdsaSigningKey, request: &ActionRequest) -> AuthorizationProof {
    let digest = request.signing_digest(SignatureScheme::Secp256k1Recoverable);
    let prehash = keccak256(&digest);
    let (signature, recovery_id) = key.sign_prehash_recoverable(&prehash).unwrap();

    let mut raw = vec![0u8; 65];
    raw[..64].copy_from_slice(&signature.to_bytes());
    raw[64] = recovery_id.to_byte();
    AuthorizationProof::new(SignerId::Secp256k1(eth_address(key.verifying_key())), raw)
}

fn far_expiry() -> i64 {
    Utc::now().timestamp() + 600
}

/// Vault initialized by authority key 0x0A, with an ed25519 co-signer
/// (key 0x05) configured and a depositor funded with 1000 of `token`.
fn setup(
    token: &AssetId,
) -> (RewardVault, MemoryLedger, SigningKey, SigningKey, Address) {
    let authority_key = ed_key(0x0A);
    let signer_key = ed_key(0x05);
    let authority = key_address(&authority_key);
    let depositor = addr(0xD0);

    let mut vault = RewardVault::new(addr(0xFF));
    vault.initialize(authority).unwrap();
    vault
        .config_signer(&authority, SignerId::Ed25519(key_address(&signer_key)), true)
        .unwrap();

    let mut ledger = MemoryLedger::new();
    ledger.mint(&depositor, token, 1000).unwrap();

    (vault, ledger, authority_key, signer_key, depositor)
}

// ═══════════════════════════════════════════════════════════════════
// The canonical scenario
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_deposit_withdraw_over_withdraw_scenario() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _authority_key, signer_key, depositor) = setup(&token);
    let recipient = addr(0xE0);
    let project = ProjectId::new(1);
    let now = Utc::now().timestamp();

    // Deposit 200, co-signed by S
    let request = ActionRequest::deposit(
        project,
        DepositId::new(0),
        token,
        200,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);
    let event = vault.process(&mut ledger, &request, &proof, now).unwrap();
    assert!(matches!(event, VaultEvent::TokenDeposited(_)));
    assert_eq!(ledger.balance(vault.address(), &token), 200);
    assert_eq!(ledger.balance(&depositor, &token), 800);

    // Withdraw 20 to R
    let request = ActionRequest::withdraw(
        project,
        WithdrawalId::new(0),
        token,
        20,
        far_expiry(),
        recipient,
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();
    assert_eq!(ledger.balance(vault.address(), &token), 180);
    assert_eq!(ledger.balance(&recipient, &token), 20);

    // Over-withdraw 1000 fails and moves nothing
    let request = ActionRequest::withdraw(
        project,
        WithdrawalId::new(1),
        token,
        1000,
        far_expiry(),
        recipient,
    );
    let proof = ed25519_proof(&signer_key, &request);
    let err = vault
        .process(&mut ledger, &request, &proof, now)
        .unwrap_err();
    assert_eq!(
        err,
        VaultError::InsufficientFunds {
            token: token.to_string(),
            required: 1000,
            available: 180,
        }
    );
    assert_eq!(ledger.balance(vault.address(), &token), 180);
    assert_eq!(ledger.balance(&recipient, &token), 20);
}

// ═══════════════════════════════════════════════════════════════════
// Deposits
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_deposit_exact_balance_deltas() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _, signer_key, depositor) = setup(&token);

    let request = ActionRequest::deposit(
        ProjectId::new(7),
        DepositId::new(3),
        token,
        123,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault
        .process(&mut ledger, &request, &proof, Utc::now().timestamp())
        .unwrap();

    assert_eq!(ledger.balance(&depositor, &token), 877);
    assert_eq!(ledger.balance(vault.address(), &token), 123);
    assert_eq!(vault.project_deposited(ProjectId::new(7), &token), 123);
}

#[test]
fn test_deposit_insufficient_depositor_funds() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _, signer_key, depositor) = setup(&token);

    let request = ActionRequest::deposit(
        ProjectId::new(1),
        DepositId::new(0),
        token,
        5000,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);
    let err = vault
        .process(&mut ledger, &request, &proof, Utc::now().timestamp())
        .unwrap_err();
    assert!(matches!(err, VaultError::InsufficientFunds { .. }));
    assert_eq!(ledger.balance(&depositor, &token), 1000);
}

#[test]
fn test_deposit_authorized_by_authority_itself() {
    // The authority is an implicit co-signer even with an empty signer set.
    let token = AssetId::new([0x11; 32]);
    let authority_key = ed_key(0x0A);
    let depositor = addr(0xD0);

    let mut vault = RewardVault::new(addr(0xFF));
    vault.initialize(key_address(&authority_key)).unwrap();
    let mut ledger = MemoryLedger::new();
    ledger.mint(&depositor, &token, 100).unwrap();

    let request = ActionRequest::deposit(
        ProjectId::new(1),
        DepositId::new(0),
        token,
        60,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&authority_key, &request);
    vault
        .process(&mut ledger, &request, &proof, Utc::now().timestamp())
        .unwrap();
    assert_eq!(ledger.balance(vault.address(), &token), 60);
}

#[test]
fn test_native_asset_round_trip() {
    let token = AssetId::NATIVE;
    let (mut vault, mut ledger, _, signer_key, depositor) = setup(&token);
    let recipient = addr(0xE0);
    let now = Utc::now().timestamp();

    let request = ActionRequest::deposit(
        ProjectId::new(2),
        DepositId::new(0),
        token,
        400,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();
    assert_eq!(ledger.balance(vault.address(), &token), 400);

    let request = ActionRequest::withdraw(
        ProjectId::new(2),
        WithdrawalId::new(0),
        token,
        150,
        far_expiry(),
        recipient,
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();
    assert_eq!(ledger.balance(vault.address(), &token), 250);
    assert_eq!(ledger.balance(&recipient, &token), 150);
}

// ═══════════════════════════════════════════════════════════════════
// Claims
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_claim_pays_out_like_withdraw() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _, signer_key, depositor) = setup(&token);
    let recipient = addr(0xE0);
    let now = Utc::now().timestamp();

    let request = ActionRequest::deposit(
        ProjectId::new(1),
        DepositId::new(0),
        token,
        500,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();

    let request = ActionRequest::claim(
        ProjectId::new(1),
        ClaimId::new(0),
        token,
        75,
        far_expiry(),
        recipient,
    );
    let proof = ed25519_proof(&signer_key, &request);
    let event = vault.process(&mut ledger, &request, &proof, now).unwrap();
    assert!(matches!(event, VaultEvent::TokenClaimed(_)));
    assert_eq!(ledger.balance(vault.address(), &token), 425);
    assert_eq!(ledger.balance(&recipient, &token), 75);
}

#[test]
fn test_claim_over_balance_fails_verbatim() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _, signer_key, _) = setup(&token);
    let recipient = addr(0xE0);

    let request = ActionRequest::claim(
        ProjectId::new(1),
        ClaimId::new(0),
        token,
        10,
        far_expiry(),
        recipient,
    );
    let proof = ed25519_proof(&signer_key, &request);
    let err = vault
        .process(&mut ledger, &request, &proof, Utc::now().timestamp())
        .unwrap_err();
    // Vault holds nothing yet; the amount is not clipped to zero.
    assert_eq!(
        err,
        VaultError::InsufficientFunds {
            token: token.to_string(),
            required: 10,
            available: 0,
        }
    );
}

// ═══════════════════════════════════════════════════════════════════
// Secp256k1 co-signers
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_secp256k1_signer_authorizes_payout() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, authority_key, signer_key, depositor) = setup(&token);
    let recipient = addr(0xE0);
    let now = Utc::now().timestamp();

    // Fund the vault first
    let request = ActionRequest::deposit(
        ProjectId::new(1),
        DepositId::new(0),
        token,
        300,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();

    // Configure an external secp256k1 co-signer
    let eth_key = EcdsaSigningKey::from_slice(&[0x42; 32]).unwrap();
    let eth_signer = SignerId::Secp256k1(eth_address(eth_key.verifying_key()));
    vault
        .config_signer(&key_address(&authority_key), eth_signer, true)
        .unwrap();

    let request = ActionRequest::withdraw(
        ProjectId::new(1),
        WithdrawalId::new(1),
        token,
        30,
        far_expiry(),
        recipient,
    );
    let proof = secp256k1_proof(&eth_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();
    assert_eq!(ledger.balance(&recipient, &token), 30);
    assert_eq!(ledger.balance(vault.address(), &token), 270);
}

#[test]
fn test_unconfigured_secp256k1_signer_rejected() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _, _, _) = setup(&token);

    let eth_key = EcdsaSigningKey::from_slice(&[0x43; 32]).unwrap();
    let request = ActionRequest::withdraw(
        ProjectId::new(1),
        WithdrawalId::new(0),
        token,
        5,
        far_expiry(),
        addr(0xE0),
    );
    let proof = secp256k1_proof(&eth_key, &request);
    let err = vault
        .process(&mut ledger, &request, &proof, Utc::now().timestamp())
        .unwrap_err();
    assert_eq!(err, VaultError::InvalidSignature);
}

// ═══════════════════════════════════════════════════════════════════
// Two-phase authorize/execute
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_two_phase_authorization() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _, signer_key, depositor) = setup(&token);
    let now = Utc::now().timestamp();

    let request = ActionRequest::deposit(
        ProjectId::new(1),
        DepositId::new(0),
        token,
        50,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);

    let auth = vault.authorize(&request, &proof, now).unwrap();
    let event = vault.execute(&mut ledger, &request, auth).unwrap();
    assert!(matches!(event, VaultEvent::TokenDeposited(_)));
    assert_eq!(ledger.balance(vault.address(), &token), 50);
}

// ═══════════════════════════════════════════════════════════════════
// Governance interplay
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_old_authority_signature_rejected_after_transfer() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, authority_key, _, depositor) = setup(&token);
    let new_authority_key = ed_key(0x0B);
    let now = Utc::now().timestamp();

    vault
        .transfer_ownership(&key_address(&authority_key), key_address(&new_authority_key))
        .unwrap();

    let request = ActionRequest::deposit(
        ProjectId::new(1),
        DepositId::new(0),
        token,
        10,
        far_expiry(),
        depositor,
    );

    // Previous authority can no longer co-sign implicitly
    let proof = ed25519_proof(&authority_key, &request);
    assert_eq!(
        vault.process(&mut ledger, &request, &proof, now).unwrap_err(),
        VaultError::InvalidSignature
    );

    // The new authority can
    let proof = ed25519_proof(&new_authority_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();
    assert_eq!(ledger.balance(vault.address(), &token), 10);
}

// ═══════════════════════════════════════════════════════════════════
// Event stream
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_event_stream_records_full_history() {
    let token = AssetId::new([0x11; 32]);
    let (mut vault, mut ledger, _, signer_key, depositor) = setup(&token);
    let now = Utc::now().timestamp();

    let request = ActionRequest::deposit(
        ProjectId::new(1),
        DepositId::new(0),
        token,
        100,
        far_expiry(),
        depositor,
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();

    let request = ActionRequest::withdraw(
        ProjectId::new(1),
        WithdrawalId::new(0),
        token,
        40,
        far_expiry(),
        addr(0xE0),
    );
    let proof = ed25519_proof(&signer_key, &request);
    vault.process(&mut ledger, &request, &proof, now).unwrap();

    let events = vault.drain_events();
    // initialize, config_signer, deposit, withdraw
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], VaultEvent::RewardVaultInitialized(_)));
    assert!(matches!(events[1], VaultEvent::SignerConfigured(_)));

    match &events[2] {
        VaultEvent::TokenDeposited(event) => {
            assert_eq!(event.project_id, ProjectId::new(1));
            assert_eq!(event.deposit_id, DepositId::new(0));
            assert_eq!(event.token, token);
            assert_eq!(event.amount, 100);
        }
        other => panic!("expected TokenDeposited, got {:?}", other),
    }
    match &events[3] {
        VaultEvent::TokenWithdrawed(event) => {
            assert_eq!(event.withdrawal_id, WithdrawalId::new(0));
            assert_eq!(event.amount, 40);
            assert_eq!(event.recipient, addr(0xE0));
        }
        other => panic!("expected TokenWithdrawed, got {:?}", other),
    }

    assert!(vault.events().is_empty());
}

//! End-to-end submission flow tests with in-memory adapters.
//!
//! Covers the full lifecycle: proof acquisition, wallet broadcast, and
//! receipt confirmation, plus the failure paths (validation, signature
//! rejection, on-chain revert, confirmation timeout). All tests run on a
//! paused clock, so simulated proving latency and polling cost no wall time.

use std::time::Duration;

use alloy::primitives::{Address, U256};

use arc_confidential_client::adapters::mock_ledger::MockLedger;
use arc_confidential_client::adapters::mock_prover::MockProver;
use arc_confidential_client::adapters::mock_wallet::{MockWallet, WalletBehavior};
use arc_confidential_client::flow::{FlowConfig, SubmissionState, TransferError, TransferFlow};
use arc_confidential_client::ports::ledger::TxStatus;
use arc_confidential_client::ports::wallet::WalletError;
use arc_confidential_client::tracker::{TrackerConfig, TrackerError};
use arc_confidential_client::ValidationError;

const RECIPIENT: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn flow_config() -> FlowConfig {
    FlowConfig {
        helper_address: Address::repeat_byte(0x12),
        proof_timeout: Duration::from_secs(30),
        tracker: TrackerConfig {
            poll_interval: Duration::from_millis(100),
            confirmation_timeout: Duration::from_secs(10),
        },
    }
}

fn rank(state: &SubmissionState) -> u8 {
    match state {
        SubmissionState::Idle => 0,
        SubmissionState::GeneratingProof => 1,
        SubmissionState::AwaitingSignature => 2,
        SubmissionState::Confirming => 3,
        SubmissionState::Confirmed | SubmissionState::Failed(_) => 4,
    }
}

/// Happy path: "100.00" to a valid recipient confirms, the proof echoes the
/// scaled amount, and proving takes ~2s of simulated latency.
#[tokio::test(start_paused = true)]
async fn test_confidential_transfer_confirms() {
    init_tracing();

    let wallet = MockWallet::new();
    let ledger = MockLedger::new();
    ledger
        .script_default(vec![
            TxStatus::Pending,
            TxStatus::Included { block_number: 42 },
            TxStatus::Finalized { block_number: 42 },
        ])
        .await;

    let flow = TransferFlow::new(MockProver::new(), wallet.clone(), ledger, flow_config());

    let mut states = flow.subscribe();
    let collector = tokio::spawn(async move {
        let mut seen = vec![states.borrow().clone()];
        while states.changed().await.is_ok() {
            let state = states.borrow().clone();
            let terminal = state.is_terminal();
            seen.push(state);
            if terminal {
                break;
            }
        }
        seen
    });

    let started = tokio::time::Instant::now();
    let confirmation = flow.submit("100.00", RECIPIENT).await.unwrap();
    assert_eq!(confirmation.block_number, 42);

    // Proving alone is scripted at 2s; the whole flow must include it.
    assert!(started.elapsed() >= Duration::from_millis(1500));

    // The broadcast call carried the scaled fixed-point amount.
    let submissions = wallet.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].material.amount, U256::from(100_000_000u64));
    assert_eq!(
        submissions[0].material.recipient,
        RECIPIENT.parse::<Address>().unwrap()
    );
    assert_eq!(submissions[0].target, Address::repeat_byte(0x12));

    // Observed states never move backward and end Confirmed, with the
    // Confirming phase observed along the way.
    let seen = collector.await.unwrap();
    assert_eq!(seen.last(), Some(&SubmissionState::Confirmed));
    assert!(seen.contains(&SubmissionState::Confirming));
    for pair in seen.windows(2) {
        assert!(
            rank(&pair[1]) >= rank(&pair[0]),
            "state regressed: {pair:?}"
        );
    }

    // Terminal state is sticky: nothing mutates it after confirmation.
    assert_eq!(flow.state(), SubmissionState::Confirmed);
}

/// Invalid amounts reject before any suspension: state stays Idle and the
/// wallet is never invoked.
#[tokio::test(start_paused = true)]
async fn test_invalid_amount_rejects_immediately() {
    let wallet = MockWallet::new();
    let flow = TransferFlow::new(
        MockProver::new(),
        wallet.clone(),
        MockLedger::new(),
        flow_config(),
    );

    for bad_amount in ["", "-5", "abc", "0"] {
        let started = tokio::time::Instant::now();
        let err = flow.submit(bad_amount, RECIPIENT).await.unwrap_err();
        assert!(
            matches!(err, TransferError::Validation(_)),
            "expected validation error for {bad_amount:?}, got {err:?}"
        );
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    assert_eq!(wallet.submission_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_recipient_rejects_immediately() {
    let wallet = MockWallet::new();
    let flow = TransferFlow::new(
        MockProver::new(),
        wallet.clone(),
        MockLedger::new(),
        flow_config(),
    );

    let err = flow.submit("100.00", "0xabc").await.unwrap_err();
    assert!(matches!(
        err,
        TransferError::Validation(ValidationError::InvalidRecipient(_))
    ));
    assert_eq!(flow.state(), SubmissionState::Idle);
    assert_eq!(wallet.submission_count().await, 0);
}

/// Wallet declines to sign: the error kind and message surface verbatim and
/// the state machine lands in Failed.
#[tokio::test(start_paused = true)]
async fn test_signature_rejection_fails_submission() {
    let wallet = MockWallet::new();
    wallet
        .set_behavior(WalletBehavior::RejectSignature(
            "User rejected the request.".into(),
        ))
        .await;

    let flow = TransferFlow::new(
        MockProver::new(),
        wallet,
        MockLedger::new(),
        flow_config(),
    );

    let err = flow.submit("100.00", RECIPIENT).await.unwrap_err();
    match &err {
        TransferError::Wallet(WalletError::SignatureRejected(message)) => {
            assert_eq!(message, "User rejected the request.");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    match flow.state() {
        SubmissionState::Failed(reason) => {
            assert!(reason.contains("User rejected the request."));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

/// On-chain revert after inclusion surfaces as a failed submission.
#[tokio::test(start_paused = true)]
async fn test_reverted_transaction_fails_submission() {
    let ledger = MockLedger::new();
    ledger
        .script_default(vec![
            TxStatus::Included { block_number: 5 },
            TxStatus::Failed {
                reason: "execution reverted: InvalidProof()".into(),
            },
        ])
        .await;

    let flow = TransferFlow::new(
        MockProver::new(),
        MockWallet::new(),
        ledger,
        flow_config(),
    );

    let err = flow.submit("100.00", RECIPIENT).await.unwrap_err();
    assert!(matches!(
        err,
        TransferError::Confirmation(TrackerError::TransactionFailed(_))
    ));
    assert!(flow.state().is_terminal());
}

/// A transaction that never finalizes within the polling horizon yields a
/// timeout, which is a different error kind than a wallet rejection.
#[tokio::test(start_paused = true)]
async fn test_confirmation_timeout_is_distinct_from_rejection() {
    let ledger = MockLedger::new();
    ledger.script_default(vec![TxStatus::Pending]).await;

    let flow = TransferFlow::new(
        MockProver::new(),
        MockWallet::new(),
        ledger,
        flow_config(),
    );

    let err = flow.submit("100.00", RECIPIENT).await.unwrap_err();
    assert!(matches!(
        err,
        TransferError::Confirmation(TrackerError::Timeout(_))
    ));
    assert!(!matches!(err, TransferError::Wallet(_)));
}

/// A prover that exceeds the bounded wait surfaces a proof timeout.
#[tokio::test(start_paused = true)]
async fn test_proof_generation_timeout() {
    let config = FlowConfig {
        proof_timeout: Duration::from_secs(5),
        ..flow_config()
    };
    let flow = TransferFlow::new(
        MockProver::with_delay(Duration::from_secs(60)),
        MockWallet::new(),
        MockLedger::new(),
        config,
    );

    let err = flow.submit("100.00", RECIPIENT).await.unwrap_err();
    assert!(matches!(err, TransferError::ProofTimeout(_)));
}

/// A new attempt starts a fresh state machine and clears the previous error.
#[tokio::test(start_paused = true)]
async fn test_new_attempt_clears_previous_failure() {
    let wallet = MockWallet::new();
    wallet
        .set_behavior(WalletBehavior::RejectSignature("nope".into()))
        .await;

    let ledger = MockLedger::new();
    ledger
        .script_default(vec![TxStatus::Finalized { block_number: 9 }])
        .await;

    let flow = TransferFlow::new(MockProver::new(), wallet.clone(), ledger, flow_config());

    flow.submit("100.00", RECIPIENT).await.unwrap_err();
    assert!(matches!(flow.state(), SubmissionState::Failed(_)));

    wallet.set_behavior(WalletBehavior::Accept).await;
    let confirmation = flow.submit("100.00", RECIPIENT).await.unwrap();
    assert_eq!(confirmation.block_number, 9);
    assert_eq!(flow.state(), SubmissionState::Confirmed);
}

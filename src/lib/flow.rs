use std::time::Duration;

use alloy::primitives::Address;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{
    debug,
    info,
};

use crate::{
    domain::{
        amount::ASSET_DECIMALS,
        transfer::{
            TransferRequest,
            ValidationError,
        },
    },
    ports::{
        ledger::Ledger,
        prover::{
            ProofProvider,
            ProverError,
        },
        wallet::{
            Wallet,
            WalletError,
        },
    },
    submitter::TransferSubmitter,
    tracker::{
        Confirmation,
        StatusTracker,
        TrackedState,
        TrackerConfig,
        TrackerError,
    },
};

/// UI-facing lifecycle of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    GeneratingProof,
    AwaitingSignature,
    Confirming,
    Confirmed,
    Failed(String),
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Confirmed | SubmissionState::Failed(_))
    }
}

/// Top-level submission error. Each component's error kind passes through
/// unchanged; nothing here retries automatically — a retry is a fresh
/// user-initiated attempt, since proof material is single-use.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Proof(#[from] ProverError),

    #[error("proof generation timed out after {0:?}")]
    ProofTimeout(Duration),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Confirmation(#[from] TrackerError),
}

/// Knobs for one flow instance.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// ConfidentialTransferHelper contract address.
    pub helper_address: Address,
    /// Bounded wait for proof generation.
    pub proof_timeout: Duration,
    /// Receipt polling knobs.
    pub tracker: TrackerConfig,
}

/// Orchestrates one confidential transfer at a time:
/// proof acquisition → wallet broadcast → receipt confirmation.
///
/// All collaborators are injected, never ambient, so the flow is testable
/// with fakes. A flow instance tracks a single submission; run concurrent
/// transfers on separate instances — submissions share no mutable state.
pub struct TransferFlow<P, W, L> {
    prover: P,
    submitter: TransferSubmitter<W>,
    tracker: StatusTracker<L>,
    proof_timeout: Duration,
    state: watch::Sender<SubmissionState>,
}

impl<P, W, L> TransferFlow<P, W, L>
where
    P: ProofProvider,
    W: Wallet,
    L: Ledger,
{
    pub fn new(prover: P, wallet: W, ledger: L, config: FlowConfig) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            prover,
            submitter: TransferSubmitter::new(wallet, config.helper_address),
            tracker: StatusTracker::new(ledger, config.tracker),
            proof_timeout: config.proof_timeout,
            state,
        }
    }

    /// Observe the submission lifecycle. A new attempt resets to `Idle`.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Current submission state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    fn set_state(&self, state: SubmissionState) {
        debug!(state = ?state, "submission state");
        self.state.send_replace(state);
    }

    /// Run one submission attempt end to end.
    ///
    /// Validation failures reject before any suspension and leave the state
    /// at `Idle`; any later failure moves it to `Failed` carrying the error
    /// message verbatim. Dropping the returned future before the wallet
    /// broadcast resolves abandons the attempt with no external effect; after
    /// broadcast, dropping only stops observation.
    pub async fn submit(
        &self,
        amount: &str,
        recipient: &str,
    ) -> Result<Confirmation, TransferError> {
        // Fresh attempt: reset the state machine and clear any prior error.
        self.set_state(SubmissionState::Idle);

        let request = TransferRequest::parse(amount, recipient, ASSET_DECIMALS)?;

        let result = self.run(&request).await;
        if let Err(e) = &result {
            self.set_state(SubmissionState::Failed(e.to_string()));
        }
        result
    }

    async fn run(&self, request: &TransferRequest) -> Result<Confirmation, TransferError> {
        self.set_state(SubmissionState::GeneratingProof);
        info!(recipient = %request.recipient, "generating transfer proof");

        let material = tokio::time::timeout(
            self.proof_timeout,
            self.prover.generate_proof(request),
        )
        .await
        .map_err(|_| TransferError::ProofTimeout(self.proof_timeout))??;

        self.set_state(SubmissionState::AwaitingSignature);
        let tx_hash = self.submitter.submit(&material).await?;
        info!(%tx_hash, "transfer broadcast accepted");

        let confirmation = self
            .tracker
            .wait_for_confirmation(tx_hash, |tracked| {
                if tracked == TrackedState::Confirming {
                    self.set_state(SubmissionState::Confirming);
                }
            })
            .await?;

        self.set_state(SubmissionState::Confirmed);
        info!(
            %tx_hash,
            block_number = confirmation.block_number,
            "transfer confirmed"
        );
        Ok(confirmation)
    }
}

use std::time::Duration;

use alloy::primitives::B256;
use thiserror::Error;
use tracing::warn;

use crate::ports::ledger::{
    Ledger,
    TxStatus,
};

/// Observed lifecycle of a broadcast transaction.
///
/// Transitions are monotonic: Pending → Confirming → {Confirmed | Failed}.
/// Terminal states are sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedState {
    /// Broadcast accepted, not yet included.
    Pending,
    /// Included, awaiting finality.
    Confirming,
    /// Finality reached.
    Confirmed,
    /// Included and reverted.
    Failed,
}

impl TrackedState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TrackedState::Confirmed | TrackedState::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            TrackedState::Pending => 0,
            TrackedState::Confirming => 1,
            TrackedState::Confirmed | TrackedState::Failed => 2,
        }
    }

    /// Fold an observed state into the current one. Never regresses; once a
    /// terminal state is reached the observation is ignored.
    pub fn advance(self, observed: TrackedState) -> TrackedState {
        if self.is_terminal() || observed.rank() <= self.rank() {
            self
        } else {
            observed
        }
    }
}

/// Errors surfaced by the status tracker. A timeout is distinct from a wallet
/// rejection and from an on-chain failure.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("transaction not finalized within {0:?}")]
    Timeout(Duration),
}

/// Finality details for a confirmed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: B256,
    pub block_number: u64,
}

/// Polling knobs for the tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Interval between receipt queries.
    pub poll_interval: Duration,
    /// Bounded polling horizon; exceeding it yields [`TrackerError::Timeout`].
    pub confirmation_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            confirmation_timeout: Duration::from_secs(120),
        }
    }
}

/// Observes one transaction handle until a terminal state.
pub struct StatusTracker<L> {
    ledger: L,
    config: TrackerConfig,
}

impl<L: Ledger> StatusTracker<L> {
    pub fn new(ledger: L, config: TrackerConfig) -> Self {
        Self { ledger, config }
    }

    /// Poll the ledger until the transaction is confirmed or failed.
    ///
    /// `on_transition` is invoked once per state change, starting with
    /// `Pending`; the emitted sequence never regresses. Transient ledger read
    /// errors are logged and retried until the polling horizon.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: B256,
        mut on_transition: impl FnMut(TrackedState),
    ) -> Result<Confirmation, TrackerError> {
        let mut state = TrackedState::Pending;
        on_transition(state);

        let deadline = tokio::time::Instant::now() + self.config.confirmation_timeout;
        let mut block_number = 0u64;

        loop {
            match self.ledger.transaction_status(tx_hash).await {
                Ok(status) => {
                    let (observed, reason) = match status {
                        TxStatus::Pending => (TrackedState::Pending, None),
                        TxStatus::Included { block_number: block } => {
                            block_number = block;
                            (TrackedState::Confirming, None)
                        }
                        TxStatus::Finalized { block_number: block } => {
                            block_number = block;
                            (TrackedState::Confirmed, None)
                        }
                        TxStatus::Failed { reason } => (TrackedState::Failed, Some(reason)),
                    };

                    let next = state.advance(observed);
                    if next != state {
                        state = next;
                        on_transition(state);
                    }

                    match state {
                        TrackedState::Confirmed => {
                            return Ok(Confirmation {
                                tx_hash,
                                block_number,
                            });
                        }
                        TrackedState::Failed => {
                            return Err(TrackerError::TransactionFailed(
                                reason.unwrap_or_else(|| "transaction reverted".into()),
                            ));
                        }
                        _ => {}
                    }
                }
                Err(e) => {
                    warn!(%tx_hash, "ledger read failed, retrying: {e}");
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(TrackerError::Timeout(self.config.confirmation_timeout));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

use std::future::Future;

use alloy::primitives::B256;
use thiserror::Error;

/// Receipt status as reported by the ledger for one transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// Not yet included in a block.
    Pending,
    /// Included, finality criteria not yet met.
    Included { block_number: u64 },
    /// Finality reached.
    Finalized { block_number: u64 },
    /// Included and reverted.
    Failed { reason: String },
}

/// Errors from ledger reads. Treated as transient by the status tracker,
/// which retries until its polling horizon.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Ledger/explorer boundary: read-only receipt and finality queries for a
/// broadcast transaction. The client polls; it does not implement the
/// underlying network protocol.
pub trait Ledger: Send + Sync {
    fn transaction_status(
        &self,
        tx_hash: B256,
    ) -> impl Future<Output = Result<TxStatus, LedgerError>> + Send;
}

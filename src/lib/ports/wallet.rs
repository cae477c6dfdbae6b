use std::future::Future;

use alloy::primitives::{
    Address,
    B256,
};
use thiserror::Error;

use crate::domain::proof::ProofMaterial;

/// Structured call description handed to the wallet boundary: the target
/// contract plus the proof fields in the order the ABI declares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCall {
    /// ConfidentialTransferHelper contract address.
    pub target: Address,
    /// Ordered arguments for `confidentialTransfer`.
    pub material: ProofMaterial,
}

/// Errors surfaced by the wallet boundary.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The user or wallet declined to sign. Carries the wallet's message verbatim.
    #[error("signature rejected: {0}")]
    SignatureRejected(String),

    #[error("broadcast failed: {0}")]
    Broadcast(String),

    #[error("argument encoding failed: {0}")]
    Encoding(String),

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("RPC error: {0}")]
    Rpc(String),
}

/// External wallet boundary. The client never signs transactions itself: it
/// hands a [`TransferCall`] to the wallet, which signs, broadcasts, and
/// returns the transaction hash as soon as the broadcast is accepted. It
/// does not wait for inclusion or finality.
pub trait Wallet: Send + Sync {
    fn sign_and_broadcast(
        &self,
        call: &TransferCall,
    ) -> impl Future<Output = Result<B256, WalletError>> + Send;
}

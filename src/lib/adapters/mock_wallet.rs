use std::sync::Arc;

use alloy::primitives::{
    keccak256,
    B256,
};
use tokio::sync::Mutex;

use crate::ports::wallet::{
    TransferCall,
    Wallet,
    WalletError,
};

/// Scripted outcome for subsequent broadcasts.
#[derive(Debug, Clone)]
pub enum WalletBehavior {
    /// Sign and broadcast; the handle is derived from the submission count.
    Accept,
    /// The user or wallet declines to sign.
    RejectSignature(String),
    /// The network rejects the broadcast.
    RejectBroadcast(String),
}

#[derive(Debug)]
struct Inner {
    behavior: Mutex<WalletBehavior>,
    submissions: Mutex<Vec<TransferCall>>,
}

/// In-memory `Wallet` for tests and demos.
///
/// Records every call description it accepts. It never deduplicates: two
/// broadcasts of the same material produce two recorded submissions with
/// distinct handles, matching the idempotence boundary of the real wallet.
#[derive(Debug, Clone)]
pub struct MockWallet {
    inner: Arc<Inner>,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                behavior: Mutex::new(WalletBehavior::Accept),
                submissions: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Script the outcome of subsequent broadcasts.
    pub async fn set_behavior(&self, behavior: WalletBehavior) {
        *self.inner.behavior.lock().await = behavior;
    }

    /// Every call accepted so far, in broadcast order.
    pub async fn submissions(&self) -> Vec<TransferCall> {
        self.inner.submissions.lock().await.clone()
    }

    pub async fn submission_count(&self) -> usize {
        self.inner.submissions.lock().await.len()
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl Wallet for MockWallet {
    async fn sign_and_broadcast(&self, call: &TransferCall) -> Result<B256, WalletError> {
        let behavior = self.inner.behavior.lock().await.clone();
        match behavior {
            WalletBehavior::Accept => {
                let mut submissions = self.inner.submissions.lock().await;
                submissions.push(call.clone());

                // Distinct handle per broadcast, even for identical material.
                let mut preimage = Vec::with_capacity(32 + 8);
                preimage.extend_from_slice(call.material.nullifier_hash.as_slice());
                preimage.extend_from_slice(&(submissions.len() as u64).to_be_bytes());
                Ok(keccak256(&preimage))
            }
            WalletBehavior::RejectSignature(message) => {
                Err(WalletError::SignatureRejected(message))
            }
            WalletBehavior::RejectBroadcast(message) => {
                Err(WalletError::Broadcast(message))
            }
        }
    }
}

use alloy::primitives::{
    Address,
    B256,
};
use tracing::debug;

use crate::{
    domain::proof::ProofMaterial,
    ports::wallet::{
        TransferCall,
        Wallet,
        WalletError,
    },
};

/// Builds the helper-contract call description from proof material and hands
/// it to the wallet boundary for signing and broadcast.
///
/// Two submissions of the same material are two independent broadcasts; the
/// submitter never deduplicates. Nullifier uniqueness is the ledger's
/// responsibility.
pub struct TransferSubmitter<W> {
    wallet: W,
    helper_address: Address,
}

impl<W: Wallet> TransferSubmitter<W> {
    pub fn new(wallet: W, helper_address: Address) -> Self {
        Self {
            wallet,
            helper_address,
        }
    }

    /// Submit one confidential transfer. Resolves to the transaction hash as
    /// soon as the wallet accepts the broadcast; wallet errors pass through
    /// unchanged.
    pub async fn submit(&self, material: &ProofMaterial) -> Result<B256, WalletError> {
        let call = TransferCall {
            target: self.helper_address,
            material: material.clone(),
        };
        debug!(
            helper = %call.target,
            nullifier_hash = %call.material.nullifier_hash,
            "submitting confidential transfer"
        );
        self.wallet.sign_and_broadcast(&call).await
    }
}

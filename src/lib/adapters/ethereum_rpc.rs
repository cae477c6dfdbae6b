use alloy::{
    network::EthereumWallet,
    primitives::{
        Address,
        B256,
    },
    providers::{
        DynProvider,
        Provider,
        ProviderBuilder,
    },
    signers::local::PrivateKeySigner,
    sol,
};

use crate::ports::{
    ledger::{
        Ledger,
        LedgerError,
        TxStatus,
    },
    wallet::{
        TransferCall,
        Wallet,
        WalletError,
    },
};

// Contract bindings for the Arc testnet helper, generated with Alloy's sol! macro.
sol! {
    #[sol(rpc)]
    interface IConfidentialTransferHelper {
        error InvalidAmount();
        error InvalidProof();
        error InvalidRecipient();

        function confidentialTransfer(
            bytes calldata proof,
            bytes32 root,
            bytes32 nullifierHash,
            address recipient,
            uint256 amount
        ) external returns (bool success);

        event ConfidentialTransferExecuted(bytes32 indexed nullifierHash, bytes32 indexed root);
    }
}

/// Alloy-backed adapter implementing both the wallet and ledger boundaries
/// with a locally held signing key.
///
/// In the browser deployment these boundaries live behind an injected wallet;
/// here a `PrivateKeySigner` plays that role so the same flow runs headless
/// against a node.
pub struct EthereumRpc {
    provider: DynProvider,
    signer_address: Address,
    /// Blocks on top of inclusion before a transaction counts as final.
    confirmation_depth: u64,
}

impl EthereumRpc {
    /// Connect to an HTTP RPC endpoint with a signing key.
    pub async fn new(
        rpc_url: &str,
        private_key: &str,
        confirmation_depth: u64,
    ) -> Result<Self, WalletError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| WalletError::Encoding(format!("invalid private key: {e}")))?;

        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let provider =
            DynProvider::new(ProviderBuilder::new().wallet(wallet).connect_http(
                rpc_url
                    .parse()
                    .map_err(|e| WalletError::Rpc(format!("invalid RPC URL: {e}")))?,
            ));

        Ok(Self {
            provider,
            signer_address,
            confirmation_depth: confirmation_depth.max(1),
        })
    }

    /// Get the signer's address.
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Map an alloy send error onto the wallet taxonomy without swallowing
    /// the original message.
    fn classify_send_error(message: String) -> WalletError {
        let lower = message.to_lowercase();
        if lower.contains("rejected") || lower.contains("denied") {
            WalletError::SignatureRejected(message)
        } else if lower.contains("insufficient funds") {
            WalletError::InsufficientFunds
        } else {
            WalletError::Broadcast(message)
        }
    }
}

impl Wallet for EthereumRpc {
    async fn sign_and_broadcast(&self, call: &TransferCall) -> Result<B256, WalletError> {
        let helper = IConfidentialTransferHelper::new(call.target, &self.provider);
        let material = &call.material;

        // Return as soon as the node accepts the broadcast; confirmation is
        // the status tracker's job.
        let pending = helper
            .confidentialTransfer(
                material.proof.clone(),
                material.root,
                material.nullifier_hash,
                material.recipient,
                material.amount,
            )
            .send()
            .await
            .map_err(|e| Self::classify_send_error(e.to_string()))?;

        Ok(*pending.tx_hash())
    }
}

impl Ledger for EthereumRpc {
    async fn transaction_status(&self, tx_hash: B256) -> Result<TxStatus, LedgerError> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        let Some(receipt) = receipt else {
            return Ok(TxStatus::Pending);
        };

        if !receipt.status() {
            return Ok(TxStatus::Failed {
                reason: "confidentialTransfer reverted".into(),
            });
        }

        let block_number = receipt.block_number.ok_or_else(|| {
            LedgerError::InvalidResponse("receipt without block number".into())
        })?;

        let head = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        if head.saturating_sub(block_number) + 1 >= self.confirmation_depth {
            Ok(TxStatus::Finalized { block_number })
        } else {
            Ok(TxStatus::Included { block_number })
        }
    }
}

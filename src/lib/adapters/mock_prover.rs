use std::time::Duration;

use alloy::primitives::{
    keccak256,
    Bytes,
};
use rand::Rng;

use crate::{
    domain::{
        proof::ProofMaterial,
        transfer::TransferRequest,
    },
    ports::prover::{
        ProofProvider,
        ProverError,
    },
};

/// Byte length of the placeholder proof blob.
const MOCK_PROOF_LEN: usize = 192;

/// Simulated proving latency, matching the original stub.
pub const DEFAULT_PROVING_DELAY: Duration = Duration::from_secs(2);

/// Timer-based stand-in for a real proving backend.
///
/// Suspends for a fixed delay, then returns material whose recipient and
/// amount echo the request. Root and nullifier hash are derived from the
/// request plus a random salt, so repeated calls for the same request yield
/// distinct nullifiers.
pub struct MockProver {
    delay: Duration,
}

impl MockProver {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_PROVING_DELAY,
        }
    }

    /// Override the simulated latency (tests use a short or paused clock).
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockProver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProofProvider for MockProver {
    async fn generate_proof(
        &self,
        request: &TransferRequest,
    ) -> Result<ProofMaterial, ProverError> {
        // Requests are validated at construction; re-check the invariant the
        // circuit would enforce before suspending.
        if request.amount.is_zero() {
            return Err(ProverError::InvalidRequest(
                "amount must be positive".into(),
            ));
        }

        tokio::time::sleep(self.delay).await;

        let salt: [u8; 32] = rand::thread_rng().gen();
        let mut preimage = Vec::with_capacity(20 + 32 + 32);
        preimage.extend_from_slice(request.recipient.as_slice());
        preimage.extend_from_slice(&request.amount.to_be_bytes::<32>());
        preimage.extend_from_slice(&salt);
        let nullifier_hash = keccak256(&preimage);
        let root = keccak256(nullifier_hash);

        // Placeholder bytes where a real backend would put a serialized proof.
        let mut proof = vec![0u8; MOCK_PROOF_LEN];
        rand::thread_rng().fill(proof.as_mut_slice());

        Ok(ProofMaterial::new(
            Bytes::from(proof),
            root,
            nullifier_hash,
            request.recipient,
            request.amount,
        ))
    }
}

use std::future::Future;

use thiserror::Error;

use crate::domain::{
    proof::ProofMaterial,
    transfer::TransferRequest,
};

/// Errors that can occur during proof generation.
#[derive(Debug, Error)]
pub enum ProverError {
    #[error("invalid transfer request: {0}")]
    InvalidRequest(String),

    #[error("witness construction failed: {0}")]
    WitnessError(String),

    #[error("proof generation failed: {0}")]
    ProofGeneration(String),
}

/// Capability trait for producing confidential-transfer proof material.
///
/// Implementations may prove in-process, shell out to an external prover, or
/// call a remote proving service; callers only see a suspend point. A real
/// prover is computationally heavy and must not run on the interaction
/// thread, which is the implementation's concern, not the caller's.
pub trait ProofProvider: Send + Sync {
    /// Generate proof material for a validated transfer request.
    ///
    /// The returned material echoes the request's recipient and amount and
    /// must carry well-formed 32-byte root and nullifier hashes. No partial
    /// results: either complete material or an error.
    fn generate_proof(
        &self,
        request: &TransferRequest,
    ) -> impl Future<Output = Result<ProofMaterial, ProverError>> + Send;
}

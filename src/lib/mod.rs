//! Client-side orchestration for confidential transfers.
//!
//! One submission runs strictly sequentially through three collaborators:
//! a [`ProofProvider`](ports::prover::ProofProvider) produces proof material,
//! a [`Wallet`](ports::wallet::Wallet) signs and broadcasts the helper-contract
//! call, and a [`Ledger`](ports::ledger::Ledger) reports receipt status until
//! a terminal state is reached. [`TransferFlow`] wires them together and
//! exposes the submission lifecycle through a watch channel.
//!
//! All collaborators are capability traits with injected implementations, so
//! the flow is testable with the in-memory adapters under [`adapters`] and
//! deployable with [`adapters::ethereum_rpc::EthereumRpc`].

pub mod adapters;
pub mod config;
pub mod domain;
pub mod flow;
pub mod ports;
pub mod submitter;
pub mod tracker;

pub use config::ClientConfig;
pub use domain::proof::ProofMaterial;
pub use domain::transfer::{TransferRequest, ValidationError};
pub use flow::{FlowConfig, SubmissionState, TransferError, TransferFlow};
pub use submitter::TransferSubmitter;
pub use tracker::{Confirmation, StatusTracker, TrackedState, TrackerConfig, TrackerError};

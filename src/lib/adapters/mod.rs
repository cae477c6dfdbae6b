pub mod ethereum_rpc;
pub mod mock_ledger;
pub mod mock_prover;
pub mod mock_wallet;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use super::amount::parse_fixed_point;

/// Errors raised while validating user input, before any suspension point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),
}

/// A validated confidential transfer request.
///
/// Construction goes through [`TransferRequest::parse`], so every instance
/// carries a positive fixed-point amount and a well-formed 20-byte recipient.
/// Immutable once handed to a proof provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Amount in raw units, scaled to the asset's decimal precision.
    pub amount: U256,
    /// Recipient address.
    pub recipient: Address,
}

impl TransferRequest {
    /// Validate and scale raw form input.
    pub fn parse(
        amount: &str,
        recipient: &str,
        decimals: u32,
    ) -> Result<Self, ValidationError> {
        let amount = parse_fixed_point(amount, decimals)?;
        let recipient: Address = recipient
            .trim()
            .parse()
            .map_err(|e| ValidationError::InvalidRecipient(format!("{e}")))?;
        // The helper contract reverts with InvalidRecipient for the zero
        // address; reject it up front so no proof is wasted on it.
        if recipient == Address::ZERO {
            return Err(ValidationError::InvalidRecipient("zero address".into()));
        }
        Ok(Self { amount, recipient })
    }
}

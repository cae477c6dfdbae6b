use alloy::primitives::{
    Address,
    B256,
    Bytes,
    U256,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Proof material for one confidential transfer.
///
/// Produced by a proof provider and consumed exactly once by the submitter.
/// The nullifier hash is single-use by design, but uniqueness is enforced by
/// the helper contract, not by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofMaterial {
    /// Serialized proof bytes (format is the proving backend's concern).
    pub proof: Bytes,
    /// Merkle root the proof was generated against.
    pub root: B256,
    /// Nullifier hash marking the spent commitment.
    pub nullifier_hash: B256,
    /// Transfer recipient.
    pub recipient: Address,
    /// Amount in raw units, scaled to the asset's decimal precision.
    pub amount: U256,
}

impl ProofMaterial {
    /// Create proof material from its parts.
    pub fn new(
        proof: Bytes,
        root: B256,
        nullifier_hash: B256,
        recipient: Address,
        amount: U256,
    ) -> Self {
        Self {
            proof,
            root,
            nullifier_hash,
            recipient,
            amount,
        }
    }

    /// Public inputs as an array of B256, in the order the helper contract
    /// declares them after the proof blob.
    pub fn public_inputs_as_array(&self) -> [B256; 4] {
        [
            self.root,
            self.nullifier_hash,
            B256::left_padding_from(self.recipient.as_slice()),
            self.amount.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_inputs_order_and_padding() {
        let recipient = Address::repeat_byte(0xab);
        let material = ProofMaterial::new(
            Bytes::from(vec![1u8; 192]),
            B256::repeat_byte(0x01),
            B256::repeat_byte(0x02),
            recipient,
            U256::from(100_000_000u64),
        );

        let inputs = material.public_inputs_as_array();
        assert_eq!(inputs[0], B256::repeat_byte(0x01));
        assert_eq!(inputs[1], B256::repeat_byte(0x02));
        assert_eq!(inputs[2], B256::left_padding_from(recipient.as_slice()));
        assert_eq!(&inputs[2][..12], &[0u8; 12]);
        assert_eq!(inputs[3], B256::from(U256::from(100_000_000u64)));
    }
}

pub mod amount;
pub mod proof;
pub mod transfer;
